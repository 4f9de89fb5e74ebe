use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::error::BoardError;
use crate::identity::Authenticated;
use crate::jobs::{JobId, JobRepository};

use super::domain::{ApplicationId, ApplicationSubmission, StatusUpdate};
use super::repository::ApplicationRepository;
use super::service::ApplicationService;

type SharedService<J, A> = Arc<ApplicationService<J, A>>;

/// Router builder exposing submission, review and listing endpoints.
pub fn application_router<J, A>(service: SharedService<J, A>) -> Router
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/applications", post(submit_handler::<J, A>))
        .route("/api/applications/my", get(applicant_handler::<J, A>))
        .route("/api/applications/employer", get(employer_handler::<J, A>))
        .route("/api/applications/all", get(all_handler::<J, A>))
        .route("/api/applications/job/:job_id", get(job_handler::<J, A>))
        .route("/api/applications/:application_id/status", put(status_handler::<J, A>))
        .with_state(service)
}

pub(crate) async fn submit_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Authenticated(principal): Authenticated,
    submission: Result<Json<ApplicationSubmission>, JsonRejection>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let Json(submission) = match submission {
        Ok(submission) => submission,
        Err(rejection) => return BoardError::from(rejection).into_response(),
    };
    match service.submit(&principal, submission) {
        Ok(application) => (
            StatusCode::CREATED,
            Json(json!({ "application": application })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn applicant_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Authenticated(principal): Authenticated,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.list_for_applicant(&principal) {
        Ok(applications) => Json(json!({ "applications": applications })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn employer_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Authenticated(principal): Authenticated,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.list_for_employer(&principal) {
        Ok(applications) => Json(json!({ "applications": applications })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn all_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Authenticated(principal): Authenticated,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.list_all(&principal) {
        Ok(applications) => Json(json!({ "applications": applications })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn job_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Authenticated(principal): Authenticated,
    job_id: Result<Path<u64>, PathRejection>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let Path(job_id) = match job_id {
        Ok(job_id) => job_id,
        Err(rejection) => return BoardError::from(rejection).into_response(),
    };
    match service.list_for_job(&principal, JobId(job_id)) {
        Ok(applications) => Json(json!({ "applications": applications })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn status_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Authenticated(principal): Authenticated,
    application_id: Result<Path<u64>, PathRejection>,
    update: Result<Json<StatusUpdate>, JsonRejection>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let (application_id, update) = match (application_id, update) {
        (Ok(Path(application_id)), Ok(Json(update))) => (application_id, update),
        (Err(rejection), _) => return BoardError::from(rejection).into_response(),
        (_, Err(rejection)) => return BoardError::from(rejection).into_response(),
    };
    let requested = update.requested();
    match service.set_status(&principal, ApplicationId(application_id), &requested) {
        Ok(application) => Json(json!({ "application": application })).into_response(),
        Err(err) => err.into_response(),
    }
}
