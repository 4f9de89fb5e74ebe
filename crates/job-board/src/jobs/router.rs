use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::error::BoardError;
use crate::identity::{Authenticated, MaybeAuthenticated};

use super::domain::{JobId, JobPosting};
use super::query::JobListingParams;
use super::repository::JobRepository;
use super::service::JobService;

/// Router builder exposing the job posting endpoints.
pub fn job_router<R>(service: Arc<JobService<R>>) -> Router
where
    R: JobRepository + 'static,
{
    Router::new()
        .route("/api/jobs", get(list_handler::<R>).post(create_handler::<R>))
        .route("/api/jobs/all", get(list_all_handler::<R>))
        .route(
            "/api/jobs/:job_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<JobService<R>>>,
    params: Result<Query<JobListingParams>, QueryRejection>,
) -> Response
where
    R: JobRepository + 'static,
{
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return BoardError::from(rejection).into_response(),
    };
    let (filter, page) = params.into_parts();
    match service.list_jobs(&filter, page) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn list_all_handler<R>(
    State(service): State<Arc<JobService<R>>>,
    Authenticated(principal): Authenticated,
) -> Response
where
    R: JobRepository + 'static,
{
    match service.list_all_jobs(&principal) {
        Ok(jobs) => (StatusCode::OK, Json(json!({ "jobs": jobs }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<JobService<R>>>,
    MaybeAuthenticated(principal): MaybeAuthenticated,
    job_id: Result<Path<u64>, PathRejection>,
) -> Response
where
    R: JobRepository + 'static,
{
    let Path(job_id) = match job_id {
        Ok(job_id) => job_id,
        Err(rejection) => return BoardError::from(rejection).into_response(),
    };
    match service.get_job(principal.as_ref(), JobId(job_id)) {
        Ok(job) => (StatusCode::OK, Json(json!({ "job": job }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<JobService<R>>>,
    Authenticated(principal): Authenticated,
    posting: Result<Json<JobPosting>, JsonRejection>,
) -> Response
where
    R: JobRepository + 'static,
{
    let Json(posting) = match posting {
        Ok(posting) => posting,
        Err(rejection) => return BoardError::from(rejection).into_response(),
    };
    match service.create_job(&principal, posting) {
        Ok(job) => (StatusCode::CREATED, Json(json!({ "job": job }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<JobService<R>>>,
    Authenticated(principal): Authenticated,
    job_id: Result<Path<u64>, PathRejection>,
    posting: Result<Json<JobPosting>, JsonRejection>,
) -> Response
where
    R: JobRepository + 'static,
{
    let (job_id, posting) = match (job_id, posting) {
        (Ok(Path(job_id)), Ok(Json(posting))) => (job_id, posting),
        (Err(rejection), _) => return BoardError::from(rejection).into_response(),
        (_, Err(rejection)) => return BoardError::from(rejection).into_response(),
    };
    match service.update_job(&principal, JobId(job_id), posting) {
        Ok(job) => (StatusCode::OK, Json(json!({ "job": job }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<JobService<R>>>,
    Authenticated(principal): Authenticated,
    job_id: Result<Path<u64>, PathRejection>,
) -> Response
where
    R: JobRepository + 'static,
{
    let Path(job_id) = match job_id {
        Ok(job_id) => job_id,
        Err(rejection) => return BoardError::from(rejection).into_response(),
    };
    match service.delete_job(&principal, JobId(job_id)) {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "job deleted successfully" })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
