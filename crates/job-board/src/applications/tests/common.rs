use std::sync::Arc;

use axum::{Extension, Router};

use crate::applications::{
    application_router, ApplicationFilter, ApplicationId, ApplicationRepository,
    ApplicationService, ApplicationSubmission, JobApplication, NewApplication,
};
use crate::error::RepositoryError;
use crate::identity::{Principal, Role, SubjectId};
use crate::jobs::tests::common::verifier;
use crate::jobs::{Job, JobId, JobRepository, JobService};
use crate::memory::{InMemoryApplicationRepository, InMemoryJobRepository};

pub(super) use crate::jobs::tests::common::{posting, read_json_body, request};

pub(super) type MemoryService =
    ApplicationService<InMemoryJobRepository, InMemoryApplicationRepository>;

/// Services sharing one pair of in-memory stores.
pub(super) struct Board {
    pub(super) jobs: JobService<InMemoryJobRepository>,
    pub(super) applications: MemoryService,
    pub(super) job_store: Arc<InMemoryJobRepository>,
    pub(super) application_store: Arc<InMemoryApplicationRepository>,
}

pub(super) fn board() -> Board {
    let job_store = Arc::new(InMemoryJobRepository::default());
    let application_store = Arc::new(InMemoryApplicationRepository::default());
    Board {
        jobs: JobService::new(job_store.clone()),
        applications: ApplicationService::new(job_store.clone(), application_store.clone()),
        job_store,
        application_store,
    }
}

pub(super) fn employer(subject: &str) -> Principal {
    Principal::new(subject, Role::Employer)
}

pub(super) fn seeker(subject: &str) -> Principal {
    Principal::new(subject, Role::JobSeeker)
}

pub(super) fn admin() -> Principal {
    Principal::new("root", Role::Admin)
}

pub(super) fn submission(job_id: JobId) -> ApplicationSubmission {
    ApplicationSubmission {
        job_id,
        message: "I would love to join".to_string(),
    }
}

impl Board {
    pub(super) fn post(&self, owner: &str, title: &str) -> Job {
        self.jobs
            .create_job(&employer(owner), posting(title, "IT"))
            .expect("post job")
    }

    pub(super) fn apply(&self, applicant: &str, job_id: JobId) -> JobApplication {
        self.applications
            .submit(&seeker(applicant), submission(job_id))
            .expect("submit application")
    }

    pub(super) fn router(&self) -> Router {
        let service = ApplicationService::new(
            self.job_store.clone(),
            self.application_store.clone(),
        );
        application_router(Arc::new(service)).layer(Extension(verifier()))
    }
}

pub(super) fn router_with_service<J, A>(service: ApplicationService<J, A>) -> Router
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    application_router(Arc::new(service)).layer(Extension(verifier()))
}

/// Store whose pre-check misses the duplicate but whose insert still
/// enforces uniqueness, as happens when two submissions race.
#[derive(Default)]
pub(super) struct RacingRepository {
    pub(super) inner: InMemoryApplicationRepository,
}

impl ApplicationRepository for RacingRepository {
    fn insert(&self, application: NewApplication) -> Result<JobApplication, RepositoryError> {
        self.inner.insert(application)
    }

    fn update(&self, application: JobApplication) -> Result<JobApplication, RepositoryError> {
        self.inner.update(application)
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<JobApplication>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn find_for_pair(
        &self,
        _job_id: JobId,
        _applicant: &SubjectId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        Ok(None)
    }

    fn list(&self, filter: &ApplicationFilter) -> Result<Vec<JobApplication>, RepositoryError> {
        self.inner.list(filter)
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _application: NewApplication) -> Result<JobApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _application: JobApplication) -> Result<JobApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: ApplicationId) -> Result<Option<JobApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_for_pair(
        &self,
        _job_id: JobId,
        _applicant: &SubjectId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _filter: &ApplicationFilter) -> Result<Vec<JobApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
