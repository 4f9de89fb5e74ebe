use crate::error::RepositoryError;
use crate::identity::SubjectId;
use crate::jobs::JobId;

use super::domain::{ApplicationId, JobApplication, NewApplication};

/// Selection of applications to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationFilter {
    Applicant(SubjectId),
    Jobs(Vec<JobId>),
    All,
}

impl ApplicationFilter {
    pub fn matches(&self, application: &JobApplication) -> bool {
        match self {
            ApplicationFilter::Applicant(applicant) => application.applicant_id == *applicant,
            ApplicationFilter::Jobs(jobs) => jobs.contains(&application.job_id),
            ApplicationFilter::All => true,
        }
    }
}

/// Storage abstraction for job applications.
///
/// Implementations own the `(job_id, applicant_id)` uniqueness invariant:
/// `insert` must fail with [`RepositoryError::Conflict`] when the pair already
/// exists, atomically with the write, so concurrent duplicates cannot both land.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: NewApplication) -> Result<JobApplication, RepositoryError>;

    /// Replace a stored application. Fails with [`RepositoryError::NotFound`] for unknown ids.
    fn update(&self, application: JobApplication) -> Result<JobApplication, RepositoryError>;

    fn fetch(&self, id: ApplicationId) -> Result<Option<JobApplication>, RepositoryError>;

    fn find_for_pair(
        &self,
        job_id: JobId,
        applicant: &SubjectId,
    ) -> Result<Option<JobApplication>, RepositoryError>;

    /// Matching applications, newest first.
    fn list(&self, filter: &ApplicationFilter) -> Result<Vec<JobApplication>, RepositoryError>;
}
