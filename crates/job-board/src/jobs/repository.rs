use crate::error::RepositoryError;
use crate::identity::SubjectId;

use super::domain::{Job, JobId, NewJob};
use super::query::{JobFilter, ListingScope, Pagination};

/// Storage abstraction for job postings.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: NewJob) -> Result<Job, RepositoryError>;

    /// Replace a stored job. Fails with [`RepositoryError::NotFound`] for unknown ids.
    fn update(&self, job: Job) -> Result<Job, RepositoryError>;

    fn fetch(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    /// Matching jobs in newest-first order plus the match count before
    /// pagination. `page = None` returns every match.
    fn search(
        &self,
        filter: &JobFilter,
        scope: ListingScope,
        page: Option<Pagination>,
    ) -> Result<(Vec<Job>, usize), RepositoryError>;

    /// Every job, active or not, posted by `employer`.
    fn owned_by(&self, employer: &SubjectId) -> Result<Vec<Job>, RepositoryError>;
}
