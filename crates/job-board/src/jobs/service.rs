use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::authorization::{authorize, ensure, Action};
use crate::error::BoardError;
use crate::identity::Principal;

use super::domain::{Job, JobId, JobPosting, NewJob};
use super::query::{JobFilter, JobPage, ListingScope, Pagination};
use super::repository::JobRepository;

/// Job posting operations, each gated by the authorization engine.
pub struct JobService<R> {
    repository: Arc<R>,
}

impl<R> JobService<R>
where
    R: JobRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Publish a new, active posting owned by `principal`.
    pub fn create_job(
        &self,
        principal: &Principal,
        posting: JobPosting,
    ) -> Result<Job, BoardError> {
        ensure(principal, Action::CreateJob, None)?;
        posting.validate()?;

        let job = self.repository.insert(NewJob {
            posting,
            employer_id: principal.subject_id.clone(),
            created_at: Utc::now(),
        })?;

        info!(job_id = %job.id, employer = %job.employer_id, "job created");
        Ok(job)
    }

    /// Fetch a posting. Inactive postings are only visible to their owner or
    /// an admin; everyone else is told they do not exist.
    pub fn get_job(&self, principal: Option<&Principal>, id: JobId) -> Result<Job, BoardError> {
        let job = self.load(id)?;
        if job.is_active {
            return Ok(job);
        }

        let visible = principal.is_some_and(|principal| {
            authorize(principal, Action::ViewInactiveJob, Some(&job.employer_id)).is_allowed()
        });
        if visible {
            Ok(job)
        } else {
            Err(job_not_found(id))
        }
    }

    /// Replace every mutable field of a posting.
    pub fn update_job(
        &self,
        principal: &Principal,
        id: JobId,
        posting: JobPosting,
    ) -> Result<Job, BoardError> {
        let mut job = self.load(id)?;
        ensure(principal, Action::UpdateJob, Some(&job.employer_id))?;
        posting.validate()?;

        job.posting = posting;
        job.updated_at = Utc::now();
        let job = self.repository.update(job)?;

        info!(job_id = %job.id, subject = %principal.subject_id, "job updated");
        Ok(job)
    }

    /// Soft delete: the posting stays addressable but leaves public listings.
    /// Deleting an already inactive posting is a no-op.
    pub fn delete_job(&self, principal: &Principal, id: JobId) -> Result<Job, BoardError> {
        let mut job = self.load(id)?;
        ensure(principal, Action::DeleteJob, Some(&job.employer_id))?;

        if !job.is_active {
            return Ok(job);
        }

        job.is_active = false;
        job.updated_at = Utc::now();
        let job = self.repository.update(job)?;

        info!(job_id = %job.id, subject = %principal.subject_id, "job deactivated");
        Ok(job)
    }

    /// Public listing over active postings.
    pub fn list_jobs(&self, filter: &JobFilter, page: Pagination) -> Result<JobPage, BoardError> {
        let (jobs, total) = self
            .repository
            .search(filter, ListingScope::ActiveOnly, Some(page))?;

        Ok(JobPage {
            jobs,
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    /// Every posting including inactive ones. Admin only.
    pub fn list_all_jobs(&self, principal: &Principal) -> Result<Vec<Job>, BoardError> {
        ensure(principal, Action::ListAllJobs, None)?;
        let (jobs, _) =
            self.repository
                .search(&JobFilter::default(), ListingScope::IncludeInactive, None)?;
        Ok(jobs)
    }

    fn load(&self, id: JobId) -> Result<Job, BoardError> {
        self.repository.fetch(id)?.ok_or_else(|| job_not_found(id))
    }
}

pub(crate) fn job_not_found(id: JobId) -> BoardError {
    BoardError::not_found(format!("job {id} not found"))
}
