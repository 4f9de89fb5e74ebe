//! In-memory Resource Store used by the bundled server, the demo and tests.
//!
//! Each repository guards its table with a single mutex, so every operation is
//! one critical section. The application table keeps a unique index on
//! `(job_id, applicant_id)` that is checked and written under the same lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::applications::{
    ApplicationFilter, ApplicationId, ApplicationRepository, JobApplication, NewApplication,
};
use crate::error::RepositoryError;
use crate::identity::SubjectId;
use crate::jobs::query::newest_first;
use crate::jobs::{Job, JobFilter, JobId, JobRepository, ListingScope, NewJob, Pagination};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

#[derive(Debug, Default)]
struct JobTable {
    last_id: u64,
    rows: BTreeMap<JobId, Job>,
}

#[derive(Debug, Default)]
pub struct InMemoryJobRepository {
    table: Mutex<JobTable>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, job: NewJob) -> Result<Job, RepositoryError> {
        let mut table = lock(&self.table)?;
        table.last_id += 1;
        let id = JobId(table.last_id);
        let record = Job {
            id,
            posting: job.posting,
            employer_id: job.employer_id,
            is_active: true,
            created_at: job.created_at,
            updated_at: job.created_at,
        };
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    fn update(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut table = lock(&self.table)?;
        match table.rows.get_mut(&job.id) {
            Some(slot) => {
                *slot = job.clone();
                Ok(job)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let table = lock(&self.table)?;
        Ok(table.rows.get(&id).cloned())
    }

    fn search(
        &self,
        filter: &JobFilter,
        scope: ListingScope,
        page: Option<Pagination>,
    ) -> Result<(Vec<Job>, usize), RepositoryError> {
        let table = lock(&self.table)?;
        let mut matches: Vec<Job> = table
            .rows
            .values()
            .filter(|job| scope.admits(job) && filter.matches(job))
            .cloned()
            .collect();
        drop(table);

        matches.sort_by(newest_first);
        let total = matches.len();
        let jobs = match page {
            Some(page) => page.apply(matches),
            None => matches,
        };
        Ok((jobs, total))
    }

    fn owned_by(&self, employer: &SubjectId) -> Result<Vec<Job>, RepositoryError> {
        let table = lock(&self.table)?;
        let mut jobs: Vec<Job> = table
            .rows
            .values()
            .filter(|job| job.is_owned_by(employer))
            .cloned()
            .collect();
        jobs.sort_by(newest_first);
        Ok(jobs)
    }
}

#[derive(Debug, Default)]
struct ApplicationTable {
    last_id: u64,
    rows: BTreeMap<ApplicationId, JobApplication>,
    by_pair: HashMap<(JobId, SubjectId), ApplicationId>,
}

#[derive(Debug, Default)]
pub struct InMemoryApplicationRepository {
    table: Mutex<ApplicationTable>,
}

impl InMemoryApplicationRepository {
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(lock(&self.table)?.rows.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: NewApplication) -> Result<JobApplication, RepositoryError> {
        let mut table = lock(&self.table)?;
        let key = (application.job_id, application.applicant_id.clone());
        if table.by_pair.contains_key(&key) {
            return Err(RepositoryError::Conflict);
        }

        table.last_id += 1;
        let id = ApplicationId(table.last_id);
        let record = JobApplication::from_new(id, application);
        table.by_pair.insert(key, id);
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    fn update(&self, application: JobApplication) -> Result<JobApplication, RepositoryError> {
        let mut table = lock(&self.table)?;
        let Some(slot) = table.rows.get_mut(&application.id) else {
            return Err(RepositoryError::NotFound);
        };
        // The pair is immutable once stored.
        if slot.job_id != application.job_id || slot.applicant_id != application.applicant_id {
            return Err(RepositoryError::Conflict);
        }
        *slot = application.clone();
        Ok(application)
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<JobApplication>, RepositoryError> {
        let table = lock(&self.table)?;
        Ok(table.rows.get(&id).cloned())
    }

    fn find_for_pair(
        &self,
        job_id: JobId,
        applicant: &SubjectId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        let table = lock(&self.table)?;
        Ok(table
            .by_pair
            .get(&(job_id, applicant.clone()))
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    fn list(&self, filter: &ApplicationFilter) -> Result<Vec<JobApplication>, RepositoryError> {
        let table = lock(&self.table)?;
        let mut applications: Vec<JobApplication> = table
            .rows
            .values()
            .filter(|application| filter.matches(application))
            .cloned()
            .collect();
        applications.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right.id.cmp(&left.id))
        });
        Ok(applications)
    }
}
