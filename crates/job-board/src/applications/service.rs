use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::authorization::{ensure, Action};
use crate::error::{BoardError, RepositoryError};
use crate::identity::Principal;
use crate::jobs::service::job_not_found;
use crate::jobs::{Job, JobId, JobRepository};

use super::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, ApplicationWithJob, JobApplication,
    NewApplication,
};
use super::lifecycle::transition;
use super::repository::{ApplicationFilter, ApplicationRepository};

/// Application lifecycle composed over the job and application stores.
pub struct ApplicationService<J, A> {
    jobs: Arc<J>,
    applications: Arc<A>,
}

impl<J, A> ApplicationService<J, A>
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(jobs: Arc<J>, applications: Arc<A>) -> Self {
        Self { jobs, applications }
    }

    /// Apply to a job as `principal`. The new application is always `pending`.
    pub fn submit(
        &self,
        principal: &Principal,
        submission: ApplicationSubmission,
    ) -> Result<JobApplication, BoardError> {
        ensure(principal, Action::CreateApplication, None)?;

        let job = self
            .jobs
            .fetch(submission.job_id)?
            .filter(|job| job.is_active)
            .ok_or_else(|| job_not_found(submission.job_id))?;

        // Fast path; the store re-checks the pair atomically on insert.
        if self
            .applications
            .find_for_pair(job.id, &principal.subject_id)?
            .is_some()
        {
            return Err(already_applied(job.id));
        }

        let application = self
            .applications
            .insert(NewApplication {
                job_id: job.id,
                applicant_id: principal.subject_id.clone(),
                message: submission.message,
                created_at: Utc::now(),
            })
            .map_err(|err| match err {
                RepositoryError::Conflict => already_applied(job.id),
                other => other.into(),
            })?;

        info!(
            application_id = %application.id,
            job_id = %application.job_id,
            applicant = %application.applicant_id,
            "application submitted"
        );
        Ok(application)
    }

    /// Change an application's status as the job's owner or an admin.
    ///
    /// Any status may be set from any other, terminal ones included.
    pub fn set_status(
        &self,
        principal: &Principal,
        id: ApplicationId,
        new_status: &str,
    ) -> Result<JobApplication, BoardError> {
        let mut application = self
            .applications
            .fetch(id)?
            .ok_or_else(|| application_not_found(id))?;
        let job = self.job_for(&application)?;

        ensure(
            principal,
            Action::UpdateApplicationStatus,
            Some(&job.employer_id),
        )?;
        let new_status: ApplicationStatus = new_status.parse()?;

        let change = transition(application.status, new_status);
        if change.leaves_terminal() {
            warn!(
                application_id = %application.id,
                from = %change.from,
                to = %change.to,
                "application leaves a terminal status"
            );
        }

        application.status = new_status;
        application.updated_at = Utc::now();
        let application = self.applications.update(application)?;

        info!(
            application_id = %application.id,
            status = %application.status,
            subject = %principal.subject_id,
            "application status updated"
        );
        Ok(application)
    }

    /// Applications submitted by `principal`, each with its job.
    pub fn list_for_applicant(
        &self,
        principal: &Principal,
    ) -> Result<Vec<ApplicationWithJob>, BoardError> {
        ensure(principal, Action::ListOwnApplications, None)?;
        let applications = self
            .applications
            .list(&ApplicationFilter::Applicant(principal.subject_id.clone()))?;
        self.expand(applications)
    }

    /// Applications to any job posted by `principal`, each with its job.
    pub fn list_for_employer(
        &self,
        principal: &Principal,
    ) -> Result<Vec<ApplicationWithJob>, BoardError> {
        ensure(principal, Action::ListEmployerApplications, None)?;
        let jobs = self.jobs.owned_by(&principal.subject_id)?;
        if jobs.is_empty() {
            return Ok(Vec::new());
        }

        let ids = jobs.iter().map(|job| job.id).collect();
        let applications = self.applications.list(&ApplicationFilter::Jobs(ids))?;
        let jobs: HashMap<JobId, Job> = jobs.into_iter().map(|job| (job.id, job)).collect();
        attach_jobs(applications, &jobs)
    }

    /// Applications to one job, visible to its owner or an admin.
    pub fn list_for_job(
        &self,
        principal: &Principal,
        job_id: JobId,
    ) -> Result<Vec<JobApplication>, BoardError> {
        let job = self
            .jobs
            .fetch(job_id)?
            .ok_or_else(|| job_not_found(job_id))?;
        ensure(principal, Action::ViewJobApplications, Some(&job.employer_id))?;

        Ok(self
            .applications
            .list(&ApplicationFilter::Jobs(vec![job_id]))?)
    }

    /// Every application. Admin only.
    pub fn list_all(&self, principal: &Principal) -> Result<Vec<ApplicationWithJob>, BoardError> {
        ensure(principal, Action::ListAllApplications, None)?;
        let applications = self.applications.list(&ApplicationFilter::All)?;
        self.expand(applications)
    }

    fn job_for(&self, application: &JobApplication) -> Result<Job, BoardError> {
        self.jobs
            .fetch(application.job_id)?
            .ok_or_else(|| dangling_job(application))
    }

    fn expand(
        &self,
        applications: Vec<JobApplication>,
    ) -> Result<Vec<ApplicationWithJob>, BoardError> {
        let mut jobs = HashMap::new();
        for application in &applications {
            if !jobs.contains_key(&application.job_id) {
                let job = self.job_for(application)?;
                jobs.insert(job.id, job);
            }
        }
        attach_jobs(applications, &jobs)
    }
}

fn attach_jobs(
    applications: Vec<JobApplication>,
    jobs: &HashMap<JobId, Job>,
) -> Result<Vec<ApplicationWithJob>, BoardError> {
    applications
        .into_iter()
        .map(|application| {
            let job = jobs
                .get(&application.job_id)
                .cloned()
                .ok_or_else(|| dangling_job(&application))?;
            Ok(ApplicationWithJob { application, job })
        })
        .collect()
}

fn application_not_found(id: ApplicationId) -> BoardError {
    BoardError::not_found(format!("application {id} not found"))
}

fn already_applied(job_id: JobId) -> BoardError {
    BoardError::conflict(format!("already applied to job {job_id}"))
}

// Jobs are only soft deleted, so a missing job means the store lost integrity.
fn dangling_job(application: &JobApplication) -> BoardError {
    BoardError::Unavailable(format!(
        "application {} references missing job {}",
        application.id, application.job_id
    ))
}
