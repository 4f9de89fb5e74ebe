use super::common::*;
use crate::applications::{
    ApplicationId, ApplicationRepository, ApplicationService, ApplicationStatus,
};
use crate::error::ErrorKind;
use crate::jobs::{JobId, JobService};
use crate::memory::InMemoryJobRepository;
use std::sync::Arc;

#[test]
fn submission_starts_pending() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");

    let application = board.apply("alex", job.id);

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.job_id, job.id);
    assert_eq!(application.applicant_id.as_str(), "alex");
    assert_eq!(application.message, "I would love to join");
}

#[test]
fn submitting_to_a_missing_job_is_not_found() {
    let board = board();

    let err = board
        .applications
        .submit(&seeker("alex"), submission(JobId(7)))
        .expect_err("no such job");

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(board.application_store.is_empty(), Ok(true));
}

#[test]
fn submitting_to_a_deleted_job_is_not_found() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");
    board
        .jobs
        .delete_job(&employer("acme"), job.id)
        .expect("delete");

    let err = board
        .applications
        .submit(&seeker("alex"), submission(job.id))
        .expect_err("inactive job");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn only_job_seekers_may_apply() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");

    let err = board
        .applications
        .submit(&employer("globex"), submission(job.id))
        .expect_err("employers do not apply");
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[test]
fn second_submission_for_the_same_job_conflicts() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");
    board.apply("alex", job.id);

    let err = board
        .applications
        .submit(&seeker("alex"), submission(job.id))
        .expect_err("duplicate");
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(board.application_store.len(), Ok(1));

    let other = board.post("acme", "Go Engineer");
    board.apply("alex", other.id);
    board.apply("sam", job.id);
    assert_eq!(board.application_store.len(), Ok(3));
}

#[test]
fn store_level_uniqueness_backs_up_the_pre_check() {
    let jobs = Arc::new(InMemoryJobRepository::default());
    let applications = Arc::new(RacingRepository::default());
    let job_service = JobService::new(jobs.clone());
    let job = job_service
        .create_job(&employer("acme"), posting("Rust Engineer", "IT"))
        .expect("post job");
    let service = ApplicationService::new(jobs, applications.clone());

    service
        .submit(&seeker("alex"), submission(job.id))
        .expect("first submission");
    let err = service
        .submit(&seeker("alex"), submission(job.id))
        .expect_err("store rejects the duplicate");

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.to_string(), format!("conflict: already applied to job {}", job.id));
    assert_eq!(applications.inner.len(), Ok(1));
}

#[test]
fn job_owner_decides_an_application() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");
    let application = board.apply("alex", job.id);

    let updated = board
        .applications
        .set_status(&employer("acme"), application.id, "accepted")
        .expect("owner may decide");

    assert_eq!(updated.status, ApplicationStatus::Accepted);
    let stored = board
        .application_store
        .fetch(application.id)
        .expect("fetch")
        .expect("stored");
    assert_eq!(stored.status, ApplicationStatus::Accepted);
}

#[test]
fn other_employers_and_applicants_cannot_decide() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");
    let application = board.apply("alex", job.id);

    for principal in [employer("globex"), seeker("alex")] {
        let err = board
            .applications
            .set_status(&principal, application.id, "accepted")
            .expect_err("not the job owner");
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    let updated = board
        .applications
        .set_status(&admin(), application.id, "rejected")
        .expect("admin may decide");
    assert_eq!(updated.status, ApplicationStatus::Rejected);
}

#[test]
fn unknown_statuses_are_invalid() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");
    let application = board.apply("alex", job.id);

    let err = board
        .applications
        .set_status(&employer("acme"), application.id, "approved")
        .expect_err("approved is not a status");
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let stored = board
        .application_store
        .fetch(application.id)
        .expect("fetch")
        .expect("stored");
    assert_eq!(stored.status, ApplicationStatus::Pending);
}

#[test]
fn set_status_checks_existence_then_ownership_then_value() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");
    let application = board.apply("alex", job.id);

    let err = board
        .applications
        .set_status(&employer("globex"), ApplicationId(99), "approved")
        .expect_err("missing application");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = board
        .applications
        .set_status(&employer("globex"), application.id, "approved")
        .expect_err("ownership before value");
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[test]
fn decided_applications_can_be_reopened() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");
    let application = board.apply("alex", job.id);
    let owner = employer("acme");

    board
        .applications
        .set_status(&owner, application.id, "rejected")
        .expect("reject");
    let reopened = board
        .applications
        .set_status(&owner, application.id, "pending")
        .expect("reopen");
    assert_eq!(reopened.status, ApplicationStatus::Pending);

    let accepted = board
        .applications
        .set_status(&owner, application.id, "accepted")
        .expect("accept");
    let reversed = board
        .applications
        .set_status(&owner, application.id, "rejected")
        .expect("reverse");
    assert_eq!(reversed.status, ApplicationStatus::Rejected);
    assert!(reversed.updated_at >= accepted.updated_at);
}

#[test]
fn applicants_see_their_own_applications_with_jobs() {
    let board = board();
    let rust = board.post("acme", "Rust Engineer");
    let go = board.post("globex", "Go Engineer");
    board.apply("alex", rust.id);
    board.apply("alex", go.id);
    board.apply("sam", rust.id);

    let mine = board
        .applications
        .list_for_applicant(&seeker("alex"))
        .expect("own listing");

    assert_eq!(mine.len(), 2);
    assert!(mine
        .iter()
        .all(|entry| entry.application.applicant_id.as_str() == "alex"));
    assert_eq!(mine[0].job.posting.title, "Go Engineer", "newest first");
}

#[test]
fn applicants_still_see_applications_to_deleted_jobs() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");
    board.apply("alex", job.id);
    board
        .jobs
        .delete_job(&employer("acme"), job.id)
        .expect("delete");

    let mine = board
        .applications
        .list_for_applicant(&seeker("alex"))
        .expect("own listing");
    assert_eq!(mine.len(), 1);
    assert!(!mine[0].job.is_active);
}

#[test]
fn employers_see_applications_to_their_jobs_only() {
    let board = board();
    let rust = board.post("acme", "Rust Engineer");
    let go = board.post("globex", "Go Engineer");
    board.apply("alex", rust.id);
    board.apply("sam", rust.id);
    board.apply("alex", go.id);

    let acme = board
        .applications
        .list_for_employer(&employer("acme"))
        .expect("employer listing");
    assert_eq!(acme.len(), 2);
    assert!(acme.iter().all(|entry| entry.job.id == rust.id));

    let empty = board
        .applications
        .list_for_employer(&employer("initech"))
        .expect("no jobs, no applications");
    assert!(empty.is_empty());

    let err = board
        .applications
        .list_for_employer(&seeker("alex"))
        .expect_err("seekers have no employer view");
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[test]
fn per_job_listing_requires_ownership() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");
    board.apply("alex", job.id);
    board.apply("sam", job.id);

    let listed = board
        .applications
        .list_for_job(&employer("acme"), job.id)
        .expect("owner listing");
    assert_eq!(listed.len(), 2);

    let err = board
        .applications
        .list_for_job(&employer("globex"), job.id)
        .expect_err("not the owner");
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let err = board
        .applications
        .list_for_job(&employer("globex"), JobId(404))
        .expect_err("missing job");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(
        board
            .applications
            .list_for_job(&admin(), job.id)
            .expect("admin listing")
            .len(),
        2
    );
}

#[test]
fn list_all_is_admin_only() {
    let board = board();
    let job = board.post("acme", "Rust Engineer");
    board.apply("alex", job.id);

    assert_eq!(board.applications.list_all(&admin()).expect("admin").len(), 1);
    let err = board
        .applications
        .list_all(&employer("acme"))
        .expect_err("employers cannot list everything");
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[test]
fn store_outage_surfaces_as_unavailable() {
    let jobs = Arc::new(InMemoryJobRepository::default());
    let job = JobService::new(jobs.clone())
        .create_job(&employer("acme"), posting("Rust Engineer", "IT"))
        .expect("post job");
    let service = ApplicationService::new(jobs, Arc::new(UnavailableRepository));

    let err = service
        .submit(&seeker("alex"), submission(job.id))
        .expect_err("store offline");
    assert_eq!(err.kind(), ErrorKind::Unavailable);
}
