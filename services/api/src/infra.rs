use job_board::applications::{ApplicationService, ApplicationSubmission};
use job_board::config::TokenGrant;
use job_board::error::BoardError;
use job_board::identity::{AuthenticationError, CredentialVerifier, Principal, Role};
use job_board::jobs::{JobPosting, JobService};
use job_board::memory::{InMemoryApplicationRepository, InMemoryJobRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type MemoryJobService = JobService<InMemoryJobRepository>;
pub(crate) type MemoryApplicationService =
    ApplicationService<InMemoryJobRepository, InMemoryApplicationRepository>;

/// Both services over one pair of in-memory stores.
#[derive(Clone)]
pub(crate) struct Board {
    pub(crate) jobs: Arc<MemoryJobService>,
    pub(crate) applications: Arc<MemoryApplicationService>,
}

impl Board {
    pub(crate) fn in_memory() -> Self {
        let job_store = Arc::new(InMemoryJobRepository::default());
        let application_store = Arc::new(InMemoryApplicationRepository::default());
        Self {
            jobs: Arc::new(JobService::new(job_store.clone())),
            applications: Arc::new(ApplicationService::new(job_store, application_store)),
        }
    }
}

/// Credential verifier backed by the `APP_API_TOKENS` grants.
#[derive(Debug, Default)]
pub(crate) struct StaticTokenVerifier {
    grants: HashMap<String, Principal>,
}

impl StaticTokenVerifier {
    pub(crate) fn from_grants<'a>(grants: impl IntoIterator<Item = &'a TokenGrant>) -> Self {
        Self {
            grants: grants
                .into_iter()
                .map(|grant| (grant.token.clone(), grant.principal.clone()))
                .collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.grants.len()
    }
}

impl CredentialVerifier for StaticTokenVerifier {
    fn verify(&self, credential: &str) -> Result<Principal, AuthenticationError> {
        self.grants
            .get(credential)
            .cloned()
            .ok_or(AuthenticationError::InvalidCredential)
    }
}

pub(crate) const FIXTURE_ADMIN: &str = "admin";
pub(crate) const FIXTURE_EMPLOYERS: [&str; 2] = ["employer-1", "employer-2"];
pub(crate) const FIXTURE_SEEKERS: [&str; 3] = ["seeker-1", "seeker-2", "seeker-3"];

/// Development tokens for the fixture users: `<subject>-token`.
pub(crate) fn fixture_grants() -> Vec<TokenGrant> {
    let admin = std::iter::once((FIXTURE_ADMIN, Role::Admin));
    let employers = FIXTURE_EMPLOYERS.iter().map(|subject| (*subject, Role::Employer));
    let seekers = FIXTURE_SEEKERS.iter().map(|subject| (*subject, Role::JobSeeker));

    admin
        .chain(employers)
        .chain(seekers)
        .map(|(subject, role)| TokenGrant {
            token: format!("{subject}-token"),
            principal: Principal::new(subject, role),
        })
        .collect()
}

struct FixtureJob {
    employer: usize,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    employment_type: &'static str,
    category: &'static str,
}

const FIXTURE_JOBS: [FixtureJob; 8] = [
    FixtureJob {
        employer: 0,
        title: "Senior Go Developer",
        company: "FinTech Solutions",
        location: "Moscow",
        employment_type: "full-time",
        category: "IT",
    },
    FixtureJob {
        employer: 1,
        title: "Frontend Developer (React)",
        company: "EduTech Startup",
        location: "Saint Petersburg",
        employment_type: "full-time",
        category: "IT",
    },
    FixtureJob {
        employer: 0,
        title: "UI/UX Designer",
        company: "ShopTech",
        location: "Moscow",
        employment_type: "full-time",
        category: "IT",
    },
    FixtureJob {
        employer: 0,
        title: "Digital Marketing Manager",
        company: "Marketing Agency",
        location: "Moscow",
        employment_type: "full-time",
        category: "Marketing",
    },
    FixtureJob {
        employer: 1,
        title: "DevOps Engineer",
        company: "CloudTech",
        location: "Moscow",
        employment_type: "full-time",
        category: "IT",
    },
    FixtureJob {
        employer: 1,
        title: "Junior Python Developer",
        company: "DataScience Corp",
        location: "Saint Petersburg",
        employment_type: "full-time",
        category: "IT",
    },
    FixtureJob {
        employer: 0,
        title: "Product Manager",
        company: "MobileApp Inc",
        location: "Moscow",
        employment_type: "full-time",
        category: "IT",
    },
    FixtureJob {
        employer: 0,
        title: "Content Manager",
        company: "TechBlog",
        location: "Moscow",
        employment_type: "part-time",
        category: "Marketing",
    },
];

/// `(job index, seeker index, status)`.
const FIXTURE_APPLICATIONS: [(usize, usize, &str); 10] = [
    (0, 0, "pending"),
    (0, 2, "pending"),
    (1, 0, "accepted"),
    (1, 1, "pending"),
    (2, 1, "accepted"),
    (3, 2, "pending"),
    (4, 0, "rejected"),
    (5, 0, "pending"),
    (6, 2, "pending"),
    (7, 2, "accepted"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SeedSummary {
    pub(crate) jobs: usize,
    pub(crate) applications: usize,
}

/// Load the fixture postings and applications through the services, so every
/// write passes the same authorization checks as a request would.
pub(crate) fn seed_fixtures(board: &Board) -> Result<SeedSummary, BoardError> {
    let admin = Principal::new(FIXTURE_ADMIN, Role::Admin);

    let mut jobs = Vec::with_capacity(FIXTURE_JOBS.len());
    for fixture in &FIXTURE_JOBS {
        let employer = Principal::new(FIXTURE_EMPLOYERS[fixture.employer], Role::Employer);
        let posting = JobPosting {
            title: fixture.title.to_string(),
            description: format!("{} at {}", fixture.title, fixture.company),
            company: fixture.company.to_string(),
            location: fixture.location.to_string(),
            salary: String::new(),
            employment_type: fixture.employment_type.to_string(),
            category: fixture.category.to_string(),
            requirements: String::new(),
            benefits: String::new(),
        };
        jobs.push(board.jobs.create_job(&employer, posting)?);
    }

    for (job, seeker, status) in FIXTURE_APPLICATIONS {
        let applicant = Principal::new(FIXTURE_SEEKERS[seeker], Role::JobSeeker);
        let application = board.applications.submit(
            &applicant,
            ApplicationSubmission {
                job_id: jobs[job].id,
                message: String::new(),
            },
        )?;
        if status != "pending" {
            board
                .applications
                .set_status(&admin, application.id, status)?;
        }
    }

    Ok(SeedSummary {
        jobs: FIXTURE_JOBS.len(),
        applications: FIXTURE_APPLICATIONS.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use job_board::applications::ApplicationStatus;
    use job_board::jobs::{JobFilter, Pagination};

    #[test]
    fn static_tokens_resolve_to_their_principal() {
        let grants = fixture_grants();
        let verifier = StaticTokenVerifier::from_grants(&grants);

        assert_eq!(verifier.len(), 6);
        assert_eq!(
            verifier.verify("employer-2-token"),
            Ok(Principal::new("employer-2", Role::Employer))
        );
        assert_eq!(
            verifier.verify("employer-2"),
            Err(AuthenticationError::InvalidCredential)
        );
    }

    #[test]
    fn seeding_populates_both_stores() {
        let board = Board::in_memory();
        let summary = seed_fixtures(&board).expect("fixtures load");
        assert_eq!(summary, SeedSummary { jobs: 8, applications: 10 });

        let page = board
            .jobs
            .list_jobs(&JobFilter::default(), Pagination::default())
            .expect("listing");
        assert_eq!(page.total, 8);

        let all = board
            .applications
            .list_all(&Principal::new(FIXTURE_ADMIN, Role::Admin))
            .expect("admin listing");
        let accepted = all
            .iter()
            .filter(|entry| entry.application.status == ApplicationStatus::Accepted)
            .count();
        assert_eq!(all.len(), 10);
        assert_eq!(accepted, 3);
    }

    #[test]
    fn fixture_seekers_see_their_own_applications() {
        let board = Board::in_memory();
        seed_fixtures(&board).expect("fixtures load");

        let counts: Vec<usize> = FIXTURE_SEEKERS
            .iter()
            .map(|subject| {
                board
                    .applications
                    .list_for_applicant(&Principal::new(*subject, Role::JobSeeker))
                    .expect("own listing")
                    .len()
            })
            .collect();
        assert_eq!(counts, vec![4, 2, 4]);
    }
}
