use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::{Extension, Router};
use serde_json::Value;

use crate::error::RepositoryError;
use crate::identity::{
    AuthenticationError, CredentialVerifier, Principal, Role, SharedVerifier, SubjectId,
};
use crate::jobs::{
    job_router, Job, JobFilter, JobId, JobPosting, JobRepository, JobService, ListingScope,
    NewJob, Pagination,
};
use crate::memory::InMemoryJobRepository;

/// Test verifier accepting tokens of the form `<role>:<subject>`.
pub(crate) struct RoleTokens;

impl CredentialVerifier for RoleTokens {
    fn verify(&self, credential: &str) -> Result<Principal, AuthenticationError> {
        let (role, subject) = credential
            .split_once(':')
            .ok_or(AuthenticationError::InvalidCredential)?;
        let role = role
            .parse()
            .map_err(|_| AuthenticationError::InvalidCredential)?;
        Ok(Principal::new(subject, role))
    }
}

pub(crate) fn verifier() -> SharedVerifier {
    Arc::new(RoleTokens)
}

pub(crate) fn posting(title: &str, category: &str) -> JobPosting {
    JobPosting {
        title: title.to_string(),
        description: format!("{title} wanted for a growing team"),
        company: "Acme".to_string(),
        location: "Jakarta".to_string(),
        salary: "negotiable".to_string(),
        employment_type: "full-time".to_string(),
        category: category.to_string(),
        requirements: "3 years of experience".to_string(),
        benefits: "Remote friendly".to_string(),
    }
}

pub(super) fn build_service() -> (
    JobService<InMemoryJobRepository>,
    Arc<InMemoryJobRepository>,
) {
    let repository = Arc::new(InMemoryJobRepository::default());
    let service = JobService::new(repository.clone());
    (service, repository)
}

/// Eight `IT` postings followed by two `Sales` ones, all owned by `acme`.
pub(super) fn seed_listing(service: &JobService<InMemoryJobRepository>) -> Vec<Job> {
    let employer = Principal::new("acme", Role::Employer);
    (1..=10)
        .map(|n| {
            let category = if n <= 8 { "IT" } else { "Sales" };
            service
                .create_job(&employer, posting(&format!("Role {n}"), category))
                .expect("seed job")
        })
        .collect()
}

pub(super) fn router_with_service<R>(service: JobService<R>) -> Router
where
    R: JobRepository + 'static,
{
    job_router(Arc::new(service)).layer(Extension(verifier()))
}

pub(crate) fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&value).expect("serialize body"))
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request builds")
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableRepository;

impl JobRepository for UnavailableRepository {
    fn insert(&self, _job: NewJob) -> Result<Job, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _job: Job) -> Result<Job, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: JobId) -> Result<Option<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn search(
        &self,
        _filter: &JobFilter,
        _scope: ListingScope,
        _page: Option<Pagination>,
    ) -> Result<(Vec<Job>, usize), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn owned_by(&self, _employer: &SubjectId) -> Result<Vec<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
