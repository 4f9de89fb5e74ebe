//! Job postings: publication, soft deletion and the public listing query.

pub mod domain;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use domain::{Job, JobId, JobPosting, NewJob};
pub use query::{JobFilter, JobListingParams, JobPage, ListingScope, Pagination};
pub use repository::JobRepository;
pub use router::job_router;
pub use service::JobService;
