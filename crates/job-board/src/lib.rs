//! Authorization and application-lifecycle core for the job board.
//!
//! Employers publish [`jobs::Job`] postings, job seekers submit
//! [`applications::JobApplication`]s against them, and administrators oversee
//! both. Every mutation is gated by the single decision table in
//! [`authorization`], and persistence sits behind the repository traits so the
//! services can be exercised against [`memory`] or a real database.

pub mod applications;
pub mod authorization;
pub mod config;
pub mod error;
pub mod identity;
pub mod jobs;
pub mod memory;
pub mod telemetry;

pub use error::{BoardError, ErrorKind, RepositoryError};
