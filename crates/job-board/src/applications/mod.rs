//! Job applications: submission, review status lifecycle and listings.

pub mod domain;
pub mod lifecycle;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, ApplicationWithJob, JobApplication,
    NewApplication, StatusUpdate,
};
pub use lifecycle::{transition, Transition, TransitionKind};
pub use repository::{ApplicationFilter, ApplicationRepository};
pub use router::application_router;
pub use service::ApplicationService;
