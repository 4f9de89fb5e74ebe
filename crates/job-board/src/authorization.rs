//! Single decision table for every action the job board exposes.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. `admin` is allowed everything.
//! 2. Ownership actions are allowed iff the principal owns the resource.
//! 3. Role-gated actions are allowed iff the principal holds the role.
//! 4. Everything else is open.
//!
//! The engine is a pure function over `(role, ownership match, action)`; the
//! caller resolves the owner from the store before asking.

use std::fmt;

use serde::Serialize;

use crate::error::BoardError;
use crate::identity::{Principal, Role, SubjectId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ListJobs,
    GetJob,
    ViewInactiveJob,
    CreateJob,
    UpdateJob,
    DeleteJob,
    ListAllJobs,
    CreateApplication,
    ListOwnApplications,
    ListEmployerApplications,
    ViewJobApplications,
    UpdateApplicationStatus,
    ListAllApplications,
}

impl Action {
    pub const ALL: [Action; 13] = [
        Action::ListJobs,
        Action::GetJob,
        Action::ViewInactiveJob,
        Action::CreateJob,
        Action::UpdateJob,
        Action::DeleteJob,
        Action::ListAllJobs,
        Action::CreateApplication,
        Action::ListOwnApplications,
        Action::ListEmployerApplications,
        Action::ViewJobApplications,
        Action::UpdateApplicationStatus,
        Action::ListAllApplications,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Action::ListJobs => "list_jobs",
            Action::GetJob => "get_job",
            Action::ViewInactiveJob => "view_inactive_job",
            Action::CreateJob => "create_job",
            Action::UpdateJob => "update_job",
            Action::DeleteJob => "delete_job",
            Action::ListAllJobs => "list_all_jobs",
            Action::CreateApplication => "create_application",
            Action::ListOwnApplications => "list_own_applications",
            Action::ListEmployerApplications => "list_employer_applications",
            Action::ViewJobApplications => "view_job_applications",
            Action::UpdateApplicationStatus => "update_application_status",
            Action::ListAllApplications => "list_all_applications",
        }
    }

    /// What a non-admin principal needs to be allowed this action.
    pub const fn requirement(self) -> Requirement {
        match self {
            Action::UpdateJob
            | Action::DeleteJob
            | Action::ViewInactiveJob
            | Action::ViewJobApplications
            | Action::UpdateApplicationStatus => Requirement::Ownership,
            Action::CreateJob | Action::ListEmployerApplications => {
                Requirement::Role(Role::Employer)
            }
            Action::CreateApplication => Requirement::Role(Role::JobSeeker),
            Action::ListAllJobs | Action::ListAllApplications => Requirement::Role(Role::Admin),
            Action::ListJobs | Action::GetJob | Action::ListOwnApplications => Requirement::None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Ownership,
    Role(Role),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub const fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Turn a denial into [`BoardError::Forbidden`].
    pub fn require(self, action: Action) -> Result<(), BoardError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(BoardError::forbidden(format!(
                "not authorized to {}",
                action.label()
            ))),
        }
    }
}

/// Decide whether `principal` may perform `action` on a resource owned by
/// `resource_owner`. Pass `None` for actions that do not target an owned
/// resource; ownership actions without an owner are denied.
pub fn authorize(
    principal: &Principal,
    action: Action,
    resource_owner: Option<&SubjectId>,
) -> Decision {
    let owns = resource_owner.is_some_and(|owner| *owner == principal.subject_id);
    decide(principal.role, owns, action)
}

/// The decision table itself, independent of identifiers.
pub fn decide(role: Role, owns_resource: bool, action: Action) -> Decision {
    if role == Role::Admin {
        return Decision::Allow;
    }

    let allowed = match action.requirement() {
        Requirement::Ownership => owns_resource,
        Requirement::Role(required) => role == required,
        Requirement::None => true,
    };

    if allowed {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// [`authorize`] followed by [`Decision::require`], logging denials.
pub fn ensure(
    principal: &Principal,
    action: Action,
    resource_owner: Option<&SubjectId>,
) -> Result<(), BoardError> {
    let decision = authorize(principal, action, resource_owner);
    if !decision.is_allowed() {
        tracing::warn!(
            subject = %principal.subject_id,
            role = %principal.role,
            action = %action,
            "authorization denied"
        );
    }
    decision.require(action)
}
