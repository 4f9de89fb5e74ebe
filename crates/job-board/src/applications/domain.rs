use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::identity::SubjectId;
use crate::jobs::{Job, JobId};

/// Store-assigned identifier of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review status of an application. `Pending` is the only initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ApplicationStatus {
    type Err = BoardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(BoardError::invalid_argument(format!(
                "status must be one of pending, accepted, rejected (got '{other}')"
            ))),
        }
    }
}

/// An application as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub applicant_id: SubjectId,
    pub status: ApplicationStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobApplication {
    /// Materialize a freshly inserted application. Stores call this so the
    /// initial status cannot be chosen by the caller.
    pub fn from_new(id: ApplicationId, new: NewApplication) -> Self {
        Self {
            id,
            job_id: new.job_id,
            applicant_id: new.applicant_id,
            status: ApplicationStatus::Pending,
            message: new.message,
            created_at: new.created_at,
            updated_at: new.created_at,
        }
    }
}

/// Insert payload; the store assigns the id and the initial status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub job_id: JobId,
    pub applicant_id: SubjectId,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Request body of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub job_id: JobId,
    #[serde(default)]
    pub message: String,
}

/// Request body of a status change. The value stays untyped so a missing or
/// non-text status is judged by `set_status` after the lookup and ownership
/// checks, not rejected by the body parser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: serde_json::Value,
}

impl StatusUpdate {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: serde_json::Value::String(status.into()),
        }
    }

    /// The requested status as text; other JSON values keep their literal form.
    pub fn requested(&self) -> String {
        match &self.status {
            serde_json::Value::String(status) => status.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// An application expanded with the posting it targets, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: JobApplication,
    pub job: Job,
}
