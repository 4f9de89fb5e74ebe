use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::identity::SubjectId;

/// Store-assigned identifier of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields an employer controls on a posting.
///
/// Updates replace the whole value: a field omitted from a request
/// deserializes to an empty string rather than keeping the stored value, and
/// the required ones then fail [`JobPosting::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    pub category: String,
    pub requirements: String,
    pub benefits: String,
}

impl JobPosting {
    /// Title, description and company must be present.
    pub fn validate(&self) -> Result<(), BoardError> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("description", &self.description),
            ("company", &self.company),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(BoardError::invalid_argument(format!(
                "missing required job fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// A job posting as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(flatten)]
    pub posting: JobPosting,
    pub employer_id: SubjectId,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn is_owned_by(&self, subject: &SubjectId) -> bool {
        self.employer_id == *subject
    }
}

/// Insert payload; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub posting: JobPosting,
    pub employer_id: SubjectId,
    pub created_at: DateTime<Utc>,
}
