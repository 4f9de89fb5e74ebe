//! Authenticated principals and the boundary to credential verification.
//!
//! Verifying a credential (password hashing, session or token validation)
//! belongs to an external layer. The core only sees the resulting
//! [`Principal`], handed over through the [`CredentialVerifier`] seam.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Opaque identifier of an authenticated subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    JobSeeker,
    Employer,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::JobSeeker => "job_seeker",
            Role::Employer => "employer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "job_seeker" | "jobseeker" => Ok(Role::JobSeeker),
            "employer" => Ok(Role::Employer),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Actor behind a request. Immutable for the lifetime of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub subject_id: SubjectId,
    pub role: Role,
}

impl Principal {
    pub fn new(subject_id: impl Into<String>, role: Role) -> Self {
        Self {
            subject_id: SubjectId::new(subject_id),
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("missing credential")]
    MissingCredential,
    #[error("authorization header must use the Bearer scheme")]
    MalformedCredential,
    #[error("credential rejected")]
    InvalidCredential,
}

/// External credential check producing the request's principal.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, credential: &str) -> Result<Principal, AuthenticationError>;
}

/// Verifier handle installed as a request extension for the extractors below.
pub type SharedVerifier = Arc<dyn CredentialVerifier>;

/// Rejection produced when a request cannot be authenticated.
#[derive(Debug)]
pub struct AuthRejection(pub AuthenticationError);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.0.to_string() });
        (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
    }
}

/// Principal of a request that must carry a valid bearer credential.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

/// Principal of a request where authentication is optional. A credential that
/// is present but invalid is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<Principal>);

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AuthenticationError> {
    let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AuthenticationError::MalformedCredential)?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthenticationError::MalformedCredential)?;
    Ok(Some(token))
}

fn resolve(parts: &Parts) -> Result<Option<Principal>, AuthenticationError> {
    let Some(token) = bearer_token(parts)? else {
        return Ok(None);
    };
    let verifier = parts.extensions.get::<SharedVerifier>().ok_or_else(|| {
        tracing::error!("credential verifier extension is not installed");
        AuthenticationError::InvalidCredential
    })?;
    verifier.verify(token).map(Some)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match resolve(parts) {
            Ok(Some(principal)) => Ok(Self(principal)),
            Ok(None) => Err(AuthRejection(AuthenticationError::MissingCredential)),
            Err(err) => {
                tracing::warn!(error = %err, "authentication rejected");
                Err(AuthRejection(err))
            }
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolve(parts).map(Self).map_err(|err| {
            tracing::warn!(error = %err, "authentication rejected");
            AuthRejection(err)
        })
    }
}
