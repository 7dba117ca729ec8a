//! Error taxonomy
//!
//! Validation failures stop a call before it reaches the network, auth
//! failures become a message on the form, remote failures come back from
//! the hosted store.

use thiserror::Error;

/// Minimum password length accepted by the hosted auth provider
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("text must not be empty")]
    EmptyText,
    #[error("item has no owner")]
    MissingOwner,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("unknown weekday: {0}")]
    UnknownWeekday(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email is already registered")]
    EmailInUse,
    #[error("password must have at least {min} characters")]
    WeakPassword { min: usize },
    #[error("invalid email address")]
    InvalidEmail,
    #[error("{0}")]
    Provider(String),
}

impl AuthError {
    /// Map a hosted provider error code onto the taxonomy.
    pub fn from_code(code: &str, message: &str) -> Self {
        match code {
            "auth/invalid-credential"
            | "auth/invalid-login-credentials"
            | "auth/wrong-password"
            | "auth/user-not-found" => AuthError::InvalidCredentials,
            "auth/email-already-in-use" => AuthError::EmailInUse,
            "auth/weak-password" => AuthError::WeakPassword { min: MIN_PASSWORD_LEN },
            "auth/invalid-email" => AuthError::InvalidEmail,
            _ if message.is_empty() => AuthError::Provider(code.to_string()),
            _ => AuthError::Provider(message.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("document {0} not found")]
    NotFound(String),
    #[error("permission denied")]
    PermissionDenied,
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected: {0}")]
    Rejected(String),
}

impl RemoteError {
    /// Map a document store error code onto the taxonomy.
    pub fn from_code(code: &str, message: &str) -> Self {
        match code {
            "not-found" => RemoteError::NotFound(message.to_string()),
            "permission-denied" | "unauthenticated" => RemoteError::PermissionDenied,
            "unavailable" | "deadline-exceeded" => RemoteError::Unavailable(message.to_string()),
            _ if message.is_empty() => RemoteError::Rejected(code.to_string()),
            _ => RemoteError::Rejected(message.to_string()),
        }
    }
}

/// Failure of a synchronizer write
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("remote write failed: {0}")]
    RemoteWrite(#[from] RemoteError),
    #[error("item {0} is not in the current list")]
    UnknownItem(String),
}
