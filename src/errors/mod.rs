//! Error handling module for the FactFusion client core.
//!
//! Provides a centralized error type with stable machine-readable codes.
//! No error here crashes a screen: every failure path leaves the client in a
//! previously-valid state.

use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const EMPTY_INPUT: &str = "EMPTY_INPUT";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const AUTH_ERROR: &str = "AUTH_ERROR";
    pub const EXPORT_ERROR: &str = "EXPORT_ERROR";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const SERVICE_ERROR: &str = "SERVICE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Why an authentication attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthFailure {
    InvalidCredentials,
    NetworkUnreachable,
    ServerError,
    SessionExpired,
}

impl AuthFailure {
    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::InvalidCredentials => "Invalid credentials",
            AuthFailure::NetworkUnreachable => "Authentication service unreachable",
            AuthFailure::ServerError => "Authentication service error",
            AuthFailure::SessionExpired => "Session expired, please log in again",
        }
    }
}

/// Client error type covering the full local taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Local validation: nothing to submit. Recoverable, user corrects input.
    #[error("no content provided: supply text, an image, or both")]
    EmptyInput,

    /// Transport failure or unreachable service. Retry is user-initiated.
    #[error("network error: {0}")]
    Network(String),

    /// Credential or session failure, surfaced as a message.
    #[error("auth error: {}", .0.message())]
    Auth(AuthFailure),

    /// Capture or document generation failed. No partial file is left behind.
    #[error("export error: {0}")]
    Export(String),

    /// Corrupted persisted state. Self-healed, logged, never fatal.
    #[error("parse error: {0}")]
    Parse(String),

    /// Generic remote failure from the detection or archive service.
    #[error("service error: {0}")]
    Service(String),

    /// Local failure, e.g. filesystem trouble.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Get the stable error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::EmptyInput => codes::EMPTY_INPUT,
            ClientError::Network(_) => codes::NETWORK_ERROR,
            ClientError::Auth(_) => codes::AUTH_ERROR,
            ClientError::Export(_) => codes::EXPORT_ERROR,
            ClientError::Parse(_) => codes::PARSE_ERROR,
            ClientError::Service(_) => codes::SERVICE_ERROR,
            ClientError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Whether the user can recover by correcting local input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ClientError::EmptyInput)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            tracing::warn!("Transport failure: {}", err);
            ClientError::Network(err.to_string())
        } else if err.is_decode() {
            tracing::error!("Malformed service response: {}", err);
            ClientError::Service(format!("Malformed response: {}", err))
        } else {
            tracing::error!("Request error: {}", err);
            ClientError::Service(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Parse(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type ClientResult<T> = Result<T, ClientError>;
