//! Error types for the Linear CLI.
//!
//! `ErrorCode` is the closed, stable taxonomy scripts branch on. `CliError`
//! carries a final code directly; `TransportError` describes remote failures
//! whose code is decided later by [`crate::classify`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Stable error codes surfaced in every error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotAuthenticated,
    InvalidApiKey,
    NotFound,
    AlreadyExists,
    InvalidInput,
    MissingRequiredField,
    ApiError,
    RateLimited,
    ConfigError,
    UnknownError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 10] = [
        ErrorCode::NotAuthenticated,
        ErrorCode::InvalidApiKey,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::InvalidInput,
        ErrorCode::MissingRequiredField,
        ErrorCode::ApiError,
        ErrorCode::RateLimited,
        ErrorCode::ConfigError,
        ErrorCode::UnknownError,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorCode::InvalidApiKey => "INVALID_API_KEY",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure that already knows its final code.
///
/// Produced by local validation, identifier resolution and configuration
/// handling. The classifier passes these through unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<Map<String, Value>>,
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach details; an empty map is dropped so it never reaches the envelope.
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = if details.is_empty() {
            None
        } else {
            Some(details)
        };
        self
    }

    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAuthenticated, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingRequiredField, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

/// Remote transport failures. The display text is what the classifier
/// inspects, so it keeps the upstream status and message verbatim.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("{message}")]
    GraphQl {
        message: String,
        messages: Vec<String>,
    },

    #[error("Failed to parse Linear API response: {0}")]
    Decode(String),

    #[error("Linear API response is missing field `{0}`")]
    MissingField(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::config(err.to_string())
    }
}
