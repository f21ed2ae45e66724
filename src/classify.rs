//! Error classification: maps any command failure onto the closed
//! [`ErrorCode`] taxonomy.
//!
//! Rules, first match wins:
//!
//! 1. Typed failures ([`CliError`]) pass through unchanged.
//! 2. Otherwise the failure text is scanned for markers, in this order:
//!    authentication (`401`, `Unauthorized`), not-found (`404`, `not found`),
//!    rate-limit (`429`, `rate limit`). The order is kept for compatibility;
//!    nothing depends on it beyond overlapping messages.
//! 3. Any other error value becomes `API_ERROR` with its message verbatim.
//! 4. A non-error payload (a panicked command task) becomes `UNKNOWN_ERROR`.
//!
//! Matching is substring-based because upstream message formats are not a
//! stable contract. Numeric status markers match exactly; phrase markers
//! match without regard to case.

use crate::error::{CliError, ErrorCode, TransportError};
use crate::identifier::ResolveError;
use tracing::debug;

pub const INVALID_API_KEY_MESSAGE: &str = "Invalid or expired API key";
pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please wait before retrying.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Anything a command can fail with.
#[derive(Debug)]
pub enum Failure {
    /// Carries its final code already.
    Typed(CliError),
    /// A recognized error value with a message.
    Error(anyhow::Error),
    /// Not an error value at all.
    Opaque,
}

impl From<CliError> for Failure {
    fn from(err: CliError) -> Self {
        Failure::Typed(err)
    }
}

impl From<TransportError> for Failure {
    fn from(err: TransportError) -> Self {
        Failure::Error(anyhow::Error::new(err))
    }
}

impl From<ResolveError> for Failure {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Transport(inner) => Failure::from(inner),
            typed => Failure::Typed(CliError::from(typed)),
        }
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<CliError>() {
            Ok(typed) => Failure::Typed(typed),
            Err(other) => Failure::Error(other),
        }
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Failure::Error(anyhow::Error::new(err))
    }
}

/// How a marker is compared against the failure text.
#[derive(Debug, Clone, Copy)]
enum Marker {
    Exact(&'static str),
    Phrase(&'static str),
}

impl Marker {
    fn matches(self, message: &str, lowered: &str) -> bool {
        match self {
            Marker::Exact(needle) => message.contains(needle),
            Marker::Phrase(needle) => lowered.contains(needle),
        }
    }
}

struct MessageRule {
    markers: &'static [Marker],
    code: ErrorCode,
    /// Fixed replacement message; `None` keeps the source message.
    message: Option<&'static str>,
}

const MESSAGE_RULES: &[MessageRule] = &[
    MessageRule {
        markers: &[Marker::Exact("401"), Marker::Phrase("unauthorized")],
        code: ErrorCode::InvalidApiKey,
        message: Some(INVALID_API_KEY_MESSAGE),
    },
    MessageRule {
        markers: &[Marker::Exact("404"), Marker::Phrase("not found")],
        code: ErrorCode::NotFound,
        message: None,
    },
    MessageRule {
        markers: &[Marker::Exact("429"), Marker::Phrase("rate limit")],
        code: ErrorCode::RateLimited,
        message: Some(RATE_LIMITED_MESSAGE),
    },
];

/// Map a failure to exactly one code and a user-facing message.
pub fn classify(failure: &Failure) -> CliError {
    match failure {
        Failure::Typed(err) => err.clone(),
        Failure::Error(err) => {
            let message = err.to_string();
            let classified = classify_message(&message);
            debug!(code = %classified.code, "classified failure from message text");
            classified
        }
        Failure::Opaque => CliError::new(ErrorCode::UnknownError, UNKNOWN_ERROR_MESSAGE),
    }
}

fn classify_message(message: &str) -> CliError {
    let lowered = message.to_lowercase();
    MESSAGE_RULES
        .iter()
        .find(|rule| {
            rule.markers
                .iter()
                .any(|marker| marker.matches(message, &lowered))
        })
        .map(|rule| match rule.message {
            Some(fixed) => CliError::new(rule.code, fixed),
            None => CliError::new(rule.code, message),
        })
        .unwrap_or_else(|| CliError::api(message))
}
