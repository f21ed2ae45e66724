//! Response envelope: the uniform success / list / error wrapper every
//! command's output is expressed in.
//!
//! The wire shape is fixed:
//!
//! ```json
//! { "success": true,  "data": { ... } }
//! { "success": true,  "data": [ ... ], "pageInfo": { ... } }
//! { "success": false, "error": { "code": "NOT_FOUND", "message": "...", "details": { ... } } }
//! ```
//!
//! `pageInfo` and `details` are omitted entirely when absent; they are never
//! written as `null` or `{}`. The `success` flag is derived from the variant
//! and checked against it on decode.

use crate::error::{CliError, ErrorCode};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Cursor pagination state, threaded through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor for the next page, only when one exists and the API gave a cursor.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }
}

/// Error payload of a failed envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

/// The three response shapes consumed by every renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "WireEnvelope", try_from = "WireEnvelope")]
pub enum ResponseEnvelope {
    Success {
        data: Value,
    },
    SuccessList {
        data: Vec<Value>,
        page_info: Option<PageInfo>,
    },
    Error(ErrorBody),
}

/// Single success envelope.
pub fn build_success(data: Value) -> ResponseEnvelope {
    ResponseEnvelope::Success { data }
}

/// List success envelope. `None` means pagination does not apply and the
/// field is left out of the encoding.
pub fn build_success_list(data: Vec<Value>, page_info: Option<PageInfo>) -> ResponseEnvelope {
    ResponseEnvelope::SuccessList { data, page_info }
}

/// Error envelope. Empty details are dropped.
pub fn build_error(
    code: ErrorCode,
    message: impl Into<String>,
    details: Option<Map<String, Value>>,
) -> ResponseEnvelope {
    ResponseEnvelope::Error(ErrorBody {
        code,
        message: message.into(),
        details: details.filter(|d| !d.is_empty()),
    })
}

impl ResponseEnvelope {
    pub fn is_success(&self) -> bool {
        !matches!(self, ResponseEnvelope::Error(_))
    }

    pub fn page_info(&self) -> Option<&PageInfo> {
        match self {
            ResponseEnvelope::SuccessList { page_info, .. } => page_info.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            ResponseEnvelope::Error(body) => Some(body),
            _ => None,
        }
    }

    /// Pretty-printed structured encoding.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn to_wire(&self) -> WireEnvelope {
        WireEnvelope::from(self.clone())
    }
}

impl From<CliError> for ResponseEnvelope {
    fn from(err: CliError) -> Self {
        build_error(err.code, err.message, err.details)
    }
}

/// Equality is defined on the encoded form: a `Success` whose data is an
/// array encodes exactly like a page-less `SuccessList`, and the two compare
/// equal.
impl PartialEq for ResponseEnvelope {
    fn eq(&self, other: &Self) -> bool {
        self.to_wire() == other.to_wire()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeDecodeError {
    #[error("successful envelope is missing `data`")]
    MissingData,

    #[error("successful envelope must not carry `error`")]
    UnexpectedError,

    #[error("`pageInfo` requires `data` to be an array")]
    PageInfoWithoutList,

    #[error("failed envelope is missing `error`")]
    MissingError,

    #[error("failed envelope must not carry `data` or `pageInfo`")]
    UnexpectedData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEnvelope {
    success: bool,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_info: Option<PageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

/// Distinguish `"data": null` (present) from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<ResponseEnvelope> for WireEnvelope {
    fn from(envelope: ResponseEnvelope) -> Self {
        match envelope {
            ResponseEnvelope::Success { data } => WireEnvelope {
                success: true,
                data: Some(data),
                page_info: None,
                error: None,
            },
            ResponseEnvelope::SuccessList { data, page_info } => WireEnvelope {
                success: true,
                data: Some(Value::Array(data)),
                page_info,
                error: None,
            },
            ResponseEnvelope::Error(body) => WireEnvelope {
                success: false,
                data: None,
                page_info: None,
                error: Some(body),
            },
        }
    }
}

impl TryFrom<WireEnvelope> for ResponseEnvelope {
    type Error = EnvelopeDecodeError;

    fn try_from(wire: WireEnvelope) -> Result<Self, EnvelopeDecodeError> {
        if !wire.success {
            if wire.data.is_some() || wire.page_info.is_some() {
                return Err(EnvelopeDecodeError::UnexpectedData);
            }
            let body = wire.error.ok_or(EnvelopeDecodeError::MissingError)?;
            return Ok(ResponseEnvelope::Error(body));
        }

        if wire.error.is_some() {
            return Err(EnvelopeDecodeError::UnexpectedError);
        }
        match (wire.data, wire.page_info) {
            (None, _) => Err(EnvelopeDecodeError::MissingData),
            (Some(Value::Array(data)), page_info) => {
                Ok(ResponseEnvelope::SuccessList { data, page_info })
            }
            (Some(_), Some(_)) => Err(EnvelopeDecodeError::PageInfoWithoutList),
            (Some(data), None) => Ok(ResponseEnvelope::Success { data }),
        }
    }
}
