//! Type definitions for the matching-service client.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::time::Duration;

use super::endpoint::Endpoint;

/// Value of the `Code` field on a successful call
pub const SUCCESS_CODE: &str = "Success";

pub const DEFAULT_BASE_URL: &str = "https://api.interzoid.com";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of body characters kept in error messages
const BODY_PREVIEW_CHARS: usize = 200;

/// Failure of a single lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out after {0} seconds")]
    Timeout(u64),
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("could not decode response ({reason}); raw response: {body}")]
    Decode { reason: String, body: String },
    #[error("service returned code '{code}'")]
    ServiceStatus { code: String },
    #[error("endpoint '{0}' does not return a similarity key")]
    NoKeyField(String),
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

impl LookupError {
    /// Short label used in log lines and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Transport(_) | LookupError::Timeout(_) => "transport",
            LookupError::HttpStatus { .. } => "http-status",
            LookupError::Decode { .. } => "decode",
            LookupError::ServiceStatus { .. } => "service-status",
            LookupError::NoKeyField(_) => "no-key-field",
            LookupError::InvalidUrl(_) => "invalid-url",
        }
    }
}

/// Key lookup result: similarity key, service code, and remaining credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResponse {
    pub key: String,
    pub code: String,
    pub credits: String,
}

impl LookupResponse {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Flat JSON object returned by every endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatResponse {
    fields: Map<String, Value>,
}

impl FlatResponse {
    /// Decodes a response body. Anything other than a JSON object is rejected.
    pub fn from_body(body: &str) -> Result<Self, LookupError> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(other) => Err(LookupError::Decode {
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
                body: preview(body),
            }),
            Err(err) => Err(LookupError::Decode {
                reason: err.to_string(),
                body: preview(body),
            }),
        }
    }

    /// Field rendered as text. Missing and null fields are empty.
    pub fn field(&self, name: &str) -> String {
        self.fields.get(name).map(value_as_string).unwrap_or_default()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn code(&self) -> String {
        self.field("Code")
    }

    pub fn credits(&self) -> String {
        self.field("Credits")
    }

    pub fn is_success(&self) -> bool {
        self.code() == SUCCESS_CODE
    }

    /// Field names in the order the service sent them
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Label/value pairs to print for a single lookup, ending with the result
    /// code and remaining credits.
    ///
    /// Custom enrichment answers with whatever fields were requested, so those
    /// names are used as labels; when none were given every returned field
    /// is listed.
    pub fn labelled_fields(
        &self,
        endpoint: Endpoint,
        requested: &[String],
    ) -> Vec<(String, String)> {
        let mut lines: Vec<(String, String)> = if endpoint == Endpoint::CustomEnrichment {
            if requested.is_empty() {
                self.field_names()
                    .filter(|name| *name != "Code" && *name != "Credits")
                    .map(|name| (name.to_string(), self.field(name)))
                    .collect()
            } else {
                requested
                    .iter()
                    .map(|name| (name.clone(), self.field(name)))
                    .collect()
            }
        } else {
            endpoint
                .display_fields()
                .iter()
                .map(|(field, label)| (label.to_string(), self.field(field)))
                .collect()
        };
        lines.push(("Result Code".to_string(), self.code()));
        lines.push(("Remaining Credits".to_string(), self.credits()));
        lines
    }

    /// Extracts the key lookup result. A non-success `Code` is an error; an
    /// empty key on success is passed through for the caller to judge.
    pub fn into_lookup(self, key_field: &str) -> Result<LookupResponse, LookupError> {
        let code = self.code();
        if code != SUCCESS_CODE {
            return Err(LookupError::ServiceStatus { code });
        }
        Ok(LookupResponse {
            key: self.field(key_field),
            code,
            credits: self.credits(),
        })
    }
}

fn value_as_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Truncates a body for inclusion in an error message
pub(crate) fn preview(body: &str) -> String {
    if body.chars().count() <= BODY_PREVIEW_CHARS {
        body.to_string()
    } else {
        let cut: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    }
}
