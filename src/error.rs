// Error types shared by the transport, the session and every resource
// service. Remote failures keep the status code and the server's error body
// so callers can decide what to show; transport failures stay distinct.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationIssue;

/// Result alias used across the client library.
pub type KalcResult<T> = Result<T, KalcError>;

/// Structured error body returned by the server on non-success responses.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub status_code: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub short_message: Option<String>,
}

/// A non-success HTTP response translated into a typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status_code: u16,
    pub error: ErrorBody,
    /// Reason phrase of the HTTP status line, empty when unknown.
    pub reason: String,
}

impl ApiError {
    /// Build an `ApiError` from a status and the raw response body.
    ///
    /// A body that is empty or not the expected JSON shape yields an empty
    /// `ErrorBody`; parsing never fails.
    pub fn from_body(status_code: u16, reason: impl Into<String>, body: &[u8]) -> Self {
        let error = serde_json::from_slice::<ErrorBody>(body).unwrap_or_default();
        ApiError {
            status_code,
            error,
            reason: reason.into(),
        }
    }

    /// Message to show for this error: `message`, then `shortMessage`, then
    /// the reason phrase, then a generic `HTTP <code>`. Never empty.
    pub fn message(&self) -> String {
        [
            self.error.message.as_deref(),
            self.error.short_message.as_deref(),
            Some(self.reason.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", self.status_code))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status_code, self.message())
    }
}

/// Every failure the client library can report.
#[derive(Error, Debug)]
pub enum KalcError {
    /// DNS, TCP, TLS failures and timeouts. Never retried.
    #[error("Connectivity error: {0}")]
    Connectivity(#[source] reqwest::Error),

    /// Non-success response with a structured body.
    #[error("API error {0}")]
    Api(ApiError),

    /// 404 on a fetch-by-id or delete.
    #[error("Not found {0}")]
    NotFound(ApiError),

    /// 401/403: bad credentials or a session the server no longer accepts.
    #[error("Unauthorized {0}")]
    Unauthorized(ApiError),

    #[error("Not authenticated - call login first")]
    NotAuthenticated,

    #[error("Session expired - login again")]
    SessionExpired,

    #[error("Incompatible Kalcium server version {server} (client supports {supported})")]
    IncompatibleVersion { server: String, supported: String },

    #[error("Entry does not conform to the termbase schema: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// Rejected before sending, e.g. an empty search page.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request cancelled")]
    Cancelled,

    /// The server answered 2xx with a body we could not decode.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KalcError {
    /// HTTP status code for errors that came back from the server.
    pub fn status_code(&self) -> Option<u16> {
        self.api_error().map(|e| e.status_code)
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            KalcError::Api(e) | KalcError::NotFound(e) | KalcError::Unauthorized(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, KalcError::NotFound(_))
    }

    /// Translate an `ApiError` into the matching variant by status code.
    pub(crate) fn from_api(error: ApiError) -> Self {
        match error.status_code {
            404 => KalcError::NotFound(error),
            401 | 403 => KalcError::Unauthorized(error),
            _ => KalcError::Api(error),
        }
    }
}

impl From<reqwest::Error> for KalcError {
    fn from(error: reqwest::Error) -> Self {
        KalcError::Connectivity(error)
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
