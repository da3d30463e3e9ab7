//! Scan results and the failure taxonomy.

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Why an attempt (or a whole scan) failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    NetworkUnreachable,
    Timeout,
    HttpStatus,
    MalformedBody,
    InvalidRequest,
    AllEndpointsExhausted,
}

impl FailureReason {
    /// Whether the scan should move on to the next endpoint.
    ///
    /// Transport faults and error statuses mean "try another route to the
    /// same server". A server that answered with the wrong payload, or a
    /// request that could not be built, ends the scan.
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            FailureReason::NetworkUnreachable | FailureReason::Timeout | FailureReason::HttpStatus
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FailureReason::NetworkUnreachable => "network_unreachable",
            FailureReason::Timeout => "timeout",
            FailureReason::HttpStatus => "http_status_error",
            FailureReason::MalformedBody => "malformed_body",
            FailureReason::InvalidRequest => "invalid_request",
            FailureReason::AllEndpointsExhausted => "all_endpoints_exhausted",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a transport error to a failure reason.
///
/// Uses reqwest's typed error kinds rather than message text.
pub fn classify_transport(err: &reqwest::Error) -> FailureReason {
    if err.is_timeout() {
        FailureReason::Timeout
    } else if err.is_builder() {
        FailureReason::InvalidRequest
    } else if err.is_decode() {
        FailureReason::MalformedBody
    } else {
        // connect, request, body stream, redirect
        FailureReason::NetworkUnreachable
    }
}

/// Errors produced by a fallback scan.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("{endpoint} is unreachable: {detail}")]
    NetworkUnreachable { endpoint: Url, detail: String },

    #[error("{endpoint} did not respond within {}ms", after.as_millis())]
    Timeout { endpoint: Url, after: Duration },

    #[error("{endpoint} returned HTTP {status}{}", message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    HttpStatus {
        endpoint: Url,
        status: u16,
        /// `message` field of a JSON error body, when present.
        message: Option<String>,
    },

    #[error("{endpoint} returned a malformed body: {detail}")]
    MalformedBody { endpoint: Url, detail: String },

    #[error("could not build request for {endpoint}: {detail}")]
    InvalidRequest { endpoint: Url, detail: String },

    #[error("{}", describe_exhausted(*attempted, last.as_deref()))]
    Exhausted {
        attempted: usize,
        /// Error from the last endpoint tried; `None` when the list was empty.
        last: Option<Box<FetchError>>,
    },
}

fn describe_exhausted(attempted: usize, last: Option<&FetchError>) -> String {
    match last {
        Some(last) => format!("all {} endpoints failed; last error: {}", attempted, last),
        None => "no endpoints configured".to_string(),
    }
}

impl FetchError {
    /// Build the error for a failed transport call.
    pub(crate) fn from_transport(endpoint: &Url, err: &reqwest::Error, elapsed: Duration) -> Self {
        let endpoint = endpoint.clone();
        let detail = err.to_string();
        match classify_transport(err) {
            FailureReason::Timeout => FetchError::Timeout {
                endpoint,
                after: elapsed,
            },
            FailureReason::InvalidRequest => FetchError::InvalidRequest { endpoint, detail },
            FailureReason::MalformedBody => FetchError::MalformedBody { endpoint, detail },
            _ => FetchError::NetworkUnreachable { endpoint, detail },
        }
    }

    pub fn reason(&self) -> FailureReason {
        match self {
            FetchError::NetworkUnreachable { .. } => FailureReason::NetworkUnreachable,
            FetchError::Timeout { .. } => FailureReason::Timeout,
            FetchError::HttpStatus { .. } => FailureReason::HttpStatus,
            FetchError::MalformedBody { .. } => FailureReason::MalformedBody,
            FetchError::InvalidRequest { .. } => FailureReason::InvalidRequest,
            FetchError::Exhausted { .. } => FailureReason::AllEndpointsExhausted,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.reason().is_retryable()
    }

    /// Reason of the last endpoint for exhaustion, otherwise this error's own reason.
    pub fn last_reason(&self) -> Option<FailureReason> {
        match self {
            FetchError::Exhausted { last, .. } => last.as_deref().map(FetchError::reason),
            other => Some(other.reason()),
        }
    }

    /// Endpoint the error came from, if it names one.
    pub fn endpoint(&self) -> Option<&Url> {
        match self {
            FetchError::NetworkUnreachable { endpoint, .. }
            | FetchError::Timeout { endpoint, .. }
            | FetchError::HttpStatus { endpoint, .. }
            | FetchError::MalformedBody { endpoint, .. }
            | FetchError::InvalidRequest { endpoint, .. } => Some(endpoint),
            FetchError::Exhausted { .. } => None,
        }
    }

    /// Short text suitable for showing to the person who triggered the call.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::NetworkUnreachable { .. } => {
                "Could not reach the server. Check your connection.".to_string()
            }
            FetchError::Timeout { .. } => "The connection took too long.".to_string(),
            FetchError::HttpStatus {
                message: Some(message),
                ..
            } => message.clone(),
            FetchError::HttpStatus { status, .. } => {
                format!("The server answered with an error (HTTP {}).", status)
            }
            FetchError::MalformedBody { .. } => {
                "The server response did not have the expected format.".to_string()
            }
            FetchError::InvalidRequest { .. } => "The request could not be built.".to_string(),
            FetchError::Exhausted { last: Some(last), .. } => last.user_message(),
            FetchError::Exhausted { last: None, .. } => {
                "No server addresses are configured.".to_string()
            }
        }
    }
}

/// A successful scan: the payload and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub endpoint: Url,
    /// 1-based position of the endpoint in the list.
    pub attempt: usize,
    pub payload: Value,
}

/// Result of one fallback scan.
pub type FetchOutcome = Result<Fetched, FetchError>;
