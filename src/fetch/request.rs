//! Request description shared by every attempt of a fallback scan.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;

/// Per-attempt timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Structure a response must have before it counts as a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadShape {
    /// Any well-formed JSON value.
    #[default]
    Any,
    /// A JSON array (listing calls).
    Array,
    /// A JSON object carrying a boolean `success` field (login).
    SuccessFlag,
}

impl PayloadShape {
    /// Check `payload` against this shape, describing the mismatch on failure.
    pub fn validate(self, payload: &Value) -> Result<(), String> {
        match self {
            PayloadShape::Any => Ok(()),
            PayloadShape::Array if payload.is_array() => Ok(()),
            PayloadShape::Array => Err(format!("expected a JSON array, got {}", kind(payload))),
            PayloadShape::SuccessFlag => match payload.get("success") {
                Some(Value::Bool(_)) if payload.is_object() => Ok(()),
                Some(other) => Err(format!(
                    "expected boolean `success`, got {}",
                    kind(other)
                )),
                None => Err(format!(
                    "expected an object with a `success` flag, got {}",
                    kind(payload)
                )),
            },
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Method, path suffix, headers, body, timeout and expected shape of a call.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    operation: &'static str,
    method: Method,
    segments: Vec<String>,
    headers: HeaderMap,
    body: Option<Value>,
    timeout: Duration,
    shape: PayloadShape,
}

impl RequestSpec {
    pub fn new(method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            operation: "request",
            method,
            segments: Vec::new(),
            headers,
            body: None,
            timeout: DEFAULT_TIMEOUT,
            shape: PayloadShape::Any,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post(body: Value) -> Self {
        Self::new(Method::POST).body(body)
    }

    /// Name used in logs and metrics.
    pub fn named(mut self, operation: &'static str) -> Self {
        self.operation = operation;
        self
    }

    /// Append a `/`-separated path suffix; empty pieces are skipped.
    pub fn path(mut self, suffix: &str) -> Self {
        self.segments.extend(
            suffix
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Append one path segment verbatim; it is percent-encoded on resolve.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn expect_shape(mut self, shape: PayloadShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn payload(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn time_limit(&self) -> Duration {
        self.timeout
    }

    pub fn shape(&self) -> PayloadShape {
        self.shape
    }
}
