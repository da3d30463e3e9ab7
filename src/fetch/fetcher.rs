//! The fallback scan.

use std::time::Instant;

use reqwest::header::HeaderValue;
use serde_json::Value;
use tokio::time::timeout;
use url::Url;
use uuid::Uuid;

use crate::config::TimeoutConfig;
use crate::fetch::endpoint::EndpointList;
use crate::fetch::outcome::{FetchError, FetchOutcome, Fetched};
use crate::fetch::request::RequestSpec;
use crate::observability::metrics;

/// Header carrying the per-scan correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tries a request against each candidate endpoint in turn.
///
/// Holds no state between calls: every scan starts at the first endpoint.
#[derive(Debug, Clone, Default)]
pub struct EndpointFetcher {
    http: reqwest::Client,
}

impl EndpointFetcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build a client with the configured connect timeout.
    pub fn from_config(timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeouts.connect())
            .user_agent(concat!("cotizer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(http))
    }

    /// Run one fallback scan.
    ///
    /// Returns the first structurally valid payload. Retryable faults move
    /// on to the next endpoint; anything else is returned immediately. When
    /// every endpoint fails retryably the result is [`FetchError::Exhausted`]
    /// carrying the last endpoint's error.
    pub async fn attempt(&self, endpoints: &EndpointList, spec: &RequestSpec) -> FetchOutcome {
        let request_id = Uuid::new_v4();
        let operation = spec.operation();
        let mut last: Option<FetchError> = None;
        let mut attempted = 0;

        for (idx, endpoint) in endpoints.iter().enumerate() {
            attempted += 1;
            let url = endpoint.resolve(spec.segments());
            tracing::debug!(
                %request_id,
                operation,
                attempt = idx + 1,
                endpoint = %url,
                "Trying endpoint"
            );

            let started = Instant::now();
            match self.attempt_one(&url, spec, request_id).await {
                Ok(payload) => {
                    metrics::record_attempt(operation, "success", started);
                    metrics::record_scan(operation, "success");
                    tracing::info!(
                        %request_id,
                        operation,
                        attempt = idx + 1,
                        endpoint = %url,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Endpoint answered"
                    );
                    return Ok(Fetched {
                        endpoint: url,
                        attempt: idx + 1,
                        payload,
                    });
                }
                Err(err) => {
                    let reason = err.reason();
                    metrics::record_attempt(operation, reason.as_str(), started);
                    if !reason.is_retryable() {
                        metrics::record_scan(operation, reason.as_str());
                        tracing::error!(
                            %request_id,
                            operation,
                            attempt = idx + 1,
                            %reason,
                            error = %err,
                            "Endpoint answered unusably, stopping"
                        );
                        return Err(err);
                    }
                    tracing::warn!(
                        %request_id,
                        operation,
                        attempt = idx + 1,
                        %reason,
                        error = %err,
                        "Endpoint failed, trying next"
                    );
                    last = Some(err);
                }
            }
        }

        let err = FetchError::Exhausted {
            attempted,
            last: last.map(Box::new),
        };
        metrics::record_scan(operation, err.reason().as_str());
        tracing::warn!(%request_id, operation, attempted, error = %err, "All endpoints failed");
        Err(err)
    }

    /// One endpoint, bounded by the request's time limit. Dropping the exchange
    /// future on expiry cancels the in-flight request.
    async fn attempt_one(
        &self,
        url: &Url,
        spec: &RequestSpec,
        request_id: Uuid,
    ) -> Result<Value, FetchError> {
        let limit = spec.time_limit();
        match timeout(limit, self.exchange(url, spec, request_id)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                endpoint: url.clone(),
                after: limit,
            }),
        }
    }

    async fn exchange(
        &self,
        url: &Url,
        spec: &RequestSpec,
        request_id: Uuid,
    ) -> Result<Value, FetchError> {
        let started = Instant::now();
        let mut request = self
            .http
            .request(spec.method().clone(), url.clone())
            .headers(spec.headers().clone());
        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            request = request.header(REQUEST_ID_HEADER, value);
        }
        if let Some(body) = spec.payload() {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_transport(url, &e, started.elapsed()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_transport(url, &e, started.elapsed()))?;

        tracing::debug!(endpoint = %url, status = status.as_u16(), len = bytes.len(), "Response received");

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                endpoint: url.clone(),
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }

        let payload: Value =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::MalformedBody {
                endpoint: url.clone(),
                detail: e.to_string(),
            })?;
        spec.shape()
            .validate(&payload)
            .map_err(|detail| FetchError::MalformedBody {
                endpoint: url.clone(),
                detail,
            })?;
        Ok(payload)
    }
}

/// `message` string of a JSON error body, if the body has one.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(br#"{"success": false, "message": "Usuario bloqueado"}"#),
            Some("Usuario bloqueado".to_string())
        );
        assert_eq!(error_message(br#"{"message": "   "}"#), None);
        assert_eq!(error_message(b"<html>502</html>"), None);
        assert_eq!(error_message(br#"{"error": "x"}"#), None);
    }

    #[tokio::test]
    async fn test_empty_list_sends_nothing() {
        let fetcher = EndpointFetcher::default();
        let err = fetcher
            .attempt(&EndpointList::default(), &RequestSpec::get())
            .await
            .unwrap_err();
        match err {
            FetchError::Exhausted { attempted, last } => {
                assert_eq!(attempted, 0);
                assert!(last.is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
