//! Endpoint-fallback fetching.
//!
//! # Data Flow
//! ```text
//! EndpointList + RequestSpec
//!     → fetcher.rs (for each endpoint, in order)
//!         → timeout(spec.timeout, exchange)
//!         → status check, JSON parse, payload-shape validation
//!         → outcome.rs classifies the failure
//!             retryable (network, timeout, HTTP status) → next endpoint
//!             otherwise (malformed body, invalid request) → stop
//!     → FetchOutcome (first valid payload, or the failure)
//! ```
//!
//! # Design Decisions
//! - Strictly sequential; no attempt starts before the previous one ends
//! - Nothing is remembered between scans
//! - Classification uses typed transport errors, never message text

pub mod endpoint;
pub mod fetcher;
pub mod outcome;
pub mod request;

pub use endpoint::{Endpoint, EndpointError, EndpointList};
pub use fetcher::{EndpointFetcher, REQUEST_ID_HEADER};
pub use outcome::{classify_transport, FailureReason, FetchError, FetchOutcome, Fetched};
pub use request::{PayloadShape, RequestSpec, DEFAULT_TIMEOUT};
