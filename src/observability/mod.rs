//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! fetch + storefront produce:
//!     → logging.rs (structured log events, request ID on every attempt)
//!     → metrics.rs (attempt and scan counters, attempt latency)
//! ```

pub mod logging;
pub mod metrics;
