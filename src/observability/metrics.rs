//! Fetch metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! embedding application installs a recorder.
//!
//! # Metrics
//! - `cotizer_fetch_attempts_total` (counter): attempts by operation, outcome
//! - `cotizer_fetch_attempt_duration_seconds` (histogram): per-attempt latency
//! - `cotizer_fetch_scans_total` (counter): whole scans by operation, outcome

use std::time::Instant;

/// Record a single endpoint attempt.
pub fn record_attempt(operation: &'static str, outcome: &'static str, started: Instant) {
    ::metrics::counter!(
        "cotizer_fetch_attempts_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!(
        "cotizer_fetch_attempt_duration_seconds",
        "operation" => operation
    )
    .record(started.elapsed().as_secs_f64());
}

/// Record the end of a fallback scan.
pub fn record_scan(operation: &'static str, outcome: &'static str) {
    ::metrics::counter!(
        "cotizer_fetch_scans_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
