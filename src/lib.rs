//! Storefront and inventory lookup client.
//!
//! Every backend call is a fallback scan: candidate base URLs are tried in
//! order with a per-attempt timeout, and the first well-formed answer wins.

pub mod config;
pub mod fetch;
pub mod observability;
pub mod session;
pub mod storefront;

pub use config::ClientConfig;
pub use fetch::{EndpointFetcher, EndpointList, FetchError, FetchOutcome, RequestSpec};
pub use storefront::{StorefrontClient, StorefrontError};
