//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! cotizer.toml (or built-in defaults)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → apply_overrides (CLI profile / timeout, validated again)
//!     → StorefrontClient::from_config
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; the defaults are the deployed backend addresses
//! - Two endpoint sets (development, production), one active at a time
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_overrides, load_config, load_or_default, parse_config, ConfigError, Overrides};
pub use schema::{ClientConfig, EndpointSet, LogFormat, ObservabilityConfig, Profile, TimeoutConfig};
pub use validation::ValidationError;
