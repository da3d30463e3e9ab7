//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the storefront client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Which endpoint set is active.
    pub profile: Profile,

    /// Endpoints used while developing on the local network.
    pub development: EndpointSet,

    /// Endpoints used by release builds.
    pub production: EndpointSet,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            development: EndpointSet::development_defaults(),
            production: EndpointSet::production_defaults(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Endpoint set selected by the active profile.
    pub fn active_endpoints(&self) -> &EndpointSet {
        match self.profile {
            Profile::Development => &self.development,
            Profile::Production => &self.production,
        }
    }
}

/// Deployment profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Development,
    Production,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Production => "production",
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            other => Err(format!("unknown profile '{}'", other)),
        }
    }
}

/// Candidate base URLs for every backend API, in fallback order.
///
/// APIs left out of a configured table deserialize to an empty list.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
pub struct EndpointSet {
    /// Login endpoints (POST).
    #[serde(default)]
    pub auth: Vec<String>,

    /// Product listing endpoints.
    #[serde(default)]
    pub products: Vec<String>,

    /// Inventory lookup endpoints; the scanned code is appended as a path segment.
    #[serde(default)]
    pub inventory: Vec<String>,

    /// Price lookup endpoints; the product code is appended as a path segment.
    #[serde(default)]
    pub prices: Vec<String>,

    /// Cost lookup endpoints; the product code is appended as a path segment.
    #[serde(default)]
    pub costs: Vec<String>,
}

const LAN_HOST: &str = "http://192.168.18.1:8081";
const PUBLIC_HOST: &str = "http://186.4.230.233:8081";
const PUBLIC_INVENTORY_HOST: &str = "http://780f07a3d368.sn.mynetname.net:8081";

fn urls(hosts: &[&str], path: &str) -> Vec<String> {
    hosts.iter().map(|host| format!("{}{}", host, path)).collect()
}

impl EndpointSet {
    /// Local network first, public address as fallback.
    pub fn development_defaults() -> Self {
        Self {
            auth: urls(&[LAN_HOST, PUBLIC_HOST], "/ApiMov/api/auth/login"),
            products: urls(&[LAN_HOST, PUBLIC_HOST], "/ctzrApi/api/productos"),
            inventory: urls(&[LAN_HOST], "/ctzrApi/api/inventario"),
            prices: urls(&[LAN_HOST, PUBLIC_HOST], "/ctzrApi/api/precios"),
            costs: urls(&[LAN_HOST, PUBLIC_HOST], "/ctzrApi/api/costos"),
        }
    }

    /// Public addresses only.
    pub fn production_defaults() -> Self {
        Self {
            auth: urls(&[LAN_HOST, PUBLIC_HOST], "/ApiMov/api/auth/login"),
            products: urls(&[PUBLIC_HOST], "/ctzrApi/api/productos"),
            inventory: urls(&[PUBLIC_INVENTORY_HOST], "/ctzrApi/api/inventario"),
            prices: urls(&[PUBLIC_HOST], "/ctzrApi/api/precios"),
            costs: urls(&[PUBLIC_HOST], "/ctzrApi/api/costos"),
        }
    }

    /// Iterate `(api name, urls)` pairs, used by validation and the CLI.
    pub fn apis(&self) -> [(&'static str, &[String]); 5] {
        [
            ("auth", self.auth.as_slice()),
            ("products", self.products.as_slice()),
            ("inventory", self.inventory.as_slice()),
            ("prices", self.prices.as_slice()),
            ("costs", self.costs.as_slice()),
        ]
    }
}

/// Timeout configuration for backend calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-attempt timeout (connect, headers and body) in seconds.
    pub request_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,
}

impl TimeoutConfig {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 10,
            connect_secs: 5,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "cotizer=info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
