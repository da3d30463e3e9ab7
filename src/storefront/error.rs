//! Storefront error types.

use thiserror::Error;

use crate::fetch::{EndpointError, FetchError};

/// Errors returned by [`StorefrontClient`](crate::storefront::StorefrontClient).
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Every endpoint failed, or one answered unusably.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Username or password blank after trimming; nothing was sent.
    #[error("username and password are required")]
    MissingCredentials,

    /// The server answered the login with `success: false`.
    #[error("login rejected: {message}")]
    Rejected { message: String },

    /// Blank product or scanned code; nothing was sent.
    #[error("a product code is required")]
    EmptyCode,

    /// The payload had the right shape but its records did not decode.
    #[error("could not decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A configured endpoint is not a usable base URL.
    #[error("invalid {api} endpoint: {source}")]
    Endpoint {
        api: &'static str,
        #[source]
        source: EndpointError,
    },

    /// The HTTP client could not be constructed.
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl StorefrontError {
    /// Short text suitable for showing to the person who triggered the call.
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::Fetch(e) => e.user_message(),
            StorefrontError::MissingCredentials => "Please fill in every field.".to_string(),
            StorefrontError::Rejected { message } => message.clone(),
            StorefrontError::EmptyCode => "Enter or scan a product code.".to_string(),
            StorefrontError::Decode { .. } => {
                "The server response did not have the expected format.".to_string()
            }
            StorefrontError::Endpoint { .. } | StorefrontError::Client(_) => {
                "The client is misconfigured.".to_string()
            }
        }
    }
}

/// Result type for storefront operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;
