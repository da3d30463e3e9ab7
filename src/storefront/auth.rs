//! Login credentials and the login answer.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::storefront::error::StorefrontError;

/// Message used when a rejection carries none.
pub const DEFAULT_REJECTION: &str = "invalid credentials";

/// Trimmed, non-blank username and password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Result<Self, StorefrontError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(StorefrontError::MissingCredentials);
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// JSON body for the login call.
    pub(crate) fn to_body(&self) -> Value {
        json!({
            "username": self.username,
            "password": self.password,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of a login answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginReceipt {
    /// Turn `success: false` into [`StorefrontError::Rejected`].
    pub fn into_result(self) -> Result<Self, StorefrontError> {
        if self.success {
            Ok(self)
        } else {
            let message = self
                .message
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
            Err(StorefrontError::Rejected { message })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_are_trimmed() {
        let creds = Credentials::new("  vendedor ", "\tclave\n").unwrap();
        assert_eq!(creds.username(), "vendedor");
        assert_eq!(
            creds.to_body(),
            json!({"username": "vendedor", "password": "clave"})
        );
    }

    #[test]
    fn test_blank_credentials_rejected() {
        assert!(matches!(
            Credentials::new("   ", "x"),
            Err(StorefrontError::MissingCredentials)
        ));
        assert!(matches!(
            Credentials::new("x", ""),
            Err(StorefrontError::MissingCredentials)
        ));
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials::new("vendedor", "secreto").unwrap();
        assert!(!format!("{:?}", creds).contains("secreto"));
    }

    #[test]
    fn test_rejection_message() {
        let receipt = LoginReceipt {
            success: false,
            message: None,
        };
        match receipt.into_result() {
            Err(StorefrontError::Rejected { message }) => assert_eq!(message, DEFAULT_REJECTION),
            other => panic!("unexpected: {other:?}"),
        }

        let ok = LoginReceipt {
            success: true,
            message: Some("Bienvenido".into()),
        };
        assert!(ok.into_result().is_ok());
    }
}
