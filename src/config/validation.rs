//! Configuration validation.
//!
//! Serde handles syntax; this module checks that every endpoint is a usable
//! base URL, that the active profile has somewhere to send each call, and
//! that timeouts are non-zero. All problems are reported, not just the first.

use crate::config::schema::{ClientConfig, EndpointSet, Profile};
use crate::fetch::Endpoint;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `production.products[1]`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for profile in [Profile::Development, Profile::Production] {
        let set = match profile {
            Profile::Development => &config.development,
            Profile::Production => &config.production,
        };
        check_endpoint_set(profile, set, profile == config.profile, &mut errors);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.connect_secs",
            "must be greater than zero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_endpoint_set(
    profile: Profile,
    set: &EndpointSet,
    active: bool,
    errors: &mut Vec<ValidationError>,
) {
    for (api, urls) in set.apis() {
        if active && urls.is_empty() {
            errors.push(ValidationError::new(
                format!("{}.{}", profile, api),
                "active profile has no endpoints",
            ));
        }
        for (i, url) in urls.iter().enumerate() {
            if let Err(e) = url.parse::<Endpoint>() {
                errors.push(ValidationError::new(
                    format!("{}.{}[{}]", profile, api, i),
                    e.to_string(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_problem() {
        let mut config = ClientConfig::default();
        config.production.products = vec!["not a url".into(), "ftp://host/api".into()];
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "production.products[0]",
                "production.products[1]",
                "timeouts.request_secs"
            ]
        );
    }

    #[test]
    fn test_empty_list_only_matters_for_active_profile() {
        let mut config = ClientConfig::default();
        config.production.prices.clear();
        assert!(validate_config(&config).is_ok());

        config.profile = Profile::Production;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "production.prices");
    }
}
