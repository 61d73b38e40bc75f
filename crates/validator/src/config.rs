//! Validator configuration
//!
//! Controls the text of the messages the engine generates itself. Messages
//! supplied by callers are never rewritten.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Message templates used by a [`Validator`](crate::Validator).
///
/// Templates accept two placeholders: `{field}` and `{rule}`.
///
/// ```rust
/// use formcheck_validator::ValidatorConfig;
///
/// let config = ValidatorConfig::from_json_str(
///     r#"{ "fallback_message": "{field} failed {rule}" }"#,
/// )
/// .unwrap();
/// assert_eq!(config.fallback_for("age", "gte"), "age failed gte");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Message recorded when a required field is absent from the input.
    pub missing_message: String,
    /// Message recorded when a rule fails and no custom message applies.
    pub fallback_message: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            missing_message: "the field {field} is not provided".to_string(),
            fallback_message: "the field {field} not valid in {rule}".to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidConfig(e.to_string()))
    }

    /// Sets the missing-field template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_missing_message(mut self, template: impl Into<String>) -> Self {
        self.missing_message = template.into();
        self
    }

    /// Sets the fallback template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_fallback_message(mut self, template: impl Into<String>) -> Self {
        self.fallback_message = template.into();
        self
    }

    /// Renders the missing-field message for `field`.
    pub fn missing_for(&self, field: &str) -> String {
        render(&self.missing_message, field, "")
    }

    /// Renders the fallback message for `rule` failing on `field`.
    pub fn fallback_for(&self, field: &str, rule: &str) -> String {
        render(&self.fallback_message, field, rule)
    }
}

fn render(template: &str, field: &str, rule: &str) -> String {
    template.replace("{field}", field).replace("{rule}", rule)
}
