//! Validation report
//!
//! A [`Report`] holds at most one [`FieldError`] per field. Every further
//! failure on a field lands in that field's message map: a new rule adds an
//! entry, the same rule overwrites its entry.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ValidationFailure;
use crate::messages::MessageKey;

/// Rule tag recorded for a field missing from the input.
pub const MISSING_RULE: &str = "no";

// ============================================================================
// FIELD ERROR
// ============================================================================

/// All failures recorded for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    field: String,
    messages: IndexMap<MessageKey, String>,
    failed_rules: Vec<String>,
}

impl FieldError {
    fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            messages: IndexMap::new(),
            failed_rules: Vec::new(),
        }
    }

    /// Name of the failing field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Message map in insertion order, keyed `"def"` or by rule name.
    pub fn messages(&self) -> &IndexMap<MessageKey, String> {
        &self.messages
    }

    /// Message stored under `key` (`"def"` or a rule name).
    pub fn message(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// The field-level default message, if one was recorded.
    pub fn default_message(&self) -> Option<&str> {
        self.message(crate::messages::DEFAULT_KEY)
    }

    /// Rule tags in the order their failures were recorded.
    ///
    /// A field that was missing from the input carries the single tag
    /// [`MISSING_RULE`].
    pub fn failed_rules(&self) -> &[String] {
        &self.failed_rules
    }

    /// The message that best summarizes this field: the default message when
    /// present, otherwise the first message recorded.
    pub fn best_message(&self) -> Option<&str> {
        self.default_message()
            .or_else(|| self.messages.values().next().map(String::as_str))
    }

    /// Inserts or overwrites the entry for `key`.
    pub fn insert(&mut self, key: MessageKey, message: impl Into<String>) {
        self.messages.insert(key, message.into());
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.field)?;
        for (key, message) in &self.messages {
            write!(f, " {key}: {message};")?;
        }
        Ok(())
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// How far a validation call got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Stopped after the missing-field pre-check; no rule was dispatched.
    Presence,
    /// Rules were dispatched.
    #[default]
    Rules,
}

/// Outcome of one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    stage: Stage,
    errors: Vec<FieldError>,
}

impl Report {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the error entry for `field`, creating it if needed.
    ///
    /// Fields per request are few, so this is a linear scan.
    pub fn entry(&mut self, field: &str) -> &mut FieldError {
        let index = match self.errors.iter().position(|error| error.field == field) {
            Some(index) => index,
            None => {
                self.errors.push(FieldError::new(field));
                self.errors.len() - 1
            }
        };
        &mut self.errors[index]
    }

    /// Records `message` under `key` for `field`.
    pub fn record(&mut self, field: &str, key: MessageKey, message: impl Into<String>) {
        self.entry(field).insert(key, message);
    }

    /// Records one failure of `rule` on `field` with its resolved messages.
    pub fn record_failure<I>(&mut self, field: &str, rule: &str, messages: I)
    where
        I: IntoIterator<Item = (MessageKey, String)>,
    {
        let entry = self.entry(field);
        entry.failed_rules.push(rule.to_string());
        for (key, message) in messages {
            entry.insert(key, message);
        }
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    /// How far the call got before returning.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns true if nothing failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field errors in the order they were first recorded.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the error entry of `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }

    /// Consumes the report, returning its field errors.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// The first failure, flattened to one message; `None` if nothing failed.
    pub fn error(&self) -> Option<ValidationFailure> {
        let first = self.errors.first()?;
        Some(ValidationFailure {
            field: first.field.clone(),
            message: first.best_message().unwrap_or_default().to_string(),
        })
    }

    /// `Ok` if nothing failed, otherwise the first failure.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        match self.error() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "Validation passed");
        }
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_one_entry_per_field() {
        let mut report = Report::new();
        report.record("age", MessageKey::rule("int"), "not an int");
        report.record("age", MessageKey::rule("gte"), "too small");
        report.record("name", MessageKey::rule("required"), "missing");

        assert_eq!(report.len(), 2);
        let age = report.get("age").unwrap();
        assert_eq!(age.messages().len(), 2);
        assert_eq!(age.message("int"), Some("not an int"));
        assert_eq!(age.message("gte"), Some("too small"));
    }

    #[test]
    fn test_same_key_overwrites() {
        let mut report = Report::new();
        report.record("age", MessageKey::rule("gte"), "first");
        report.record("age", MessageKey::rule("gte"), "second");

        let age = report.get("age").unwrap();
        assert_eq!(age.messages().len(), 1);
        assert_eq!(age.message("gte"), Some("second"));
    }

    #[test]
    fn test_record_failure_tracks_rule_order() {
        let mut report = Report::new();
        report.record_failure("age", "int", [(MessageKey::rule("int"), "a".to_string())]);
        report.record_failure(
            "age",
            "gte",
            [
                (MessageKey::Default, "bad age".to_string()),
                (MessageKey::rule("gte"), "b".to_string()),
            ],
        );

        let age = report.get("age").unwrap();
        assert_eq!(age.failed_rules(), ["int", "gte"]);
        let keys: Vec<&str> = age.messages().keys().map(MessageKey::as_str).collect();
        assert_eq!(keys, vec!["int", "def", "gte"]);
    }

    #[test]
    fn test_best_message_prefers_default() {
        let mut report = Report::new();
        report.record("age", MessageKey::rule("int"), "not an int");
        report.record("age", MessageKey::Default, "bad age");
        assert_eq!(report.get("age").unwrap().best_message(), Some("bad age"));
    }

    #[test]
    fn test_best_message_falls_back_to_first_recorded() {
        let mut report = Report::new();
        report.record("age", MessageKey::rule("int"), "not an int");
        report.record("age", MessageKey::rule("gte"), "too small");
        assert_eq!(report.get("age").unwrap().best_message(), Some("not an int"));
    }

    #[test]
    fn test_error_uses_first_field() {
        let mut report = Report::new();
        assert!(report.error().is_none());

        report.record("name", MessageKey::rule("required"), "name required");
        report.record("age", MessageKey::Default, "bad age");

        let failure = report.error().unwrap();
        assert_eq!(failure.field, "name");
        assert_eq!(failure.message, "name required");
        assert_eq!(report.into_result().unwrap_err().to_string(), "name required");
    }

    #[test]
    fn test_empty_report_is_ok() {
        let report = Report::new();
        assert!(report.is_valid());
        assert_eq!(report.to_string(), "Validation passed");
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_serialize() {
        let mut report = Report::new();
        report.record_failure(
            "age",
            "gte",
            [
                (MessageKey::Default, "bad age".to_string()),
                (MessageKey::rule("gte"), "too young".to_string()),
            ],
        );

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "stage": "rules",
                "errors": [{
                    "field": "age",
                    "messages": { "def": "bad age", "gte": "too young" },
                    "failed_rules": ["gte"],
                }],
            })
        );
    }
}
