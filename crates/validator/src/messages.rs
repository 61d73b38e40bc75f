//! Custom failure messages
//!
//! Callers key messages either by field (`"age"`), which sets a default used
//! whenever any rule of that field fails, or by field and rule (`"age.gte"`),
//! which applies only when that rule fails. When both exist and the rule
//! fails, the field ends up with both entries.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::config::ValidatorConfig;
use crate::registry::RuleRegistry;

/// Literal message key of a field-level default message.
pub const DEFAULT_KEY: &str = "def";

// ============================================================================
// MESSAGE KEY
// ============================================================================

/// Key of one entry in a field's message map.
///
/// Keys compare, hash and serialize as their string form (`"def"` or the
/// rule name), so maps keyed by them can be queried with a plain `&str`.
#[derive(Debug, Clone)]
pub enum MessageKey {
    /// Field-level default message, `"def"`.
    Default,
    /// Message for one rule, keyed by the rule name as declared.
    Rule(String),
}

impl MessageKey {
    /// Key for the rule called `name`.
    pub fn rule(name: impl Into<String>) -> Self {
        MessageKey::Rule(name.into())
    }

    /// String form of the key.
    pub fn as_str(&self) -> &str {
        match self {
            MessageKey::Default => DEFAULT_KEY,
            MessageKey::Rule(name) => name,
        }
    }

    /// Returns true for the field-level default key.
    pub fn is_default(&self) -> bool {
        self.as_str() == DEFAULT_KEY
    }
}

impl PartialEq for MessageKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for MessageKey {}

impl Hash for MessageKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for MessageKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MessageKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// CALLER INPUT
// ============================================================================

/// Custom messages as supplied by the caller, keyed `"field"` or
/// `"field.rule"`.
///
/// ```rust
/// use formcheck_validator::CustomMessages;
///
/// let messages = CustomMessages::new()
///     .with("age", "please check your age")
///     .with("age.gte", "you must be an adult");
/// assert_eq!(messages.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomMessages {
    entries: IndexMap<String, String>,
}

impl CustomMessages {
    /// Creates an empty set of messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message, replacing any message under the same key.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert(key, message);
        self
    }

    /// Adds a message, replacing any message under the same key.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(key.into(), message.into());
    }

    /// Number of raw entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CustomMessages
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, message)| (key.into(), message.into()))
                .collect(),
        }
    }
}

// ============================================================================
// INDEX & RESOLUTION
// ============================================================================

#[derive(Debug, Default)]
struct FieldMessages {
    default: Option<String>,
    rules: HashMap<String, String>,
}

/// Messages to record for one failing rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The field's default message, recorded under `"def"`, if one exists.
    pub default: Option<String>,
    /// The rule-specific custom message, or the generated fallback.
    pub rule: String,
}

impl Resolution {
    /// Flattens the resolution into message-map entries for `rule`.
    pub fn into_entries(self, rule: &str) -> impl Iterator<Item = (MessageKey, String)> {
        self.default
            .map(|message| (MessageKey::Default, message))
            .into_iter()
            .chain(std::iter::once((MessageKey::rule(rule), self.rule)))
    }
}

/// Custom messages indexed by field, built once per validation call.
#[derive(Debug, Default)]
pub struct MessageIndex {
    fields: HashMap<String, FieldMessages>,
}

impl MessageIndex {
    /// Indexes `messages`.
    ///
    /// A `"field.rule"` key is split on its first `.`; keys naming a rule the
    /// registry does not know are dropped with a warning. Rule keys are stored
    /// as written, so `"age.gte"` only matches a token spelled `gte`.
    pub fn build(messages: &CustomMessages, registry: &RuleRegistry) -> Self {
        let mut index = Self::default();
        for (key, message) in &messages.entries {
            match key.split_once('.') {
                Some((field, rule)) => {
                    if !registry.contains(rule) {
                        warn!(key = %key, rule, "ignoring custom message for unregistered rule");
                        continue;
                    }
                    index
                        .fields
                        .entry(field.to_string())
                        .or_default()
                        .rules
                        .insert(rule.to_string(), message.clone());
                }
                None => {
                    index.fields.entry(key.clone()).or_default().default = Some(message.clone());
                }
            }
        }
        index
    }

    /// Resolves the messages to record when `rule` fails on `field`.
    pub fn resolve(&self, field: &str, rule: &str, config: &ValidatorConfig) -> Resolution {
        let custom = self.fields.get(field);
        let default = custom.and_then(|messages| messages.default.clone());
        let rule_message = custom
            .and_then(|messages| messages.rules.get(rule).cloned())
            .unwrap_or_else(|| config.fallback_for(field, rule));

        Resolution {
            default,
            rule: rule_message,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index(messages: CustomMessages) -> MessageIndex {
        MessageIndex::build(&messages, &RuleRegistry::new())
    }

    #[test]
    fn test_message_key_string_semantics() {
        assert_eq!(MessageKey::Default.as_str(), "def");
        assert!(MessageKey::Default.is_default());
        assert_eq!(MessageKey::rule("gte").to_string(), "gte");

        let mut map = IndexMap::new();
        map.insert(MessageKey::rule("gte"), "x");
        assert_eq!(map.get("gte"), Some(&"x"));
    }

    #[test]
    fn test_no_custom_message_uses_fallback() {
        let resolution = index(CustomMessages::new()).resolve("age", "gte", &ValidatorConfig::default());
        assert_eq!(
            resolution,
            Resolution {
                default: None,
                rule: "the field age not valid in gte".into(),
            }
        );
    }

    #[test]
    fn test_rule_message_wins_over_fallback() {
        let messages = CustomMessages::new().with("age.gte", "too young");
        let resolution = index(messages).resolve("age", "gte", &ValidatorConfig::default());
        assert_eq!(resolution.default, None);
        assert_eq!(resolution.rule, "too young");
    }

    #[test]
    fn test_default_is_added_alongside_fallback() {
        let messages = CustomMessages::new().with("age", "bad age");
        let resolution = index(messages).resolve("age", "int", &ValidatorConfig::default());
        assert_eq!(resolution.default.as_deref(), Some("bad age"));
        assert_eq!(resolution.rule, "the field age not valid in int");
    }

    #[test]
    fn test_default_and_rule_message_both_apply() {
        let messages = CustomMessages::new()
            .with("age", "bad age")
            .with("age.gte", "too young");
        let entries: Vec<(MessageKey, String)> = index(messages)
            .resolve("age", "gte", &ValidatorConfig::default())
            .into_entries("gte")
            .collect();
        assert_eq!(
            entries,
            vec![
                (MessageKey::Default, "bad age".to_string()),
                (MessageKey::rule("gte"), "too young".to_string()),
            ]
        );
    }

    #[test]
    fn test_rule_message_does_not_leak_to_other_rules() {
        let messages = CustomMessages::new().with("age.gte", "too young");
        let resolution = index(messages).resolve("age", "int", &ValidatorConfig::default());
        assert_eq!(resolution.rule, "the field age not valid in int");
    }

    #[test]
    fn test_unregistered_rule_key_is_ignored() {
        let messages = CustomMessages::new().with("age.bogus", "never used");
        let index = index(messages);
        assert!(index.fields.is_empty());
    }

    #[test]
    fn test_rule_key_is_matched_as_written() {
        // `Gte` is registered (first letter normalized) but tokens spelled `gte`
        // do not pick up a message keyed `Gte`.
        let messages = CustomMessages::new().with("age.Gte", "too young");
        let resolution = index(messages).resolve("age", "gte", &ValidatorConfig::default());
        assert_eq!(resolution.rule, "the field age not valid in gte");
    }

    #[test]
    fn test_later_entries_overwrite() {
        let messages: CustomMessages = [("age", "first"), ("age", "second")].into_iter().collect();
        let resolution = index(messages).resolve("age", "gte", &ValidatorConfig::default());
        assert_eq!(resolution.default.as_deref(), Some("second"));
    }
}
