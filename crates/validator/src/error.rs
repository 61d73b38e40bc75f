//! Error types
//!
//! Two disjoint classes live here:
//!
//! - [`ConfigError`] / [`RegistryError`]: programmer mistakes in the rule
//!   declarations or registry setup. A validation call that hits one is
//!   aborted and produces no [`Report`](crate::Report).
//! - [`ValidationFailure`]: the single-message summary of a report that
//!   contains data failures. Data failures never abort a call.

use thiserror::Error;

/// A misconfigured rule declaration.
///
/// These are bugs in the calling code, not problems with the submitted data;
/// they should be fixed before deployment rather than shown to end users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No field carries any rule declaration.
    #[error("no validation rules were declared")]
    EmptyRuleSpec,

    /// The rule declarations are not a mapping of field names.
    #[error("rule declarations must map field names to rules")]
    MalformedRuleSpec,

    /// A field's rules are neither a `|`-delimited string nor a list of strings.
    #[error("rules for field `{field}` must be a `|`-delimited string or a list of strings")]
    MalformedRuleList {
        /// Field whose declaration has the wrong shape.
        field: String,
    },

    /// A rule token has no name, e.g. `"required||min:3"`.
    #[error("field `{field}` declares a rule with an empty name")]
    EmptyRuleName {
        /// Field carrying the empty token.
        field: String,
    },

    /// A rule name is not present in the registry.
    #[error("rule `{rule}` declared on field `{field}` is not registered")]
    UnknownRule {
        /// Field carrying the rule.
        field: String,
        /// Rule name as written in the declaration.
        rule: String,
    },

    /// A [`ValidatorConfig`](crate::ValidatorConfig) document could not be loaded.
    #[error("invalid validator configuration: {0}")]
    InvalidConfig(String),
}

/// A rule registry could not be built or installed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Rules must have a non-empty name.
    #[error("rule name must not be empty")]
    EmptyName,

    /// The process-wide registry was already initialized.
    #[error("the process-wide rule registry is already initialized")]
    AlreadyInstalled,
}

/// The first failure of a report, flattened to one message.
///
/// Returned by [`Report::error`](crate::Report::error) and
/// [`Report::into_result`](crate::Report::into_result); the full set of
/// failures stays available on the report itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    /// Field the message belongs to.
    pub field: String,
    /// Best-resolved message for that field.
    pub message: String,
}
