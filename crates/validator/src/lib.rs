//! # formcheck-validator
//!
//! Declarative validation of submitted field values.
//!
//! Rules are declared per field as a `|`-delimited string or a list of
//! tokens, resolved by name against a [`RuleRegistry`], and evaluated against
//! the raw string values of each field. Failures are aggregated into a
//! [`Report`] holding one entry per failing field.
//!
//! ## Quick Start
//!
//! ```rust
//! use formcheck_validator::prelude::*;
//!
//! let data = FieldValues::from([
//!     ("name".to_string(), vec!["Al".to_string()]),
//!     ("age".to_string(), vec!["17".to_string()]),
//! ]);
//! let rules = RuleSpecInput::new()
//!     .field("name", "required|min:3")
//!     .field("age", "int|gte:18")
//!     .field("code", "nullable|int");
//! let messages = CustomMessages::new().with("age.gte", "you must be an adult");
//!
//! let report = validate(&data, &rules, Some(&messages)).unwrap();
//! assert_eq!(report.len(), 2);
//! assert_eq!(
//!     report.get("age").unwrap().message("gte"),
//!     Some("you must be an adult")
//! );
//! ```
//!
//! ## Flow
//!
//! 1. [`spec`] parses declarations into ordered [`RuleToken`]s.
//! 2. Absent fields that are not `nullable` are reported as missing and no
//!    rule runs.
//! 3. [`engine`] resolves every token against the registry; an unknown rule
//!    is a [`ConfigError`] and aborts the call.
//! 4. [`gate`] skips `nullable` fields that are absent or blank.
//! 5. Remaining rules run in order; [`messages`] picks the text of each
//!    failure and [`report`] aggregates it.
//!
//! ## Built-in Rules
//!
//! `required`, `regex`, `max`, `min`, `int`, `lt`, `lte`, `gt`, `gte`,
//! `numeric`, `nullable`, `email`, `url`, `mobile` and `in`. See
//! [`formcheck_rules`] for their semantics.

pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod messages;
pub mod prelude;
pub mod registry;
pub mod report;
pub mod spec;

pub use config::ValidatorConfig;
pub use engine::{FieldValues, Validator};
pub use error::{ConfigError, RegistryError, ValidationFailure};
pub use messages::{CustomMessages, MessageKey};
pub use registry::{RulePredicate, RuleRegistry, install};
pub use report::{FieldError, Report, Stage};
pub use spec::{RuleDecl, RuleSpec, RuleSpecInput, RuleToken};

/// Validates `data` against `rules` with the process-wide registry and the
/// default message configuration.
///
/// Shorthand for `Validator::new().validate(data, rules, messages)`.
pub fn validate(
    data: &FieldValues,
    rules: &RuleSpecInput,
    messages: Option<&CustomMessages>,
) -> Result<Report, ConfigError> {
    Validator::new().validate(data, rules, messages)
}
