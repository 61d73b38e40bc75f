//! Prelude module for convenient imports.
//!
//! `use formcheck_validator::prelude::*;` brings in the types needed to
//! declare rules, run a validation and read its report.

pub use crate::config::ValidatorConfig;
pub use crate::engine::{FieldValues, Validator};
pub use crate::error::{ConfigError, RegistryError, ValidationFailure};
pub use crate::messages::{CustomMessages, MessageKey};
pub use crate::registry::{RulePredicate, RuleRegistry};
pub use crate::report::{FieldError, Report, Stage};
pub use crate::spec::{RuleDecl, RuleSpecInput};
pub use crate::validate;
