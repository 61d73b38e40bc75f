//! Dispatch engine
//!
//! A validation call runs in two phases:
//!
//! 1. **Presence.** Every declared field that is absent from the input and
//!    not `nullable` is recorded as missing. If anything is missing the call
//!    returns right away and no rule runs.
//! 2. **Rules.** Each field that passes the gating policy has its rules
//!    evaluated in declaration order. A failure never stops the remaining
//!    rules of the field.
//!
//! Rule names are resolved against the registry once the presence phase has
//! passed and before any rule runs. An unknown rule then aborts the call,
//! even on a field the gate would skip.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::error::ConfigError;
use crate::gate;
use crate::messages::{CustomMessages, MessageIndex, MessageKey};
use crate::registry::{RulePredicate, RuleRegistry};
use crate::report::{MISSING_RULE, Report, Stage};
use crate::spec::{RuleSpec, RuleSpecInput, RuleToken};

/// Submitted data: field name -> ordered raw values.
pub type FieldValues = HashMap<String, Vec<String>>;

/// A field's rules, resolved to predicates.
struct FieldPlan<'s> {
    name: &'s str,
    tokens: &'s [RuleToken],
    rules: Vec<(&'s RuleToken, RulePredicate)>,
}

/// Validates field values against declared rules.
///
/// ```rust
/// use formcheck_validator::{FieldValues, RuleSpecInput, Validator};
///
/// let data = FieldValues::from([("age".to_string(), vec!["17".to_string()])]);
/// let rules = RuleSpecInput::new().field("age", "int|gte:18");
///
/// let report = Validator::new().validate(&data, &rules, None).unwrap();
/// assert_eq!(report.len(), 1);
/// assert_eq!(
///     report.error().unwrap().to_string(),
///     "the field age not valid in gte"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Validator<'r> {
    registry: &'r RuleRegistry,
    config: ValidatorConfig,
}

impl Validator<'static> {
    /// Creates a validator backed by the process-wide registry.
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::global())
    }
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Validator<'r> {
    /// Creates a validator backed by `registry`.
    pub fn with_registry(registry: &'r RuleRegistry) -> Self {
        Self {
            registry,
            config: ValidatorConfig::default(),
        }
    }

    /// Replaces the message configuration.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The registry rules are resolved against.
    pub fn registry(&self) -> &RuleRegistry {
        self.registry
    }

    /// The message configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Parses `rules` and validates `data` against them.
    ///
    /// Returns `Err` only for configuration errors; data failures are
    /// reported in the returned [`Report`].
    pub fn validate(
        &self,
        data: &FieldValues,
        rules: &RuleSpecInput,
        messages: Option<&CustomMessages>,
    ) -> Result<Report, ConfigError> {
        let spec = rules.parse()?;
        self.validate_spec(data, &spec, messages)
    }

    /// Validates `data` against an already parsed spec.
    #[tracing::instrument(level = "debug", skip_all, fields(fields = spec.len()))]
    pub fn validate_spec(
        &self,
        data: &FieldValues,
        spec: &RuleSpec,
        messages: Option<&CustomMessages>,
    ) -> Result<Report, ConfigError> {
        let mut report = Report::new();

        if !self.check_presence(data, spec, &mut report) {
            debug!(missing = report.len(), "required fields missing, skipping rules");
            report.set_stage(Stage::Presence);
            return Ok(report);
        }

        let plan = self.resolve(spec)?;

        let index = messages
            .map(|messages| MessageIndex::build(messages, self.registry))
            .unwrap_or_default();

        for field in &plan {
            self.dispatch(field, data, &index, &mut report);
        }

        debug!(failed = report.len(), "validation finished");
        Ok(report)
    }

    fn resolve<'s>(&self, spec: &'s RuleSpec) -> Result<Vec<FieldPlan<'s>>, ConfigError> {
        spec.iter()
            .map(|(name, tokens)| -> Result<FieldPlan<'s>, ConfigError> {
                let rules = tokens
                    .iter()
                    .map(|token| {
                        self.registry
                            .get(token.name())
                            .map(|predicate| (token, predicate))
                            .ok_or_else(|| ConfigError::UnknownRule {
                                field: name.to_string(),
                                rule: token.name().to_string(),
                            })
                    })
                    .collect::<Result<_, _>>()?;
                Ok(FieldPlan {
                    name,
                    tokens,
                    rules,
                })
            })
            .collect()
    }

    /// Records every absent, non-nullable field. Returns true if none was.
    fn check_presence(&self, data: &FieldValues, spec: &RuleSpec, report: &mut Report) -> bool {
        for (field, tokens) in spec.iter() {
            if !data.contains_key(field) && !gate::is_nullable(tokens) {
                report.record_failure(
                    field,
                    MISSING_RULE,
                    [(MessageKey::Default, self.config.missing_for(field))],
                );
            }
        }
        report.is_empty()
    }

    fn dispatch(
        &self,
        field: &FieldPlan<'_>,
        data: &FieldValues,
        index: &MessageIndex,
        report: &mut Report,
    ) {
        let values = data.get(field.name).map(Vec::as_slice);
        if !gate::is_verifiable(field.tokens, values) {
            debug!(field = field.name, "nullable field is absent or blank, skipping");
            return;
        }
        let values = values.unwrap_or_default();

        for &(token, predicate) in &field.rules {
            let passed = predicate(values, token.param());
            trace!(field = field.name, rule = %token, passed, "rule evaluated");
            if !passed {
                let rule = token.name();
                let resolution = index.resolve(field.name, rule, &self.config);
                report.record_failure(field.name, rule, resolution.into_entries(rule));
            }
        }
    }
}
