//! Rule registry
//!
//! Maps rule names to predicates. Lookups force the first character of the
//! name to uppercase and nothing else, so `min` and `Min` reach the same
//! rule while `MIN` does not. Registration applies the same normalization to
//! the stored key.
//!
//! The process-wide registry is created once, either lazily with the
//! built-ins on first use or explicitly through [`install`], and is
//! read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::RegistryError;

/// Predicate signature: `(values, param) -> passes`.
pub use formcheck_rules::Predicate as RulePredicate;

/// Rule name that doubles as the gating marker.
pub const NULLABLE: &str = "nullable";

static GLOBAL: OnceLock<RuleRegistry> = OnceLock::new();

/// Registry of named rule predicates.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, RulePredicate>,
}

impl RuleRegistry {
    /// Creates a registry holding every built-in rule.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_builtins();
        registry
    }

    /// Creates a registry without any rule.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Registers a rule, replacing any rule stored under the same key.
    pub fn register(
        &mut self,
        name: &str,
        predicate: RulePredicate,
    ) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        self.rules.insert(normalize_rule_name(name), predicate);
        Ok(())
    }

    /// Looks a rule up by the name written in a rule declaration.
    pub fn get(&self, name: &str) -> Option<RulePredicate> {
        if name.is_empty() {
            return None;
        }
        self.rules.get(&normalize_rule_name(name)).copied()
    }

    /// Returns true if `name` resolves to a rule.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the stored rule keys, sorted.
    pub fn rule_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the process-wide registry, creating it with the built-ins if
    /// nothing was installed yet.
    pub fn global() -> &'static RuleRegistry {
        GLOBAL.get_or_init(RuleRegistry::new)
    }

    fn register_builtins(&mut self) {
        for &(name, predicate) in formcheck_rules::BUILTINS {
            self.rules.insert(normalize_rule_name(name), predicate);
        }
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs `registry` as the process-wide registry.
///
/// Must run before the first validation that uses the global registry;
/// afterwards the registry is frozen and this returns
/// [`RegistryError::AlreadyInstalled`].
pub fn install(registry: RuleRegistry) -> Result<(), RegistryError> {
    GLOBAL
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)
}

/// Uppercases the first character of `name`, leaving the rest untouched.
pub fn normalize_rule_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
