//! Rule declarations
//!
//! Callers declare rules per field either as one `|`-delimited string
//! (`"required|min:3"`) or as an already-split list (`["required", "min:3"]`).
//! [`RuleSpecInput::parse`] normalizes both into a [`RuleSpec`]: an ordered
//! mapping from field to [`RuleToken`]s.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::ConfigError;
use crate::registry::NULLABLE;

// ============================================================================
// RULE TOKEN
// ============================================================================

/// One rule reference: `name` or `name:param`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleToken {
    name: String,
    param: String,
}

impl RuleToken {
    /// Splits `raw` once on the first `:`.
    ///
    /// Everything after that colon is the parameter, so `regex:^a:b$` keeps
    /// `^a:b$` intact.
    pub fn parse(raw: &str) -> Self {
        let (name, param) = raw.split_once(':').unwrap_or((raw, ""));
        Self {
            name: name.to_string(),
            param: param.to_string(),
        }
    }

    /// Rule name as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw parameter; empty when the token has none.
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Returns true if this token is the `nullable` gating marker.
    pub fn is_nullable_marker(&self) -> bool {
        self.name == NULLABLE
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.param.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}:{}", self.name, self.param)
        }
    }
}

// ============================================================================
// RULE DECLARATION INPUT
// ============================================================================

/// The rules declared for one field, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleDecl {
    /// `"required|min:3"`
    Delimited(String),
    /// `["required", "min:3"]`
    List(Vec<String>),
}

impl RuleDecl {
    fn tokens(&self) -> Vec<RuleToken> {
        match self {
            RuleDecl::Delimited(rules) => rules.split('|').map(RuleToken::parse).collect(),
            RuleDecl::List(rules) => rules.iter().map(|raw| RuleToken::parse(raw)).collect(),
        }
    }
}

impl From<&str> for RuleDecl {
    fn from(rules: &str) -> Self {
        RuleDecl::Delimited(rules.to_string())
    }
}

impl From<String> for RuleDecl {
    fn from(rules: String) -> Self {
        RuleDecl::Delimited(rules)
    }
}

impl From<Vec<String>> for RuleDecl {
    fn from(rules: Vec<String>) -> Self {
        RuleDecl::List(rules)
    }
}

impl From<Vec<&str>> for RuleDecl {
    fn from(rules: Vec<&str>) -> Self {
        RuleDecl::List(rules.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RuleDecl {
    fn from(rules: [&str; N]) -> Self {
        RuleDecl::List(rules.into_iter().map(str::to_string).collect())
    }
}

/// Rule declarations for a whole request, keyed by field.
///
/// Field order is kept and becomes the order fields are validated in.
///
/// ```rust
/// use formcheck_validator::RuleSpecInput;
///
/// let rules = RuleSpecInput::new()
///     .field("name", "required|min:3")
///     .field("code", ["nullable", "int"]);
/// let spec = rules.parse().unwrap();
/// assert_eq!(spec.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSpecInput {
    fields: IndexMap<String, RuleDecl>,
}

impl RuleSpecInput {
    /// Creates an empty declaration set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the rules of `field`, replacing any earlier declaration.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, field: impl Into<String>, rules: impl Into<RuleDecl>) -> Self {
        self.fields.insert(field.into(), rules.into());
        self
    }

    /// Reads declarations from a JSON object whose values are strings or
    /// arrays of strings.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let Value::Object(map) = value else {
            return Err(ConfigError::MalformedRuleSpec);
        };

        let fields = map
            .iter()
            .map(|(field, rules)| {
                let decl = match rules {
                    Value::String(rules) => RuleDecl::Delimited(rules.clone()),
                    Value::Array(items) => RuleDecl::List(
                        items
                            .iter()
                            .map(|item| {
                                item.as_str().map(str::to_string).ok_or_else(|| {
                                    ConfigError::MalformedRuleList {
                                        field: field.clone(),
                                    }
                                })
                            })
                            .collect::<Result<_, _>>()?,
                    ),
                    _ => {
                        return Err(ConfigError::MalformedRuleList {
                            field: field.clone(),
                        });
                    }
                };
                Ok((field.clone(), decl))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { fields })
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Normalizes the declarations into a [`RuleSpec`].
    ///
    /// Fails when nothing is declared or when a token has an empty name.
    /// Rule names are not checked against a registry here.
    pub fn parse(&self) -> Result<RuleSpec, ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::EmptyRuleSpec);
        }

        let mut fields = IndexMap::with_capacity(self.fields.len());
        for (field, decl) in &self.fields {
            let tokens = decl.tokens();
            if tokens.iter().any(|token| token.name().is_empty()) {
                return Err(ConfigError::EmptyRuleName {
                    field: field.clone(),
                });
            }
            fields.insert(field.clone(), tokens);
        }

        Ok(RuleSpec { fields })
    }
}

impl<K, D> FromIterator<(K, D)> for RuleSpecInput
where
    K: Into<String>,
    D: Into<RuleDecl>,
{
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(field, rules)| (field.into(), rules.into()))
                .collect(),
        }
    }
}

// ============================================================================
// NORMALIZED SPEC
// ============================================================================

/// Normalized rule declarations: field -> ordered rule tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    fields: IndexMap<String, Vec<RuleToken>>,
}

impl RuleSpec {
    /// Iterates fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleToken])> {
        self.fields
            .iter()
            .map(|(field, tokens)| (field.as_str(), tokens.as_slice()))
    }

    /// Returns the tokens declared for `field`.
    pub fn get(&self, field: &str) -> Option<&[RuleToken]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
