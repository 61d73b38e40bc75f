//! # formcheck-rules
//!
//! Leaf predicates behind the built-in formcheck rule names.
//!
//! Every predicate has the same shape, [`Predicate`]: it receives the full
//! value list of a field and the raw rule parameter (the part after `:` in
//! `min:3`, empty when absent) and answers whether the field passes.
//! Predicates are pure and never fail; `false` simply means "did not
//! validate".
//!
//! ```rust
//! use formcheck_rules::{min, one_of};
//!
//! let values = vec!["alice".to_string()];
//! assert!(min(&values, "3"));
//! assert!(!one_of(&values, "bob,carol"));
//! ```
//!
//! Most predicates only look at the first value of a field. A field without
//! any value is treated as a single empty string.

pub mod logical;
pub mod numeric;
pub mod string;

pub use logical::nullable;
pub use numeric::{gt, gte, int, lt, lte, numeric};
pub use string::{email, max, min, mobile, one_of, regex, required, url};

/// Signature shared by every rule predicate.
pub type Predicate = fn(&[String], &str) -> bool;

/// Built-in rule names paired with their predicates, in registration order.
///
/// Names are lowercase, as users write them in rule strings.
pub const BUILTINS: &[(&str, Predicate)] = &[
    ("required", required),
    ("regex", regex),
    ("max", max),
    ("min", min),
    ("int", int),
    ("lt", lt),
    ("lte", lte),
    ("gt", gt),
    ("gte", gte),
    ("numeric", numeric),
    ("nullable", nullable),
    ("email", email),
    ("url", url),
    ("mobile", mobile),
    ("in", one_of),
];

/// Returns the value a single-valued predicate inspects.
#[inline]
pub(crate) fn first(values: &[String]) -> &str {
    values.first().map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique() {
        let mut names: Vec<_> = BUILTINS.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILTINS.len());
    }

    #[test]
    fn first_of_empty_is_blank() {
        assert_eq!(first(&[]), "");
        assert_eq!(first(&["a".into(), "b".into()]), "a");
    }
}
