//! Gating policy
//!
//! Decides once per field whether its rules run at all. A field declared
//! `nullable` is skipped when it is absent or when every value it carries is
//! blank; any non-blank value puts it back under full validation.

use crate::spec::RuleToken;

/// Returns true if `tokens` contain the `nullable` marker.
pub fn is_nullable(tokens: &[RuleToken]) -> bool {
    tokens.iter().any(RuleToken::is_nullable_marker)
}

/// Returns true if the field's rules must be evaluated.
///
/// `values` is `None` when the field is absent from the input.
pub fn is_verifiable(tokens: &[RuleToken], values: Option<&[String]>) -> bool {
    if !is_nullable(tokens) {
        return true;
    }
    values.is_some_and(|values| values.iter().any(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tokens(rules: &[&str]) -> Vec<RuleToken> {
        rules.iter().map(|raw| RuleToken::parse(raw)).collect()
    }

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[rstest]
    #[case::absent(None, false)]
    #[case::no_values(Some(vec![]), false)]
    #[case::blank(Some(vec![""]), false)]
    #[case::all_blank(Some(vec!["", ""]), false)]
    #[case::one_filled(Some(vec!["", "x"]), true)]
    #[case::filled(Some(vec!["abc"]), true)]
    fn test_nullable_field(#[case] input: Option<Vec<&str>>, #[case] expected: bool) {
        let rules = tokens(&["nullable", "int"]);
        let input = input.map(|items| values(&items));
        assert_eq!(is_verifiable(&rules, input.as_deref()), expected);
    }

    #[rstest]
    #[case::absent(None)]
    #[case::blank(Some(vec![""]))]
    #[case::filled(Some(vec!["abc"]))]
    fn test_non_nullable_field_always_runs(#[case] input: Option<Vec<&str>>) {
        let rules = tokens(&["required", "int"]);
        let input = input.map(|items| values(&items));
        assert!(is_verifiable(&rules, input.as_deref()));
    }

    #[test]
    fn test_marker_position_does_not_matter() {
        let rules = tokens(&["int", "min:2", "nullable"]);
        assert!(is_nullable(&rules));
        assert!(!is_verifiable(&rules, Some(values(&[""]).as_slice())));
    }
}
