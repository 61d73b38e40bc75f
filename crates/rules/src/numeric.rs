//! Integer predicates
//!
//! Values and bounds are parsed as signed 64-bit integers. A value or bound
//! that does not parse never passes.

use std::cmp::Ordering;

use crate::first;

fn parse_value(values: &[String]) -> Option<i64> {
    let value = first(values);
    if value.is_empty() {
        return None;
    }
    value.parse().ok()
}

fn compare(values: &[String], bound: &str) -> Option<Ordering> {
    let value = parse_value(values)?;
    let bound = bound.parse::<i64>().ok()?;
    Some(value.cmp(&bound))
}

/// Passes when the value is an integer.
pub fn int(values: &[String], _param: &str) -> bool {
    parse_value(values).is_some()
}

/// Passes when the value is strictly less than `param`.
pub fn lt(values: &[String], param: &str) -> bool {
    compare(values, param).is_some_and(Ordering::is_lt)
}

/// Passes when the value is less than or equal to `param`.
pub fn lte(values: &[String], param: &str) -> bool {
    compare(values, param).is_some_and(Ordering::is_le)
}

/// Passes when the value is strictly greater than `param`.
pub fn gt(values: &[String], param: &str) -> bool {
    compare(values, param).is_some_and(Ordering::is_gt)
}

/// Passes when the value is greater than or equal to `param`.
pub fn gte(values: &[String], param: &str) -> bool {
    compare(values, param).is_some_and(Ordering::is_ge)
}

/// Passes when the value is non-empty and made only of the digits `0`-`9`.
///
/// Unlike [`int`], there is no sign and no length limit: `"007"` and a
/// forty-digit account number both pass. Other numeric characters such as
/// `½`, `²` or `Ⅷ` do not.
pub fn numeric(values: &[String], _param: &str) -> bool {
    let value = first(values);
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(value: &str) -> Vec<String> {
        vec![value.to_string()]
    }

    #[rstest]
    #[case("42", true)]
    #[case("-7", true)]
    #[case("+7", true)]
    #[case("", false)]
    #[case("4.2", false)]
    #[case("abc", false)]
    #[case("99999999999999999999", false)]
    fn test_int(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(int(&v(input), ""), expected);
    }

    #[test]
    fn test_comparisons() {
        assert!(lt(&v("17"), "18"));
        assert!(!lt(&v("18"), "18"));
        assert!(lte(&v("18"), "18"));
        assert!(!lte(&v("19"), "18"));
        assert!(gt(&v("19"), "18"));
        assert!(!gt(&v("18"), "18"));
        assert!(gte(&v("18"), "18"));
        assert!(!gte(&v("17"), "18"));
    }

    #[test]
    fn test_comparison_parse_failures() {
        assert!(!gte(&v("abc"), "18"));
        assert!(!gte(&v("20"), "eighteen"));
        assert!(!lt(&[], "5"));
    }

    #[rstest]
    #[case::leading_zero("007", true)]
    #[case::long("1234567890123456789012345678901234567890", true)]
    #[case::signed("-1", false)]
    #[case::letter("12a", false)]
    #[case::empty("", false)]
    #[case::vulgar_fraction("\u{bd}", false)]
    #[case::superscript("\u{b2}", false)]
    #[case::roman_numeral("\u{2167}", false)]
    #[case::mixed("1\u{b2}", false)]
    fn test_numeric(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(numeric(&v(input), ""), expected);
    }
}
