//! String content predicates
//!
//! Presence, length, pattern and format checks over the first value of a
//! field.

use std::sync::LazyLock;

use crate::first;

static EMAIL_REGEX: LazyLock<::regex::Regex> = LazyLock::new(|| {
    ::regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

// Mainland China mobile numbers: 11 digits, `1` followed by a carrier digit.
static MOBILE_REGEX: LazyLock<::regex::Regex> =
    LazyLock::new(|| ::regex::Regex::new(r"^1[356789][0-9]{9}$").unwrap());

// ============================================================================
// PRESENCE
// ============================================================================

/// Passes when the field has a non-empty first value.
pub fn required(values: &[String], _param: &str) -> bool {
    !first(values).is_empty()
}

// ============================================================================
// LENGTH
// ============================================================================

/// Passes when the value has at most `param` characters.
///
/// Length is counted in Unicode scalar values. A parameter that is not an
/// integer never passes.
pub fn max(values: &[String], param: &str) -> bool {
    match param.parse::<i64>() {
        Ok(bound) => char_count(first(values)) <= bound,
        Err(_) => false,
    }
}

/// Passes when the value has at least `param` characters.
pub fn min(values: &[String], param: &str) -> bool {
    match param.parse::<i64>() {
        Ok(bound) => char_count(first(values)) >= bound,
        Err(_) => false,
    }
}

fn char_count(input: &str) -> i64 {
    i64::try_from(input.chars().count()).unwrap_or(i64::MAX)
}

// ============================================================================
// PATTERNS
// ============================================================================

/// Passes when `param`, compiled as a regular expression, matches the value.
///
/// The pattern is not implicitly anchored; add `^`/`$` to match the whole
/// value. An invalid pattern never passes.
pub fn regex(values: &[String], param: &str) -> bool {
    match ::regex::Regex::new(param) {
        Ok(pattern) => pattern.is_match(first(values)),
        Err(_) => false,
    }
}

/// Passes when the value looks like an email address.
pub fn email(values: &[String], _param: &str) -> bool {
    EMAIL_REGEX.is_match(first(values))
}

/// Passes when the value parses as an absolute URL.
pub fn url(values: &[String], _param: &str) -> bool {
    ::url::Url::parse(first(values)).is_ok()
}

/// Passes when the value is an 11-digit mobile number (`1[356789]` prefix).
pub fn mobile(values: &[String], _param: &str) -> bool {
    MOBILE_REGEX.is_match(first(values))
}

// ============================================================================
// MEMBERSHIP
// ============================================================================

/// Passes when the value equals one of the comma-separated items in `param`.
///
/// Items are compared verbatim; surrounding whitespace is significant.
pub fn one_of(values: &[String], param: &str) -> bool {
    let current = first(values);
    param.split(',').any(|item| item == current)
}

// ============================================================================
// TESTS
// ============================================================================
