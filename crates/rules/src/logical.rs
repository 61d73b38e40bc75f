//! Marker predicates

/// Always passes.
///
/// `nullable` carries no check of its own: the engine reads it as a marker
/// that lets an absent or blank field skip its remaining rules.
pub fn nullable(_values: &[String], _param: &str) -> bool {
    true
}
