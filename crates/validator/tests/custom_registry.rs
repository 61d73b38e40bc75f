//! Installing a caller-built registry as the process-wide one.
//!
//! Lives in its own test binary so no other test touches the global
//! registry before it is installed.

use formcheck_validator::prelude::*;
use formcheck_validator::{install, registry};

fn zip(values: &[String], _param: &str) -> bool {
    values
        .first()
        .is_some_and(|value| value.len() == 5 && value.bytes().all(|b| b.is_ascii_digit()))
}

#[test]
fn installed_registry_serves_every_validation() {
    let mut rules = RuleRegistry::new();
    rules.register("zip", zip).unwrap();
    install(rules).unwrap();

    let global = RuleRegistry::global();
    assert!(global.contains("zip"));
    assert!(global.contains("Zip"));
    assert!(global.rule_names().contains(&registry::normalize_rule_name("zip")));

    let spec = RuleSpecInput::new().field("postcode", "required|zip");
    let messages = CustomMessages::new().with("postcode.zip", "enter a 5-digit zip code");

    let ok = FieldValues::from([("postcode".to_string(), vec!["90210".to_string()])]);
    assert!(validate(&ok, &spec, Some(&messages)).unwrap().is_valid());

    let bad = FieldValues::from([("postcode".to_string(), vec!["9021".to_string()])]);
    let report = validate(&bad, &spec, Some(&messages)).unwrap();
    assert_eq!(report.error().unwrap().message, "enter a 5-digit zip code");

    // frozen once installed
    assert_eq!(
        install(RuleRegistry::empty()),
        Err(RegistryError::AlreadyInstalled)
    );
}
