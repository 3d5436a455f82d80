use headway::clean::{Rule, RuleSet};

#[test]
fn rules_apply_in_list_order() {
    let mut rules = RuleSet::new().with(Rule::new("a", "b", false).unwrap());
    rules.push(Rule::new("b", "c", false).unwrap());
    assert_eq!(rules.apply("a"), "c");
}

#[test]
fn non_matching_rule_is_a_noop() {
    let rules = RuleSet::new().with(Rule::new("missing", "found", false).unwrap());
    assert_eq!(rules.apply("Westgate Mall"), "Westgate Mall");
}

#[test]
fn replacement_references_capture_groups() {
    let rule = Rule::new(r"(\w+), (\w+)", "${2} ${1}", false).unwrap();
    assert_eq!(rule.apply("Ctr, Hart"), "Hart Ctr");
}

#[test]
fn case_insensitive_flag_controls_matching() {
    let insensitive = Rule::new("exchange", "Exch", true).unwrap();
    assert_eq!(insensitive.apply("EXCHANGE"), "Exch");

    let sensitive = Rule::new("exchange", "Exch", false).unwrap();
    assert_eq!(sensitive.apply("EXCHANGE"), "EXCHANGE");
}

#[test]
fn empty_rule_set_returns_input() {
    let rules = RuleSet::new();
    assert!(rules.is_empty());
    assert_eq!(rules.apply("anything"), "anything");
}

#[test]
fn invalid_pattern_is_reported() {
    assert!(Rule::new("(", "", false).is_err());
}
