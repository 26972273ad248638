//! Tests for the JSON entry points exposed to WebAssembly.

use gearpath::wasm::{classify, get_game_tables, get_version, optimize};
use serde_json::Value;

fn parse(output: &str) -> Value {
    serde_json::from_str(output).expect("output should be valid JSON")
}

#[test]
fn test_optimize_item_array() {
    let input = r#"{
        "items": [
            {"slot": "head", "name": "Helm", "item_level": 681},
            {"slot": "chest", "name": "Robe", "item_level": 691}
        ],
        "target_average": 690,
        "config": {"strategy": "level_priority"}
    }"#;
    let output = parse(&optimize(input));

    assert_eq!(output["success"], true);
    let results = output["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["strategy"], "level_priority");
    assert_eq!(results[0]["goal_reached"], true);
    assert_eq!(results[0]["steps"][0]["kind"], "upgrade");
}

#[test]
fn test_optimize_compare_profile() {
    let input = r#"{
        "items": {"gear": {"items": {
            "head": {"item_level": 684, "name": "Helm"},
            "wrist": {"item_level": 681, "name": "Bracers"}
        }}},
        "target_average": 700,
        "compare": true
    }"#;
    let output = parse(&optimize(input));

    assert_eq!(output["success"], true);
    assert_eq!(output["results"].as_array().unwrap().len(), 4);
}

#[test]
fn test_optimize_reports_errors() {
    let output = parse(&optimize("{"));
    assert_eq!(output["success"], false);
    assert!(output["error"].as_str().unwrap().starts_with("Invalid input"));

    let no_items = r#"{"items": [], "target_average": 700}"#;
    let output = parse(&optimize(no_items));
    assert_eq!(output["success"], false);
    assert_eq!(output["error"], "no items to optimize");

    let missing_level = r#"{"items": [{"slot": "head", "name": "Helm"}], "target_average": 700}"#;
    let output = parse(&optimize(missing_level));
    assert_eq!(output["success"], false);
}

#[test]
fn test_classify_entry_point() {
    let legs = r#"{"slot": "legs", "name": "Legs", "item_level": 700, "bonuses": [10256]}"#;
    let tier = classify(legs);
    assert_eq!(tier, "\"mythic\"");
    assert_eq!(classify("nonsense"), "\"unknown\"");
}

#[test]
fn test_game_tables_summary() {
    let tables = parse(&get_game_tables());
    assert_eq!(tables["craft_ceiling"], 727);
    assert_eq!(tables["max_crafted_items"], 9);
    assert_eq!(tables["upgrade_levels"].as_array().unwrap().len(), 16);
    assert_eq!(tables["non_craftable_slots"][0], "trinket1");
    assert!(!get_version().is_empty());
}
