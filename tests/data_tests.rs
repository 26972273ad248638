//! Tests for item loading functionality.

use gearpath::data::{
    load_items, load_items_csv, parse_gear_profile, parse_items_json, parse_items_value,
    read_items_csv,
};
use gearpath::error::DataError;
use gearpath::models::Slot;
use serde_json::json;
use std::path::Path;

#[test]
fn test_load_sample_character() {
    let data_path = Path::new("data/sample_character.csv");
    if !data_path.exists() {
        return;
    }

    let items = load_items_csv(data_path).expect("Failed to load data");
    assert_eq!(items.len(), 16, "Sample should cover every tracked slot");

    let slots: Vec<Slot> = items.iter().map(|i| i.slot).collect();
    assert_eq!(slots, Slot::ALL.to_vec());

    let head = &items[0];
    assert_eq!(head.item_level, Some(684));
    assert_eq!(head.bonus_ids, vec![10254, 1520]);
    assert!(items[1].bonus_ids.is_empty(), "Empty bonus column should be empty");
}

#[test]
fn test_load_items_picks_format_by_extension() {
    let data_path = Path::new("data/sample_character.csv");
    if !data_path.exists() {
        return;
    }
    let items = load_items(data_path).expect("Failed to load data");
    assert_eq!(items.len(), 16);
}

#[test]
fn test_csv_missing_level_is_kept() {
    let csv = "slot,name,item_id,item_level,bonus_ids\nhead,Helm,,,\n";
    let items = read_items_csv(csv.as_bytes()).unwrap();
    assert_eq!(items[0].item_level, None);
}

#[test]
fn test_csv_bad_bonus_id() {
    let csv = "slot,name,item_id,item_level,bonus_ids\nhead,Helm,,690,10254;x\n";
    assert!(matches!(
        read_items_csv(csv.as_bytes()),
        Err(DataError::BonusId { .. })
    ));
}

#[test]
fn test_csv_unknown_slot_is_an_error() {
    let csv = "slot,name,item_id,item_level,bonus_ids\ntabard,Tabard,,1,\n";
    assert!(matches!(read_items_csv(csv.as_bytes()), Err(DataError::Csv(_))));
}

#[test]
fn test_parse_gear_profile() {
    let json = r#"{
        "name": "Someone",
        "gear": {
            "item_level_equipped": 690.5,
            "items": {
                "trinket1": {"item_id": 1, "item_level": 694, "name": "Idol", "bonuses": [10255]},
                "head": {"item_id": 2, "item_level": 684, "name": "Helm"},
                "tabard": {"item_id": 3, "item_level": 1, "name": "Guild Tabard"},
                "shirt": {"item_id": 4, "item_level": 1}
            }
        }
    }"#;
    let items = parse_gear_profile(json).unwrap();

    assert_eq!(items.len(), 2, "Untracked slots should be skipped");
    assert_eq!(items[0].slot, Slot::Head);
    assert_eq!(items[1].slot, Slot::Trinket1);
    assert_eq!(items[1].bonus_ids, vec![10255]);
    assert_eq!(items[0].item_id, Some(2));
}

#[test]
fn test_profile_without_gear() {
    assert!(matches!(
        parse_gear_profile(r#"{"name": "Someone"}"#),
        Err(DataError::MissingGear)
    ));
    assert!(matches!(parse_gear_profile("not json"), Err(DataError::Json(_))));
}

#[test]
fn test_parse_plain_item_array() {
    let json = r#"[
        {"slot": "mainhand", "name": "Blade", "item_level": 697, "bonus_ids": [10255]},
        {"slot": "offhand", "name": "Ward", "item_level": 688}
    ]"#;
    let items = parse_items_json(json).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].slot, Slot::MainHand);
    assert_eq!(items[1].bonus_ids, Vec::<u32>::new());
}

#[test]
fn test_parse_items_value_without_reserializing() {
    let array = json!([{"slot": "neck", "name": "Pendant", "item_level": 691}]);
    let items = parse_items_value(array).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].slot, Slot::Neck);

    let profile = json!({"gear": {"items": {
        "feet": {"item_level": 684, "name": "Treads", "bonuses": [10254]},
        "shirt": {"item_level": 1}
    }}});
    let items = parse_items_value(profile).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].slot, Slot::Feet);
    assert_eq!(items[0].bonus_ids, vec![10254]);

    assert!(matches!(parse_items_value(json!(42)), Err(DataError::Json(_))));
    assert!(matches!(parse_items_value(json!({})), Err(DataError::MissingGear)));
}
