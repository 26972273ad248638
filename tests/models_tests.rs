//! Tests for data models and structures.

use gearpath::models::{
    OptimizerConfig, ResourceCost, ResourceKind, Slot, Strategy, Tier,
};

#[test]
fn test_strategy_from_str() {
    assert_eq!("cost_efficient".parse::<Strategy>(), Ok(Strategy::CostEfficient));
    assert_eq!("level-priority".parse::<Strategy>(), Ok(Strategy::LevelPriority));
    assert_eq!(" Balanced ".parse::<Strategy>(), Ok(Strategy::Balanced));
    assert!("cheapest".parse::<Strategy>().is_err());
}

#[test]
fn test_strategy_serde_names() {
    assert_eq!(serde_json::to_string(&Strategy::Fastest).unwrap(), "\"fastest\"");
    let parsed: Strategy = serde_json::from_str("\"level_priority\"").unwrap();
    assert_eq!(parsed, Strategy::LevelPriority);
}

#[test]
fn test_slot_keys() {
    for slot in Slot::ALL {
        assert_eq!(Slot::from_key(slot.as_str()), Some(slot));
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, format!("\"{}\"", slot.as_str()));
    }
    assert_eq!(Slot::from_key("shirt"), None);
    assert!(Slot::Head < Slot::OffHand, "Slots should sort in display order");
}

#[test]
fn test_resource_cost_arithmetic() {
    let mut cost = ResourceCost::new(15, 0, 0);
    cost.add(ResourceKind::Resource2, 15);
    cost += ResourceCost::new(0, 0, 90);

    assert_eq!(cost, ResourceCost::new(15, 15, 90));
    assert_eq!(cost.total(), 120);
    assert!(!cost.is_free());
    assert!(ResourceCost::default().is_free());
}

#[test]
fn test_config_defaults() {
    let config = OptimizerConfig::default();
    assert_eq!(config.strategy, Strategy::CostEfficient);
    assert_eq!(config.max_crafted_items, 9);
    assert_eq!(config.budget_limit, None);
    assert!(config.exclude_non_craftable_slots);

    let partial: OptimizerConfig =
        serde_json::from_str(r#"{"strategy": "balanced", "budget_limit": 300}"#).unwrap();
    assert_eq!(partial.strategy, Strategy::Balanced);
    assert_eq!(partial.budget_limit, Some(300));
    assert_eq!(partial.max_crafted_items, 9);
}

#[test]
fn test_tier_default_is_unknown() {
    assert_eq!(Tier::default(), Tier::Unknown);
    assert_eq!(format!("{:<7}|", Tier::Heroic), "heroic |");
}
