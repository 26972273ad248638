//! Tests for display and formatting utilities.

use gearpath::display::format_resources;
use gearpath::models::ResourceCost;

#[test]
fn test_format_resources_free() {
    assert_eq!(format_resources(&ResourceCost::default()), "free");
}

#[test]
fn test_format_resources_single_kind() {
    assert_eq!(format_resources(&ResourceCost::new(15, 0, 0)), "R1: 15");
    assert_eq!(format_resources(&ResourceCost::new(0, 0, 90)), "R3: 90");
}

#[test]
fn test_format_resources_mixed() {
    assert_eq!(format_resources(&ResourceCost::new(30, 45, 15)), "R1: 30, R2: 45, R3: 15");
    assert_eq!(format_resources(&ResourceCost::new(0, 15, 30)), "R2: 15, R3: 30");
}
