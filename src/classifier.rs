//! Difficulty classification for Gearpath.
//!
//! Maps a raw item record to a coarse [`Tier`] and turns raw records into
//! the annotated [`Item`]s the optimizer works on.

use std::collections::HashSet;

use crate::error::OptimizerError;
use crate::models::{Item, RawItem, Tier};
use crate::tables::GameTables;

/// Classifies an item's difficulty tier.
///
/// Resolution order:
/// 1. special items use their fixed override,
/// 2. bonus ids are checked against the mythic, heroic and normal sets in
///    that order,
/// 3. otherwise the item level decides, with [`Tier::Unknown`] below the
///    normal threshold (or when the level is missing).
///
/// # Example
///
/// ```
/// use gearpath::classifier::classify_difficulty;
/// use gearpath::models::{RawItem, Slot, Tier};
/// use gearpath::tables::GameTables;
///
/// let tables = GameTables::default();
/// let helm = RawItem::new(Slot::Head, "Hood of Shadows", 710);
/// assert_eq!(classify_difficulty(&helm, &tables), Tier::Heroic);
/// ```
pub fn classify_difficulty(item: &RawItem, tables: &GameTables) -> Tier {
    if let Some(special) = tables.special_item(&item.name) {
        return special.tier;
    }

    let sets = &tables.bonus_ids;
    let has_any = |set: &HashSet<u32>| item.bonus_ids.iter().any(|id| set.contains(id));
    if has_any(&sets.mythic) {
        return Tier::Mythic;
    }
    if has_any(&sets.heroic) {
        return Tier::Heroic;
    }
    if has_any(&sets.normal) {
        return Tier::Normal;
    }

    let thresholds = &tables.level_thresholds;
    match item.item_level {
        Some(level) if level >= thresholds.mythic => Tier::Mythic,
        Some(level) if level >= thresholds.heroic => Tier::Heroic,
        Some(level) if level >= thresholds.normal => Tier::Normal,
        _ => Tier::Unknown,
    }
}

/// Validates raw records and derives `difficulty` and `is_special` once.
///
/// # Errors
///
/// * [`OptimizerError::MissingItemLevel`] if any record has no level
/// * [`OptimizerError::DuplicateSlot`] if a slot occurs twice
///
/// An empty input yields an empty list; the optimizer rejects it.
pub fn annotate_items(raw: &[RawItem], tables: &GameTables) -> Result<Vec<Item>, OptimizerError> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|record| {
            if !seen.insert(record.slot) {
                return Err(OptimizerError::DuplicateSlot(record.slot));
            }
            let level = record
                .item_level
                .ok_or(OptimizerError::MissingItemLevel { slot: record.slot })?;
            Ok(Item {
                slot: record.slot,
                item_id: record.item_id,
                name: record.name.clone(),
                level,
                difficulty: classify_difficulty(record, tables),
                is_special: tables.special_item(&record.name).is_some(),
                crafted: false,
            })
        })
        .collect()
}
