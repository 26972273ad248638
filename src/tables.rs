//! Game-balance tables for Gearpath.
//!
//! Every number the classifier and optimizer depend on lives in
//! [`GameTables`]. The tables are plain immutable data passed by reference,
//! so runs against different balance patches can coexist in one process.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{ItemLevel, ResourceCost, ResourceKind, Slot, Tier};

/// A named item whose bonus metadata does not reveal its real tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialItem {
    pub name: String,
    /// Tier reported for this item regardless of its bonus ids.
    pub tier: Tier,
}

/// Bonus-id lookup sets, one per tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BonusIdSets {
    pub normal: HashSet<u32>,
    pub heroic: HashSet<u32>,
    pub mythic: HashSet<u32>,
}

/// Level thresholds for the fallback classification heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelThresholds {
    pub normal: ItemLevel,
    pub heroic: ItemLevel,
    pub mythic: ItemLevel,
}

/// Highest level reachable by ordinary upgrades, per tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierCeilings {
    pub normal: ItemLevel,
    pub heroic: ItemLevel,
    pub mythic: ItemLevel,
}

/// Immutable game-balance data consumed by the classifier and optimizer.
///
/// `GameTables::default()` describes the current season.
///
/// # Example
///
/// ```
/// use gearpath::tables::GameTables;
///
/// let tables = GameTables::default();
/// assert_eq!(tables.next_level(681, 727), Some(684));
/// assert_eq!(tables.upgrade_cost(681, 688).resource1, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameTables {
    /// Ascending item levels an item may occupy.
    pub ladder: Vec<ItemLevel>,
    /// Cost of climbing one rung, in units of the band's resource.
    pub rung_cost: u32,
    /// Levels below this are paid with resource 1.
    pub resource2_from: ItemLevel,
    /// Levels at or above this are paid with resource 3.
    pub resource3_from: ItemLevel,
    pub craft_ceiling: ItemLevel,
    pub craft_cost: ResourceCost,
    pub special_craft_cost: ResourceCost,
    pub tier_ceilings: TierCeilings,
    pub level_thresholds: LevelThresholds,
    pub bonus_ids: BonusIdSets,
    pub special_items: Vec<SpecialItem>,
    /// Slots that cannot be crafted unless the run opts in.
    pub non_craftable_slots: Vec<Slot>,
    /// Priority score bonus for special items under score-based strategies.
    pub special_priority_bonus: f64,
}

impl Default for GameTables {
    fn default() -> Self {
        GameTables {
            ladder: vec![
                681, 684, 688, 691, 694, 697, 701, 704, 707, 710, 713, 717, 720, 723, 727, 730,
            ],
            rung_cost: 15,
            resource2_from: 691,
            resource3_from: 704,
            craft_ceiling: 727,
            craft_cost: ResourceCost::new(0, 0, 90),
            special_craft_cost: ResourceCost::new(0, 0, 30),
            tier_ceilings: TierCeilings {
                normal: 704,
                heroic: 717,
                mythic: 730,
            },
            level_thresholds: LevelThresholds {
                normal: 680,
                heroic: 707,
                mythic: 720,
            },
            bonus_ids: BonusIdSets {
                normal: HashSet::from([10254, 10296, 10334, 10388]),
                heroic: HashSet::from([10255, 10297, 10335, 10389]),
                mythic: HashSet::from([10256, 10298, 10336, 10390]),
            },
            special_items: vec![
                SpecialItem {
                    name: "Cyrce's Circlet".to_string(),
                    tier: Tier::Heroic,
                },
                SpecialItem {
                    name: "Durable Information Securing Container".to_string(),
                    tier: Tier::Mythic,
                },
                SpecialItem {
                    name: "Reshii Wraps".to_string(),
                    tier: Tier::Mythic,
                },
            ],
            non_craftable_slots: vec![Slot::Trinket1, Slot::Trinket2],
            special_priority_bonus: 10.0,
        }
    }
}

impl GameTables {
    /// Returns the override entry for a special item name, if any.
    pub fn special_item(&self, name: &str) -> Option<&SpecialItem> {
        self.special_items.iter().find(|special| special.name == name)
    }

    /// Ordinary-upgrade ceiling of a tier. `None` for [`Tier::Unknown`].
    pub fn tier_ceiling(&self, tier: Tier) -> Option<ItemLevel> {
        match tier {
            Tier::Normal => Some(self.tier_ceilings.normal),
            Tier::Heroic => Some(self.tier_ceilings.heroic),
            Tier::Mythic => Some(self.tier_ceilings.mythic),
            Tier::Unknown => None,
        }
    }

    /// Highest level an ordinary upgrade may reach: the tier ceiling capped
    /// at the craft ceiling. Unknown tiers get the craft ceiling.
    pub fn effective_ceiling(&self, tier: Tier) -> ItemLevel {
        self.tier_ceiling(tier)
            .map_or(self.craft_ceiling, |ceiling| ceiling.min(self.craft_ceiling))
    }

    /// Which resource pays for climbing away from `level`.
    pub fn resource_band(&self, level: ItemLevel) -> ResourceKind {
        if level < self.resource2_from {
            ResourceKind::Resource1
        } else if level < self.resource3_from {
            ResourceKind::Resource2
        } else {
            ResourceKind::Resource3
        }
    }

    /// The next rung above `current`, clamped to `cap`.
    ///
    /// Returns `None` when `current` is already at or above `cap`, or when no
    /// rung lies above it.
    pub fn next_level(&self, current: ItemLevel, cap: ItemLevel) -> Option<ItemLevel> {
        if current >= cap {
            return None;
        }
        self.ladder
            .iter()
            .copied()
            .find(|&rung| rung > current)
            .map(|rung| rung.min(cap))
    }

    /// Cumulative cost of climbing from `from` to `to`.
    ///
    /// Each rung passed costs [`rung_cost`](Self::rung_cost) units, paid in
    /// the band of the level being left. Off-ladder starting levels pay for
    /// the first rung above them.
    pub fn upgrade_cost(&self, from: ItemLevel, to: ItemLevel) -> ResourceCost {
        let mut cost = ResourceCost::default();
        let mut departed = from;
        for &rung in self.ladder.iter().filter(|&&rung| rung > from && rung <= to) {
            cost.add(self.resource_band(departed), self.rung_cost);
            departed = rung;
        }
        cost
    }

    /// Cost of crafting an item straight to the craft ceiling.
    pub fn craft_cost_for(&self, is_special: bool) -> ResourceCost {
        if is_special {
            self.special_craft_cost
        } else {
            self.craft_cost
        }
    }

    pub fn is_craftable_slot(&self, slot: Slot) -> bool {
        !self.non_craftable_slots.contains(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_level_follows_ladder() {
        let tables = GameTables::default();
        assert_eq!(tables.next_level(681, 727), Some(684));
        assert_eq!(tables.next_level(685, 727), Some(688));
        assert_eq!(tables.next_level(675, 727), Some(681));
        assert_eq!(tables.next_level(723, 727), Some(727));
    }

    #[test]
    fn test_next_level_respects_cap() {
        let tables = GameTables::default();
        assert_eq!(tables.next_level(727, 727), None);
        assert_eq!(tables.next_level(704, 704), None);
        assert_eq!(tables.next_level(725, 727), Some(727));
        assert_eq!(tables.next_level(730, 740), None);
    }

    #[test]
    fn test_upgrade_cost_bands() {
        let tables = GameTables::default();
        // 688 -> 691 is paid from the first band, 691 -> 694 from the second.
        assert_eq!(tables.upgrade_cost(688, 694), ResourceCost::new(15, 15, 0));
        assert_eq!(tables.upgrade_cost(701, 707), ResourceCost::new(0, 15, 15));
        assert_eq!(tables.upgrade_cost(681, 727).total(), 14 * 15);
        assert!(tables.upgrade_cost(700, 700).is_free());
    }

    #[test]
    fn test_effective_ceiling() {
        let tables = GameTables::default();
        assert_eq!(tables.effective_ceiling(Tier::Normal), 704);
        assert_eq!(tables.effective_ceiling(Tier::Heroic), 717);
        assert_eq!(tables.effective_ceiling(Tier::Mythic), 727);
        assert_eq!(tables.effective_ceiling(Tier::Unknown), 727);
    }
}
