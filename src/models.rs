//! Data models and structures for Gearpath.
//!
//! This module contains the core data structures used throughout the crate:
//! equipment slots, difficulty tiers, resource costs, item records, the
//! optimizer configuration, and the records produced by an optimization run.

use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseStrategyError;

/// An item level. Only rungs of the upgrade ladder are legal resting points.
pub type ItemLevel = u32;

/// One of the sixteen tracked equipment slots.
///
/// The declaration order is the canonical display order, so sorting by
/// `Slot` puts head first and off-hand last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Head,
    Neck,
    Shoulder,
    Back,
    Chest,
    Wrist,
    Hands,
    Waist,
    Legs,
    Feet,
    Finger1,
    Finger2,
    Trinket1,
    Trinket2,
    MainHand,
    OffHand,
}

impl Slot {
    /// Every tracked slot in canonical order.
    pub const ALL: [Slot; 16] = [
        Slot::Head,
        Slot::Neck,
        Slot::Shoulder,
        Slot::Back,
        Slot::Chest,
        Slot::Wrist,
        Slot::Hands,
        Slot::Waist,
        Slot::Legs,
        Slot::Feet,
        Slot::Finger1,
        Slot::Finger2,
        Slot::Trinket1,
        Slot::Trinket2,
        Slot::MainHand,
        Slot::OffHand,
    ];

    /// Returns the lowercase key used by profile documents and CSV files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Head => "head",
            Slot::Neck => "neck",
            Slot::Shoulder => "shoulder",
            Slot::Back => "back",
            Slot::Chest => "chest",
            Slot::Wrist => "wrist",
            Slot::Hands => "hands",
            Slot::Waist => "waist",
            Slot::Legs => "legs",
            Slot::Feet => "feet",
            Slot::Finger1 => "finger1",
            Slot::Finger2 => "finger2",
            Slot::Trinket1 => "trinket1",
            Slot::Trinket2 => "trinket2",
            Slot::MainHand => "mainhand",
            Slot::OffHand => "offhand",
        }
    }

    /// Looks up a slot by its key.
    ///
    /// Returns `None` for slots that are not tracked (shirt, tabard, ...).
    ///
    /// # Example
    ///
    /// ```
    /// use gearpath::models::Slot;
    ///
    /// assert_eq!(Slot::from_key("mainhand"), Some(Slot::MainHand));
    /// assert_eq!(Slot::from_key("tabard"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.as_str() == key)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Coarse difficulty tier of an item, as assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Normal,
    Heroic,
    Mythic,
    /// No bonus id matched and the level is below every heuristic threshold.
    #[default]
    Unknown,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Normal => "normal",
            Tier::Heroic => "heroic",
            Tier::Mythic => "mythic",
            Tier::Unknown => "unknown",
        };
        f.pad(name)
    }
}

/// The three upgrade currencies, one per price band of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Resource1,
    Resource2,
    Resource3,
}

/// A resource amount split by kind.
///
/// # Example
///
/// ```
/// use gearpath::models::{ResourceCost, ResourceKind};
///
/// let mut cost = ResourceCost::new(15, 0, 0);
/// cost.add(ResourceKind::Resource3, 90);
/// assert_eq!(cost.total(), 105);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceCost {
    pub resource1: u32,
    pub resource2: u32,
    pub resource3: u32,
}

impl ResourceCost {
    pub const fn new(resource1: u32, resource2: u32, resource3: u32) -> Self {
        ResourceCost {
            resource1,
            resource2,
            resource3,
        }
    }

    /// Adds `amount` units of a single resource kind.
    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Resource1 => self.resource1 += amount,
            ResourceKind::Resource2 => self.resource2 += amount,
            ResourceKind::Resource3 => self.resource3 += amount,
        }
    }

    /// Sum over all three kinds.
    pub fn total(&self) -> u32 {
        self.resource1 + self.resource2 + self.resource3
    }

    pub fn is_free(&self) -> bool {
        self.total() == 0
    }
}

impl Add for ResourceCost {
    type Output = ResourceCost;

    fn add(self, rhs: ResourceCost) -> ResourceCost {
        ResourceCost {
            resource1: self.resource1 + rhs.resource1,
            resource2: self.resource2 + rhs.resource2,
            resource3: self.resource3 + rhs.resource3,
        }
    }
}

impl AddAssign for ResourceCost {
    fn add_assign(&mut self, rhs: ResourceCost) {
        *self = *self + rhs;
    }
}

/// An item record as delivered by the character-data collaborator.
///
/// Nothing is derived yet; [`crate::classifier::annotate_items`] turns a list
/// of these into [`Item`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    pub slot: Slot,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub item_id: Option<u64>,
    /// Missing levels are a structural error, reported during annotation.
    #[serde(default)]
    pub item_level: Option<ItemLevel>,
    #[serde(default, alias = "bonuses")]
    pub bonus_ids: Vec<u32>,
}

impl RawItem {
    /// Creates a record with a level and no bonus ids.
    pub fn new(slot: Slot, name: impl Into<String>, item_level: ItemLevel) -> Self {
        RawItem {
            slot,
            name: name.into(),
            item_id: None,
            item_level: Some(item_level),
            bonus_ids: Vec::new(),
        }
    }

    pub fn with_bonus_ids(mut self, bonus_ids: impl Into<Vec<u32>>) -> Self {
        self.bonus_ids = bonus_ids.into();
        self
    }
}

/// One equipped item after classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub slot: Slot,
    pub item_id: Option<u64>,
    pub name: String,
    pub level: ItemLevel,
    pub difficulty: Tier,
    /// Member of the named set with a reduced craft cost.
    pub is_special: bool,
    /// Set once the item has been crafted; a slot is crafted at most once.
    pub crafted: bool,
}

/// How the optimizer ranks items and chooses between upgrading and crafting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Craft whenever crafting is cheaper than upgrading to the tier ceiling.
    #[default]
    CostEfficient,
    /// Craft whenever possible, minimizing the number of steps.
    Fastest,
    /// Always work on the lowest item, preferring upgrades.
    LevelPriority,
    /// Weigh craft and upgrade costs against the remaining distance to target.
    Balanced,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::CostEfficient,
        Strategy::Fastest,
        Strategy::LevelPriority,
        Strategy::Balanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::CostEfficient => "cost_efficient",
            Strategy::Fastest => "fastest",
            Strategy::LevelPriority => "level_priority",
            Strategy::Balanced => "balanced",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    /// Accepts both `snake_case` and `kebab-case` names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

/// Per-run optimizer settings. Immutable for the duration of a run.
///
/// # Example
///
/// ```
/// use gearpath::models::{OptimizerConfig, Strategy};
///
/// let config = OptimizerConfig {
///     strategy: Strategy::Balanced,
///     budget_limit: Some(300),
///     ..OptimizerConfig::default()
/// };
/// assert_eq!(config.max_crafted_items, 9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub strategy: Strategy,
    /// Ceiling on craft actions per run.
    pub max_crafted_items: u32,
    /// Ceiling on total resource spend, summed over all kinds.
    pub budget_limit: Option<u32>,
    /// When false, accessory slots may be crafted too.
    pub exclude_non_craftable_slots: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            strategy: Strategy::CostEfficient,
            max_crafted_items: 9,
            budget_limit: None,
            exclude_non_craftable_slots: true,
        }
    }
}

/// What a step did to its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Climbed one ladder rung.
    Upgrade,
    /// Replaced the item with a crafted one at the craft ceiling.
    Craft,
}

/// A single simulation action in the returned step log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based position in the step log
    pub step: u32,
    pub slot: Slot,
    pub item_name: String,
    pub from: ItemLevel,
    pub to: ItemLevel,
    pub cost: ResourceCost,
    pub kind: ActionKind,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The starting average already met the target; no steps were taken.
    AlreadyReached,
    GoalReached,
    StepCap,
    BudgetExhausted,
    /// Every item is saturated and no craft is legal.
    NoEligibleCandidate,
}

/// The outcome of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub strategy: Strategy,
    pub target_average: f64,
    pub initial_average: f64,
    pub final_average: f64,
    pub resources: ResourceCost,
    pub total_cost: u32,
    pub steps: Vec<StepRecord>,
    pub upgrades_count: u32,
    pub crafted_count: u32,
    pub crafted_log: Vec<StepRecord>,
    pub goal_reached: bool,
    pub termination: Termination,
    /// Average levels gained per thousand resource units spent.
    pub efficiency: f64,
    pub initial_items: Vec<Item>,
    pub final_items: Vec<Item>,
}

impl RunResult {
    /// A short status line for front ends, or `None` when the goal was met
    /// by simulation.
    pub fn message(&self) -> Option<String> {
        match self.termination {
            Termination::AlreadyReached => Some("Target average already reached".to_string()),
            Termination::GoalReached => None,
            _ => Some(format!(
                "Target not reached. Maximum reachable average: {:.2}",
                self.final_average
            )),
        }
    }
}

// ============================================================================
// CSV Row Structures
// ============================================================================

/// CSV row structure for item lists.
///
/// Bonus ids are `;`-separated, e.g. `10256;1520`.
#[derive(Debug, Deserialize)]
pub struct ItemRow {
    pub slot: Slot,
    pub name: String,
    pub item_id: Option<u64>,
    pub item_level: Option<ItemLevel>,
    pub bonus_ids: Option<String>,
}
