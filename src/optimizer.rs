//! Upgrade-path optimization for Gearpath.
//!
//! This module contains the greedy simulation that repeatedly upgrades or
//! crafts one item until the target average item level is reached, the step
//! cap is hit, the budget runs out, or nothing is left to improve. The result
//! is a feasible, monotonically improving path; it is not guaranteed to be
//! the cheapest one.

use std::collections::{HashSet, VecDeque};

use crate::error::OptimizerError;
use crate::models::{
    ActionKind, Item, ItemLevel, OptimizerConfig, ResourceCost, RunResult, Slot, StepRecord,
    Strategy, Termination,
};
use crate::tables::GameTables;

/// Hard bound on the number of actions in one run.
pub const MAX_STEPS: usize = 100;

/// How many recent actions the cycle guard remembers.
const CYCLE_WINDOW: usize = 5;

/// A (slot, level) pair seen this often inside the window is cycling.
const CYCLE_THRESHOLD: usize = 3;

/// Average-to-target gap above which `balanced` leans towards crafting.
const BALANCED_GAP: f64 = 10.0;

/// A chosen action for one item.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Upgrade { index: usize, to: ItemLevel },
    Craft { index: usize },
}

/// Outcome of weighing upgrade against craft for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Upgrade,
    Craft,
    /// Leave this candidate and try the next one.
    Skip,
}

impl Strategy {
    /// Priority score of an item; higher is picked first.
    fn priority(self, item: &Item, average: f64, tables: &GameTables) -> f64 {
        let level = f64::from(item.level);
        match self {
            Strategy::LevelPriority => -level,
            Strategy::CostEfficient | Strategy::Fastest | Strategy::Balanced => {
                let headroom = f64::from(tables.effective_ceiling(item.difficulty)) - level;
                let bonus = if item.is_special {
                    tables.special_priority_bonus
                } else {
                    0.0
                };
                2.0 * (average - level) + headroom + bonus
            }
        }
    }

    /// Whether to craft rather than upgrade when both are affordable.
    ///
    /// `gap` is the distance from the current average to the target.
    fn prefers_craft(self, craft_cost: u32, upgrade_cost: u32, gap: f64) -> bool {
        let craft = f64::from(craft_cost);
        let upgrade = f64::from(upgrade_cost);
        match self {
            Strategy::CostEfficient => craft < upgrade,
            Strategy::Fastest => true,
            Strategy::LevelPriority => false,
            Strategy::Balanced => {
                if gap > BALANCED_GAP {
                    craft <= 1.5 * upgrade
                } else {
                    upgrade > 1.2 * craft
                }
            }
        }
    }
}

/// Arithmetic mean of item levels; zero for an empty slice.
pub fn average_level(items: &[Item]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let sum: u64 = items.iter().map(|item| u64::from(item.level)).sum();
    sum as f64 / items.len() as f64
}

/// Whether `target` can be planned for: finite and strictly positive.
pub fn is_valid_target(target: f64) -> bool {
    target.is_finite() && target > 0.0
}

/// Mutable state of one run. Nothing here is shared between runs.
struct Simulation<'a> {
    tables: &'a GameTables,
    config: &'a OptimizerConfig,
    target: f64,
    items: Vec<Item>,
    totals: ResourceCost,
    crafted_slots: HashSet<Slot>,
    crafted_count: u32,
    history: VecDeque<(Slot, ItemLevel)>,
    steps: Vec<StepRecord>,
    /// Set when the last search rejected a candidate only for lack of budget.
    budget_blocked: bool,
}

impl<'a> Simulation<'a> {
    fn new(
        items: &[Item],
        target: f64,
        config: &'a OptimizerConfig,
        tables: &'a GameTables,
    ) -> Self {
        let crafted_slots = items
            .iter()
            .filter(|item| item.crafted)
            .map(|item| item.slot)
            .collect();
        Simulation {
            tables,
            config,
            target,
            items: items.to_vec(),
            totals: ResourceCost::default(),
            crafted_slots,
            crafted_count: 0,
            history: VecDeque::with_capacity(CYCLE_WINDOW),
            steps: Vec::new(),
            budget_blocked: false,
        }
    }

    fn average(&self) -> f64 {
        average_level(&self.items)
    }

    fn remaining_budget(&self) -> Option<u32> {
        self.config
            .budget_limit
            .map(|limit| limit.saturating_sub(self.totals.total()))
    }

    fn fits_budget(&self, cost: u32) -> bool {
        self.remaining_budget().map_or(true, |remaining| cost <= remaining)
    }

    fn run(mut self) -> (Vec<Item>, ResourceCost, Vec<StepRecord>, Termination) {
        let termination = loop {
            if self.average() >= self.target {
                break Termination::GoalReached;
            }
            if self.steps.len() >= MAX_STEPS {
                break Termination::StepCap;
            }
            if self.remaining_budget() == Some(0) {
                break Termination::BudgetExhausted;
            }
            match self.next_action() {
                Some(action) => self.apply(action),
                None if self.budget_blocked => break Termination::BudgetExhausted,
                None => break Termination::NoEligibleCandidate,
            }
        };
        (self.items, self.totals, self.steps, termination)
    }

    /// Indices of items still below the craft ceiling and never crafted,
    /// best first. Ties keep input order.
    fn ranked_candidates(&self) -> Vec<usize> {
        let average = self.average();
        let ceiling = self.tables.craft_ceiling;
        let strategy = self.config.strategy;
        let mut scored: Vec<(usize, f64)> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.level < ceiling && !self.crafted_slots.contains(&item.slot))
            .map(|(index, item)| (index, strategy.priority(item, average, self.tables)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().map(|(index, _)| index).collect()
    }

    fn is_cycling(&self, item: &Item) -> bool {
        let key = (item.slot, item.level);
        self.history.iter().filter(|&&seen| seen == key).count() >= CYCLE_THRESHOLD
    }

    fn can_craft(&self, item: &Item) -> bool {
        let slot_allowed =
            !self.config.exclude_non_craftable_slots || self.tables.is_craftable_slot(item.slot);
        slot_allowed
            && self.crafted_count < self.config.max_crafted_items
            && !self.crafted_slots.contains(&item.slot)
            && item.level < self.tables.craft_ceiling
    }

    /// Picks the next action.
    ///
    /// First pass: walk the ranking for a non-cycling item that can still be
    /// upgraded and let [`Self::decide`] pick upgrade or craft. Second pass:
    /// craft the best-ranked item for which crafting is legal and affordable.
    fn next_action(&mut self) -> Option<Action> {
        self.budget_blocked = false;
        let ranked = self.ranked_candidates();

        for &index in &ranked {
            let item = &self.items[index];
            if self.is_cycling(item) {
                tracing::debug!(
                    slot = %item.slot,
                    level = item.level,
                    "skipping cycling candidate"
                );
                continue;
            }
            let ceiling = self.tables.effective_ceiling(item.difficulty);
            let Some(next) = self.tables.next_level(item.level, ceiling) else {
                continue;
            };
            match self.decide(item, ceiling) {
                Decision::Craft => return Some(Action::Craft { index }),
                Decision::Upgrade => {
                    let rung_cost = self.tables.upgrade_cost(item.level, next).total();
                    if self.fits_budget(rung_cost) {
                        return Some(Action::Upgrade { index, to: next });
                    }
                    self.budget_blocked = true;
                }
                Decision::Skip => self.budget_blocked = true,
            }
        }

        for &index in &ranked {
            let item = &self.items[index];
            if !self.can_craft(item) {
                continue;
            }
            if self.fits_budget(self.tables.craft_cost_for(item.is_special).total()) {
                return Some(Action::Craft { index });
            }
            self.budget_blocked = true;
        }

        None
    }

    /// Upgrade-or-craft decision for an item that can still be upgraded.
    fn decide(&self, item: &Item, ceiling: ItemLevel) -> Decision {
        if !self.can_craft(item) {
            return Decision::Upgrade;
        }

        let upgrade_cost = self.tables.upgrade_cost(item.level, ceiling).total();
        let craft_cost = self.tables.craft_cost_for(item.is_special).total();

        if let Some(remaining) = self.remaining_budget() {
            if craft_cost > remaining {
                return Decision::Upgrade;
            }
            if upgrade_cost > remaining {
                return Decision::Skip;
            }
        }

        let gap = self.target - self.average();
        if self.config.strategy.prefers_craft(craft_cost, upgrade_cost, gap) {
            Decision::Craft
        } else {
            Decision::Upgrade
        }
    }

    fn apply(&mut self, action: Action) {
        let (index, to, cost, kind) = match action {
            Action::Upgrade { index, to } => {
                let cost = self.tables.upgrade_cost(self.items[index].level, to);
                (index, to, cost, ActionKind::Upgrade)
            }
            Action::Craft { index } => {
                let cost = self.tables.craft_cost_for(self.items[index].is_special);
                (index, self.tables.craft_ceiling, cost, ActionKind::Craft)
            }
        };

        let item = &mut self.items[index];
        let from = item.level;
        item.level = to;
        if kind == ActionKind::Craft {
            item.crafted = true;
            self.crafted_slots.insert(item.slot);
            self.crafted_count += 1;
        }

        let record = StepRecord {
            step: self.steps.len() as u32 + 1,
            slot: item.slot,
            item_name: item.name.clone(),
            from,
            to,
            cost,
            kind,
        };

        if self.history.len() == CYCLE_WINDOW {
            self.history.pop_front();
        }
        self.history.push_back((record.slot, to));
        self.totals += cost;

        tracing::debug!(
            step = record.step,
            slot = %record.slot,
            kind = ?kind,
            from,
            to,
            cost = cost.total(),
            "applied step"
        );
        self.steps.push(record);
    }
}

/// Finds an upgrade path to `target_average` using the current season's tables.
///
/// # Arguments
///
/// * `items` - Annotated items, one per slot (see [`crate::classifier::annotate_items`])
/// * `target_average` - Desired average item level
/// * `config` - Strategy, craft limit, budget and slot exclusions
///
/// # Returns
///
/// A [`RunResult`] with the step log and totals. Failing to reach the target
/// is reported through `goal_reached`, not as an error.
///
/// # Errors
///
/// * [`OptimizerError::InvalidTarget`] if the target is not a positive number
/// * [`OptimizerError::NoItems`] if `items` is empty
///
/// # Example
///
/// ```
/// use gearpath::classifier::annotate_items;
/// use gearpath::models::{OptimizerConfig, RawItem, Slot};
/// use gearpath::optimizer::optimize;
/// use gearpath::tables::GameTables;
///
/// let raw = vec![
///     RawItem::new(Slot::Head, "Hood", 681),
///     RawItem::new(Slot::Chest, "Robe", 691),
/// ];
/// let items = annotate_items(&raw, &GameTables::default()).unwrap();
/// let result = optimize(&items, 690.0, &OptimizerConfig::default()).unwrap();
/// assert!(result.goal_reached);
/// ```
pub fn optimize(
    items: &[Item],
    target_average: f64,
    config: &OptimizerConfig,
) -> Result<RunResult, OptimizerError> {
    optimize_with_tables(items, target_average, config, &GameTables::default())
}

/// Same as [`optimize`], against explicit game tables.
pub fn optimize_with_tables(
    items: &[Item],
    target_average: f64,
    config: &OptimizerConfig,
    tables: &GameTables,
) -> Result<RunResult, OptimizerError> {
    if !is_valid_target(target_average) {
        return Err(OptimizerError::InvalidTarget(target_average));
    }
    if items.is_empty() {
        return Err(OptimizerError::NoItems);
    }

    let initial_average = average_level(items);
    tracing::info!(
        strategy = %config.strategy,
        initial_average,
        target_average,
        items = items.len(),
        "starting optimization"
    );

    if initial_average >= target_average {
        return Ok(RunResult {
            strategy: config.strategy,
            target_average,
            initial_average,
            final_average: initial_average,
            resources: ResourceCost::default(),
            total_cost: 0,
            steps: Vec::new(),
            upgrades_count: 0,
            crafted_count: 0,
            crafted_log: Vec::new(),
            goal_reached: true,
            termination: Termination::AlreadyReached,
            efficiency: 0.0,
            initial_items: items.to_vec(),
            final_items: items.to_vec(),
        });
    }

    let (final_items, resources, steps, termination) =
        Simulation::new(items, target_average, config, tables).run();

    let final_average = average_level(&final_items);
    let total_cost = resources.total();
    let efficiency = if total_cost > 0 {
        (final_average - initial_average) / f64::from(total_cost) * 1000.0
    } else {
        0.0
    };
    let crafted_log: Vec<StepRecord> = steps
        .iter()
        .filter(|step| step.kind == ActionKind::Craft)
        .cloned()
        .collect();

    tracing::info!(
        final_average,
        total_cost,
        steps = steps.len(),
        termination = ?termination,
        "optimization finished"
    );

    Ok(RunResult {
        strategy: config.strategy,
        target_average,
        initial_average,
        final_average,
        resources,
        total_cost,
        upgrades_count: (steps.len() - crafted_log.len()) as u32,
        crafted_count: crafted_log.len() as u32,
        crafted_log,
        steps,
        goal_reached: final_average >= target_average,
        termination,
        efficiency,
        initial_items: items.to_vec(),
        final_items,
    })
}

/// Runs every strategy over the same items, one independent run each.
///
/// The `strategy` field of `config` is ignored; every other setting is shared.
pub fn compare_strategies(
    items: &[Item],
    target_average: f64,
    config: &OptimizerConfig,
    tables: &GameTables,
) -> Result<Vec<RunResult>, OptimizerError> {
    Strategy::ALL
        .into_iter()
        .map(|strategy| {
            let config = OptimizerConfig {
                strategy,
                ..config.clone()
            };
            optimize_with_tables(items, target_average, &config, tables)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;

    fn item(slot: Slot, level: ItemLevel, difficulty: Tier) -> Item {
        Item {
            slot,
            item_id: None,
            name: slot.to_string(),
            level,
            difficulty,
            is_special: false,
            crafted: false,
        }
    }

    #[test]
    fn test_balanced_leans_to_craft_when_far_from_target() {
        // 90 <= 1.5 * 75, so a large gap prefers crafting.
        assert!(Strategy::Balanced.prefers_craft(90, 75, 20.0));
        // Close to target, upgrading wins unless it costs more than 1.2x.
        assert!(!Strategy::Balanced.prefers_craft(90, 75, 5.0));
        assert!(Strategy::Balanced.prefers_craft(90, 120, 5.0));
    }

    #[test]
    fn test_priority_rewards_headroom_and_lag() {
        let tables = GameTables::default();
        let low = item(Slot::Head, 690, Tier::Normal);
        let high = item(Slot::Chest, 692, Tier::Mythic);
        let average = 691.0;
        assert!(
            Strategy::CostEfficient.priority(&high, average, &tables)
                > Strategy::CostEfficient.priority(&low, average, &tables)
        );
        assert!(
            Strategy::LevelPriority.priority(&low, average, &tables)
                > Strategy::LevelPriority.priority(&high, average, &tables)
        );
    }

    #[test]
    fn test_special_items_get_priority_bonus() {
        let tables = GameTables::default();
        let plain = item(Slot::Finger1, 690, Tier::Heroic);
        let special = Item {
            is_special: true,
            ..plain.clone()
        };
        let average = 700.0;

        for strategy in [Strategy::CostEfficient, Strategy::Fastest, Strategy::Balanced] {
            let gained = strategy.priority(&special, average, &tables)
                - strategy.priority(&plain, average, &tables);
            assert_eq!(gained, tables.special_priority_bonus, "{} bonus", strategy);
        }
        assert_eq!(
            Strategy::LevelPriority.priority(&special, average, &tables),
            Strategy::LevelPriority.priority(&plain, average, &tables)
        );
    }

    #[test]
    fn test_cycle_guard_skips_repeated_pairs() {
        let tables = GameTables::default();
        let config = OptimizerConfig {
            max_crafted_items: 0,
            ..OptimizerConfig::default()
        };
        let items = vec![
            item(Slot::Head, 690, Tier::Normal),
            item(Slot::Chest, 694, Tier::Normal),
        ];
        let mut sim = Simulation::new(&items, 700.0, &config, &tables);
        for _ in 0..CYCLE_THRESHOLD {
            sim.history.push_back((Slot::Head, 690));
        }
        assert!(sim.is_cycling(&sim.items[0]));
        assert_eq!(
            sim.next_action(),
            Some(Action::Upgrade { index: 1, to: 697 })
        );
    }

    #[test]
    fn test_all_cycling_falls_back_to_craft() {
        let tables = GameTables::default();
        let config = OptimizerConfig::default();
        let items = vec![item(Slot::Head, 690, Tier::Normal)];
        let mut sim = Simulation::new(&items, 720.0, &config, &tables);
        for _ in 0..CYCLE_THRESHOLD {
            sim.history.push_back((Slot::Head, 690));
        }
        assert_eq!(sim.next_action(), Some(Action::Craft { index: 0 }));
    }

    #[test]
    fn test_average_level_of_empty_slice_is_zero() {
        assert_eq!(average_level(&[]), 0.0);
    }
}
