//! Display and formatting utilities for Gearpath.
//!
//! This module renders optimization results for the terminal.

use crate::models::{ActionKind, ResourceCost, RunResult};

/// Formats a resource amount for display.
///
/// # Example
///
/// ```
/// use gearpath::display::format_resources;
/// use gearpath::models::ResourceCost;
///
/// assert_eq!(format_resources(&ResourceCost::new(15, 0, 30)), "R1: 15, R3: 30");
/// assert_eq!(format_resources(&ResourceCost::default()), "free");
/// ```
pub fn format_resources(cost: &ResourceCost) -> String {
    let parts: Vec<String> = [
        ("R1", cost.resource1),
        ("R2", cost.resource2),
        ("R3", cost.resource3),
    ]
    .iter()
    .filter(|(_, amount)| *amount > 0)
    .map(|(label, amount)| format!("{}: {}", label, amount))
    .collect();

    if parts.is_empty() {
        "free".to_string()
    } else {
        parts.join(", ")
    }
}

/// Displays a single run to stdout: step log, final gear and summary.
pub fn display_result(result: &RunResult) {
    println!();
    println!("+================================================================+");
    println!(
        "|               GEARPATH UPGRADE PLAN ({:<15})          |",
        result.strategy.as_str()
    );
    println!("+================================================================+");
    println!();

    if result.steps.is_empty() {
        println!("  No steps needed.");
    } else {
        println!("[STEPS]");
        println!("----------------------------------------------------------------");
        for step in &result.steps {
            let verb = match step.kind {
                ActionKind::Upgrade => "Upgrade",
                ActionKind::Craft => "Craft  ",
            };
            println!(
                "  {:>3}. {} {:<9} {:<32} {} -> {}  ({})",
                step.step,
                verb,
                step.slot,
                step.item_name,
                step.from,
                step.to,
                format_resources(&step.cost)
            );
        }
    }

    println!();
    println!("[FINAL GEAR]");
    println!("----------------------------------------------------------------");
    for (before, after) in result.initial_items.iter().zip(&result.final_items) {
        let marker = if after.crafted { " (crafted)" } else { "" };
        println!(
            "  {:<9} {:<32} {:>3} -> {:>3}  [{}]{}",
            after.slot, after.name, before.level, after.level, after.difficulty, marker
        );
    }

    println!();
    println!("[SUMMARY]");
    println!("----------------------------------------------------------------");
    println!(
        "  Average:          {:.2} -> {:.2} (target {:.2})",
        result.initial_average, result.final_average, result.target_average
    );
    println!("  Resources:        {}", format_resources(&result.resources));
    println!("  Total Cost:       {}", result.total_cost);
    println!("  Upgrades:         {}", result.upgrades_count);
    println!("  Crafted Items:    {}", result.crafted_count);
    println!("  Efficiency:       {:.2}", result.efficiency);
    println!(
        "  Goal Reached:     {}",
        if result.goal_reached { "yes" } else { "no" }
    );
    if let Some(message) = result.message() {
        println!("  {}", message);
    }
    println!();
}

/// Displays runs of several strategies side by side.
pub fn display_comparison(results: &[RunResult]) {
    println!();
    println!("[STRATEGY COMPARISON]");
    println!("----------------------------------------------------------------");
    println!(
        "{:<16} {:>8} {:>8} {:>7} {:>7} {:>10} {:>6}",
        "Strategy", "Average", "Cost", "Steps", "Crafts", "Efficiency", "Goal"
    );
    println!("----------------------------------------------------------------");

    let mut sorted: Vec<&RunResult> = results.iter().collect();
    sorted.sort_by(|a, b| {
        b.goal_reached
            .cmp(&a.goal_reached)
            .then(a.total_cost.cmp(&b.total_cost))
            .then(a.steps.len().cmp(&b.steps.len()))
    });

    for result in sorted {
        println!(
            "{:<16} {:>8.2} {:>8} {:>7} {:>7} {:>10.2} {:>6}",
            result.strategy.as_str(),
            result.final_average,
            result.total_cost,
            result.steps.len(),
            result.crafted_count,
            result.efficiency,
            if result.goal_reached { "yes" } else { "no" }
        );
    }
    println!();
}
