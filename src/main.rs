//! Gearpath - Command Line Interface
//!
//! This is the main entry point for the gear upgrade planner.
//! Run with `--help` to see all available options.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gearpath::{
    classifier::annotate_items,
    data::load_items,
    display::{display_comparison, display_result},
    models::{OptimizerConfig, Strategy},
    optimizer::{compare_strategies, is_valid_target, optimize_with_tables},
    tables::GameTables,
};

/// Command-line arguments for Gearpath.
#[derive(Parser, Debug)]
#[command(name = "gearpath")]
#[command(author, version, about = "Plan the cheapest gear upgrades to reach a target average item level", long_about = None)]
struct Args {
    /// Item list: CSV, JSON array, or character-profile JSON
    #[arg(short, long)]
    items: PathBuf,

    /// Target average item level
    #[arg(short, long)]
    target: f64,

    /// Strategy (cost_efficient, fastest, level_priority, balanced)
    #[arg(short, long, default_value = "cost_efficient")]
    strategy: Strategy,

    /// Maximum number of crafted items
    #[arg(long, default_value = "9")]
    max_crafted: u32,

    /// Total resource budget
    #[arg(short, long)]
    budget: Option<u32>,

    /// Allow crafting accessory slots
    #[arg(long, default_value = "false")]
    allow_accessory_crafting: bool,

    /// Run every strategy and compare them
    #[arg(long, default_value = "false")]
    compare: bool,

    /// Print the result as JSON instead of text
    #[arg(long, default_value = "false")]
    json: bool,

    /// Log every simulation step
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "gearpath=debug" } else { "gearpath=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if !is_valid_target(args.target) {
        eprintln!("Error: target average must be a positive number, got {}.", args.target);
        std::process::exit(2);
    }

    let tables = GameTables::default();
    let raw = load_items(&args.items)?;
    let items = annotate_items(&raw, &tables)?;
    tracing::info!(path = %args.items.display(), items = items.len(), "loaded items");

    let config = OptimizerConfig {
        strategy: args.strategy,
        max_crafted_items: args.max_crafted,
        budget_limit: args.budget,
        exclude_non_craftable_slots: !args.allow_accessory_crafting,
    };

    if args.compare {
        let results = compare_strategies(&items, args.target, &config, &tables)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            display_comparison(&results);
        }
        return Ok(());
    }

    let result = optimize_with_tables(&items, args.target, &config, &tables)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_result(&result);
    }

    Ok(())
}
