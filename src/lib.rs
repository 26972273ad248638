//! # Gearpath
//!
//! A command-line tool and library for planning gear upgrades.
//!
//! Given a character's equipped items and a target average item level, this
//! crate simulates a sequence of upgrade and craft actions that reaches the
//! target, subject to:
//!
//! - Per-difficulty upgrade ceilings
//! - A limited number of crafted items (and slots that cannot be crafted)
//! - An optional resource budget
//! - The chosen strategy (cost efficient, fastest, level priority, balanced)
//!
//! ## Modules
//!
//! - [`models`] - Core data structures for items, configuration and results
//! - [`tables`] - Game-balance data: level ladder, ceilings, costs
//! - [`classifier`] - Difficulty classification of raw item records
//! - [`optimizer`] - The upgrade-path simulation
//! - [`data`] - CSV and JSON item loading
//! - [`display`] - Output formatting and display utilities
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```no_run
//! use gearpath::{
//!     classifier::annotate_items,
//!     data::load_items_csv,
//!     display::display_result,
//!     models::{OptimizerConfig, Strategy},
//!     optimizer::optimize_with_tables,
//!     tables::GameTables,
//! };
//! use std::path::Path;
//!
//! let tables = GameTables::default();
//! let raw = load_items_csv(Path::new("data/sample_character.csv")).unwrap();
//! let items = annotate_items(&raw, &tables).unwrap();
//!
//! let config = OptimizerConfig {
//!     strategy: Strategy::Balanced,
//!     budget_limit: Some(600),
//!     ..OptimizerConfig::default()
//! };
//!
//! let result = optimize_with_tables(&items, 700.0, &config, &tables).unwrap();
//! display_result(&result);
//! ```
//!
//! ## Strategies
//!
//! 1. **Cost efficient** (default): crafts when crafting is cheaper than
//!    upgrading the item to its ceiling.
//! 2. **Fastest**: crafts whenever it can, minimizing the number of steps.
//! 3. **Level priority**: always works on the lowest item and prefers upgrades.
//! 4. **Balanced**: leans towards crafting while far from the target and
//!    towards upgrading when close.

pub mod classifier;
pub mod data;
pub mod display;
pub mod error;
pub mod models;
pub mod optimizer;
pub mod tables;
pub mod wasm;
