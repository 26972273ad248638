//! WebAssembly bindings for Gearpath.
//!
//! This module provides JavaScript-accessible functions for the upgrade
//! planner. Every function takes and returns JSON strings.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::classifier::{annotate_items, classify_difficulty};
use crate::data::parse_items_value;
use crate::models::{ItemLevel, OptimizerConfig, RawItem, ResourceCost, RunResult, Slot, Tier};
use crate::optimizer::{compare_strategies, optimize_with_tables};
use crate::tables::GameTables;

/// JavaScript-friendly input for optimization.
#[derive(Debug, Clone, Deserialize)]
pub struct JsOptimizeInput {
    /// Either a JSON array of raw items or a whole profile document.
    pub items: serde_json::Value,
    pub target_average: f64,
    #[serde(default)]
    pub config: OptimizerConfig,
    /// Run every strategy instead of only `config.strategy`.
    #[serde(default)]
    pub compare: bool,
}

/// JavaScript-friendly optimization result.
#[derive(Debug, Clone, Serialize, Default)]
pub struct JsOptimizeResult {
    pub success: bool,
    pub error: Option<String>,
    pub message: Option<String>,
    pub results: Vec<RunResult>,
}

/// JavaScript-friendly game table summary.
#[derive(Debug, Clone, Serialize)]
pub struct JsGameTables {
    pub upgrade_levels: Vec<ItemLevel>,
    pub craft_ceiling: ItemLevel,
    pub max_crafted_items: u32,
    pub non_craftable_slots: Vec<Slot>,
    pub craft_cost: ResourceCost,
    pub special_craft_cost: ResourceCost,
    pub special_items: Vec<String>,
}

#[cfg(target_arch = "wasm32")]
fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn console_warn(message: &str) {
    tracing::warn!("{}", message);
}

fn failure(error: String) -> String {
    console_warn(&error);
    serde_json::to_string(&JsOptimizeResult {
        success: false,
        error: Some(error),
        ..JsOptimizeResult::default()
    })
    .unwrap_or_default()
}

/// Optimize an upgrade path.
///
/// Input is a JSON-encoded [`JsOptimizeInput`]; output is a JSON-encoded
/// [`JsOptimizeResult`]. Errors are reported in the `error` field.
#[wasm_bindgen]
pub fn optimize(input_json: &str) -> String {
    let input: JsOptimizeInput = match serde_json::from_str(input_json) {
        Ok(i) => i,
        Err(e) => return failure(format!("Invalid input: {}", e)),
    };

    let raw = match parse_items_value(input.items) {
        Ok(raw) => raw,
        Err(e) => return failure(format!("Invalid items: {}", e)),
    };

    let tables = GameTables::default();
    let items = match annotate_items(&raw, &tables) {
        Ok(items) => items,
        Err(e) => return failure(e.to_string()),
    };

    let results = if input.compare {
        compare_strategies(&items, input.target_average, &input.config, &tables)
    } else {
        optimize_with_tables(&items, input.target_average, &input.config, &tables)
            .map(|result| vec![result])
    };

    match results {
        Ok(results) => serde_json::to_string(&JsOptimizeResult {
            success: true,
            error: None,
            message: results.first().and_then(RunResult::message),
            results,
        })
        .unwrap_or_default(),
        Err(e) => failure(e.to_string()),
    }
}

/// Classify a single raw item. Returns the tier name as a JSON string.
#[wasm_bindgen]
pub fn classify(item_json: &str) -> String {
    match serde_json::from_str::<RawItem>(item_json) {
        Ok(item) => {
            let tier = classify_difficulty(&item, &GameTables::default());
            serde_json::to_string(&tier).unwrap_or_default()
        }
        Err(e) => {
            console_warn(&format!("Invalid item: {}", e));
            serde_json::to_string(&Tier::Unknown).unwrap_or_default()
        }
    }
}

/// Get the version of the planner.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the ladder and craft limits that front ends display.
#[wasm_bindgen]
pub fn get_game_tables() -> String {
    let tables = GameTables::default();
    let summary = JsGameTables {
        upgrade_levels: tables.ladder.clone(),
        craft_ceiling: tables.craft_ceiling,
        max_crafted_items: OptimizerConfig::default().max_crafted_items,
        non_craftable_slots: tables.non_craftable_slots.clone(),
        craft_cost: tables.craft_cost,
        special_craft_cost: tables.special_craft_cost,
        special_items: tables
            .special_items
            .iter()
            .map(|special| special.name.clone())
            .collect(),
    };
    serde_json::to_string(&summary).unwrap_or_default()
}
