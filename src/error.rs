//! Error types for Gearpath.
//!
//! Input problems are reported to the caller as values; an unreachable target
//! or an exhausted budget is a normal run outcome, not an error.

use thiserror::Error;

use crate::models::Slot;

/// Errors raised before a run starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("no items to optimize")]
    NoItems,

    /// Target must be finite and strictly positive.
    #[error("target average must be a positive number, got {0}")]
    InvalidTarget(f64),

    #[error("item in slot {slot} has no item level")]
    MissingItemLevel { slot: Slot },

    #[error("slot {0} appears more than once")]
    DuplicateSlot(Slot),
}

/// Errors raised while loading item records.
#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid bonus id {value:?} for {name}")]
    BonusId { name: String, value: String },

    #[error("profile document has no gear items")]
    MissingGear,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown strategy {0:?} (expected cost_efficient, fastest, level_priority or balanced)")]
pub struct ParseStrategyError(pub String);
