//! Data loading functionality for Gearpath.
//!
//! Item records reach the optimizer in one of three shapes:
//!
//! - a CSV file with one row per slot (see [`ItemRow`]),
//! - a JSON array of [`RawItem`]s,
//! - a character-profile JSON document whose `gear.items` object maps slot
//!   keys to item records.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use serde_json::Value;

use crate::error::DataError;
use crate::models::{ItemLevel, ItemRow, RawItem, Slot};

/// Parses a `;`-separated bonus id list (e.g., "10256;1520") into ids.
fn parse_bonus_ids(name: &str, field: Option<&str>) -> Result<Vec<u32>, DataError> {
    let Some(field) = field else {
        return Ok(Vec::new());
    };
    field
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>().map_err(|_| DataError::BonusId {
                name: name.to_string(),
                value: part.to_string(),
            })
        })
        .collect()
}

/// Reads item rows from any CSV source.
///
/// # CSV Format
///
/// Expected columns: `slot, name, item_id, item_level, bonus_ids`
pub fn read_items_csv<R: Read>(reader: R) -> Result<Vec<RawItem>, DataError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut items = Vec::new();
    for result in rdr.deserialize() {
        let row: ItemRow = result?;
        let bonus_ids = parse_bonus_ids(&row.name, row.bonus_ids.as_deref())?;
        items.push(RawItem {
            slot: row.slot,
            name: row.name,
            item_id: row.item_id,
            item_level: row.item_level,
            bonus_ids,
        });
    }
    Ok(items)
}

/// Loads item rows from a CSV file.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use gearpath::data::load_items_csv;
///
/// let items = load_items_csv(Path::new("data/sample_character.csv")).unwrap();
/// println!("Loaded {} items", items.len());
/// ```
pub fn load_items_csv(path: &Path) -> Result<Vec<RawItem>, DataError> {
    read_items_csv(File::open(path)?)
}

/// One entry of a profile's `gear.items` object.
#[derive(Debug, Deserialize)]
struct ProfileItem {
    #[serde(default)]
    item_id: Option<u64>,
    #[serde(default)]
    item_level: Option<ItemLevel>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    bonuses: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct ProfileGear {
    #[serde(default)]
    items: Option<BTreeMap<String, ProfileItem>>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    #[serde(default)]
    gear: Option<ProfileGear>,
}

/// Extracts tracked items from a character-profile JSON document.
///
/// Slots outside the sixteen tracked ones (shirt, tabard, ...) are skipped.
/// The result is sorted in canonical slot order. Entries without an item
/// level are kept so that annotation can reject them loudly.
///
/// # Errors
///
/// [`DataError::MissingGear`] if the document has no `gear.items` object.
pub fn parse_gear_profile(json: &str) -> Result<Vec<RawItem>, DataError> {
    gear_items(serde_json::from_str(json)?)
}

fn gear_items(profile: Profile) -> Result<Vec<RawItem>, DataError> {
    let entries = profile
        .gear
        .and_then(|gear| gear.items)
        .ok_or(DataError::MissingGear)?;

    let mut items: Vec<RawItem> = entries
        .into_iter()
        .filter_map(|(key, entry)| {
            let Some(slot) = Slot::from_key(&key) else {
                tracing::warn!(slot = %key, "ignoring untracked slot");
                return None;
            };
            Some(RawItem {
                slot,
                name: entry.name.unwrap_or_else(|| "Unnamed item".to_string()),
                item_id: entry.item_id,
                item_level: entry.item_level,
                bonus_ids: entry.bonuses,
            })
        })
        .collect();
    items.sort_by_key(|item| item.slot);

    tracing::info!(items = items.len(), tracked = Slot::ALL.len(), "parsed gear profile");
    Ok(items)
}

/// Parses either a profile document or a plain JSON array of [`RawItem`]s.
pub fn parse_items_json(json: &str) -> Result<Vec<RawItem>, DataError> {
    parse_items_value(serde_json::from_str(json)?)
}

/// Same as [`parse_items_json`], for a document that is already parsed.
///
/// An array is read as [`RawItem`]s; anything else as a profile document.
pub fn parse_items_value(value: Value) -> Result<Vec<RawItem>, DataError> {
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        gear_items(serde_json::from_value(value)?)
    }
}

/// Loads items from a file, choosing the format by extension.
///
/// `.json` files go through [`parse_items_json`]; anything else is read as CSV.
pub fn load_items(path: &Path) -> Result<Vec<RawItem>, DataError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let json = std::fs::read_to_string(path)?;
        parse_items_json(&json)
    } else {
        load_items_csv(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bonus_ids() {
        assert_eq!(parse_bonus_ids("x", None).unwrap(), Vec::<u32>::new());
        assert_eq!(parse_bonus_ids("x", Some("10256; 1520;")).unwrap(), vec![10256, 1520]);
        assert!(parse_bonus_ids("x", Some("abc")).is_err());
    }
}
