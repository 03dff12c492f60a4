//! Metric-config loader.
//!
//! Parses the JSON metric description into cooked cost tables for the
//! weighted metric. Schema:
//!
//! ```json
//! { "default": {"insert_delete": 1, "replace": 1, "case_sensitive": false},
//!   "custom_insert_delete": [{"group": "aeiou", "cost": 2}],
//!   "custom_replace": [{"first_group": "iy", "second_group": "ey", "cost": 1}] }
//! ```
//!
//! Every code point in `group` receives the insert/delete cost; every pair
//! in `first_group × second_group` receives the replace cost in *both*
//! orders, so the resulting table is symmetric by construction. Groups are
//! lowercased first when the config is case-insensitive.
//!
//! Failures are hard errors and name the offending section, element index,
//! and the stringified element, so a misquoted cost in a 200-entry config
//! is findable from the diagnostic alone.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CorrectorError, Result};

/// Cooked cost tables for [`WeightedLevenshtein`](super::WeightedLevenshtein).
#[derive(Debug, Clone)]
pub struct WeightedConfig {
    /// Insert/delete cost for characters without a custom entry.
    pub default_insert_delete: u32,
    /// Replace cost for ordered pairs without a custom entry.
    pub default_replace: u32,
    /// When false, both the cost tables and every metric-time lookup fold
    /// characters to lowercase first.
    pub case_sensitive: bool,
    /// Per-character insert/delete overrides.
    pub insert_delete_costs: FxHashMap<char, u32>,
    /// Per-ordered-pair replace overrides; symmetric by construction.
    pub replace_costs: FxHashMap<(char, char), u32>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    default: RawDefaults,
    custom_insert_delete: Vec<Value>,
    custom_replace: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawDefaults {
    insert_delete: u32,
    replace: u32,
    #[serde(default = "default_case_sensitive")]
    case_sensitive: bool,
}

fn default_case_sensitive() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RawInsertDeleteRule {
    group: String,
    cost: u32,
}

#[derive(Debug, Deserialize)]
struct RawReplaceRule {
    first_group: String,
    second_group: String,
    cost: u32,
}

/// Convert one section element, wrapping any schema error with enough
/// context to locate it.
fn element<T: serde::de::DeserializeOwned>(
    section: &'static str,
    index: usize,
    value: &Value,
) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|err| CorrectorError::ConfigSection {
        section,
        index,
        element: value.to_string(),
        reason: err.to_string(),
    })
}

impl WeightedConfig {
    /// Load and cook a metric config from a file. A missing or unreadable
    /// file is a hard error.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| CorrectorError::io(path, err))?;
        Self::from_json(&text)
    }

    /// Parse a metric config from a JSON string.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(text)?;
        let case_sensitive = raw.default.case_sensitive;

        let fold = |group: String| -> String {
            if case_sensitive {
                group
            } else {
                group.to_lowercase()
            }
        };

        let mut insert_delete_costs = FxHashMap::default();
        for (index, value) in raw.custom_insert_delete.iter().enumerate() {
            let rule: RawInsertDeleteRule = element("custom_insert_delete", index, value)?;
            for ch in fold(rule.group).chars() {
                insert_delete_costs.insert(ch, rule.cost);
            }
        }

        let mut replace_costs = FxHashMap::default();
        for (index, value) in raw.custom_replace.iter().enumerate() {
            let rule: RawReplaceRule = element("custom_replace", index, value)?;
            let first_group = fold(rule.first_group);
            let second_group = fold(rule.second_group);
            for first in first_group.chars() {
                for second in second_group.chars() {
                    replace_costs.insert((first, second), rule.cost);
                    replace_costs.insert((second, first), rule.cost);
                }
            }
        }

        Ok(WeightedConfig {
            default_insert_delete: raw.default.insert_delete,
            default_replace: raw.default.replace,
            case_sensitive,
            insert_delete_costs,
            replace_costs,
        })
    }
}
