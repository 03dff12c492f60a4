//! Weighted Levenshtein metric with configurable per-character costs.

use std::path::Path;

use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};

use crate::error::Result;
use crate::metric::bloom::BloomSet;
use crate::metric::config::WeightedConfig;
use crate::metric::EditMetric;

type Row = SmallVec<[u32; 32]>;

/// Edit distance where insertion/deletion of a character and substitution
/// of an ordered character pair carry configurable costs.
///
/// Costs come from a [`WeightedConfig`]: a default insert/delete cost, a
/// default replace cost, and optional per-character / per-pair overrides.
/// `rep(x, x)` is always 0. Each table lookup goes through a bloom filter
/// first, so the common no-override case never touches the hash maps.
///
/// The dynamic program charges the *longer* string's character for a
/// deletion and the *shorter* string's character for an insertion, and the
/// boundary row and column accumulate real insert/delete costs rather than
/// unit steps. Together with the symmetric replace table this makes the
/// function symmetric in its arguments, so it can drive BK-tree pruning.
/// Whether it is a genuine metric (triangle inequality) depends on the
/// configured costs; that is the operator's contract, not enforced here.
///
/// Scratch rows are local to each call: one shared instance is callable
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct WeightedLevenshtein {
    default_insert_delete: u32,
    default_replace: u32,
    case_sensitive: bool,
    insert_delete_costs: FxHashMap<char, u32>,
    replace_costs: FxHashMap<(char, char), u32>,
    insert_delete_filter: BloomSet<char>,
    replace_filter: BloomSet<(char, char)>,
}

/// Single-character case fold, the per-character analogue of the loader's
/// full lowercasing. Multi-character expansions keep their first character.
fn fold_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

impl WeightedLevenshtein {
    /// Build the metric from cooked cost tables, populating the bloom
    /// filters from the table keys.
    pub fn new(config: WeightedConfig) -> Self {
        let mut insert_delete_filter = BloomSet::new();
        for ch in config.insert_delete_costs.keys() {
            insert_delete_filter.add(ch);
        }
        let mut replace_filter = BloomSet::new();
        for pair in config.replace_costs.keys() {
            replace_filter.add(pair);
        }

        WeightedLevenshtein {
            default_insert_delete: config.default_insert_delete,
            default_replace: config.default_replace,
            case_sensitive: config.case_sensitive,
            insert_delete_costs: config.insert_delete_costs,
            replace_costs: config.replace_costs,
            insert_delete_filter,
            replace_filter,
        }
    }

    /// Load the metric config from a file and build the metric.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(WeightedConfig::from_path(path)?))
    }

    /// True when the metric folds case before every cost lookup.
    pub fn folds_case(&self) -> bool {
        !self.case_sensitive
    }

    fn fold(&self, ch: char) -> char {
        if self.case_sensitive {
            ch
        } else {
            fold_char(ch)
        }
    }

    fn insert_delete_cost(&self, ch: char) -> u32 {
        let ch = self.fold(ch);
        if !self.insert_delete_filter.check(&ch) {
            return self.default_insert_delete;
        }
        self.insert_delete_costs
            .get(&ch)
            .copied()
            .unwrap_or(self.default_insert_delete)
    }

    fn replace_cost(&self, first: char, second: char) -> u32 {
        let first = self.fold(first);
        let second = self.fold(second);
        if first == second {
            return 0;
        }
        if !self.replace_filter.check(&(first, second)) {
            return self.default_replace;
        }
        self.replace_costs
            .get(&(first, second))
            .copied()
            .unwrap_or(self.default_replace)
    }
}

impl EditMetric for WeightedLevenshtein {
    fn distance(&self, left: &[char], right: &[char]) -> u32 {
        let (inner, outer) = if left.len() <= right.len() {
            (left, right)
        } else {
            (right, left)
        };

        // Boundary row: cumulative insert cost of the inner prefix.
        let mut prev: Row = SmallVec::with_capacity(inner.len() + 1);
        prev.push(0);
        for j in 1..=inner.len() {
            prev.push(prev[j - 1] + self.insert_delete_cost(inner[j - 1]));
        }
        let mut curr: Row = smallvec![0; inner.len() + 1];

        let mut outer_prefix = 0;
        for i in 1..=outer.len() {
            let outer_cost = self.insert_delete_cost(outer[i - 1]);
            outer_prefix += outer_cost;
            curr[0] = outer_prefix;
            for j in 1..=inner.len() {
                let deletion = prev[j] + outer_cost;
                let insertion = curr[j - 1] + self.insert_delete_cost(inner[j - 1]);
                let substitution = prev[j - 1] + self.replace_cost(outer[i - 1], inner[j - 1]);
                curr[j] = deletion.min(insertion).min(substitution);
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[inner.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(json: &str) -> WeightedLevenshtein {
        WeightedLevenshtein::new(WeightedConfig::from_json(json).unwrap())
    }

    fn dist(m: &WeightedLevenshtein, a: &str, b: &str) -> u32 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        m.distance(&a, &b)
    }

    const PLAIN: &str = r#"
        { "default": {"insert_delete": 1, "replace": 1},
          "custom_insert_delete": [], "custom_replace": [] }
    "#;

    #[test]
    fn test_all_unit_costs_match_classic_levenshtein() {
        let m = metric(PLAIN);
        assert_eq!(dist(&m, "kitten", "sitting"), 3);
        assert_eq!(dist(&m, "test", "test"), 0);
        assert_eq!(dist(&m, "", "abc"), 3);
    }

    #[test]
    fn test_empty_string_costs_cumulative_inserts() {
        let m = metric(
            r#"{ "default": {"insert_delete": 2, "replace": 3},
                 "custom_insert_delete": [{"group": "a", "cost": 5}],
                 "custom_replace": [] }"#,
        );
        // d("", w) is the sum of per-character insert costs, not |w|.
        assert_eq!(dist(&m, "", "ab"), 7);
        assert_eq!(dist(&m, "aa", ""), 10);
        assert_eq!(dist(&m, "", "zz"), 4);
    }

    #[test]
    fn test_custom_replace_override() {
        let m = metric(
            r#"{ "default": {"insert_delete": 1, "replace": 3, "case_sensitive": false},
                 "custom_replace": [{"first_group": "e", "second_group": "i", "cost": 1}],
                 "custom_insert_delete": [] }"#,
        );
        // e<->i overridden to 1; other substitutions cost 3 but a
        // delete+insert pair caps the effective substitution at 2.
        assert_eq!(dist(&m, "file", "fele"), 1);
        assert_eq!(dist(&m, "file", "fole"), 2);
        assert_eq!(dist(&m, "fyle", "file"), 2);
    }

    #[test]
    fn test_symmetric_with_custom_tables() {
        let m = metric(
            r#"{ "default": {"insert_delete": 2, "replace": 3},
                 "custom_insert_delete": [{"group": "ae", "cost": 1}],
                 "custom_replace": [{"first_group": "i", "second_group": "e", "cost": 1}] }"#,
        );
        for (a, b) in [
            ("weird", "wierd"),
            ("apple", "ample"),
            ("ae", "ea"),
            ("receive", "recieve"),
            ("", "ae"),
        ] {
            assert_eq!(dist(&m, a, b), dist(&m, b, a), "asymmetric on {a:?}/{b:?}");
        }
    }

    #[test]
    fn test_case_folding_at_lookup_time() {
        let insensitive = metric(
            r#"{ "default": {"insert_delete": 1, "replace": 3, "case_sensitive": false},
                 "custom_insert_delete": [], "custom_replace": [] }"#,
        );
        // A and a fold together: substitution cost 0.
        assert_eq!(dist(&insensitive, "Cat", "cat"), 0);

        let sensitive = metric(
            r#"{ "default": {"insert_delete": 1, "replace": 3, "case_sensitive": true},
                 "custom_insert_delete": [], "custom_replace": [] }"#,
        );
        assert_eq!(dist(&sensitive, "Cat", "cat"), 2);
    }

    #[test]
    fn test_replace_self_is_free_even_with_override() {
        // rep(x, x) = 0 wins over any configured pair containing x.
        let m = metric(
            r#"{ "default": {"insert_delete": 1, "replace": 2},
                 "custom_insert_delete": [],
                 "custom_replace": [{"first_group": "a", "second_group": "a", "cost": 9}] }"#,
        );
        assert_eq!(dist(&m, "a", "a"), 0);
    }
}
