//! # corrector
//!
//! Approximate-string-match engine behind a typo-correction web service.
//!
//! A dictionary of `(word, priority)` pairs is indexed in a
//! Burkhard–Keller tree; queries return every dictionary entry within a
//! given edit distance of a candidate token, ranked by
//! `(distance ascending, priority descending)`. The distance is either
//! classic Levenshtein or a weighted variant with per-character
//! insert/delete costs and per-pair replace costs loaded from a JSON
//! config. Triangle-inequality pruning keeps tolerance-bounded searches
//! sub-linear on typical dictionaries.
//!
//! ## Example
//!
//! ```rust
//! use corrector::metric::Metric;
//! use corrector::query::{run_query, CorrectionQuery};
//! use corrector::tree::BkTree;
//!
//! let mut tree = BkTree::new(Metric::uniform());
//! tree.insert("correct", 10);
//! tree.insert("corrupt", 3);
//!
//! let reply = run_query(&tree, &CorrectionQuery {
//!     candidate: "corect".to_string(),
//!     max_tolerance: 1,
//! });
//! assert_eq!(reply.results[0].word, "correct");
//! ```
//!
//! The `corrector` binary wires these pieces to an HTTP front-end:
//! `POST /correct` with a JSON array of `{candidate, max_tolerance}`
//! objects answers the index-aligned array of ranked corrections.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod dictionary;
pub mod error;
pub mod metric;
pub mod query;
pub mod server;
pub mod tree;

/// Common imports for convenient usage.
pub mod prelude {
    pub use crate::error::{CorrectorError, Result};
    pub use crate::metric::{
        EditMetric, Metric, UniformLevenshtein, WeightedConfig, WeightedLevenshtein,
    };
    pub use crate::query::{run_query, Correction, CorrectionQuery, CorrectionReply};
    pub use crate::tree::{BkTree, Candidate};
}
