//! Query driver and wire types.
//!
//! The types here mirror the JSON protocol of `POST /correct` exactly, so
//! the core can be exercised without HTTP: a batch of
//! [`CorrectionQuery`] objects in, an index-aligned batch of
//! [`CorrectionReply`] objects out.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::metric::EditMetric;
use crate::tree::BkTree;

/// One sub-query of a correction batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionQuery {
    /// The possibly-misspelled token to correct.
    pub candidate: String,
    /// Maximum edit distance of returned corrections.
    pub max_tolerance: u32,
}

/// One correction in a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// The dictionary word.
    pub word: String,
    /// Its distance from the candidate.
    pub tolerance: u32,
    /// Its accumulated frequency priority.
    pub priority: u32,
}

/// Reply to one sub-query, index-aligned with the request batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionReply {
    /// The candidate, echoed back.
    pub word: String,
    /// The tolerance, echoed back.
    pub tolerance: u32,
    /// Corrections ranked by `(distance asc, priority desc)`.
    pub results: Vec<Correction>,
    /// Wall time spent in the tree search.
    pub milliseconds: u64,
}

/// Answer one sub-query against the shared index.
///
/// The candidate is lowercased before the search — the dictionary was
/// lowercased at load time, so matching is always against folded terms.
/// The reply echoes the candidate as received.
pub fn run_query<M: EditMetric>(tree: &BkTree<M>, query: &CorrectionQuery) -> CorrectionReply {
    let folded = query.candidate.to_lowercase();

    let started = Instant::now();
    let hits = tree.find_similar(&folded, query.max_tolerance);
    let milliseconds = started.elapsed().as_millis() as u64;

    CorrectionReply {
        word: query.candidate.clone(),
        tolerance: query.max_tolerance,
        results: hits
            .into_iter()
            .map(|hit| Correction {
                word: hit.term,
                tolerance: hit.distance,
                priority: hit.priority,
            })
            .collect(),
        milliseconds,
    }
}
