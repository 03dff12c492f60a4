//! Burkhard–Keller tree index over the dictionary.
//!
//! Each edge of the tree is labelled with the metric distance between its
//! endpoints. A tolerance-bounded search only needs to descend edges whose
//! label lies within `tolerance` of the node's own distance to the query —
//! the triangle inequality guarantees nothing outside that interval can
//! match — which keeps typical queries sub-linear in the dictionary size.

use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::info;

use crate::dictionary::Entry;
use crate::metric::EditMetric;

/// A search hit: a dictionary term with its distance from the query and
/// its accumulated priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The matched dictionary term.
    pub term: String,
    /// Edit distance from the query under the tree's metric.
    pub distance: u32,
    /// Accumulated frequency priority of the term.
    pub priority: u32,
}

#[derive(Debug)]
struct TreeNode {
    term: Box<[char]>,
    priority: u32,
    children: FxHashMap<u32, TreeNode>,
    // Smallest and largest child edge label; sentinels u32::MAX / 0 while
    // childless. children never contains the label 0.
    min_child: u32,
    max_child: u32,
}

impl TreeNode {
    fn new(term: Box<[char]>, priority: u32) -> Self {
        TreeNode {
            term,
            priority,
            children: FxHashMap::default(),
            min_child: u32::MAX,
            max_child: 0,
        }
    }

    fn insert<M: EditMetric>(&mut self, term: &[char], priority: u32, metric: &M) -> bool {
        let distance = metric.distance(term, &self.term);
        if distance == 0 {
            // Same word again: accumulate priority, no new node.
            self.priority += priority;
            return false;
        }
        if let Some(child) = self.children.get_mut(&distance) {
            return child.insert(term, priority, metric);
        }
        self.min_child = self.min_child.min(distance);
        self.max_child = self.max_child.max(distance);
        self.children
            .insert(distance, TreeNode::new(term.into(), priority));
        true
    }

    fn find_similar<M: EditMetric>(
        &self,
        query: &[char],
        tolerance: u32,
        metric: &M,
        hits: &mut Vec<Candidate>,
    ) {
        let distance = metric.distance(query, &self.term);
        if distance <= tolerance {
            hits.push(Candidate {
                term: self.term.iter().collect(),
                distance,
                priority: self.priority,
            });
        }

        // Only edge labels in [distance - tolerance, distance + tolerance]
        // can lead to matches; scan that interval instead of iterating the
        // child map, since tolerance is typically 1-3.
        let start = if distance < tolerance {
            self.min_child
        } else {
            (distance - tolerance).max(self.min_child)
        };
        let end = distance.saturating_add(tolerance).min(self.max_child);
        for label in start..=end {
            if let Some(child) = self.children.get(&label) {
                child.find_similar(query, tolerance, metric, hits);
            }
        }
    }
}

/// BK-tree over dictionary words, generic over the edit metric.
///
/// Built once from the shuffled dictionary, then treated as immutable and
/// shared by all request handlers. Searches allocate only their result
/// vector.
///
/// # Example
///
/// ```rust
/// use corrector::metric::Metric;
/// use corrector::tree::BkTree;
///
/// let mut tree = BkTree::new(Metric::uniform());
/// tree.insert("cat", 5);
/// tree.insert("bat", 2);
///
/// let hits = tree.find_similar("cat", 1);
/// assert_eq!(hits.len(), 2);
/// assert_eq!(hits[0].term, "cat");
/// ```
#[derive(Debug)]
pub struct BkTree<M> {
    metric: M,
    root: Option<TreeNode>,
    term_count: usize,
}

impl<M: EditMetric> BkTree<M> {
    /// Create an empty tree owning its metric.
    pub fn new(metric: M) -> Self {
        BkTree {
            metric,
            root: None,
            term_count: 0,
        }
    }

    /// Build a tree by inserting `entries` in the given order.
    ///
    /// The caller is expected to have shuffled the entries (the dictionary
    /// loader does); sorted insertion order degenerates the tree.
    pub fn build(metric: M, entries: Vec<Entry>) -> Self {
        let started = Instant::now();
        let total = entries.len();
        let mut tree = Self::new(metric);
        for (word, priority) in entries {
            tree.insert(&word, priority);
        }
        info!(
            words = total,
            terms = tree.term_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "BK-tree built"
        );
        tree
    }

    /// Insert a word, creating the root lazily on the first call.
    ///
    /// Returns true if a new node was created; false if the word was
    /// already present, in which case `priority` is added onto the
    /// existing node.
    pub fn insert(&mut self, term: &str, priority: u32) -> bool {
        let chars: Vec<char> = term.chars().collect();
        let inserted = match self.root {
            Some(ref mut root) => root.insert(&chars, priority, &self.metric),
            None => {
                self.root = Some(TreeNode::new(chars.into_boxed_slice(), priority));
                true
            }
        };
        if inserted {
            self.term_count += 1;
        }
        inserted
    }

    /// All terms within `tolerance` of `query`, ranked by
    /// `(distance ascending, priority descending)`.
    ///
    /// An empty tree yields an empty vector, never an error.
    pub fn find_similar(&self, query: &str, tolerance: u32) -> Vec<Candidate> {
        let chars: Vec<char> = query.chars().collect();
        let mut hits = Vec::new();
        if let Some(root) = &self.root {
            root.find_similar(&chars, tolerance, &self.metric, &mut hits);
        }
        hits.sort_unstable_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| b.priority.cmp(&a.priority))
        });
        hits
    }

    /// Number of distinct terms in the tree.
    pub fn len(&self) -> usize {
        self.term_count
    }

    /// True if the tree holds no terms.
    pub fn is_empty(&self) -> bool {
        self.term_count == 0
    }

    /// The metric this tree was built with.
    pub fn metric(&self) -> &M {
        &self.metric
    }
}
