//! Forward hazard propagation.
//!
//! The engine runs a FIFO worklist fixpoint over the value-flow graph,
//! advancing each node's [`HazardLevel`] according to the successor's kind:
//!
//! - into a `load`: the level escalates by one (a load consumes one unit of
//!   hazard — the second load of a possibly-null value is the dereference);
//! - into a `pass-through`: the level is forwarded unchanged;
//! - into anything else: no transition.
//!
//! A node's record only ever improves to a strictly greater level, so the
//! fixpoint terminates after at most `4 × |nodes|` updates even on cyclic
//! graphs. Nodes that reach [`HazardLevel::Deref`] are collected as sinks
//! and never requeued.
//!
//! ## Determinism
//!
//! When several predecessors could justify the same level for a node, the
//! first one processed wins and is recorded; later equal-level arrivals
//! fail the strict-increase guard. Worklist order follows seed insertion
//! order and FIFO edge traversal, so for a fixed graph and classifier the
//! chosen witness paths are identical on every run. Callers must not assume
//! the chosen path for a sink is semantically unique — only reproducible.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::classify::{CacheConfig, CacheStats, KindCache, NodeClassifier};
use crate::detect::seed_sources;
use crate::graph::ValueFlowGraph;
use crate::reconstruct::witness_paths;
use crate::types::{HazardLevel, NodeKind, PropagationRecord, VfgNodeId, WitnessPath};

/// Error type for the witness search.
///
/// The algorithm itself is total over a well-formed graph; every variant
/// here is a precondition or internal-invariant violation that aborts the
/// analysis, since continuing would produce silently wrong witness paths.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// An edge endpoint the classifier does not know (dangling edge).
    #[error("node {node} is unknown to the classifier: malformed graph")]
    UnclassifiedNode {
        /// The unknown node.
        node: VfgNodeId,
    },
    /// A worklist node at hazard level `none`; impossible by construction,
    /// surfaced instead of being assigned meaning.
    #[error("worklist node {node} has no hazard level: internal invariant violated")]
    UntaintedWorklistNode {
        /// The offending node.
        node: VfgNodeId,
    },
    /// A predecessor chain longer than the record table, which only a
    /// malformed graph (e.g. a self-referential load edge) can produce.
    #[error("predecessor chain from sink {sink} does not terminate: malformed graph")]
    CyclicWitnessChain {
        /// The sink whose walk failed.
        sink: VfgNodeId,
    },
}

/// Frozen result of the propagation phase.
///
/// Reconstruction and reporting only read this; nothing mutates it after
/// the worklist drains.
#[derive(Debug, Clone, Default)]
pub struct PropagationOutcome {
    /// Final record per touched node.
    pub records: BTreeMap<VfgNodeId, PropagationRecord>,
    /// Nodes that reached the accept level.
    pub sinks: BTreeSet<VfgNodeId>,
    /// Seed nodes, in detection order.
    pub seeds: Vec<VfgNodeId>,
    /// Successful record improvements performed by the engine (seeding not
    /// counted). Bounded by `4 × |nodes|`.
    pub updates: usize,
}

impl PropagationOutcome {
    /// Final hazard level of a node (`None` if never touched).
    pub fn level_of(&self, node: VfgNodeId) -> HazardLevel {
        self.records
            .get(&node)
            .map(|r| r.level)
            .unwrap_or_default()
    }

    /// Final record of a node, if it was ever touched.
    pub fn record(&self, node: VfgNodeId) -> Option<&PropagationRecord> {
        self.records.get(&node)
    }

    /// Whether a node reached the accept level.
    pub fn is_sink(&self, node: VfgNodeId) -> bool {
        self.sinks.contains(&node)
    }
}

/// Propagation outcome together with the reconstructed witness paths.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The frozen propagation state.
    pub outcome: PropagationOutcome,
    /// One witness path per sink, in ascending sink order.
    pub paths: Vec<WitnessPath>,
}

/// Null-dereference witness search over one value-flow graph.
///
/// Holds only references: the graph and classifier are owned by the
/// external pipeline for the lifetime of the call, and all search state
/// dies with the returned [`SearchResult`].
pub struct WitnessSearch<'a, G, C>
where
    G: ValueFlowGraph,
    C: NodeClassifier,
{
    graph: &'a G,
    kinds: KindCache<'a, C>,
}

impl<'a, G, C> WitnessSearch<'a, G, C>
where
    G: ValueFlowGraph,
    C: NodeClassifier,
{
    /// Create a search over a graph and classifier.
    pub fn new(graph: &'a G, classifier: &'a C) -> Self {
        Self {
            graph,
            kinds: KindCache::new(classifier),
        }
    }

    /// Create a search with an explicit classification-cache configuration.
    pub fn with_cache_config(graph: &'a G, classifier: &'a C, config: CacheConfig) -> Self {
        Self {
            graph,
            kinds: KindCache::with_config(classifier, config),
        }
    }

    /// Run seeding and forward propagation to the fixpoint.
    pub fn propagate(&self) -> Result<PropagationOutcome, SearchError> {
        let seeded = seed_sources(self.graph, &self.kinds)?;
        let seeds: Vec<VfgNodeId> = seeded.worklist.iter().copied().collect();
        let mut worklist: VecDeque<VfgNodeId> = seeded.worklist;
        let mut records = seeded.records;
        let mut sinks: BTreeSet<VfgNodeId> = BTreeSet::new();
        let mut updates = 0usize;

        while let Some(node) = worklist.pop_front() {
            let level = records.get(&node).map(|r| r.level).unwrap_or_default();
            if level == HazardLevel::None {
                tracing::error!(node = %node, "worklist node with no hazard level");
                return Err(SearchError::UntaintedWorklistNode { node });
            }
            // Terminal nodes cannot improve any successor further.
            if level.is_accept() {
                continue;
            }

            for edge in self.graph.out_edges(node) {
                let succ = edge.target;
                let kind = self
                    .kinds
                    .classify(succ)
                    .ok_or(SearchError::UnclassifiedNode { node: succ })?;

                let old = records.get(&succ).map(|r| r.level).unwrap_or_default();
                let candidate = match kind {
                    NodeKind::Load => old.max(level.escalated()),
                    NodeKind::PassThrough => old.max(level),
                    NodeKind::StoreNull | NodeKind::Other => continue,
                };

                if candidate > old {
                    records.insert(succ, PropagationRecord::improved(candidate, node, edge.id));
                    updates += 1;
                    tracing::debug!(
                        node = %succ,
                        from = %node,
                        level = %candidate,
                        "hazard level improved"
                    );

                    if candidate.is_accept() {
                        sinks.insert(succ);
                    } else {
                        worklist.push_back(succ);
                    }
                }
            }
        }

        tracing::info!(
            seeds = seeds.len(),
            touched = records.len(),
            sinks = sinks.len(),
            updates,
            "propagation converged"
        );

        Ok(PropagationOutcome {
            records,
            sinks,
            seeds,
            updates,
        })
    }

    /// Run the full search: propagate, then reconstruct one witness path
    /// per sink.
    pub fn find_paths(&self) -> Result<SearchResult, SearchError> {
        let outcome = self.propagate()?;
        let paths = witness_paths(&outcome)?;
        tracing::info!(paths = paths.len(), "witness search complete");
        Ok(SearchResult { outcome, paths })
    }

    /// Classification-cache counters for this search.
    pub fn cache_stats(&self) -> CacheStats {
        self.kinds.stats()
    }
}
