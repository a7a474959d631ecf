//! Source detection.
//!
//! Scans the graph once and seeds the search at every node classified
//! `store-null` — a memory write whose written value the classifier has
//! confirmed to be a null constant.

use std::collections::{BTreeMap, VecDeque};

use crate::classify::{KindCache, NodeClassifier};
use crate::graph::ValueFlowGraph;
use crate::search::SearchError;
use crate::types::{NodeKind, PropagationRecord, VfgNodeId};

/// Worklist and record table primed with the seed nodes.
///
/// Seeds carry hazard level `Stored` and no predecessor. The worklist
/// preserves the graph's node enumeration order, which fixes the search's
/// tie-break behavior.
#[derive(Debug, Default)]
pub struct SeededState {
    /// FIFO worklist, one entry per seed.
    pub worklist: VecDeque<VfgNodeId>,
    /// Propagation records, one entry per seed.
    pub records: BTreeMap<VfgNodeId, PropagationRecord>,
}

impl SeededState {
    /// Number of seeds found.
    pub fn len(&self) -> usize {
        self.worklist.len()
    }

    /// Whether no qualifying store was found (a valid outcome that simply
    /// yields zero paths).
    pub fn is_empty(&self) -> bool {
        self.worklist.is_empty()
    }
}

/// Scan all graph nodes and seed every `store-null` site.
///
/// A node the classifier does not know is a contract violation between the
/// graph and the classifier, and aborts the analysis.
pub fn seed_sources<G, C>(graph: &G, kinds: &KindCache<'_, C>) -> Result<SeededState, SearchError>
where
    G: ValueFlowGraph,
    C: NodeClassifier,
{
    let mut state = SeededState::default();

    for node in graph.node_ids() {
        let kind = kinds
            .classify(node)
            .ok_or(SearchError::UnclassifiedNode { node })?;

        if kind == NodeKind::StoreNull {
            tracing::debug!(node = %node, "seeding null store");
            state.worklist.push_back(node);
            state.records.insert(node, PropagationRecord::seed());
        }
    }

    tracing::debug!(
        seeds = state.len(),
        nodes = graph.node_count(),
        "source detection complete"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::memory::{InMemoryVfg, NodeOp, StoredValue};
    use crate::types::HazardLevel;

    #[test]
    fn test_seeds_only_null_stores() {
        let mut g = InMemoryVfg::new();
        let s1 = g.add_node(NodeOp::Store {
            value: StoredValue::NullConstant,
        });
        let _other = g.add_node(NodeOp::Store {
            value: StoredValue::Constant,
        });
        let _load = g.add_node(NodeOp::Load);
        let s2 = g.add_node(NodeOp::Store {
            value: StoredValue::NullConstant,
        });

        let kinds = KindCache::new(&g);
        let state = seed_sources(&g, &kinds).unwrap();

        assert_eq!(state.len(), 2);
        assert_eq!(state.worklist, [s1, s2]);
        for seed in [s1, s2] {
            let record = state.records[&seed];
            assert_eq!(record.level, HazardLevel::Stored);
            assert!(record.is_seed());
        }
    }

    #[test]
    fn test_no_sources_is_valid() {
        let mut g = InMemoryVfg::new();
        g.add_node(NodeOp::Load);
        g.add_node(NodeOp::Copy);

        let kinds = KindCache::new(&g);
        let state = seed_sources(&g, &kinds).unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn test_seed_order_follows_node_order() {
        let mut g = InMemoryVfg::new();
        let mut expected = Vec::new();
        for i in 0..6 {
            let op = if i % 2 == 0 {
                NodeOp::Store {
                    value: StoredValue::NullConstant,
                }
            } else {
                NodeOp::Opaque
            };
            let id = g.add_node(op);
            if i % 2 == 0 {
                expected.push(id);
            }
        }

        let kinds = KindCache::new(&g);
        let state = seed_sources(&g, &kinds).unwrap();
        let seeded: Vec<_> = state.worklist.iter().copied().collect();
        assert_eq!(seeded, expected);
    }
}
