//! Canonical serialization and content fingerprints.
//!
//! Fingerprints give every search artifact a stable, content-derived
//! identity: the same graph and classifier always produce byte-identical
//! fingerprints, which is what downstream tooling replays against.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: struct fields serialize in declaration order
//! - Stable Vec order: vectors serialize in index order
//! - No HashMap in hashed data: use BTreeMap for maps that reach a hash

use serde::{Deserialize, Serialize};
use std::hash::Hasher;
use xxhash_rust::xxh64::{xxh64, Xxh64};

use crate::classify::NodeClassifier;
use crate::graph::ValueFlowGraph;

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("canonical serialization failed")
}

/// Compute the canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    let bytes = to_canonical_bytes(value);
    xxh64(&bytes, 0)
}

/// Compute the canonical hash and return it as a hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

/// Content fingerprint of a single witness path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathFingerprint(String);

impl PathFingerprint {
    /// Create a fingerprint from a hash string.
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Get the fingerprint as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PathFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the analyzed graph, for detecting drift between runs.
///
/// Folded from every (node id, kind) pair plus the edge count and schema
/// version: any reclassification or topology change produces a different
/// fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphFingerprint(String);

impl GraphFingerprint {
    /// Create a fingerprint from a hash string.
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Compute the fingerprint of a graph under a classifier.
    ///
    /// Nodes are folded in the graph's enumeration order, which the
    /// [`ValueFlowGraph`] contract requires to be deterministic.
    pub fn from_graph<G, C>(graph: &G, classifier: &C, schema_version: &str) -> Self
    where
        G: ValueFlowGraph,
        C: NodeClassifier,
    {
        let mut hasher = Xxh64::new(0);
        hasher.write(&(graph.edge_count() as u64).to_le_bytes());
        hasher.write(schema_version.as_bytes());

        for node in graph.node_ids() {
            hasher.write(&node.index().to_le_bytes());
            let kind = classifier
                .classify(node)
                .map(|k| k.to_string())
                .unwrap_or_default();
            hasher.write(kind.as_bytes());
        }

        Self(format!("{:016x}", hasher.finish()))
    }

    /// Get the fingerprint as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GraphFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::memory::{InMemoryVfg, NodeOp, StoredValue};

    #[derive(Serialize)]
    struct TestStruct {
        name: String,
        value: i32,
    }

    #[test]
    fn test_canonical_hash_determinism() {
        let s = TestStruct {
            name: "test".to_string(),
            value: 42,
        };

        let h1 = canonical_hash(&s);
        let h2 = canonical_hash(&s);
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_graph_fingerprint_stable() {
        let mut g = InMemoryVfg::new();
        let s = g.add_node(NodeOp::Store {
            value: StoredValue::NullConstant,
        });
        let l = g.add_node(NodeOp::Load);
        g.add_edge(s, l);

        let f1 = GraphFingerprint::from_graph(&g, &g, "1.0.0");
        let f2 = GraphFingerprint::from_graph(&g, &g, "1.0.0");
        assert_eq!(f1, f2);
    }

    #[test]
    fn test_graph_fingerprint_sensitive_to_kind() {
        let mut g1 = InMemoryVfg::new();
        let a = g1.add_node(NodeOp::Store {
            value: StoredValue::NullConstant,
        });
        let b = g1.add_node(NodeOp::Load);
        g1.add_edge(a, b);

        let mut g2 = InMemoryVfg::new();
        let a = g2.add_node(NodeOp::Store {
            value: StoredValue::NullConstant,
        });
        let b = g2.add_node(NodeOp::Copy);
        g2.add_edge(a, b);

        let f1 = GraphFingerprint::from_graph(&g1, &g1, "1.0.0");
        let f2 = GraphFingerprint::from_graph(&g2, &g2, "1.0.0");
        assert_ne!(f1, f2);
    }

    #[test]
    fn test_schema_version_changes_fingerprint() {
        let g = InMemoryVfg::new();
        let f1 = GraphFingerprint::from_graph(&g, &g, "1.0.0");
        let f2 = GraphFingerprint::from_graph(&g, &g, "2.0.0");
        assert_ne!(f1, f2);
    }
}
