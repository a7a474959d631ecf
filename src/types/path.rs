//! Witness path types.
//!
//! A witness path is the kernel's output artifact: one concrete
//! source-to-sink walk per sink, reconstructed from the frozen propagation
//! records. Paths are immutable once constructed and content-fingerprinted
//! for provenance.

use serde::{Deserialize, Serialize};

use crate::fingerprint::{canonical_hash_hex, PathFingerprint};

use super::edge::VfgEdgeId;
use super::node::VfgNodeId;

/// One step of a witness path: the edge taken and the node it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessStep {
    /// Edge identity in the value-flow graph.
    pub edge: VfgEdgeId,
    /// Node the edge leads to.
    pub node: VfgNodeId,
}

/// An ordered source-to-sink walk through the value-flow graph.
///
/// `head` is the originating source (a null store); `tail` holds the
/// remaining steps in forward order. The final step's node is the sink.
/// A path with an empty tail would mean a source that is its own sink,
/// which classification rules out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessPath {
    /// The originating source node.
    pub head: VfgNodeId,
    /// Forward-ordered steps from the source to the sink.
    pub tail: Vec<WitnessStep>,
}

impl WitnessPath {
    /// Create a new witness path.
    pub fn new(head: VfgNodeId, tail: Vec<WitnessStep>) -> Self {
        Self { head, tail }
    }

    /// The sink this path witnesses.
    pub fn sink(&self) -> VfgNodeId {
        self.tail.last().map(|step| step.node).unwrap_or(self.head)
    }

    /// Number of nodes on the path, head included.
    pub fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// Whether the path consists of the head alone.
    pub fn is_empty(&self) -> bool {
        self.tail.is_empty()
    }

    /// All node identities in walk order, head first.
    pub fn node_ids(&self) -> Vec<VfgNodeId> {
        std::iter::once(self.head)
            .chain(self.tail.iter().map(|step| step.node))
            .collect()
    }

    /// All edge identities in walk order.
    pub fn edge_ids(&self) -> Vec<VfgEdgeId> {
        self.tail.iter().map(|step| step.edge).collect()
    }

    /// Content fingerprint of the path for provenance tracking.
    ///
    /// Identical walks produce identical fingerprints regardless of when or
    /// where they were reconstructed.
    pub fn fingerprint(&self) -> PathFingerprint {
        PathFingerprint::new(canonical_hash_hex(self))
    }
}
