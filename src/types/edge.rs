//! Edge types for the witness kernel.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::VfgNodeId;

/// Unique identifier for an edge in the value-flow graph.
///
/// A dense arena index, like [`VfgNodeId`]. Edges are owned by the graph;
/// the kernel records them by identity inside witness paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VfgEdgeId(u32);

impl VfgEdgeId {
    /// Create an edge id from a raw index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for VfgEdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flavor of a value-flow edge.
///
/// Reporting-only: propagation treats all edge kinds identically. The
/// flavors mirror how interprocedural value flow is usually stitched
/// together (in-procedure flow, flow into a callee, flow back to a caller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Intraprocedural flow.
    Direct,
    /// Flow from an actual argument into a formal parameter.
    Call,
    /// Flow from a return value back to a call site.
    Return,
}

impl EdgeKind {
    /// Parse edge kind from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "direct" | "" => Some(Self::Direct),
            "call" => Some(Self::Call),
            "return" => Some(Self::Return),
            _ => None,
        }
    }
}

impl Default for EdgeKind {
    fn default() -> Self {
        Self::Direct
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Call => write!(f, "call"),
            Self::Return => write!(f, "return"),
        }
    }
}

/// Directed edge in the value-flow graph.
///
/// Connects exactly two nodes. Implements `Ord` for deterministic ordering:
/// (source, target, id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VfgEdge {
    /// Edge identity.
    pub id: VfgEdgeId,
    /// Node the value flows out of.
    pub source: VfgNodeId,
    /// Node the value flows into.
    pub target: VfgNodeId,
    /// Edge flavor.
    pub kind: EdgeKind,
}

impl VfgEdge {
    /// Create a new edge.
    pub fn new(id: VfgEdgeId, source: VfgNodeId, target: VfgNodeId, kind: EdgeKind) -> Self {
        Self {
            id,
            source,
            target,
            kind,
        }
    }
}

// Canonical ordering: source, then target, then edge id
impl PartialOrd for VfgEdge {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VfgEdge {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.source.cmp(&other.source) {
            std::cmp::Ordering::Equal => match self.target.cmp(&other.target) {
                std::cmp::Ordering::Equal => self.id.cmp(&other.id),
                ord => ord,
            },
            ord => ord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(id: u32, source: u32, target: u32) -> VfgEdge {
        VfgEdge::new(
            VfgEdgeId::new(id),
            VfgNodeId::new(source),
            VfgNodeId::new(target),
            EdgeKind::Direct,
        )
    }

    #[test]
    fn test_edge_ordering() {
        let e1 = edge(0, 1, 2);
        let e2 = edge(1, 1, 3);
        let e3 = edge(2, 2, 3);

        // Same source, different target
        assert!(e1 < e2);
        // Different source
        assert!(e1 < e3);
        assert!(e2 < e3);
    }

    #[test]
    fn test_parallel_edges_ordered_by_id() {
        let e1 = edge(0, 1, 2);
        let e2 = edge(5, 1, 2);
        assert!(e1 < e2);
    }

    #[test]
    fn test_edge_kind_parsing() {
        assert_eq!(EdgeKind::from_str("direct"), Some(EdgeKind::Direct));
        assert_eq!(EdgeKind::from_str("CALL"), Some(EdgeKind::Call));
        assert_eq!(EdgeKind::from_str(""), Some(EdgeKind::Direct));
        assert_eq!(EdgeKind::from_str("bogus"), None);
    }
}
