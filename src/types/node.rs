//! Node identity and kind types for the witness kernel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node in the value-flow graph.
///
/// A dense arena index: the graph owns the nodes, the kernel only holds
/// identities. Implements `Ord` for deterministic ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VfgNodeId(u32);

impl VfgNodeId {
    /// Create a node id from a raw index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for VfgNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VfgNodeId {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

/// Identifier of a node in the collaborator's interprocedural control-flow
/// graph.
///
/// Presentation-only: the kernel never traverses the control-flow graph, it
/// only re-emits witness paths under this projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IcfgNodeId(u32);

impl IcfgNodeId {
    /// Create a control-flow node id from a raw index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for IcfgNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for IcfgNodeId {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

/// Kind of a value-flow node, as reported by the node classifier.
///
/// Resolved once per node and cached; the propagation engine is a pure
/// switch over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Memory write whose written value is a null constant (hazard source).
    StoreNull,
    /// Memory read; escalates the hazard level by one.
    Load,
    /// Copy or merge (phi) of flows; forwards the hazard level unchanged.
    PassThrough,
    /// Any other operation; hazard does not transition through it.
    Other,
}

impl NodeKind {
    /// Parse node kind from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "store-null" => Some(Self::StoreNull),
            "load" => Some(Self::Load),
            "pass-through" => Some(Self::PassThrough),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Whether this kind seeds the search.
    pub fn is_source(&self) -> bool {
        matches!(self, Self::StoreNull)
    }

    /// Whether the hazard level can transition into a node of this kind.
    pub fn transitions(&self) -> bool {
        matches!(self, Self::Load | Self::PassThrough)
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Other
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreNull => write!(f, "store-null"),
            Self::Load => write!(f, "load"),
            Self::PassThrough => write!(f, "pass-through"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_ordering() {
        let a = VfgNodeId::new(1);
        let b = VfgNodeId::new(2);
        assert!(a < b);
        assert_eq!(a.index(), 1);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(NodeKind::from_str("store-null"), Some(NodeKind::StoreNull));
        assert_eq!(NodeKind::from_str("LOAD"), Some(NodeKind::Load));
        assert_eq!(NodeKind::from_str("pass-through"), Some(NodeKind::PassThrough));
        assert_eq!(NodeKind::from_str("invalid"), None);
    }

    #[test]
    fn test_kind_roundtrip_display() {
        for kind in [
            NodeKind::StoreNull,
            NodeKind::Load,
            NodeKind::PassThrough,
            NodeKind::Other,
        ] {
            assert_eq!(NodeKind::from_str(&kind.to_string()), Some(kind));
        }
    }

    #[test]
    fn test_kind_predicates() {
        assert!(NodeKind::StoreNull.is_source());
        assert!(!NodeKind::StoreNull.transitions());
        assert!(NodeKind::Load.transitions());
        assert!(NodeKind::PassThrough.transitions());
        assert!(!NodeKind::Other.transitions());
    }
}
