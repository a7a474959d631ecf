//! Core types for the witness kernel.

pub mod edge;
pub mod hazard;
pub mod node;
pub mod path;

pub use edge::{EdgeKind, VfgEdge, VfgEdgeId};
pub use hazard::{HazardLevel, Predecessor, PropagationRecord};
pub use node::{IcfgNodeId, NodeKind, VfgNodeId};
pub use path::{WitnessPath, WitnessStep};
