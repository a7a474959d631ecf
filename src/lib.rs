//! # npd-witness-kernel
//!
//! Deterministic null-dereference witness search over value-flow graphs.
//!
//! The kernel answers one question:
//!
//! > Given a value-flow graph, which dereference sites can observe a stored
//! > null, and through exactly which flow?
//!
//! ## Core Contract
//!
//! 1. Seed every node classified as a null store at hazard level `stored`
//! 2. Propagate hazard levels forward to a fixpoint (loads escalate,
//!    copies and merges forward, everything else blocks)
//! 3. Reconstruct one witness path per accepting node from recorded
//!    predecessor links, and fingerprint everything for provenance
//!
//! ## Architecture
//!
//! ```text
//! ValueFlowGraph → NodeClassifier → WitnessSearch → Reconstructor → Reporter
//!                       ↓                 ↓
//!                   KindCache      PropagationOutcome
//! ```
//!
//! The graph and the classifier are external collaborators: the kernel
//! reads the graph, never mutates it, and treats node kinds as ground
//! truth. All search state lives and dies within one [`WitnessSearch`]
//! invocation.
//!
//! ## Determinism Guarantees
//!
//! - Same graph + same classifier → identical witness paths and a
//!   byte-identical [`WitnessReport`](report::WitnessReport)
//! - Paths are emitted in ascending sink order
//! - Ties between equal-level predecessors resolve to the first one
//!   processed (seed order + FIFO edge traversal), reproducibly

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod detect;
pub mod fingerprint;
pub mod graph;
pub mod reconstruct;
pub mod report;
pub mod search;
pub mod types;

// Re-exports
pub use types::{
    EdgeKind, HazardLevel, IcfgNodeId, NodeKind, Predecessor, PropagationRecord, VfgEdge,
    VfgEdgeId, VfgNodeId, WitnessPath, WitnessStep,
};

pub use classify::{CacheConfig, CacheStats, KindCache, NodeClassifier};
pub use detect::{seed_sources, SeededState};
pub use fingerprint::{
    canonical_hash, canonical_hash_hex, to_canonical_bytes, GraphFingerprint, PathFingerprint,
};
pub use graph::{InMemoryVfg, ValueFlowGraph};
pub use reconstruct::{witness_path_for, witness_paths};
pub use report::{ReportConfig, ReportError, ReportedPath, Reporter, WitnessReport};
pub use search::{PropagationOutcome, SearchError, SearchResult, WitnessSearch};

/// Schema version for all serialized kernel types.
/// Increment on breaking changes to any schema type.
pub const WITNESS_SCHEMA_VERSION: &str = "1.0.0";
