//! Witness path reporting.
//!
//! Thin presentation layer over the search output: renders each witness
//! path as a sequence of value-flow node identifiers and, through the
//! classifier's projection, the corresponding control-flow identifiers.
//! Carries no semantic weight for the algorithm.
//!
//! Verbosity is an explicit [`ReportConfig`] flag passed in by the caller,
//! never process-global state.

use std::io;

use serde::{Deserialize, Serialize};

use crate::classify::NodeClassifier;
use crate::fingerprint::{canonical_hash_hex, GraphFingerprint, PathFingerprint};
use crate::graph::ValueFlowGraph;
use crate::search::SearchResult;
use crate::types::{IcfgNodeId, VfgNodeId, WitnessPath};
use crate::WITNESS_SCHEMA_VERSION;

/// Error type for report rendering.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Output write failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Report serialization failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reporter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Annotate every path node with its kind and final hazard level.
    pub verbose: bool,
    /// Emit the control-flow projection line for each path.
    pub include_icfg: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            include_icfg: true,
        }
    }
}

/// One witness path prepared for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportedPath {
    /// Value-flow node identities in walk order, source first.
    pub vfg_nodes: Vec<VfgNodeId>,
    /// Control-flow counterparts, position-aligned with `vfg_nodes`;
    /// `None` where a node has no projection.
    pub icfg_nodes: Vec<Option<IcfgNodeId>>,
    /// Content fingerprint of the underlying path.
    pub fingerprint: PathFingerprint,
}

/// Serializable report over one search run.
///
/// Downstream tooling replays against the fingerprints: the same graph and
/// classifier always produce a byte-identical report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WitnessReport {
    /// Schema version of all serialized kernel types.
    pub schema_version: String,
    /// Identity of the analyzed graph.
    pub graph_fingerprint: GraphFingerprint,
    /// Number of witness paths found.
    pub path_count: usize,
    /// The paths, in ascending sink order.
    pub paths: Vec<ReportedPath>,
    /// Content hash over `paths` for integrity verification.
    pub report_fingerprint: String,
}

/// Renders search results as text and serializable reports.
pub struct Reporter<'a, C: NodeClassifier> {
    classifier: &'a C,
    config: ReportConfig,
}

impl<'a, C: NodeClassifier> Reporter<'a, C> {
    /// Create a reporter over the classifier used for the search.
    pub fn new(classifier: &'a C, config: ReportConfig) -> Self {
        Self { classifier, config }
    }

    /// Project a path into the control-flow graph.
    ///
    /// Position-aligned with the path's nodes; `None` where the classifier
    /// knows no counterpart.
    // TODO: branch choices taken between adjacent control-flow points are
    // lost in this projection; recovering them needs access to the
    // control-flow graph's own edges.
    fn project(&self, path: &WitnessPath) -> Vec<Option<IcfgNodeId>> {
        path.node_ids()
            .into_iter()
            .map(|node| self.classifier.icfg_node(node))
            .collect()
    }

    /// Render the witness paths as text.
    pub fn write_text<W: io::Write>(
        &self,
        result: &SearchResult,
        out: &mut W,
    ) -> Result<(), ReportError> {
        writeln!(out, "witness paths: {}", result.paths.len())?;

        for (i, path) in result.paths.iter().enumerate() {
            writeln!(out, "path {} (fingerprint {}):", i + 1, path.fingerprint())?;

            let vfg_line: Vec<String> = path.node_ids().iter().map(|n| n.to_string()).collect();
            writeln!(out, "  vfg:  {}", vfg_line.join(" "))?;

            if self.config.include_icfg {
                let icfg_line: Vec<String> = self
                    .project(path)
                    .iter()
                    .map(|n| n.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()))
                    .collect();
                writeln!(out, "  icfg: {}", icfg_line.join(" "))?;
            }

            if self.config.verbose {
                for node in path.node_ids() {
                    let kind = self
                        .classifier
                        .classify(node)
                        .map(|k| k.to_string())
                        .unwrap_or_else(|| "?".to_string());
                    let level = result.outcome.level_of(node);
                    writeln!(out, "    {node} {kind} {level}")?;
                }
            }
        }

        Ok(())
    }

    /// Build the serializable report for a search run.
    pub fn build_report<G: ValueFlowGraph>(
        &self,
        graph: &G,
        result: &SearchResult,
    ) -> WitnessReport {
        let paths: Vec<ReportedPath> = result
            .paths
            .iter()
            .map(|path| ReportedPath {
                vfg_nodes: path.node_ids(),
                icfg_nodes: self.project(path),
                fingerprint: path.fingerprint(),
            })
            .collect();

        let report_fingerprint = canonical_hash_hex(&paths);

        WitnessReport {
            schema_version: WITNESS_SCHEMA_VERSION.to_string(),
            graph_fingerprint: GraphFingerprint::from_graph(
                graph,
                self.classifier,
                WITNESS_SCHEMA_VERSION,
            ),
            path_count: paths.len(),
            paths,
            report_fingerprint,
        }
    }

    /// Render the serializable report as pretty-printed JSON.
    pub fn write_json<G: ValueFlowGraph, W: io::Write>(
        &self,
        graph: &G,
        result: &SearchResult,
        out: &mut W,
    ) -> Result<(), ReportError> {
        let report = self.build_report(graph, result);
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        Ok(())
    }
}
