//! The full simplification pipeline.
//!
//! ```text
//! relations
//!     ↓  build::build_graphs
//! equivalence / containment / overlap
//!     ↓  contract::contract_equivalent
//! classes collapsed onto representatives
//!     ↓  cycles::check_acyclic, reduce::transitive_reduction
//! direct containment only
//!     ↓  overlap::filter_overlap
//! overlap not explained by containment
//!     ↓  context::select_context   (only with a non-empty context)
//! final graphs
//! ```
//!
//! Each stage consumes the previous stage's graphs and returns new ones.

use relgraph_core::timing::timed;
use relgraph_core::{ContextSet, Relation};
use serde::Serialize;
use tracing::{info, instrument};

use crate::build::{RelationGraphs, build_graphs};
use crate::context::select_context;
use crate::contract::contract_equivalent;
use crate::cycles::check_acyclic;
use crate::error::GraphError;
use crate::overlap::filter_overlap;
use crate::reduce::transitive_reduction;

/// Graph sizes after one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageStats {
    pub stage: &'static str,
    pub nodes: usize,
    pub equivalence_edges: usize,
    pub containment_edges: usize,
    pub overlap_edges: usize,
}

impl StageStats {
    fn capture(stage: &'static str, graphs: &RelationGraphs) -> Self {
        Self {
            stage,
            nodes: graphs.node_ids().len(),
            equivalence_edges: graphs.equivalence.edge_count(),
            containment_edges: graphs.containment.edge_count(),
            overlap_edges: graphs.overlap.edge_count(),
        }
    }
}

/// Per-stage statistics of one simplification run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimplifyStats {
    pub relations: usize,
    pub context: usize,
    pub stages: Vec<StageStats>,
}

impl SimplifyStats {
    /// Statistics of the last stage that ran.
    #[must_use]
    pub fn last(&self) -> Option<&StageStats> {
        self.stages.last()
    }
}

/// Run stages 1 to 5 over `relations`.
///
/// # Errors
///
/// Returns [`GraphError::ContainmentCycle`] if containment is cyclic after
/// equivalence contraction. No graphs are returned in that case.
#[instrument(skip_all, fields(relations = relations.len(), context = context.len()))]
pub fn simplify(
    relations: &[Relation],
    context: &ContextSet,
) -> Result<(RelationGraphs, SimplifyStats), GraphError> {
    let mut stats = SimplifyStats {
        relations: relations.len(),
        context: context.len(),
        stages: Vec::with_capacity(5),
    };

    let graphs = timed("stage.build", || build_graphs(relations));
    stats.stages.push(StageStats::capture("build", &graphs));

    let graphs = timed("stage.contract", || contract_equivalent(graphs));
    stats.stages.push(StageStats::capture("contract", &graphs));

    check_acyclic(&graphs.containment)?;
    let containment = timed("stage.reduce", || transitive_reduction(&graphs.containment));
    let graphs = RelationGraphs {
        containment,
        ..graphs
    };
    stats.stages.push(StageStats::capture("reduce", &graphs));

    let overlap = timed("stage.overlap", || {
        filter_overlap(&graphs.containment, &graphs.overlap)
    });
    let graphs = RelationGraphs { overlap, ..graphs };
    stats.stages.push(StageStats::capture("overlap", &graphs));

    let graphs = if context.is_empty() {
        graphs
    } else {
        let selected = timed("stage.context", || select_context(graphs, context));
        stats.stages.push(StageStats::capture("context", &selected));
        selected
    };

    if let Some(last) = stats.last() {
        info!(
            nodes = last.nodes,
            equivalence_edges = last.equivalence_edges,
            containment_edges = last.containment_edges,
            overlap_edges = last.overlap_edges,
            "simplified relation graph"
        );
    }

    Ok((graphs, stats))
}
