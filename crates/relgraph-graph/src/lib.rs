#![forbid(unsafe_code)]
//! relgraph-graph library.
//!
//! Turns a flat list of pairwise relation triples into a minimal,
//! human-inspectable graph and renders it as Graphviz DOT. See
//! [`pipeline`] for the stage order.
//!
//! # Conventions
//!
//! - **Errors**: Stages are infallible except cycle detection, which returns
//!   [`GraphError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod build;
pub mod context;
pub mod contract;
pub mod cycles;
pub mod error;
pub mod export;
pub mod graph;
pub mod overlap;
pub mod pipeline;
pub mod reduce;

pub use build::{RelationGraphs, build_graphs};
pub use error::GraphError;
pub use export::{render_dot, render_raw};
pub use graph::{ContainmentGraph, EquivalenceGraph, OverlapGraph, RelationGraph, canonical_pair};
pub use pipeline::{SimplifyStats, StageStats, simplify};
