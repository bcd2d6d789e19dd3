#![forbid(unsafe_code)]
//! relgraph-core library.
//!
//! Data model and input boundary for the relation-graph engine: typed
//! predicates and relation triples, the line-oriented relation and context
//! parsers, the node metadata table, error codes, configuration and timing.
//!
//! # Conventions
//!
//! - **Errors**: Domain errors are `thiserror` enums ([`error::RelationError`]);
//!   config loaders return `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod context;
pub mod error;
pub mod metadata;
pub mod parser;
pub mod relation;
pub mod timing;

pub use context::ContextSet;
pub use error::{ErrorCode, RelationError};
pub use metadata::{NodeAttributes, NodeTable};
pub use relation::{NodeId, Predicate, Relation};
