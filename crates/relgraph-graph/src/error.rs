use relgraph_core::{ErrorCode, NodeId};

/// Errors raised by the simplification engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The containment graph has a cycle, so its transitive reduction is
    /// undefined. `members` is the sorted node set of the first cycle found.
    #[error("containment cycle between {}", members.join(", "))]
    ContainmentCycle { members: Vec<NodeId> },
}

impl GraphError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ContainmentCycle { .. } => ErrorCode::ContainmentCycle,
        }
    }
}
