//! Relation triples and the closed set of predicates.
//!
//! A relation is `(left, right, predicate)` as produced by the upstream
//! pairwise comparison. Predicates are a closed enum so that every stage
//! matches on them exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a variant or allele. Ordered lexicographically.
pub type NodeId = String;

/// Classification of the relation between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Both nodes denote the same entity.
    Equivalent,
    /// The left node contains the right node.
    Contains,
    /// The left node is contained in the right node.
    IsContained,
    /// The nodes partially intersect, neither containing the other.
    Overlap,
    /// The nodes share nothing.
    Disjoint,
}

impl Predicate {
    /// All predicates, in token order.
    pub const ALL: [Self; 5] = [
        Self::Equivalent,
        Self::Contains,
        Self::IsContained,
        Self::Overlap,
        Self::Disjoint,
    ];

    /// The wire token for this predicate.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equivalent => "equivalent",
            Self::Contains => "contains",
            Self::IsContained => "is_contained",
            Self::Overlap => "overlap",
            Self::Disjoint => "disjoint",
        }
    }

    /// The predicate that holds when the operands are swapped.
    #[must_use]
    pub const fn converse(self) -> Self {
        match self {
            Self::Contains => Self::IsContained,
            Self::IsContained => Self::Contains,
            other => other,
        }
    }

    /// Returns `true` if the predicate does not depend on operand order.
    #[must_use]
    pub const fn is_symmetric(self) -> bool {
        !matches!(self, Self::Contains | Self::IsContained)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a token is not one of the five predicate tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePredicateError {
    pub got: String,
}

impl fmt::Display for ParsePredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid predicate: '{}'", self.got)
    }
}

impl std::error::Error for ParsePredicateError {}

impl FromStr for Predicate {
    type Err = ParsePredicateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "equivalent" => Ok(Self::Equivalent),
            "contains" => Ok(Self::Contains),
            "is_contained" => Ok(Self::IsContained),
            "overlap" => Ok(Self::Overlap),
            "disjoint" => Ok(Self::Disjoint),
            _ => Err(ParsePredicateError { got: s.to_string() }),
        }
    }
}

/// One classified pair of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub left: NodeId,
    pub right: NodeId,
    pub predicate: Predicate,
}

impl Relation {
    #[must_use]
    pub fn new(left: impl Into<NodeId>, right: impl Into<NodeId>, predicate: Predicate) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            predicate,
        }
    }

    /// The same fact stated with the operands swapped.
    #[must_use]
    pub fn converse(&self) -> Self {
        Self {
            left: self.right.clone(),
            right: self.left.clone(),
            predicate: self.predicate.converse(),
        }
    }

    /// For containment relations, the `(container, contained)` pair.
    #[must_use]
    pub fn containment(&self) -> Option<(&str, &str)> {
        match self.predicate {
            Predicate::Contains => Some((&self.left, &self.right)),
            Predicate::IsContained => Some((&self.right, &self.left)),
            Predicate::Equivalent | Predicate::Overlap | Predicate::Disjoint => None,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.right, self.predicate)
    }
}
