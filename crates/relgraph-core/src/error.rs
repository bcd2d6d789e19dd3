use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnknownPredicate,
    MalformedInputLine,
    InputReadFailed,
    MetadataParseError,
    ConfigParseError,
    ContainmentCycle,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnknownPredicate => "E1001",
            Self::MalformedInputLine => "E1002",
            Self::InputReadFailed => "E1003",
            Self::MetadataParseError => "E1004",
            Self::ConfigParseError => "E1005",
            Self::ContainmentCycle => "E2001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::UnknownPredicate => "Unknown relation predicate",
            Self::MalformedInputLine => "Malformed relation line",
            Self::InputReadFailed => "Input could not be read",
            Self::MetadataParseError => "Node metadata parse error",
            Self::ConfigParseError => "Config file parse error",
            Self::ContainmentCycle => "Containment relation is cyclic",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::UnknownPredicate => Some(
                "Use one of: equivalent, contains, is_contained, overlap, disjoint.",
            ),
            Self::MalformedInputLine => {
                Some("Each line must read `<left> <right> <predicate>`.")
            }
            Self::InputReadFailed => Some("Check that the file exists and is readable."),
            Self::MetadataParseError => {
                Some("Node metadata must map identifiers to {label, color} in JSON or YAML.")
            }
            Self::ConfigParseError => Some("Fix syntax in relgraph.toml and retry."),
            Self::ContainmentCycle => Some(
                "Containment must be acyclic; check the upstream comparison for inconsistent pairs.",
            ),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while reading relations, context or node metadata.
///
/// Every variant is fatal: callers abort the run and emit no output.
#[derive(Debug, thiserror::Error)]
pub enum RelationError {
    #[error("line {line}: unknown predicate '{token}'")]
    UnknownPredicate { line: usize, token: String },

    #[error("line {line}: expected `<left> <right> <predicate>`, got '{content}'")]
    MalformedInputLine { line: usize, content: String },

    #[error("failed to read {what}: {source}")]
    Read {
        what: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse node metadata {}: {message}", path.display())]
    Metadata { path: PathBuf, message: String },
}

impl RelationError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownPredicate { .. } => ErrorCode::UnknownPredicate,
            Self::MalformedInputLine { .. } => ErrorCode::MalformedInputLine,
            Self::Read { .. } => ErrorCode::InputReadFailed,
            Self::Metadata { .. } => ErrorCode::MetadataParseError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, RelationError};
    use std::collections::HashSet;

    const ALL: [ErrorCode; 7] = [
        ErrorCode::UnknownPredicate,
        ErrorCode::MalformedInputLine,
        ErrorCode::InputReadFailed,
        ErrorCode::MetadataParseError,
        ErrorCode::ConfigParseError,
        ErrorCode::ContainmentCycle,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let code = code.code();
            assert_eq!(code.len(), 5);
            assert!(code.starts_with('E'));
            assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn relation_errors_map_to_codes() {
        let err = RelationError::UnknownPredicate {
            line: 3,
            token: "near".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::UnknownPredicate);
        assert_eq!(err.to_string(), "line 3: unknown predicate 'near'");

        let err = RelationError::MalformedInputLine {
            line: 1,
            content: "A B".to_string(),
        };
        assert_eq!(err.code().code(), "E1002");
    }
}
