//! Error types for tour construction.
//!
//! Every fallible operation in this crate returns [`TspResult`]. Input and
//! configuration errors are the caller's fault; the structural variants
//! (`DisconnectedGraph`, `NoPerfectMatching`, ...) guard preconditions that
//! cannot fail for a well-formed metric matrix and indicate a bug if seen.

use thiserror::Error;

/// Result type alias for tour construction.
pub type TspResult<T> = Result<T, TspError>;

/// Unified error type for both tour construction engines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// Malformed distance matrix.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid engine configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An algorithmic invariant that must always hold was violated.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    /// The spanning tree could not reach every vertex.
    #[error("graph is disconnected: spanning tree has {edges} of {required} edges")]
    DisconnectedGraph {
        /// Edges selected before the candidate list ran out.
        edges: usize,
        /// Edges a spanning tree needs (`n - 1`).
        required: usize,
    },

    /// The Eulerian walk did not consume every multigraph edge.
    #[error("multigraph is disconnected: walk used {used} of {total} edges")]
    DisconnectedMultigraph {
        /// Edges consumed by the walk.
        used: usize,
        /// Edges in the multigraph.
        total: usize,
    },

    /// Some odd-degree vertex was left unmatched.
    #[error("no perfect matching: {unmatched} of {vertices} odd vertices unmatched")]
    NoPerfectMatching {
        /// Unmatched vertex count.
        unmatched: usize,
        /// Odd-degree vertex count.
        vertices: usize,
    },

    /// The shortcut walk did not visit every vertex.
    #[error("incomplete tour: visited {visited} of {expected} vertices")]
    IncompleteTour {
        /// Distinct vertices produced.
        visited: usize,
        /// Vertices in the matrix.
        expected: usize,
    },

    /// The run was stopped through a [`CancelFlag`](crate::cancel::CancelFlag).
    #[error("cancelled during {0}")]
    Cancelled(&'static str),
}

impl TspError {
    /// Shorthand for [`TspError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Shorthand for [`TspError::InvalidConfig`].
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Shorthand for [`TspError::InternalInvariant`].
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InternalInvariant(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = TspError::invalid_input("matrix is empty");
        assert_eq!(e.to_string(), "invalid input: matrix is empty");

        let e = TspError::IncompleteTour {
            visited: 3,
            expected: 5,
        };
        assert_eq!(e.to_string(), "incomplete tour: visited 3 of 5 vertices");

        let e = TspError::Cancelled("matching");
        assert_eq!(e.to_string(), "cancelled during matching");
    }

    #[test]
    fn test_constructors() {
        assert!(matches!(
            TspError::invalid_config("x"),
            TspError::InvalidConfig(_)
        ));
        assert!(matches!(
            TspError::invariant("x"),
            TspError::InternalInvariant(_)
        ));
    }
}
