//! Graph-subsystem error type.
//!
//! Every variant is a data-authoring problem.  An unreachable destination is
//! not an error and never appears here.

use thiserror::Error;

/// Errors produced by `wf-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("connection #{connection} ({from} -> {to}) references unknown node {missing:?}")]
    DanglingReference {
        connection: usize,
        from:       String,
        to:         String,
        missing:    String,
    },

    #[error("node id {0:?} is defined more than once")]
    DuplicateNode(String),

    #[error("connection #{connection} has invalid distance weight {weight}")]
    InvalidWeight { connection: usize, weight: f32 },

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
