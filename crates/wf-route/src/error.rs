//! Routing error type.
//!
//! "No route" is deliberately absent: an unreachable destination is the
//! `Ok(None)` outcome of a search, not an error.

use thiserror::Error;

use wf_core::Floor;
use wf_graph::GraphError;

/// Errors produced by `wf-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("node {0:?} is not in the graph")]
    UnknownNode(String),

    #[error("floor {0} has no waypoints to attach an anchor to")]
    NoNodesOnFloor(Floor),

    #[error("routing configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
