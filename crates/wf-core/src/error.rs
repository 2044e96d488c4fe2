//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` only covers parsing
//! of the reference data owned by this crate.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown floor code {0:?}")]
    UnknownFloor(String),
}

/// Shorthand result type for `wf-core`.
pub type CoreResult<T> = Result<T, CoreError>;
