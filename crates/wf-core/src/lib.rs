//! `wf-core` — foundational types for the mall wayfinding engine.
//!
//! This crate is a dependency of every other `wf-*` crate.  It intentionally
//! has no `wf-*` dependencies and a single required external one
//! (`thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                   |
//! |-------------|--------------------------------------------|
//! | [`ids`]     | `NodeId`, `ConnectionId`                   |
//! | [`geo`]     | `Point` (floor-local planar coordinate)    |
//! | [`floor`]   | `Floor` enum with its vertical ordering    |
//! | [`error`]   | `CoreError`, `CoreResult`                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod floor;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use floor::Floor;
pub use geo::Point;
pub use ids::{ConnectionId, NodeId};
