//! `wf-graph` — waypoint graph, spatial indexing, and snapshot management.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`node`]     | `Node`, `NodeKind`, `Language`, `Connection`                |
//! | [`network`]  | `MallGraph` (CSR + per-floor R-trees), `MallGraphBuilder`   |
//! | [`loader`]   | `load_graph_csv`, `load_graph_reader`                       |
//! | [`snapshot`] | `GraphStore` (atomic snapshot swap)                         |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod loader;
pub mod network;
pub mod node;
pub mod snapshot;


pub use error::{GraphError, GraphResult};
pub use loader::{load_graph_csv, load_graph_reader, read_connections, read_nodes};
pub use network::{MallGraph, MallGraphBuilder};
pub use node::{Connection, Language, Node, NodeKind};
pub use snapshot::GraphStore;
