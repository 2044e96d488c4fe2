//! `wf-route` — route modes, costs, anchor bridging, and A* search.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`mode`]      | `RouteMode` eligibility policy, `RouteOptions`             |
//! | [`cost`]      | `CostModel` (edge cost + admissible heuristic)             |
//! | [`bridge`]    | `AnchorPoint`, `AnchorBridge`, `bridge_anchor`, `Kiosk`    |
//! | [`query`]     | `QueryGraph` (graph + per-query bridges)                   |
//! | [`router`]    | `Router` trait, `AStarRouter`, `DijkstraRouter`, `Route`   |
//! | [`wayfinder`] | `Wayfinder` facade, `find_path`, `find_path_in`            |
//! | [`config`]    | `WayfinderConfig` (JSON)                                   |
//! | [`error`]     | `RouteError`, `RouteResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `Wayfinder::find_paths` routes journeys on Rayon threads.  |

pub mod bridge;
pub mod config;
pub mod cost;
pub mod error;
pub mod mode;
pub mod query;
pub mod router;
pub mod wayfinder;


pub use bridge::{ANCHOR_NODE_ID, AnchorBridge, AnchorPoint, Kiosk, bridge_anchor};
pub use config::WayfinderConfig;
pub use cost::{CostModel, DEFAULT_ESCALATOR_PENALTY, DEFAULT_FLOOR_PENALTY};
pub use error::{RouteError, RouteResult};
pub use mode::{RouteMode, RouteOptions};
pub use query::QueryGraph;
pub use router::{AStarRouter, DijkstraRouter, FloorChange, Route, Router};
pub use wayfinder::{Journey, Origin, Wayfinder, find_path, find_path_in};
