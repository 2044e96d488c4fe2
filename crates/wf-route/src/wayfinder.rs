//! Entry points used by the kiosk host.
//!
//! [`Wayfinder`] resolves authored string ids, bridges anchor points, and
//! delegates to a [`Router`].  Every call builds its own [`QueryGraph`], so
//! concurrent calls against one `MallGraph` snapshot never share state.

use wf_core::NodeId;
use wf_graph::{Connection, MallGraph, Node};

use crate::bridge::{AnchorPoint, Kiosk, bridge_anchor};
use crate::config::WayfinderConfig;
use crate::cost::CostModel;
use crate::mode::{RouteMode, RouteOptions};
use crate::query::QueryGraph;
use crate::router::{AStarRouter, Route, Router};
use crate::{RouteError, RouteResult};

/// Where a journey starts.
#[derive(Clone, Debug, PartialEq)]
pub enum Origin {
    /// An authored waypoint id.
    Node(String),
    /// An off-graph point, bridged to its floor's nearest waypoint.
    Anchor(AnchorPoint),
}

/// One independent routing request for [`Wayfinder::find_paths`].
#[derive(Clone, Debug, PartialEq)]
pub struct Journey {
    pub origin:  Origin,
    pub goal:    String,
    pub options: RouteOptions,
}

/// Routing facade over a [`Router`].
#[derive(Clone, Debug, Default)]
pub struct Wayfinder<R: Router = AStarRouter> {
    router: R,
}

impl Wayfinder<AStarRouter> {
    pub fn new(cost: CostModel) -> Self {
        Self { router: AStarRouter::new(cost) }
    }

    pub fn from_config(config: &WayfinderConfig) -> Self {
        Self::new(config.cost)
    }
}

impl<R: Router> Wayfinder<R> {
    pub fn with_router(router: R) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Route between two authored waypoints.
    pub fn find_path(
        &self,
        graph:   &MallGraph,
        start:   &str,
        goal:    &str,
        options: impl Into<RouteOptions>,
    ) -> RouteResult<Option<Route>> {
        let query = QueryGraph::new(graph);
        let from = resolve(&query, start)?;
        let to = resolve(&query, goal)?;
        self.router.route(&query, from, to, options.into())
    }

    /// Route from an off-graph point.  The returned route starts with the
    /// synthetic anchor node, so the rendered walk begins at the literal
    /// position.
    pub fn find_path_from_anchor(
        &self,
        graph:   &MallGraph,
        point:   AnchorPoint,
        goal:    &str,
        options: impl Into<RouteOptions>,
    ) -> RouteResult<Option<Route>> {
        let mut query = QueryGraph::new(graph);
        let to = resolve(&query, goal)?;
        let from = query.attach(bridge_anchor(graph, point)?);
        self.router.route(&query, from, to, options.into())
    }

    /// Route from a kiosk's calibrated position; the anchor node carries the
    /// kiosk name as its label.
    pub fn find_path_from_kiosk(
        &self,
        graph:   &MallGraph,
        kiosk:   &Kiosk,
        goal:    &str,
        options: impl Into<RouteOptions>,
    ) -> RouteResult<Option<Route>> {
        let mut query = QueryGraph::new(graph);
        let to = resolve(&query, goal)?;
        let bridge = bridge_anchor(graph, kiosk.anchor())?.labelled(kiosk.name.clone());
        let from = query.attach(bridge);
        self.router.route(&query, from, to, options.into())
    }

    /// Route many independent journeys against one snapshot.
    ///
    /// Results are in input order.  With the `parallel` feature journeys are
    /// spread over Rayon's thread pool.
    pub fn find_paths(&self, graph: &MallGraph, journeys: &[Journey]) -> Vec<RouteResult<Option<Route>>> {
        #[cfg(not(feature = "parallel"))]
        {
            journeys.iter().map(|j| self.route_journey(graph, j)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            journeys.par_iter().map(|j| self.route_journey(graph, j)).collect()
        }
    }

    fn route_journey(&self, graph: &MallGraph, journey: &Journey) -> RouteResult<Option<Route>> {
        match &journey.origin {
            Origin::Node(start) => self.find_path(graph, start, &journey.goal, journey.options),
            Origin::Anchor(point) => {
                self.find_path_from_anchor(graph, *point, &journey.goal, journey.options)
            }
        }
    }
}

fn resolve(graph: &QueryGraph<'_>, id: &str) -> RouteResult<NodeId> {
    graph.lookup(id).ok_or_else(|| RouteError::UnknownNode(id.to_owned()))
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Route between two authored waypoints with the default cost model.
///
/// `Ok(None)` means no eligible walk exists under `mode`.
pub fn find_path(
    graph:            &MallGraph,
    start:            &str,
    goal:             &str,
    mode:             RouteMode,
    allow_restricted: bool,
) -> RouteResult<Option<Route>> {
    let options = RouteOptions { mode, allow_restricted };
    Wayfinder::<AStarRouter>::default().find_path(graph, start, goal, options)
}

/// Like [`find_path`] over raw node and connection lists.
///
/// The graph is built first, so malformed data surfaces as
/// [`RouteError::Graph`] before any search runs.
pub fn find_path_in(
    nodes:            &[Node],
    connections:      &[Connection],
    start:            &str,
    goal:             &str,
    mode:             RouteMode,
    allow_restricted: bool,
) -> RouteResult<Option<Route>> {
    let graph = MallGraph::from_parts(nodes.to_vec(), connections.to_vec())?;
    find_path(&graph, start, goal, mode, allow_restricted)
}
