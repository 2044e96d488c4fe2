//! Routing trait, A* search, and the route value handed to renderers.
//!
//! # Pluggability
//!
//! [`Wayfinder`](crate::Wayfinder) calls routing through the [`Router`]
//! trait.  [`AStarRouter`] is the production engine; [`DijkstraRouter`] runs
//! the same search with the heuristic switched off and serves as a
//! reference when checking optimality.
//!
//! # Search states
//!
//! `Init` (open set = {start}) → `Expanding` (pop min f-score) →
//! `Found` (goal popped, walk `came_from` back) or `Exhausted` (open set
//! empty, `Ok(None)`).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use wf_core::{Floor, NodeId};
use wf_graph::Node;

use crate::cost::CostModel;
use crate::mode::RouteOptions;
use crate::query::QueryGraph;
use crate::{RouteError, RouteResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered, non-empty walk from start to goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Waypoints in walking order.  Starts with the anchor node when the
    /// route was requested from an anchor point.
    pub nodes:          Vec<Node>,
    /// Sum of edge costs under the requested mode.
    pub total_cost:     f32,
    /// Nodes expanded by the search.
    pub nodes_expanded: usize,
}

/// A point along a route where the rider changes floor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FloorChange {
    /// Index in [`Route::nodes`] of the first node on the new floor.
    pub index: usize,
    pub from:  Floor,
    pub to:    Floor,
}

impl Route {
    pub fn start(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn goal(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if start and goal are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Node ids in walking order.
    pub fn ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Walking distance ignoring weights and surcharges.
    pub fn planar_length(&self) -> f32 {
        self.nodes
            .windows(2)
            .map(|w| w[0].pos.distance(w[1].pos))
            .sum()
    }

    /// Floor transitions in walking order, for the renderer's floor-switch
    /// animation.
    pub fn floor_changes(&self) -> Vec<FloorChange> {
        self.nodes
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[0].floor != w[1].floor)
            .map(|(i, w)| FloorChange { index: i + 1, from: w[0].floor, to: w[1].floor })
            .collect()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve several
/// kiosks, or Rayon workers in a batch, at once.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// Returns `Ok(None)` when no eligible walk exists; errors only when
    /// `from` or `to` is not a node of `graph`.
    fn route(
        &self,
        graph:   &QueryGraph<'_>,
        from:    NodeId,
        to:      NodeId,
        options: RouteOptions,
    ) -> RouteResult<Option<Route>>;
}

// ── Routers ───────────────────────────────────────────────────────────────────

/// A* over the query graph with the floor-aware admissible heuristic.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AStarRouter {
    pub cost: CostModel,
}

impl AStarRouter {
    pub fn new(cost: CostModel) -> Self {
        Self { cost }
    }
}

impl Router for AStarRouter {
    fn route(
        &self,
        graph:   &QueryGraph<'_>,
        from:    NodeId,
        to:      NodeId,
        options: RouteOptions,
    ) -> RouteResult<Option<Route>> {
        search(graph, from, to, options, &self.cost, true)
    }
}

/// Uniform-cost search (A* with a zero heuristic).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DijkstraRouter {
    pub cost: CostModel,
}

impl DijkstraRouter {
    pub fn new(cost: CostModel) -> Self {
        Self { cost }
    }
}

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph:   &QueryGraph<'_>,
        from:    NodeId,
        to:      NodeId,
        options: RouteOptions,
    ) -> RouteResult<Option<Route>> {
        search(graph, from, to, options, &self.cost, false)
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// Open-set entry.  Ordered so `BinaryHeap` (a max-heap) pops the lowest
/// f-score first, and among equal f-scores the earliest pushed.
#[derive(Copy, Clone, Debug)]
struct OpenEntry {
    f:    f32,
    g:    f32,
    seq:  u64,
    node: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

fn search(
    graph:     &QueryGraph<'_>,
    from:      NodeId,
    to:        NodeId,
    options:   RouteOptions,
    cost:      &CostModel,
    heuristic: bool,
) -> RouteResult<Option<Route>> {
    for id in [from, to] {
        if !graph.contains(id) {
            return Err(RouteError::UnknownNode(id.to_string()));
        }
    }

    let goal = graph.node(to);
    let planar_scale = graph.planar_scale();
    let h = |n: &Node| {
        if heuristic { cost.heuristic_scaled(n, goal, planar_scale) } else { 0.0 }
    };

    let n = graph.node_count();
    // g_score[v] = best known cost from `from` to v.
    let mut g_score   = vec![f32::INFINITY; n];
    let mut came_from = vec![NodeId::INVALID; n];
    let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut seq = 0_u64;
    let mut expanded = 0_usize;

    g_score[from.index()] = 0.0;
    open.push(OpenEntry { f: h(graph.node(from)), g: 0.0, seq, node: from });

    while let Some(OpenEntry { g, node, .. }) = open.pop() {
        // Skip stale heap entries.
        if g > g_score[node.index()] {
            continue;
        }

        if node == to {
            let route = reconstruct(graph, &came_from, from, to, g, expanded);
            debug!(
                mode = %options.mode,
                from = %graph.node(from).id,
                to = %goal.id,
                cost = g,
                hops = route.len() - 1,
                expanded,
                "route found"
            );
            return Ok(Some(route));
        }

        expanded += 1;
        let current = graph.node(node);
        trace!(node = %current.id, g, "expand");

        for (conn, next) in graph.neighbors(node) {
            if !options.is_eligible(conn) {
                continue;
            }
            let next_node = graph.node(next);
            let tentative = g + cost.edge_cost(conn, current, next_node, options.mode);

            if tentative < g_score[next.index()] {
                g_score[next.index()] = tentative;
                came_from[next.index()] = node;
                seq += 1;
                open.push(OpenEntry { f: tentative + h(next_node), g: tentative, seq, node: next });
            }
        }
    }

    debug!(
        mode = %options.mode,
        from = %graph.node(from).id,
        to = %goal.id,
        expanded,
        "no route"
    );
    Ok(None)
}

fn reconstruct(
    graph:     &QueryGraph<'_>,
    came_from: &[NodeId],
    from:      NodeId,
    to:        NodeId,
    total:     f32,
    expanded:  usize,
) -> Route {
    let mut ids = vec![to];
    let mut cur = to;
    while cur != from {
        cur = came_from[cur.index()];
        ids.push(cur);
    }
    ids.reverse();

    Route {
        nodes:          ids.into_iter().map(|id| graph.node(id).clone()).collect(),
        total_cost:     total,
        nodes_expanded: expanded,
    }
}
