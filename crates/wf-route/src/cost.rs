//! Edge cost and goal-distance heuristic.
//!
//! # Cost units
//!
//! Costs are floor-plan distance units (`f32`).  Base cost is the planar
//! length of a connection times its `distance_weight`; surcharges are added
//! for changing floors and, in step-free modes, for touching an escalator.
//!
//! # Admissibility
//!
//! The heuristic charges `floor_penalty` per level between a node and the
//! goal, and the edge cost charges the same `floor_penalty` per level a
//! connection crosses, so the floor term never overestimates.  The planar
//! term is scaled by the graph's smallest distance weight (see
//! [`MallGraph::min_distance_weight`](wf_graph::MallGraph::min_distance_weight)).

use serde::{Deserialize, Serialize};

use wf_core::Floor;
use wf_graph::{Connection, Node, NodeKind};

use crate::mode::RouteMode;
use crate::{RouteError, RouteResult};

/// Default surcharge per floor crossed.
pub const DEFAULT_FLOOR_PENALTY: f32 = 8_000.0;

/// Default surcharge for an escalator hop in step-free modes.
pub const DEFAULT_ESCALATOR_PENALTY: f32 = 50_000.0;

/// Tunable cost constants.
///
/// Both penalties must be finite and non-negative; [`validate`](Self::validate)
/// is applied whenever a model is loaded from configuration.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Added once per level a connection crosses.  Large enough that a route
    /// only changes floors when that shortens it materially.
    pub floor_penalty:     f32,
    /// Added to any connection incident to an escalator waypoint under
    /// `accessible` / `stroller`.  Prohibitive but finite.
    pub escalator_penalty: f32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            floor_penalty:     DEFAULT_FLOOR_PENALTY,
            escalator_penalty: DEFAULT_ESCALATOR_PENALTY,
        }
    }
}

impl CostModel {
    pub fn new(floor_penalty: f32, escalator_penalty: f32) -> RouteResult<Self> {
        let model = Self { floor_penalty, escalator_penalty };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> RouteResult<()> {
        for (name, value) in [
            ("floor_penalty", self.floor_penalty),
            ("escalator_penalty", self.escalator_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RouteError::Config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Surcharge for moving between `a` and `b`.
    #[inline]
    pub fn floor_surcharge(&self, a: Floor, b: Floor) -> f32 {
        self.floor_penalty * a.levels_between(b) as f32
    }

    /// Cost of traversing `conn` between `from` and `to` under `mode`.
    ///
    /// Symmetric in `from`/`to` and never negative.
    pub fn edge_cost(&self, conn: &Connection, from: &Node, to: &Node, mode: RouteMode) -> f32 {
        let mut cost = from.pos.distance(to.pos) * conn.weight();
        cost += self.floor_surcharge(from.floor, to.floor);
        if mode.avoids_escalators()
            && (from.kind == NodeKind::Escalator || to.kind == NodeKind::Escalator)
        {
            cost += self.escalator_penalty;
        }
        cost.max(0.0)
    }

    /// Lower bound on the cost from `node` to `goal`.
    #[inline]
    pub fn heuristic(&self, node: &Node, goal: &Node) -> f32 {
        self.heuristic_scaled(node, goal, 1.0)
    }

    /// [`heuristic`](Self::heuristic) with the planar term multiplied by
    /// `planar_scale` (the smallest distance weight in the graph, ≤ 1).
    #[inline]
    pub fn heuristic_scaled(&self, node: &Node, goal: &Node, planar_scale: f32) -> f32 {
        node.pos.distance(goal.pos) * planar_scale + self.floor_surcharge(node.floor, goal.floor)
    }
}
