//! Anchor bridging: attach an off-graph point to the nearest waypoint.
//!
//! A kiosk stands somewhere on a floor, rarely on a waypoint.  Bridging
//! creates a synthetic anchor node at the kiosk's literal position and one
//! step-free connection from it to the nearest waypoint on the same floor.
//! Both live only inside the [`QueryGraph`](crate::QueryGraph) of a single
//! search; nothing is cached by coordinate, since kiosk calibration may move
//! the point between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use wf_core::{Floor, NodeId, Point};
use wf_graph::{Connection, MallGraph, Node, NodeKind};

use crate::{RouteError, RouteResult};

/// Id carried by every synthetic anchor node.
pub const ANCHOR_NODE_ID: &str = "@anchor";

/// Bridges longer than this (map units) are logged; they usually mean a
/// mis-calibrated kiosk or a floor missing waypoints.
pub const FAR_ANCHOR_DISTANCE: f32 = 1_000.0;

/// A physical position that is not a graph node.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub floor: Floor,
    pub pos:   Point,
}

impl AnchorPoint {
    pub fn new(x: f32, y: f32, floor: Floor) -> Self {
        Self { floor, pos: Point::new(x, y) }
    }
}

/// The synthetic node and connection produced by [`bridge_anchor`].
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorBridge {
    /// Synthetic node at the anchor's literal position.
    pub anchor:     Node,
    /// Nearest waypoint on the anchor's floor.
    pub target:     NodeId,
    /// Step-free connection `anchor -> target`.
    pub connection: Connection,
    /// Planar length of `connection`.
    pub length:     f32,
}

impl AnchorBridge {
    /// Label the anchor node (e.g. with the kiosk name) for rendering.
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.anchor.label_en = Some(label.into());
        self
    }
}

/// Attach `point` to the nearest waypoint on its floor.
///
/// Pure: the same point and graph always give the same bridge.  Fails with
/// [`RouteError::NoNodesOnFloor`] when the floor carries no waypoints.
pub fn bridge_anchor(graph: &MallGraph, point: AnchorPoint) -> RouteResult<AnchorBridge> {
    let target = graph
        .nearest_on_floor(point.floor, point.pos)
        .ok_or(RouteError::NoNodesOnFloor(point.floor))?;
    let target_node = graph.node(target);
    let length = point.pos.distance(target_node.pos);

    if length > FAR_ANCHOR_DISTANCE {
        warn!(
            floor = %point.floor,
            pos = %point.pos,
            target = %target_node.id,
            length,
            "anchor is far from the nearest waypoint"
        );
    } else {
        debug!(floor = %point.floor, pos = %point.pos, target = %target_node.id, length, "anchor bridged");
    }

    // The kiosk apron is assumed step-free.
    let connection = Connection::new(ANCHOR_NODE_ID, target_node.id.clone());

    Ok(AnchorBridge {
        anchor: Node::new(ANCHOR_NODE_ID, point.floor, point.pos, NodeKind::Corridor),
        target,
        connection,
        length,
    })
}

// ── Kiosk ─────────────────────────────────────────────────────────────────────

/// A kiosk device's calibrated home position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kiosk {
    pub id:    String,
    pub name:  String,
    pub floor: Floor,
    pub x:     f32,
    pub y:     f32,
}

impl Kiosk {
    pub fn anchor(&self) -> AnchorPoint {
        AnchorPoint::new(self.x, self.y, self.floor)
    }
}
