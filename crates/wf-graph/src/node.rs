//! Waypoints and the undirected connections between them.
//!
//! Both types carry the string ids authored in the mall editor.  They are
//! plain data; resolution to dense [`NodeId`](wf_core::NodeId)s happens in
//! [`MallGraphBuilder::build`](crate::MallGraphBuilder::build).

use std::str::FromStr;

use wf_core::{Floor, Point};

use crate::GraphError;

// ── NodeKind ──────────────────────────────────────────────────────────────────

/// What a waypoint physically is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeKind {
    #[default]
    Corridor,
    Elevator,
    Escalator,
    Atrium,
    Exit,
    Parking,
}

impl NodeKind {
    /// `true` for waypoints that move riders between floors.
    #[inline]
    pub fn is_vertical_transport(self) -> bool {
        matches!(self, NodeKind::Elevator | NodeKind::Escalator)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Corridor  => "corridor",
            NodeKind::Elevator  => "elevator",
            NodeKind::Escalator => "escalator",
            NodeKind::Atrium    => "atrium",
            NodeKind::Exit      => "exit",
            NodeKind::Parking   => "parking",
        }
    }
}

impl FromStr for NodeKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "corridor"  => Ok(NodeKind::Corridor),
            "elevator"  => Ok(NodeKind::Elevator),
            "escalator" => Ok(NodeKind::Escalator),
            "atrium"    => Ok(NodeKind::Atrium),
            "exit"      => Ok(NodeKind::Exit),
            "parking"   => Ok(NodeKind::Parking),
            other => Err(GraphError::Parse(format!("unknown node kind {other:?}"))),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// Display language of the kiosk UI.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Language {
    #[default]
    English,
    Arabic,
}

/// A routable waypoint on exactly one floor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id:       String,
    pub floor:    Floor,
    /// Floor-local position.
    pub pos:      Point,
    pub kind:     NodeKind,
    /// Signage label in English ("Grand Atrium").
    pub label_en: Option<String>,
    /// Signage label in Arabic.
    pub label_ar: Option<String>,
    /// Drawn with a landmark icon on the map.
    pub landmark: bool,
}

impl Node {
    pub fn new(id: impl Into<String>, floor: Floor, pos: Point, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            floor,
            pos,
            kind,
            label_en: None,
            label_ar: None,
            landmark: false,
        }
    }

    /// Shorthand for a corridor waypoint at `(x, y)`.
    pub fn corridor(id: impl Into<String>, floor: Floor, x: f32, y: f32) -> Self {
        Self::new(id, floor, Point::new(x, y), NodeKind::Corridor)
    }

    pub fn with_label(mut self, label_en: impl Into<String>) -> Self {
        self.label_en = Some(label_en.into());
        self
    }

    pub fn with_label_ar(mut self, label_ar: impl Into<String>) -> Self {
        self.label_ar = Some(label_ar.into());
        self
    }

    /// Label with `label_en` and flag as a landmark.
    pub fn with_landmark(self, label_en: impl Into<String>) -> Self {
        Self { landmark: true, ..self.with_label(label_en) }
    }

    #[inline]
    pub fn is_landmark(&self) -> bool {
        self.landmark
    }

    /// Signage label in `lang`, falling back to English.
    pub fn label(&self, lang: Language) -> Option<&str> {
        match lang {
            Language::Arabic => self.label_ar.as_deref().or(self.label_en.as_deref()),
            Language::English => self.label_en.as_deref(),
        }
    }
}

// ── Connection ────────────────────────────────────────────────────────────────

/// An undirected walkable link between two waypoints.
///
/// Traversal cost is never stored here; it depends on the active route mode
/// and is derived at query time from the endpoints' positions and floors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    pub from:            String,
    pub to:              String,
    /// `false` when step-free passage is impossible (stairs, escalators).
    pub accessible:      bool,
    /// Temporarily closed.  Never traversed by any mode.
    pub blocked:         bool,
    /// Staff-only.  Traversed only with an explicit override.
    pub restricted:      bool,
    /// Multiplier on the planar length (congestion, detour preference).
    pub distance_weight: Option<f32>,
}

impl Connection {
    /// An open, step-free connection with no weight override.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from:            from.into(),
            to:              to.into(),
            accessible:      true,
            blocked:         false,
            restricted:      false,
            distance_weight: None,
        }
    }

    /// A connection that requires climbing steps.
    pub fn stairs(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { accessible: false, ..Self::new(from, to) }
    }

    pub fn blocked(mut self) -> Self {
        self.blocked = true;
        self
    }

    pub fn restricted(mut self) -> Self {
        self.restricted = true;
        self
    }

    pub fn weighted(mut self, weight: f32) -> Self {
        self.distance_weight = Some(weight);
        self
    }

    /// Effective distance multiplier (1.0 when unset).
    #[inline]
    pub fn weight(&self) -> f32 {
        self.distance_weight.unwrap_or(1.0)
    }

    /// `true` if `id` is either endpoint.
    #[inline]
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}
