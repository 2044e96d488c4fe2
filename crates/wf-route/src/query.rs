//! Per-query view of a graph plus its ephemeral anchor bridges.
//!
//! `QueryGraph` borrows a published [`MallGraph`] and layers synthetic
//! anchor nodes on top of it.  Anchor `NodeId`s continue the base graph's
//! dense range (`base.node_count()..`), so the search indexes one flat
//! score array.  The base graph is never written, which is what lets any
//! number of queries in different modes share it.

use wf_core::NodeId;
use wf_graph::{Connection, MallGraph, Node};

use crate::bridge::AnchorBridge;

struct Bridge {
    anchor:     NodeId,
    target:     NodeId,
    connection: Connection,
}

/// A borrowed graph augmented with this query's bridging edges.
pub struct QueryGraph<'g> {
    base:    &'g MallGraph,
    anchors: Vec<Node>,
    bridges: Vec<Bridge>,
}

impl<'g> QueryGraph<'g> {
    pub fn new(base: &'g MallGraph) -> Self {
        Self { base, anchors: Vec::new(), bridges: Vec::new() }
    }

    pub fn base(&self) -> &'g MallGraph {
        self.base
    }

    /// Add `bridge`'s anchor node and connection; returns the anchor's id.
    pub fn attach(&mut self, bridge: AnchorBridge) -> NodeId {
        let anchor = NodeId((self.base.node_count() + self.anchors.len()) as u32);
        self.anchors.push(bridge.anchor);
        self.bridges.push(Bridge {
            anchor,
            target:     bridge.target,
            connection: bridge.connection,
        });
        anchor
    }

    pub fn node_count(&self) -> usize {
        self.base.node_count() + self.anchors.len()
    }

    pub fn bridge_count(&self) -> usize {
        self.bridges.len()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// `true` if `node` was added by [`attach`](Self::attach).
    #[inline]
    pub fn is_anchor(&self, node: NodeId) -> bool {
        node.index() >= self.base.node_count() && self.contains(node)
    }

    /// Node data.  Panics if `node` is out of range.
    #[inline]
    pub fn node(&self, node: NodeId) -> &Node {
        let base_count = self.base.node_count();
        if node.index() < base_count {
            self.base.node(node)
        } else {
            &self.anchors[node.index() - base_count]
        }
    }

    /// Resolve an authored id against the base graph.  Anchors are addressed
    /// only by the `NodeId` returned from `attach`.
    #[inline]
    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.base.lookup(id)
    }

    /// Scale for the planar heuristic term.  Bridges are unweighted, so the
    /// base graph's bound already covers them.
    #[inline]
    pub fn planar_scale(&self) -> f32 {
        self.base.min_distance_weight()
    }

    /// `(connection, neighbour)` pairs incident to `node`, including bridges.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (&Connection, NodeId)> + '_ {
        let base: &MallGraph = self.base;
        let fixed = base
            .contains(node)
            .then(|| base.neighbors(node))
            .into_iter()
            .flatten()
            .map(move |(conn, to)| (base.connection(conn), to));

        let bridged = self.bridges.iter().filter_map(move |b| {
            if b.anchor == node {
                Some((&b.connection, b.target))
            } else if b.target == node {
                Some((&b.connection, b.anchor))
            } else {
                None
            }
        });

        fixed.chain(bridged)
    }
}
