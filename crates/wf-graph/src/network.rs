//! Waypoint graph representation and builder.
//!
//! # Data layout
//!
//! Connections are undirected, so every connection appears in the adjacency
//! rows of **both** endpoints.  Rows are stored in **Compressed Sparse Row
//! (CSR)** format: given a `NodeId n`, its incident half-edges occupy
//!
//! ```text
//! adj_conn[ adj_start[n] .. adj_start[n+1] ]   // which connection
//! adj_to  [ adj_start[n] .. adj_start[n+1] ]   // the node at the other end
//! ```
//!
//! Iterating a node's neighbours is a contiguous scan, and the authored
//! [`Connection`] stays stored once, indexed by `ConnectionId`.
//!
//! # Spatial index
//!
//! One R-tree (via `rstar`) per floor maps a floor-local `(x, y)` to the
//! nearest `NodeId` on that floor.  Used to attach kiosk positions to the
//! graph at query time.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use wf_core::{ConnectionId, Floor, NodeId, Point};

use crate::node::{Connection, Node};
use crate::{GraphError, GraphResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in a per-floor R-tree: the node's `[x, y]` and its `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── MallGraph ─────────────────────────────────────────────────────────────────

/// Immutable waypoint graph for one mall snapshot.
///
/// A `MallGraph` is never mutated after [`MallGraphBuilder::build`]; edits
/// produce a new graph which the host swaps in atomically (see
/// [`GraphStore`](crate::GraphStore)).  Any number of searches may read it
/// concurrently.
pub struct MallGraph {
    nodes:       Vec<Node>,
    index:       FxHashMap<String, NodeId>,
    connections: Vec<Connection>,
    /// Resolved `(from, to)` endpoints of each connection.
    conn_ends:   Vec<(NodeId, NodeId)>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Length = `node_count + 1`.
    adj_start:   Vec<u32>,
    adj_conn:    Vec<ConnectionId>,
    adj_to:      Vec<NodeId>,

    // ── Spatial index ─────────────────────────────────────────────────────
    floor_idx:   FxHashMap<Floor, RTree<NodeEntry>>,

    min_distance_weight: f32,
}

impl MallGraph {
    /// A graph with no nodes or connections.
    pub fn empty() -> Self {
        Self::build_unchecked(Vec::new(), FxHashMap::default(), Vec::new(), Vec::new(), 1.0)
    }

    /// Build a graph from authored node and connection lists.
    ///
    /// Shorthand for feeding a [`MallGraphBuilder`] and calling `build()`.
    pub fn from_parts(nodes: Vec<Node>, connections: Vec<Connection>) -> GraphResult<Self> {
        let mut b = MallGraphBuilder::with_capacity(nodes.len(), connections.len());
        for node in nodes {
            b.add_node(node)?;
        }
        for conn in connections {
            b.add_connection(conn);
        }
        b.build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Resolve an authored string id to its dense `NodeId`.
    #[inline]
    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Node data.  Panics if `node` is out of range.
    #[inline]
    pub fn node(&self, node: NodeId) -> &Node {
        &self.nodes[node.index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn connection(&self, conn: ConnectionId) -> &Connection {
        &self.connections[conn.index()]
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Resolved endpoints of `conn` in authored `(from, to)` order.
    #[inline]
    pub fn connection_ends(&self, conn: ConnectionId) -> (NodeId, NodeId) {
        self.conn_ends[conn.index()]
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over `(connection, neighbour)` pairs incident to `node`.
    ///
    /// Both directions of every connection are reported, so this is the
    /// full undirected neighbourhood.  No heap allocation.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (ConnectionId, NodeId)> + '_ {
        let start = self.adj_start[node.index()] as usize;
        let end   = self.adj_start[node.index() + 1] as usize;
        self.adj_conn[start..end]
            .iter()
            .copied()
            .zip(self.adj_to[start..end].iter().copied())
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        let start = self.adj_start[node.index()] as usize;
        let end   = self.adj_start[node.index() + 1] as usize;
        end - start
    }

    /// Smallest distance multiplier on any connection, capped at 1.0.
    ///
    /// A connection weighted below 1.0 is cheaper than its geometry, so a
    /// planar-distance heuristic must be scaled by this factor to stay
    /// admissible.
    #[inline]
    pub fn min_distance_weight(&self) -> f32 {
        self.min_distance_weight
    }

    // ── Floors & spatial queries ──────────────────────────────────────────

    /// Floors that carry at least one node, lowest first.
    pub fn floors(&self) -> Vec<Floor> {
        let mut floors: Vec<Floor> = self.floor_idx.keys().copied().collect();
        floors.sort_unstable();
        floors
    }

    /// Number of nodes on `floor`.
    pub fn floor_node_count(&self, floor: Floor) -> usize {
        self.floor_idx.get(&floor).map_or(0, |tree| tree.size())
    }

    /// Ids of the nodes on `floor`, in insertion order.
    pub fn nodes_on_floor(&self, floor: Floor) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.floor == floor)
            .map(|(i, _)| NodeId(i as u32))
    }

    /// The node on `floor` nearest to `pos` by planar distance.
    ///
    /// Returns `None` only if `floor` has no nodes.
    pub fn nearest_on_floor(&self, floor: Floor, pos: Point) -> Option<NodeId> {
        self.floor_idx
            .get(&floor)?
            .nearest_neighbor(&pos.to_array())
            .map(|e| e.id)
    }

    /// Up to `k` nodes on `floor` nearest to `pos`, ascending by distance.
    pub fn k_nearest_on_floor(&self, floor: Floor, pos: Point, k: usize) -> Vec<NodeId> {
        self.floor_idx.get(&floor).map_or_else(Vec::new, |tree| {
            tree.nearest_neighbor_iter(&pos.to_array())
                .take(k)
                .map(|e| e.id)
                .collect()
        })
    }

    // ── Editing ───────────────────────────────────────────────────────────

    /// Copy this graph's authored data into a fresh builder.
    ///
    /// Edits never touch a published graph: callers modify the builder,
    /// build a new graph, and swap it into their [`GraphStore`](crate::GraphStore).
    pub fn to_builder(&self) -> MallGraphBuilder {
        MallGraphBuilder {
            nodes:       self.nodes.clone(),
            index:       self.index.clone(),
            connections: self.connections.clone(),
        }
    }

    fn build_unchecked(
        nodes:       Vec<Node>,
        index:       FxHashMap<String, NodeId>,
        connections: Vec<Connection>,
        conn_ends:   Vec<(NodeId, NodeId)>,
        min_distance_weight: f32,
    ) -> Self {
        let node_count = nodes.len();

        // Count half-edges per node.  A self-loop occupies one slot only.
        let mut adj_start = vec![0u32; node_count + 1];
        for &(a, b) in &conn_ends {
            adj_start[a.index() + 1] += 1;
            if a != b {
                adj_start[b.index() + 1] += 1;
            }
        }
        for i in 1..=node_count {
            adj_start[i] += adj_start[i - 1];
        }

        let half_edges = adj_start[node_count] as usize;
        let mut adj_conn = vec![ConnectionId::INVALID; half_edges];
        let mut adj_to   = vec![NodeId::INVALID; half_edges];
        let mut cursor: Vec<u32> = adj_start[..node_count].to_vec();

        let mut place = |at: NodeId, conn: ConnectionId, to: NodeId| {
            let slot = cursor[at.index()] as usize;
            adj_conn[slot] = conn;
            adj_to[slot] = to;
            cursor[at.index()] += 1;
        };
        for (i, &(a, b)) in conn_ends.iter().enumerate() {
            let conn = ConnectionId(i as u32);
            place(a, conn, b);
            if a != b {
                place(b, conn, a);
            }
        }

        // Bulk-load one R-tree per floor.
        let mut per_floor: FxHashMap<Floor, Vec<NodeEntry>> = FxHashMap::default();
        for (i, node) in nodes.iter().enumerate() {
            per_floor.entry(node.floor).or_default().push(NodeEntry {
                point: node.pos.to_array(),
                id:    NodeId(i as u32),
            });
        }
        let floor_idx = per_floor
            .into_iter()
            .map(|(floor, entries)| (floor, RTree::bulk_load(entries)))
            .collect();

        MallGraph {
            nodes,
            index,
            connections,
            conn_ends,
            adj_start,
            adj_conn,
            adj_to,
            floor_idx,
            min_distance_weight,
        }
    }
}

impl std::fmt::Debug for MallGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MallGraph")
            .field("nodes", &self.nodes.len())
            .field("connections", &self.connections.len())
            .field("floors", &self.floors())
            .finish()
    }
}

// ── MallGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`MallGraph`] incrementally, then call [`build`](Self::build).
///
/// Nodes and connections may be added in any order; connection endpoints are
/// resolved only at `build()`, where a missing endpoint is reported as
/// [`GraphError::DanglingReference`].
///
/// # Example
///
/// ```
/// use wf_core::Floor;
/// use wf_graph::{Connection, MallGraphBuilder, Node};
///
/// let mut b = MallGraphBuilder::new();
/// b.add_node(Node::corridor("A", Floor::Main, 0.0, 0.0)).unwrap();
/// b.add_node(Node::corridor("B", Floor::Main, 100.0, 0.0)).unwrap();
/// b.add_connection(Connection::new("A", "B"));
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.connection_count(), 1);
/// ```
#[derive(Default)]
pub struct MallGraphBuilder {
    nodes:       Vec<Node>,
    index:       FxHashMap<String, NodeId>,
    connections: Vec<Connection>,
}

impl MallGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, connections: usize) -> Self {
        Self {
            nodes:       Vec::with_capacity(nodes),
            index:       FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            connections: Vec::with_capacity(connections),
        }
    }

    /// Add a waypoint and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, node: Node) -> GraphResult<NodeId> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        let id = NodeId(self.nodes.len() as u32);
        self.index.insert(node.id.clone(), id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Add an undirected connection.  Endpoints are checked at `build()`.
    pub fn add_connection(&mut self, conn: Connection) {
        self.connections.push(conn);
    }

    /// Mutable access to the authored connections, for editor-side changes
    /// such as closing a corridor.
    pub fn connections_mut(&mut self) -> &mut [Connection] {
        &mut self.connections
    }

    /// Drop every connection for which `keep` returns `false`.
    pub fn retain_connections(&mut self, keep: impl FnMut(&Connection) -> bool) {
        self.connections.retain(keep);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn connection_count(&self) -> usize { self.connections.len() }

    /// Consume the builder and produce a [`MallGraph`].
    ///
    /// Time complexity: O(N + E) for the CSR arrays plus O(N log N) for the
    /// per-floor R-tree bulk loads.
    pub fn build(self) -> GraphResult<MallGraph> {
        let mut conn_ends = Vec::with_capacity(self.connections.len());
        let mut min_weight = 1.0_f32;

        for (i, conn) in self.connections.iter().enumerate() {
            let resolve = |id: &str| {
                self.index.get(id).copied().ok_or_else(|| GraphError::DanglingReference {
                    connection: i,
                    from:       conn.from.clone(),
                    to:         conn.to.clone(),
                    missing:    id.to_owned(),
                })
            };
            let a = resolve(&conn.from)?;
            let b = resolve(&conn.to)?;

            let weight = conn.weight();
            if !weight.is_finite() || weight < 0.0 {
                return Err(GraphError::InvalidWeight { connection: i, weight });
            }
            min_weight = min_weight.min(weight);
            conn_ends.push((a, b));
        }

        Ok(MallGraph::build_unchecked(
            self.nodes,
            self.index,
            self.connections,
            conn_ends,
            min_weight,
        ))
    }
}
