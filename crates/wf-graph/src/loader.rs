//! CSV graph loader.
//!
//! # CSV format
//!
//! Two files: one row per waypoint, one row per connection.
//!
//! ```csv
//! id,floor,x,y,kind,label_en,label_ar,landmark
//! ML-NODE-ATRIUM,ML,1600,750,atrium,Grand Atrium,الردهة الكبرى,true
//! ML-NODE-R1,ML,2100,750,corridor,,,
//! L1-NODE-R1,L1,2100,750,escalator,,,
//! ```
//!
//! ```csv
//! from,to,accessible,blocked,restricted,distance_weight
//! ML-NODE-ATRIUM,ML-NODE-R1,true,false,false,
//! ML-NODE-R1,L1-NODE-R1,false,,,
//! ```
//!
//! `floor` is a floor code (`B`, `GL`, `SL`, `ML`, `L1`, `L2`).  In the
//! connections file `accessible` defaults to `true`, `blocked` and
//! `restricted` to `false`, and an empty `distance_weight` means 1.0.  In the
//! nodes file `label_en`, `label_ar` and `landmark` may be empty or omitted;
//! `landmark` defaults to `false`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use wf_core::{Floor, Point};

use crate::network::{MallGraph, MallGraphBuilder};
use crate::node::{Connection, Node, NodeKind};
use crate::{GraphError, GraphResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:       String,
    floor:    String,
    x:        f32,
    y:        f32,
    kind:     String,
    #[serde(default)]
    label_en: Option<String>,
    #[serde(default)]
    label_ar: Option<String>,
    #[serde(default)]
    landmark: Option<bool>,
}

#[derive(Deserialize)]
struct ConnectionRecord {
    from:            String,
    to:              String,
    #[serde(default)]
    accessible:      Option<bool>,
    #[serde(default)]
    blocked:         Option<bool>,
    #[serde(default)]
    restricted:      Option<bool>,
    #[serde(default)]
    distance_weight: Option<f32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`MallGraph`] from a nodes CSV and a connections CSV on disk.
pub fn load_graph_csv(nodes_path: &Path, connections_path: &Path) -> GraphResult<MallGraph> {
    let nodes = std::fs::File::open(nodes_path)?;
    let connections = std::fs::File::open(connections_path)?;
    load_graph_reader(nodes, connections)
}

/// Like [`load_graph_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or for data embedded in a
/// binary.
pub fn load_graph_reader<N: Read, C: Read>(nodes: N, connections: C) -> GraphResult<MallGraph> {
    let mut b = MallGraphBuilder::new();

    for node in read_nodes(nodes)? {
        b.add_node(node)?;
    }
    for conn in read_connections(connections)? {
        b.add_connection(conn);
    }

    debug!(
        nodes = b.node_count(),
        connections = b.connection_count(),
        "loaded mall graph from CSV"
    );
    b.build()
}

/// Parse waypoint rows without building a graph.
pub fn read_nodes<R: Read>(reader: R) -> GraphResult<Vec<Node>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<NodeRecord>()
        .enumerate()
        .map(|(row, result)| {
            let r = result.map_err(|e| GraphError::Parse(format!("nodes row {row}: {e}")))?;
            let floor: Floor = r
                .floor
                .parse()
                .map_err(|e| GraphError::Parse(format!("nodes row {row}: {e}")))?;
            let kind: NodeKind = r.kind.parse()?;
            Ok(Node {
                id: r.id,
                floor,
                pos: Point::new(r.x, r.y),
                kind,
                label_en: r.label_en.filter(|s| !s.is_empty()),
                label_ar: r.label_ar.filter(|s| !s.is_empty()),
                landmark: r.landmark.unwrap_or(false),
            })
        })
        .collect()
}

/// Parse connection rows without building a graph.
pub fn read_connections<R: Read>(reader: R) -> GraphResult<Vec<Connection>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<ConnectionRecord>()
        .enumerate()
        .map(|(row, result)| {
            let r = result.map_err(|e| GraphError::Parse(format!("connections row {row}: {e}")))?;
            Ok(Connection {
                from:            r.from,
                to:              r.to,
                accessible:      r.accessible.unwrap_or(true),
                blocked:         r.blocked.unwrap_or(false),
                restricted:      r.restricted.unwrap_or(false),
                distance_weight: r.distance_weight,
            })
        })
        .collect()
}
