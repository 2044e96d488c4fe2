//! kiosk — wayfinding demo for a single directory kiosk.
//!
//! Loads a small slice of the mall (four floors, one escalator pair, one
//! elevator pair, a staff-only dock link) and prints the route from the
//! kiosk to a few destinations in every route mode.  It then closes the
//! escalator, publishes a new graph snapshot, and routes again.
//!
//! Usage: `kiosk [CONFIG.json]`.  Without an argument the bundled
//! `data/wayfinder.json` is used.  Set `RUST_LOG=wf_route=debug` to see the
//! search logs.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wf_graph::{GraphStore, Language, MallGraph, load_graph_reader};
use wf_route::{
    Journey, Kiosk, Origin, Route, RouteMode, RouteOptions, Wayfinder, WayfinderConfig,
};

// ── Bundled data ──────────────────────────────────────────────────────────────

const NODES_CSV:       &str = include_str!("../data/nodes.csv");
const CONNECTIONS_CSV: &str = include_str!("../data/connections.csv");
const DEFAULT_CONFIG:  &str = include_str!("../data/wayfinder.json");

const DESTINATIONS: [&str; 3] = ["L1-NODE-R1", "L2-NODE-CENTRAL", "GL-NODE-PARKING"];

const ESCALATOR: (&str, &str) = ("ML-NODE-ESC", "L1-NODE-ESC");

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => WayfinderConfig::load(Path::new(&path))
            .with_context(|| format!("loading config {path}"))?,
        None => WayfinderConfig::from_json_str(DEFAULT_CONFIG)?,
    };
    let kiosk = config.kiosk.clone().context("config does not name a kiosk")?;

    let t = Instant::now();
    let graph = load_graph_reader(Cursor::new(NODES_CSV), Cursor::new(CONNECTIONS_CSV))
        .context("loading bundled mall graph")?;
    info!(
        nodes = graph.node_count(),
        connections = graph.connection_count(),
        floors = graph.floors().len(),
        elapsed_ms = t.elapsed().as_millis() as u64,
        "graph loaded"
    );

    let store = GraphStore::new(graph);
    let wayfinder = Wayfinder::from_config(&config);

    println!("Kiosk {} ({}) on {}", kiosk.name, kiosk.id, kiosk.floor.name());
    print_routes(&wayfinder, &store.snapshot(), &kiosk)?;

    // Staff override opens the restricted dock link.
    let snapshot = store.snapshot();
    let to_dock = wayfinder.find_path(
        &snapshot,
        "ML-NODE-R3",
        "SL-NODE-DOCK",
        RouteOptions::new(RouteMode::Shortest).with_restricted_access(),
    )?;
    println!("\nStaff route ML-NODE-R3 -> SL-NODE-DOCK");
    print_outcome(RouteMode::Shortest, to_dock.as_ref());

    // Maintenance closes the escalator; readers of the old snapshot are unaffected.
    store.update(|b| {
        for conn in b.connections_mut() {
            if conn.touches(ESCALATOR.0) && conn.touches(ESCALATOR.1) {
                conn.blocked = true;
            }
        }
        Ok(())
    })?;
    info!(version = store.version(), "escalator closed");

    println!("\nAfter closing {} <-> {}", ESCALATOR.0, ESCALATOR.1);
    print_routes(&wayfinder, &store.snapshot(), &kiosk)?;

    // The same destinations as one batch.
    let journeys: Vec<Journey> = DESTINATIONS
        .iter()
        .map(|goal| Journey {
            origin:  Origin::Anchor(kiosk.anchor()),
            goal:    (*goal).to_owned(),
            options: config.default_mode.into(),
        })
        .collect();
    let t = Instant::now();
    let results = wayfinder.find_paths(&store.snapshot(), &journeys);
    let found = results.iter().filter(|r| matches!(r, Ok(Some(_)))).count();
    info!(
        journeys = journeys.len(),
        found,
        elapsed_us = t.elapsed().as_micros() as u64,
        "batch routed"
    );

    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_routes(wayfinder: &Wayfinder, graph: &MallGraph, kiosk: &Kiosk) -> Result<()> {
    for goal in DESTINATIONS {
        println!("\n-> {goal}");
        for mode in RouteMode::ALL {
            // The evacuation controller opens staff-only links explicitly.
            let options = match mode {
                RouteMode::Emergency => RouteOptions::new(mode).with_restricted_access(),
                _ => RouteOptions::new(mode),
            };
            let route = wayfinder.find_path_from_kiosk(graph, kiosk, goal, options)?;
            print_outcome(mode, route.as_ref());
        }
    }
    Ok(())
}

fn print_outcome(mode: RouteMode, route: Option<&Route>) {
    let Some(route) = route else {
        println!("  {:<10}  no route", mode.as_str());
        return;
    };
    let changes: Vec<String> = route
        .floor_changes()
        .iter()
        .map(|c| format!("{}->{}", c.from, c.to))
        .collect();
    let lifts = route.nodes.iter().filter(|n| n.kind.is_vertical_transport()).count();
    println!(
        "  {:<10}  cost {:>9.1}  walk {:>7.1}  floors [{}]  lift/escalator stops {}  {}",
        mode.as_str(),
        route.total_cost,
        route.planar_length(),
        changes.join(", "),
        lifts,
        route.ids().join(" > "),
    );

    // Landmarks along the way, for the bilingual signage strip.
    for node in route.nodes.iter().filter(|n| n.is_landmark()) {
        println!(
            "              via {} / {}",
            node.label(Language::English).unwrap_or(node.id.as_str()),
            node.label(Language::Arabic).unwrap_or(node.id.as_str()),
        );
    }
}
