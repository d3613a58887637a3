//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use petgraph::algo::connected_components;

use mailweb_core::config::AnalysisConfig;
use mailweb_core::graph::contact_graph::ContactGraph;
use mailweb_core::phases::discovery::DiscoveredMessages;
use mailweb_core::phases::parsing::ParseStats;

// ---------------------------------------------------------------------------
// Fixture path resolution
// ---------------------------------------------------------------------------

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

pub fn fixture_config(name: &str) -> AnalysisConfig {
    AnalysisConfig {
        mail_path: fixture_path(name).to_string_lossy().to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Phase runners
// ---------------------------------------------------------------------------

pub struct PhaseResult {
    pub messages: DiscoveredMessages,
    pub graph: ContactGraph,
    pub stats: ParseStats,
    pub config: AnalysisConfig,
}

/// Run Phase 1 (discovery) on a fixture directory.
pub fn run_discovery(fixture_name: &str) -> PhaseResult {
    let config = fixture_config(fixture_name);
    let messages = mailweb_core::phases::discovery::run_discovery_phase(&config);
    PhaseResult {
        messages,
        graph: ContactGraph::new(),
        stats: ParseStats::default(),
        config,
    }
}

/// Run Phases 1-2 (discovery + parsing) on a fixture directory.
pub fn run_two_phases(fixture_name: &str) -> PhaseResult {
    let mut r = run_discovery(fixture_name);
    r.stats = mailweb_core::phases::parsing::run_parsing_phase(&r.messages.files, &mut r.graph);
    r
}

// ---------------------------------------------------------------------------
// Graph builders
// ---------------------------------------------------------------------------

pub fn graph_of(edges: &[(&str, &str)]) -> ContactGraph {
    let mut g = ContactGraph::new();
    for (a, b) in edges {
        g.add_edge(a, b);
    }
    g
}

pub fn id_set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

/// Deterministic pseudo-random graph: `nodes` identities, ~`edges` attempts.
pub fn generated_graph(seed: u64, nodes: u64, edges: usize) -> ContactGraph {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) % nodes
    };

    let mut g = ContactGraph::new();
    for _ in 0..edges {
        let a = next();
        let b = next();
        g.add_edge(&format!("n{a}@x.com"), &format!("n{b}@x.com"));
    }
    g
}

// ---------------------------------------------------------------------------
// Oracle
// ---------------------------------------------------------------------------

/// Cut vertices by definition: removing the node raises the component count.
pub fn brute_force_connectors(graph: &ContactGraph) -> BTreeSet<String> {
    let g = graph.graph();
    let before = connected_components(g);

    g.node_indices()
        .filter(|&v| {
            let reduced = g.filter_map(|i, _| (i != v).then_some(()), |_, _| Some(()));
            connected_components(&reduced) > before
        })
        .map(|v| g[v].clone())
        .collect()
}
