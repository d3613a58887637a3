//! Phase 3: Connector detection over the finished graph.

use log::info;

use crate::graph::articulation::{ArticulationAnalyzer, ConnectorReport};
use crate::graph::contact_graph::ContactGraph;

/// Run the connectors phase. The graph is only borrowed; it is frozen from here on.
pub fn run_connectors_phase(graph: &ContactGraph) -> ConnectorReport {
    let report = ArticulationAnalyzer::new(graph).run();
    info!(
        "{} connectors across {} components ({} identities, {} edges)",
        report.connectors.len(),
        report.components,
        graph.identity_count(),
        graph.edge_count()
    );
    report
}
