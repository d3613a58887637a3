//! Sequential phase orchestrator with timing.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use log::info;

use crate::config::{AnalysisConfig, AnalysisResult};
use crate::graph::articulation::ConnectorReport;
use crate::graph::contact_graph::ContactGraph;
use crate::output::build_result;
use crate::phases;
use crate::phases::discovery::DiscoveredMessages;
use crate::phases::parsing::ParseStats;

/// Phase labels for progress reporting.
const PHASE_LABELS: &[(&str, &str)] = &[
    ("discovery", "Scanning mail folders"),
    ("parsing", "Reading message headers"),
    ("connectors", "Finding connectors"),
];

/// Progress callback type: (phase_name, label).
pub type ProgressCallback = Box<dyn FnMut(&str, &str)>;

/// Everything the phases produce, threaded from one phase to the next.
#[derive(Debug, Default)]
pub struct PipelineState {
    pub messages: DiscoveredMessages,
    pub graph: ContactGraph,
    pub parse_stats: ParseStats,
    pub report: ConnectorReport,
}

/// The built graph plus the serialisable result.
#[derive(Debug)]
pub struct PipelineOutput {
    pub graph: ContactGraph,
    pub report: ConnectorReport,
    pub result: AnalysisResult,
}

/// Type alias for phase function closures to keep signatures readable.
type PhaseFn = Box<
    dyn FnOnce(&AnalysisConfig, &mut PipelineState) -> Result<(), Box<dyn std::error::Error>>,
>;

/// Execute the three-phase analysis pipeline and return the result.
pub fn run_pipeline(
    config: &AnalysisConfig,
    mut progress_callback: Option<ProgressCallback>,
) -> Result<PipelineOutput, Box<dyn std::error::Error>> {
    let root = Path::new(&config.mail_path);
    if !root.is_dir() {
        return Err(format!("mail folder not found: {}", root.display()).into());
    }

    let mut state = PipelineState::default();
    let mut timings: HashMap<String, f64> = HashMap::new();
    let total_start = Instant::now();

    let phase_fns: Vec<(&str, PhaseFn)> = vec![
        (
            "discovery",
            Box::new(|config: &AnalysisConfig, state: &mut PipelineState| {
                state.messages = phases::discovery::run_discovery_phase(config);
                Ok(())
            }),
        ),
        (
            "parsing",
            Box::new(|_config: &AnalysisConfig, state: &mut PipelineState| {
                state.parse_stats =
                    phases::parsing::run_parsing_phase(&state.messages.files, &mut state.graph);
                Ok(())
            }),
        ),
        (
            "connectors",
            Box::new(|_config: &AnalysisConfig, state: &mut PipelineState| {
                state.report = phases::connectors::run_connectors_phase(&state.graph);
                Ok(())
            }),
        ),
    ];

    for (name, phase_fn) in phase_fns {
        if let Some(ref mut cb) = progress_callback {
            let label = PHASE_LABELS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, l)| *l)
                .unwrap_or(name);
            cb(name, label);
        }

        let start = Instant::now();
        phase_fn(config, &mut state)?;
        timings.insert(name.to_string(), start.elapsed().as_secs_f64());
    }

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    info!(
        "analysed {} message files in {:.1}ms",
        state.parse_stats.files_read, total_ms
    );

    let result = build_result(config, &state, &timings, total_ms);
    Ok(PipelineOutput {
        graph: state.graph,
        report: state.report,
        result,
    })
}

/// Build the graph only, skipping connector analysis. Used by point queries.
pub fn build_graph(config: &AnalysisConfig) -> Result<ContactGraph, Box<dyn std::error::Error>> {
    let root = Path::new(&config.mail_path);
    if !root.is_dir() {
        return Err(format!("mail folder not found: {}", root.display()).into());
    }
    let messages = phases::discovery::run_discovery_phase(config);
    let mut graph = ContactGraph::new();
    phases::parsing::run_parsing_phase(&messages.files, &mut graph);
    Ok(graph)
}
