//! Connector listing and JSON report serialisation.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use chrono::Utc;

use crate::config::{AnalysisConfig, AnalysisResult};
use crate::pipeline::PipelineState;

/// Build the AnalysisResult from the finished pipeline state.
pub fn build_result(
    config: &AnalysisConfig,
    state: &PipelineState,
    timings: &HashMap<String, f64>,
    total_ms: f64,
) -> AnalysisResult {
    let mail_path = Path::new(&config.mail_path)
        .canonicalize()
        .unwrap_or_else(|_| Path::new(&config.mail_path).to_path_buf());

    let mut metadata = HashMap::new();
    metadata.insert(
        "mail_path".to_string(),
        serde_json::Value::String(mail_path.to_string_lossy().to_string()),
    );
    metadata.insert(
        "analysed_at".to_string(),
        serde_json::Value::String(Utc::now().to_rfc3339()),
    );
    metadata.insert(
        "mailweb_version".to_string(),
        serde_json::Value::String(env!("CARGO_PKG_VERSION").to_string()),
    );
    metadata.insert(
        "analysis_duration_ms".to_string(),
        serde_json::json!(((total_ms * 10.0).round() / 10.0)),
    );
    metadata.insert(
        "phase_timings".to_string(),
        serde_json::to_value(timings).unwrap_or_default(),
    );

    let parse = &state.parse_stats;
    let mut stats = HashMap::new();
    stats.insert("files".to_string(), serde_json::json!(parse.files_read));
    stats.insert(
        "skipped_files".to_string(),
        serde_json::json!(state.messages.skipped + parse.files_skipped),
    );
    stats.insert("messages".to_string(), serde_json::json!(parse.records));
    stats.insert(
        "identities".to_string(),
        serde_json::json!(state.graph.identity_count()),
    );
    stats.insert("edges".to_string(), serde_json::json!(state.graph.edge_count()));
    stats.insert(
        "components".to_string(),
        serde_json::json!(state.report.components),
    );
    stats.insert(
        "tree_edges".to_string(),
        serde_json::json!(state.report.tree_edges),
    );
    stats.insert(
        "connectors".to_string(),
        serde_json::json!(state.report.connectors.len()),
    );

    AnalysisResult {
        metadata,
        stats,
        connectors: state.report.connectors.iter().cloned().collect(),
        ..Default::default()
    }
}

/// Write the analysis result to a JSON file.
pub fn write_output(result: &AnalysisResult, output_path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(result).map_err(std::io::Error::other)?;
    std::fs::write(output_path, json)
}

/// Write connectors one per line, no header.
pub fn write_connectors<'a, I>(connectors: I, output_path: &str) -> std::io::Result<()>
where
    I: IntoIterator<Item = &'a String>,
{
    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = std::io::BufWriter::new(std::fs::File::create(output_path)?);
    for id in connectors {
        writeln!(out, "{id}")?;
    }
    out.flush()
}
