//! Phase 2: Read message files, extract records, populate the ContactGraph.

use std::path::PathBuf;

use log::{debug, warn};

use crate::graph::contact_graph::ContactGraph;
use crate::phases::headers::parse_messages;

/// Counters from one parsing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub files_read: usize,
    pub files_skipped: usize,
    pub records: usize,
    /// `add_edge` calls that changed the graph.
    pub edges_added: usize,
}

/// Run the parsing phase: every record from every file goes into `graph`.
pub fn run_parsing_phase(files: &[PathBuf], graph: &mut ContactGraph) -> ParseStats {
    let mut stats = ParseStats::default();

    for path in files {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                stats.files_skipped += 1;
                continue;
            }
        };
        stats.files_read += 1;

        // Legacy corpora carry stray Latin-1 bytes; replace rather than fail.
        let text = String::from_utf8_lossy(&bytes);
        let records = parse_messages(&text);
        if records.is_empty() {
            debug!("no sender/recipient headers in {}", path.display());
        }

        for record in &records {
            stats.edges_added += graph.add_record(record);
        }
        stats.records += records.len();
    }

    stats
}
