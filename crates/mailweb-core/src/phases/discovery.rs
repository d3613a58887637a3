//! Phase 1: Walk the mail tree and collect message files.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::AnalysisConfig;

/// Names never descended into.
const DEFAULT_EXCLUDES: &[&str] = &[".git", ".DS_Store", "Thumbs.db", "desktop.ini"];

/// Message files found under the mail root.
#[derive(Debug, Default)]
pub struct DiscoveredMessages {
    /// Files in path order.
    pub files: Vec<PathBuf>,
    /// Entries that could not be read or exceeded the size limit.
    pub skipped: usize,
}

/// Run the discovery phase over `config.mail_path`.
pub fn run_discovery_phase(config: &AnalysisConfig) -> DiscoveredMessages {
    let root = Path::new(&config.mail_path);
    let mut found = DiscoveredMessages::default();

    let exclude_patterns: Vec<&str> = DEFAULT_EXCLUDES
        .iter()
        .copied()
        .chain(config.exclude_patterns.iter().map(|s| s.as_str()))
        .collect();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            if exclude_patterns.iter().any(|p| name == *p) {
                return false;
            }
            // Skip hidden directories, except the root itself
            !(e.depth() > 0 && e.file_type().is_dir() && name.starts_with('.'))
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                found.skipped += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if size > config.max_file_size {
            debug!(
                "skipping {} ({size} bytes > {})",
                entry.path().display(),
                config.max_file_size
            );
            found.skipped += 1;
            continue;
        }

        found.files.push(entry.into_path());
    }

    debug!(
        "discovered {} message files under {}",
        found.files.len(),
        root.display()
    );
    found
}
