//! Batch runner: one identifier per line, processed sequentially.

use crate::config::DownloadConfig;
use crate::downloader::Downloader;
use crate::outcome::DownloadOutcome;
use crate::progress::ProgressSink;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Processes every non-blank line of `list_path` through the downloader,
/// in file order, collecting every outcome (failures included).
///
/// A missing or unreadable list file is a hard error, not a per-item
/// outcome: nothing could be processed at all.
pub fn run_batch(
    list_path: &Path,
    downloader: &Downloader,
    cfg: &DownloadConfig,
    progress: &dyn ProgressSink,
) -> Result<Vec<DownloadOutcome>> {
    let data = fs::read_to_string(list_path)
        .with_context(|| format!("File not found: {}", list_path.display()))?;

    let mut outcomes = Vec::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        outcomes.push(downloader.download(line, cfg, progress));
    }
    Ok(outcomes)
}
