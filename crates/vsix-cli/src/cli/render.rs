//! Human-readable progress rendering.
//!
//! The core reports phases through `ProgressSink`; this sink turns them
//! into the progress lines users see. Machine-readable output bypasses
//! this entirely.

use vsix_core::outcome::DownloadOutcome;
use vsix_core::progress::{ProgressEvent, ProgressSink};

pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn event(&self, event: ProgressEvent<'_>) {
        match event {
            ProgressEvent::Starting { extension } => {
                println!("{}", "=".repeat(50));
                println!("Downloading {extension}");
                println!("{}", "=".repeat(50));
            }
            ProgressEvent::Querying => {
                println!("Querying Marketplace API...");
            }
            ProgressEvent::VersionResolved { version, pinned } => {
                if pinned {
                    println!("Using pinned version {version}");
                }
            }
            ProgressEvent::CacheHit { path } => {
                println!("File {} already exists.", path.display());
                println!("Use --no-cache to force re-download.");
            }
            ProgressEvent::Downloading { version } => {
                println!("Downloading version {version}...");
            }
            ProgressEvent::Saved { path } => {
                println!("Successfully downloaded to: {}", path.display());
            }
        }
    }
}

/// Successes are already narrated by the progress sink; failures carry
/// their message in the outcome, so print those at the end.
pub fn report_failures(outcomes: &[DownloadOutcome]) {
    for outcome in outcomes {
        if let DownloadOutcome::Failure(f) = outcome {
            println!("{}", f.message);
        }
    }
}
