//! Progress reporting seam between the core and any presentation layer.
//!
//! The downloader never prints; it announces phase transitions through
//! this trait and the caller decides whether and how to render them.

use std::path::Path;

/// Phase transitions of a single resolve-and-download run.
#[derive(Debug, Clone, Copy)]
pub enum ProgressEvent<'a> {
    /// Identifier validated, work is starting.
    Starting { extension: &'a str },
    /// Issuing the marketplace query.
    Querying,
    /// Version chosen (resolved from the query or caller-pinned).
    VersionResolved { version: &'a str, pinned: bool },
    /// File already present at the cache path; no download needed.
    CacheHit { path: &'a Path },
    /// Issuing the asset download.
    Downloading { version: &'a str },
    /// Package written to disk.
    Saved { path: &'a Path },
}

/// Receiver for progress events.
pub trait ProgressSink {
    fn event(&self, event: ProgressEvent<'_>);
}

/// Sink that discards all events (quiet and machine-readable modes).
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn event(&self, _event: ProgressEvent<'_>) {}
}
