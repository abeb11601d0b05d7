//! Resolve-and-download workflow for a single extension.
//!
//! Strictly sequential: marketplace query (unless the version is pinned),
//! version resolution, cache-path check, asset GET, file write. Every
//! failure along the way becomes a typed `DownloadOutcome`; nothing here
//! prints or panics in the normal path.

mod paths;

pub use paths::{vsix_file_path, DEFAULT_DESTINATION};

use crate::config::DownloadConfig;
use crate::http::{self, ok_status, TransferError, TransportOptions};
use crate::ident::ExtensionIdentifier;
use crate::marketplace::{self, Endpoints};
use crate::outcome::{DownloadOutcome, FailureKind};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::retry::{run_with_retry, RetryPolicy};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Query should fail fast; the asset transfer carries a binary payload.
const QUERY_TIMEOUT: Duration = Duration::from_secs(20);
const ASSET_TIMEOUT: Duration = Duration::from_secs(60);

/// Downloader bound to a set of gallery endpoints and a retry policy.
pub struct Downloader {
    endpoints: Endpoints,
    retry: RetryPolicy,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new(Endpoints::default(), RetryPolicy::disabled())
    }
}

impl Downloader {
    pub fn new(endpoints: Endpoints, retry: RetryPolicy) -> Self {
        Self { endpoints, retry }
    }

    /// Validates `raw` and runs the full workflow. Validation failure is
    /// itself an outcome, so batch callers can feed lines straight in.
    pub fn download(
        &self,
        raw: &str,
        cfg: &DownloadConfig,
        progress: &dyn ProgressSink,
    ) -> DownloadOutcome {
        match ExtensionIdentifier::parse(raw) {
            Ok(id) => self.run(&id, cfg, progress),
            Err(err) => DownloadOutcome::failure(
                raw.trim(),
                FailureKind::InvalidIdentifier,
                err.to_string(),
            ),
        }
    }

    /// Runs the workflow for an already-validated identifier.
    pub fn run(
        &self,
        id: &ExtensionIdentifier,
        cfg: &DownloadConfig,
        progress: &dyn ProgressSink,
    ) -> DownloadOutcome {
        let ext_id = id.full_id();
        progress.event(ProgressEvent::Starting {
            extension: &ext_id,
        });

        let transport = TransportOptions {
            proxy: cfg.proxy.as_deref(),
            ignore_ssl: cfg.ignore_ssl,
        };

        // When pinned, the query would contribute nothing, so skip it.
        let (version, pinned) = match &cfg.version {
            Some(v) => (v.clone(), true),
            None => match self.resolve_version(id, &ext_id, &transport, progress) {
                Ok(v) => (v, false),
                Err(outcome) => return *outcome,
            },
        };
        progress.event(ProgressEvent::VersionResolved {
            version: &version,
            pinned,
        });

        let destination = cfg
            .destination
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_DESTINATION));
        if let Err(err) = fs::create_dir_all(destination) {
            return DownloadOutcome::failure(
                &ext_id,
                FailureKind::DownloadFailed,
                format!(
                    "Failed to create destination directory {}: {}",
                    destination.display(),
                    err
                ),
            );
        }
        let file_path = vsix_file_path(destination, id, &version);

        // Presence of the file is the entire cache; no validation of its
        // contents.
        if !cfg.no_cache && file_path.exists() {
            tracing::debug!(path = %file_path.display(), "cache hit");
            progress.event(ProgressEvent::CacheHit { path: &file_path });
            return DownloadOutcome::success(
                &ext_id,
                id.publisher(),
                id.name(),
                &version,
                &file_path,
                true,
            );
        }

        let asset_url = match &cfg.target_platform {
            Some(platform) => self.endpoints.platform_asset_url(id, &version, platform),
            None => self.endpoints.cdn_asset_url(id, &version),
        };
        progress.event(ProgressEvent::Downloading { version: &version });
        tracing::debug!(url = %asset_url, "fetching asset");

        let response = run_with_retry(&self.retry, || {
            http::get(&asset_url, &transport, ASSET_TIMEOUT).and_then(ok_status)
        });
        match response {
            Ok(resp) => {
                if let Err(err) = fs::write(&file_path, &resp.body) {
                    return DownloadOutcome::failure(
                        &ext_id,
                        FailureKind::DownloadFailed,
                        format!("Failed to write {}: {}", file_path.display(), err),
                    );
                }
                tracing::debug!(path = %file_path.display(), bytes = resp.body.len(), "saved");
                progress.event(ProgressEvent::Saved { path: &file_path });
                DownloadOutcome::success(
                    &ext_id,
                    id.publisher(),
                    id.name(),
                    &version,
                    &file_path,
                    false,
                )
            }
            Err(TransferError::Curl(err)) => {
                DownloadOutcome::failure(&ext_id, FailureKind::NetworkError, err.to_string())
            }
            Err(TransferError::Http(status)) => DownloadOutcome::http_failure(
                &ext_id,
                FailureKind::DownloadFailed,
                status,
                format!(
                    "Failed to download {}.{}-{}.vsix",
                    id.publisher(),
                    id.name(),
                    version
                ),
            ),
        }
    }

    /// Queries the marketplace and walks the response for the newest
    /// version. Any failure is returned as the terminal outcome.
    fn resolve_version(
        &self,
        id: &ExtensionIdentifier,
        ext_id: &str,
        transport: &TransportOptions<'_>,
        progress: &dyn ProgressSink,
    ) -> Result<String, Box<DownloadOutcome>> {
        progress.event(ProgressEvent::Querying);
        let query_url = self.endpoints.query_url();
        let payload = marketplace::query_payload(id);
        tracing::debug!(url = %query_url, "querying marketplace");

        let response = run_with_retry(&self.retry, || {
            http::post_json(
                &query_url,
                &marketplace::query_headers(),
                payload.as_bytes(),
                transport,
                QUERY_TIMEOUT,
            )
            .and_then(ok_status)
        });
        let response = match response {
            Ok(resp) => resp,
            Err(TransferError::Curl(err)) => {
                return Err(Box::new(DownloadOutcome::failure(
                    ext_id,
                    FailureKind::NetworkError,
                    err.to_string(),
                )))
            }
            Err(TransferError::Http(status)) => {
                return Err(Box::new(DownloadOutcome::http_failure(
                    ext_id,
                    FailureKind::HttpError,
                    status,
                    "Failed to query Marketplace API",
                )))
            }
        };

        let parsed = match marketplace::parse_query_response(&response.body) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(error = %err, "unparseable query response");
                return Err(Box::new(DownloadOutcome::failure(
                    ext_id,
                    FailureKind::InvalidResponse,
                    "Failed to parse Marketplace API response",
                )));
            }
        };

        match marketplace::first_version(&parsed) {
            Some(version) => Ok(version.to_string()),
            None => Err(Box::new(DownloadOutcome::failure(
                ext_id,
                FailureKind::NotFound,
                format!("Extension not found: {ext_id}"),
            ))),
        }
    }
}
