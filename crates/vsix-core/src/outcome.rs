//! Typed result records for every download attempt.
//!
//! Every failure reachable from a single identifier's resolution is
//! represented as a `DownloadOutcome`, never as an error bubbling out of
//! the downloader. The serialized form matches the tool's JSON output
//! contract (`ok`, `extension`, `error`, `status_code`, ...).

use serde::Serialize;
use std::path::{Path, PathBuf};

/// What went wrong, when an attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Raw string lacks a valid `publisher.extension` split.
    #[serde(rename = "invalid_extension")]
    InvalidIdentifier,
    /// Transport-level failure (DNS, connection refused, timeout) on either call.
    #[serde(rename = "network")]
    NetworkError,
    /// Marketplace query returned a non-200 status.
    HttpError,
    /// Marketplace query returned 200 but the body was not valid JSON.
    #[serde(rename = "invalid_json")]
    InvalidResponse,
    /// Query succeeded but no version could be located in the response.
    NotFound,
    /// Asset download returned a non-200 status.
    DownloadFailed,
}

/// A completed download (or cache hit).
#[derive(Debug, Clone, Serialize)]
pub struct SuccessOutcome {
    pub ok: bool,
    pub extension: String,
    pub publisher: String,
    pub name: String,
    pub version: String,
    pub file_path: PathBuf,
    pub cached: bool,
}

/// A failed attempt, with the error kind and a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct FailureOutcome {
    pub ok: bool,
    pub extension: String,
    pub error: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u32>,
    pub message: String,
}

/// Result record produced for every attempt, success or failure.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DownloadOutcome {
    Success(SuccessOutcome),
    Failure(FailureOutcome),
}

impl DownloadOutcome {
    pub fn success(
        extension: &str,
        publisher: &str,
        name: &str,
        version: &str,
        file_path: &Path,
        cached: bool,
    ) -> Self {
        DownloadOutcome::Success(SuccessOutcome {
            ok: true,
            extension: extension.to_string(),
            publisher: publisher.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            file_path: file_path.to_path_buf(),
            cached,
        })
    }

    pub fn failure(extension: &str, error: FailureKind, message: impl Into<String>) -> Self {
        DownloadOutcome::Failure(FailureOutcome {
            ok: false,
            extension: extension.to_string(),
            error,
            status_code: None,
            message: message.into(),
        })
    }

    /// Failure carrying the HTTP status code of the offending response.
    pub fn http_failure(
        extension: &str,
        error: FailureKind,
        status_code: u32,
        message: impl Into<String>,
    ) -> Self {
        DownloadOutcome::Failure(FailureOutcome {
            ok: false,
            extension: extension.to_string(),
            error,
            status_code: Some(status_code),
            message: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Success(_))
    }

    pub fn extension(&self) -> &str {
        match self {
            DownloadOutcome::Success(s) => &s.extension,
            DownloadOutcome::Failure(f) => &f.extension,
        }
    }
}
