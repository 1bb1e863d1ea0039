//! Error types for release synchronization operations.
//!
//! Two layers: [`ApiError`] is what the release-hosting transport produces,
//! tagged by kind so callers can branch on "not found" without inspecting
//! response shapes; [`SyncError`] is the run-level taxonomy reported at the
//! process boundary.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for release synchronization operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Main error type for all release synchronization operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// Invalid run configuration
    #[error("Configuration error: {reason}")]
    Config {
        /// Reason for the error
        reason: String,
    },

    /// A release-record mutation failed; fatal for the run
    #[error("Reconciliation failed during {operation} for tag '{tag}': {source}")]
    Reconciliation {
        /// API operation that failed
        operation: &'static str,
        /// Tag the run was reconciling
        tag: String,
        /// Originating service error
        #[source]
        source: ApiError,
    },

    /// A local asset file could not be read
    #[error("Failed to read asset file {path}: {source}")]
    AssetFile {
        /// Path of the unreadable file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Invalid glob pattern in the files input
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Typed failure produced by the release-hosting transport.
///
/// The kinds mirror the signals the reconciliation logic branches on:
/// `NotFound` is an expected branch condition, the rate-limit kinds feed the
/// retry policy, and everything else propagates as-is.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource does not exist; absorbed by callers where absence is expected
    #[error("resource not found")]
    NotFound,

    /// Primary rate limit hit; carries the server-suggested delay
    #[error("rate limited, retry suggested after {retry_after:?}")]
    RateLimited {
        /// How long the service asked us to wait
        retry_after: Duration,
    },

    /// Secondary rate limit (abuse detection); never retried
    #[error("abuse detection triggered")]
    AbuseDetected,

    /// Any other non-success response from the service
    #[error("service returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message body from the service, when present
        message: String,
    },

    /// The upload endpoint advertised by the service could not be parsed
    #[error("malformed endpoint URL: {reason}")]
    Endpoint {
        /// Why the URL was rejected
        reason: String,
    },

    /// Connection-level failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Whether this is the expected "does not exist" branch condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

impl SyncError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            SyncError::Config { .. } => vec![
                "Check the tag-name, repository, and sha inputs".to_string(),
                "Set GH_TOKEN or GITHUB_TOKEN, or pass --token".to_string(),
            ],
            SyncError::Reconciliation {
                source: ApiError::Status { status: 401, .. },
                ..
            } => vec!["Verify the token is valid and has repo scope".to_string()],
            SyncError::Reconciliation {
                source: ApiError::RateLimited { retry_after },
                ..
            } => vec![format!(
                "Rate limit retries were exhausted; wait {} seconds and re-run",
                retry_after.as_secs()
            )],
            SyncError::AssetFile { path, .. } => vec![
                format!("Ensure {} exists and is readable", path.display()),
                "Check the files patterns against the workspace layout".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
