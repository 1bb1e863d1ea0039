//! Asset set synchronization between local files and a remote release.

use futures::future::join_all;

use crate::error::{ApiError, Result, SyncError};
use crate::files::{self, LocalAsset};
use crate::github::{ReleaseHost, RemoteRelease, UploadedAsset, upload_endpoint};

/// A per-asset upload failure, isolated from its siblings
#[derive(Debug)]
pub struct AssetFailure {
    /// Name of the asset that failed
    pub name: String,
    /// What went wrong
    pub error: ApiError,
}

/// Outcome of one synchronization pass
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Assets now attached to the release, in input order
    pub uploaded: Vec<UploadedAsset>,
    /// Assets whose upload failed; does not fail the run
    pub failed: Vec<AssetFailure>,
    /// Patterns from the input that matched no files
    pub unmatched: Vec<String>,
}

/// Converge the release's attached assets to the files matched by `patterns`.
///
/// Pre-existing assets are deleted first (sequentially) unless `keep_assets`
/// is set; an asset that is already gone is skipped, any other deletion
/// failure aborts the pass. Uploads are then issued concurrently, one task
/// per asset, and the whole batch is awaited; each failure is captured
/// per-asset without cancelling its siblings.
pub async fn synchronize<H: ReleaseHost>(
    host: &H,
    release: &RemoteRelease,
    patterns: &[String],
    keep_assets: bool,
) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    if !keep_assets {
        for asset in &release.assets {
            match host.delete_asset(asset.id).await {
                Ok(()) => log::debug!("deleted stale asset '{}'", asset.name),
                Err(ApiError::NotFound) => {
                    log::debug!("stale asset '{}' already gone", asset.name);
                }
                Err(source) => {
                    return Err(SyncError::Reconciliation {
                        operation: "delete-release-asset",
                        tag: release.tag_name.clone(),
                        source,
                    });
                }
            }
        }
    }

    if patterns.is_empty() {
        return Ok(report);
    }

    report.unmatched = files::unmatched_patterns(patterns);

    let paths = files::resolve_patterns(patterns)?;
    if paths.is_empty() {
        // a release with no assets is valid
        log::warn!("file patterns matched no files, nothing to upload");
        return Ok(report);
    }

    let mut assets = Vec::with_capacity(paths.len());
    for path in &paths {
        assets.push(LocalAsset::from_path(path)?);
    }

    let endpoint = upload_endpoint(&release.upload_url);
    let uploads = assets.iter().map(|asset| async move {
        let outcome = host.upload_asset(endpoint, asset).await;
        (asset.name.clone(), outcome)
    });

    for (name, outcome) in join_all(uploads).await {
        match outcome {
            Ok(uploaded) => report.uploaded.push(uploaded),
            Err(error) => {
                log::warn!("upload of '{name}' failed: {error}");
                report.failed.push(AssetFailure { name, error });
            }
        }
    }

    Ok(report)
}
