//! GitHub integration: the release-hosting trait and its REST client.

mod client;
mod throttle;
mod types;

pub use client::GitHubClient;
pub use throttle::{RetryDecision, RetryPolicy, RetrySignal};
pub use types::{
    GitRef, NewRelease, RefObject, ReleaseUpdate, RemoteAsset, RemoteRelease, UploadedAsset,
    upload_endpoint,
};

use crate::error::ApiError;
use crate::files::LocalAsset;
use async_trait::async_trait;

/// Operations the reconciliation engine needs from the release-hosting
/// service.
///
/// Implementations are stateless wrappers around the remote API; all
/// reconciliation decisions live above this seam. Methods return
/// [`ApiError::NotFound`] for absent resources so callers can branch on
/// absence without shape-sniffing responses.
#[async_trait]
pub trait ReleaseHost: Send + Sync {
    /// Fetch the release keyed by `tag`
    async fn get_release_by_tag(&self, tag: &str) -> Result<RemoteRelease, ApiError>;

    /// List the repository's releases
    async fn list_releases(&self) -> Result<Vec<RemoteRelease>, ApiError>;

    /// Create a release
    async fn create_release(&self, new: &NewRelease) -> Result<RemoteRelease, ApiError>;

    /// Update an existing release record
    async fn update_release(
        &self,
        release_id: u64,
        update: &ReleaseUpdate,
    ) -> Result<RemoteRelease, ApiError>;

    /// Delete a release record
    async fn delete_release(&self, release_id: u64) -> Result<(), ApiError>;

    /// Delete one attached asset
    async fn delete_asset(&self, asset_id: u64) -> Result<(), ApiError>;

    /// Upload an asset to a release's upload endpoint
    async fn upload_asset(
        &self,
        endpoint: &str,
        asset: &LocalAsset,
    ) -> Result<UploadedAsset, ApiError>;

    /// Look up the ref a tag name points at
    async fn get_tag_ref(&self, tag: &str) -> Result<GitRef, ApiError>;

    /// Create a tag ref pointing at `sha`
    async fn create_ref(&self, tag: &str, sha: &str) -> Result<(), ApiError>;

    /// Delete a tag ref
    async fn delete_ref(&self, tag: &str) -> Result<(), ApiError>;
}
