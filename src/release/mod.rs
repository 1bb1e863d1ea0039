//! Release reconciliation: converge remote release state to the desired
//! state.
//!
//! One reconciliation is a short ordered plan (lookup, release mutation, tag
//! placement) followed by a single concurrent batch (asset uploads). The
//! sequential steps feed each other's decisions; only the upload fan-out runs
//! unordered.

pub mod assets;
pub mod tag;

pub use assets::{AssetFailure, SyncReport};
pub use tag::TagResolver;

use crate::config::{DesiredRelease, RunContext};
use crate::error::{ApiError, Result, SyncError};
use crate::github::{NewRelease, ReleaseHost, ReleaseUpdate, RemoteRelease};

/// Final state of a reconciliation run
#[derive(Debug)]
pub struct ReconcileOutcome {
    /// The release record after convergence
    pub release: RemoteRelease,
    /// What happened to the attached assets
    pub assets: SyncReport,
}

/// Drives the remote release for one tag toward the desired configuration.
///
/// All remote state is re-derived on every run; repeated invocations with the
/// same configuration converge to the same release.
pub struct Reconciler<H> {
    host: H,
    desired: DesiredRelease,
    context: RunContext,
}

impl<H: ReleaseHost> Reconciler<H> {
    /// Create a reconciler over `host` for one run's configuration
    pub fn new(host: H, desired: DesiredRelease, context: RunContext) -> Self {
        Self {
            host,
            desired,
            context,
        }
    }

    /// Converge remote state to the desired release and return the result
    pub async fn reconcile(&self) -> Result<ReconcileOutcome> {
        match self.lookup().await? {
            Some(existing) if self.desired.recreate => {
                log::info!(
                    "recreating release {} for tag '{}'",
                    existing.id,
                    self.desired.tag_name
                );
                self.recreate(existing).await
            }
            Some(existing) => {
                log::info!(
                    "updating release {} for tag '{}'",
                    existing.id,
                    self.desired.tag_name
                );
                self.update(existing).await
            }
            None => {
                log::info!(
                    "no release found for tag '{}', creating one",
                    self.desired.tag_name
                );
                self.create(self.desired.draft).await
            }
        }
    }

    /// Find the existing release for the tag, if any.
    ///
    /// Direct lookup first; a miss falls back to scanning the release list,
    /// because some backends lag exposing freshly pushed tags through the
    /// by-tag endpoint.
    async fn lookup(&self) -> Result<Option<RemoteRelease>> {
        match self.host.get_release_by_tag(&self.desired.tag_name).await {
            Ok(release) => return Ok(Some(release)),
            Err(ApiError::NotFound) => {
                log::debug!(
                    "no release found by tag '{}', scanning release list",
                    self.desired.tag_name
                );
            }
            Err(err) => return Err(self.fatal("get-release-by-tag", err)),
        }

        let releases = self
            .host
            .list_releases()
            .await
            .map_err(|e| self.fatal("list-releases", e))?;

        Ok(releases
            .into_iter()
            .find(|release| release.tag_name == self.desired.tag_name))
    }

    async fn create(&self, draft: bool) -> Result<ReconcileOutcome> {
        let payload = NewRelease {
            tag_name: self.desired.tag_name.clone(),
            name: self.desired.tag_name.clone(),
            target_commitish: self.desired.target_commitish.clone(),
            draft,
            prerelease: self.desired.prerelease,
            generate_release_notes: true,
        };

        let release = self
            .host
            .create_release(&payload)
            .await
            .map_err(|e| self.fatal("create-release", e))?;

        let assets =
            assets::synchronize(&self.host, &release, &self.desired.file_patterns, false).await?;

        Ok(ReconcileOutcome { release, assets })
    }

    /// Delete the release and its tag, then build a fresh draft in its place.
    ///
    /// Not atomic: a failure after deletion leaves the release absent, and
    /// that is surfaced rather than silently retried.
    async fn recreate(&self, existing: RemoteRelease) -> Result<ReconcileOutcome> {
        self.host
            .delete_release(existing.id)
            .await
            .map_err(|e| self.fatal("delete-release", e))?;

        // recreate always clears the tag ref, even without move-tag
        match self.host.delete_ref(&self.desired.tag_name).await {
            Ok(()) | Err(ApiError::NotFound) => {}
            Err(err) => return Err(self.fatal("delete-ref", err)),
        }

        // the replacement starts over as a draft
        self.create(true).await
    }

    async fn update(&self, existing: RemoteRelease) -> Result<ReconcileOutcome> {
        if self.desired.move_tag {
            let resolver = TagResolver::new(&self.host, &self.desired.tag_name);
            // an unpublished draft with no tag yet should not force-create one
            let allow_create = !(resolver.get_ref().await.is_none() && existing.draft);
            let moved = resolver.reconcile_ref(&self.context.sha, allow_create).await;
            log::debug!("tag '{}' moved: {moved}", self.desired.tag_name);
        }

        // preserve the current commitish unless the caller asked to change it
        let target_commitish = self
            .desired
            .target_commitish
            .clone()
            .unwrap_or_else(|| existing.target_commitish.clone());

        let payload = ReleaseUpdate {
            tag_name: self.desired.tag_name.clone(),
            target_commitish,
            draft: self.desired.draft,
            prerelease: self.desired.prerelease,
        };

        let release = self
            .host
            .update_release(existing.id, &payload)
            .await
            .map_err(|e| self.fatal("update-release", e))?;

        let assets = assets::synchronize(
            &self.host,
            &release,
            &self.desired.file_patterns,
            self.desired.keep_assets,
        )
        .await?;

        Ok(ReconcileOutcome { release, assets })
    }

    fn fatal(&self, operation: &'static str, source: ApiError) -> SyncError {
        SyncError::Reconciliation {
            operation,
            tag: self.desired.tag_name.clone(),
            source,
        }
    }
}
