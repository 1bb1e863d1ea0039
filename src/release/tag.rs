//! Tag reference reconciliation.

use crate::error::ApiError;
use crate::github::{GitRef, ReleaseHost};

/// Reconciles the remote ref for one tag name.
///
/// Tag placement is best-effort relative to the release record itself: every
/// failure here is logged and reported as "not moved", never propagated.
pub struct TagResolver<'a, H> {
    host: &'a H,
    tag: &'a str,
}

impl<'a, H: ReleaseHost> TagResolver<'a, H> {
    /// Create a resolver for `tag`
    pub fn new(host: &'a H, tag: &'a str) -> Self {
        Self { host, tag }
    }

    /// Current remote ref for the tag, or `None` if it was never created.
    ///
    /// "Reference not found" is the expected first-time-tag case; any other
    /// lookup failure is logged and likewise treated as absent.
    pub async fn get_ref(&self) -> Option<GitRef> {
        match self.host.get_tag_ref(self.tag).await {
            Ok(git_ref) => Some(git_ref),
            Err(ApiError::NotFound) => None,
            Err(err) => {
                log::warn!("tag ref lookup for '{}' failed: {err}", self.tag);
                None
            }
        }
    }

    /// Point the tag at `target_sha`, creating or moving the ref as needed.
    ///
    /// Returns whether the ref was placed. The ref-update primitive does not
    /// support non-fast-forward moves, so a move is a delete followed by a
    /// create. `allow_create` suppresses creation when the ref is absent; an
    /// unpublished draft should not force-create a tag ahead of publication.
    pub async fn reconcile_ref(&self, target_sha: &str, allow_create: bool) -> bool {
        match self.get_ref().await {
            Some(current) if current.object.sha == target_sha => {
                log::debug!("tag '{}' already points at {target_sha}", self.tag);
                return false;
            }
            Some(current) => {
                log::debug!(
                    "moving tag '{}' from {} to {target_sha}",
                    self.tag,
                    current.object.sha
                );
                match self.host.delete_ref(self.tag).await {
                    Ok(()) | Err(ApiError::NotFound) => {}
                    Err(err) => {
                        log::warn!("tag placement: failed to delete ref '{}': {err}", self.tag);
                        return false;
                    }
                }
            }
            None if !allow_create => {
                log::debug!("tag '{}' absent and creation suppressed", self.tag);
                return false;
            }
            None => {}
        }

        match self.host.create_ref(self.tag, target_sha).await {
            Ok(()) => {
                log::debug!("tag '{}' placed on {target_sha}", self.tag);
                true
            }
            Err(err) => {
                log::warn!("tag placement: failed to create ref '{}': {err}", self.tag);
                false
            }
        }
    }
}
