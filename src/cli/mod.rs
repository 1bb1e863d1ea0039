//! Command line interface for gh_release_sync.
//!
//! Wires one run together: parse and validate inputs, warn about file
//! patterns that match nothing, reconcile, then report step outputs.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::config::{self, RunContext};
use crate::error::{Result, SyncError};
use crate::files;
use crate::github::GitHubClient;
use crate::release::Reconciler;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate().map_err(|reason| SyncError::Config { reason })?;

    let out = OutputManager::new(args.quiet);

    let desired = args.desired_release();
    desired.validate()?;

    let (owner, repo) = config::parse_repository(&args.repository)?;
    let context = RunContext {
        owner,
        repo,
        sha: args.sha.trim().to_string(),
    };

    for pattern in files::unmatched_patterns(&desired.file_patterns) {
        out.warn(&format!("Pattern '{pattern}' does not match any files"));
    }

    let token = args.resolve_token()?;
    let client = GitHubClient::new(&token, &context.owner, &context.repo)?;

    let tag = desired.tag_name.clone();
    out.info(&format!(
        "Reconciling release for tag '{tag}' in {}/{}",
        context.owner, context.repo
    ));

    let reconciler = Reconciler::new(client, desired, context);
    let outcome = reconciler.reconcile().await?;

    for failure in &outcome.assets.failed {
        out.warn(&format!(
            "Asset '{}' failed to upload: {}",
            failure.name, failure.error
        ));
    }
    if !outcome.assets.uploaded.is_empty() {
        out.info(&format!("Attached {} asset(s):", outcome.assets.uploaded.len()));
        for asset in &outcome.assets.uploaded {
            out.indent(&format!("{} ({} bytes)", asset.name, asset.size));
        }
    }

    output::write_step_outputs(&outcome)?;

    out.success(&format!(
        "Release {} for tag '{tag}' is in sync: {}",
        outcome.release.id, outcome.release.html_url
    ));

    Ok(0)
}
