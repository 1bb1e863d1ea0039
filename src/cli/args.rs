//! Command line argument parsing and validation.
//!
//! Every input doubles as a GitHub Actions input through its `INPUT_*`
//! environment fallback, so the binary runs unchanged as an action step or
//! from a shell.

use clap::{ArgAction, Parser};

use crate::config::{self, DesiredRelease};
use crate::error::{Result, SyncError};

/// Idempotently sync a GitHub release for a tag
#[derive(Parser, Debug)]
#[command(
    name = "gh_release_sync",
    version,
    about = "Idempotently sync a GitHub release for a tag",
    long_about = "Reconcile a GitHub release with the desired tag, flags, and assets.

Repeated runs for the same tag converge: the release is created when absent,
updated in place, or fully recreated with --recreate true. Asset files are
matched by glob patterns and attached concurrently."
)]
pub struct Args {
    /// Tag the release is keyed by
    #[arg(long, env = "INPUT_TAG_NAME", value_name = "TAG")]
    pub tag_name: String,

    /// Commit the release should point at; service default branch when omitted
    #[arg(long, env = "INPUT_TARGET_COMMITISH", value_name = "COMMITISH")]
    pub target_commitish: Option<String>,

    /// API token; falls back to GH_TOKEN, then GITHUB_TOKEN
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Newline- or comma-separated glob patterns of files to attach
    #[arg(long, env = "INPUT_FILES", value_name = "PATTERNS")]
    pub files: Option<String>,

    /// Create (or update to) a draft release
    #[arg(long, env = "INPUT_DRAFT", action = ArgAction::Set, default_value_t = false, value_name = "BOOL")]
    pub draft: bool,

    /// Mark the release as a prerelease
    #[arg(long, env = "INPUT_PRERELEASE", action = ArgAction::Set, default_value_t = false, value_name = "BOOL")]
    pub prerelease: bool,

    /// Delete and rebuild the release (and its tag) instead of updating it
    #[arg(long, env = "INPUT_RECREATE", action = ArgAction::Set, default_value_t = false, value_name = "BOOL")]
    pub recreate: bool,

    /// Repoint the tag at the run's commit
    #[arg(long, env = "INPUT_MOVE_TAG", action = ArgAction::Set, default_value_t = false, value_name = "BOOL")]
    pub move_tag: bool,

    /// Leave previously attached assets in place
    #[arg(long, env = "INPUT_KEEP_ASSETS", action = ArgAction::Set, default_value_t = false, value_name = "BOOL")]
    pub keep_assets: bool,

    /// Repository coordinates
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/REPO")]
    pub repository: String,

    /// Commit SHA that triggered the run, used as the tag target
    #[arg(long, env = "GITHUB_SHA", value_name = "SHA")]
    pub sha: String,

    /// Suppress non-error terminal output
    #[arg(long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.tag_name.trim().is_empty() {
            return Err("tag-name is required".to_string());
        }
        if self.sha.trim().is_empty() {
            return Err("sha is required".to_string());
        }

        Ok(())
    }

    /// Build the desired release state for this run
    pub fn desired_release(&self) -> DesiredRelease {
        DesiredRelease {
            tag_name: self.tag_name.trim().to_string(),
            target_commitish: self.target_commitish.clone().filter(|c| !c.is_empty()),
            draft: self.draft,
            prerelease: self.prerelease,
            recreate: self.recreate,
            move_tag: self.move_tag,
            keep_assets: self.keep_assets,
            file_patterns: self
                .files
                .as_deref()
                .map(config::parse_file_patterns)
                .unwrap_or_default(),
        }
    }

    /// Resolve the API token from the input or the conventional variables
    pub fn resolve_token(&self) -> Result<String> {
        self.token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var("GH_TOKEN").ok())
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .ok_or_else(|| SyncError::Config {
                reason: "No API token provided. Set GH_TOKEN or GITHUB_TOKEN, or pass --token"
                    .to_string(),
            })
    }
}
