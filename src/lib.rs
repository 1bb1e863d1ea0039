//! # gh_release_sync
//!
//! Idempotent GitHub release reconciliation for CI pipelines.
//!
//! Given a desired release description (tag, target commit, draft/prerelease
//! flags, attached files), this crate converges the remote release state to
//! match it: the release is created when absent, updated in place, or fully
//! recreated, the tag ref is moved safely, and the attached asset set is
//! diffed and synchronized with concurrent uploads.
//!
//! ## Features
//!
//! - **Idempotent**: repeated runs for the same tag converge to one release
//! - **Safe tag movement**: delete-then-create, with an unpublished-draft guard
//! - **Asset diffing**: stale assets removed, desired files uploaded in parallel
//! - **Partial-failure isolation**: one bad upload never cancels its siblings
//! - **Typed service errors**: branching on "not found" without shape-sniffing
//!
//! ## Usage
//!
//! ```bash
//! gh_release_sync --tag-name v1.2.3 --files 'dist/*.zip' --move-tag true
//! ```
//!
//! As a GitHub Actions step every flag is read from the conventional
//! `INPUT_*` environment variables instead.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod config;
pub mod error;
pub mod files;
pub mod github;
pub mod release;

// Re-export main types for public API
pub use cli::Args;
pub use config::{DesiredRelease, RunContext};
pub use error::{ApiError, Result, SyncError};
pub use files::LocalAsset;
pub use github::{GitHubClient, ReleaseHost};
pub use release::{ReconcileOutcome, Reconciler, SyncReport};
