//! Run configuration assembled once at the process boundary.
//!
//! Every component receives these structs by reference; nothing below the CLI
//! layer reads the environment directly.

use crate::error::{Result, SyncError};

/// Desired release state supplied by the caller, immutable for one run
#[derive(Debug, Clone)]
pub struct DesiredRelease {
    /// Tag the release is keyed by
    pub tag_name: String,
    /// Commit the release should point at; service default branch when unset
    pub target_commitish: Option<String>,
    /// Whether the release should be a draft
    pub draft: bool,
    /// Whether the release should be marked as a prerelease
    pub prerelease: bool,
    /// Delete and rebuild the release instead of updating it
    pub recreate: bool,
    /// Repoint the tag ref at the run's commit
    pub move_tag: bool,
    /// Leave previously attached assets in place
    pub keep_assets: bool,
    /// Glob patterns of files to attach, in input order
    pub file_patterns: Vec<String>,
}

impl DesiredRelease {
    /// Validate the invariants the reconciler relies on
    pub fn validate(&self) -> Result<()> {
        if self.tag_name.trim().is_empty() {
            return Err(SyncError::Config {
                reason: "tag-name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Repository coordinates and triggering commit, immutable for the run
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Commit SHA that triggered the run, used as the tag target
    pub sha: String,
}

/// Parse `owner/repo` coordinates into an owner/repo tuple
pub fn parse_repository(coords: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = coords.split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(SyncError::Config {
            reason: format!(
                "Invalid repository coordinates: '{}'. Expected: owner/repo",
                coords
            ),
        });
    }

    Ok((parts[0].to_string(), parts[1].to_string()))
}

/// Split a raw `files` input into individual glob patterns.
///
/// Action inputs arrive as one multiline string; patterns are separated by
/// newlines or commas, surrounding whitespace is dropped, empty entries are
/// skipped.
pub fn parse_file_patterns(raw: &str) -> Vec<String> {
    raw.lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|pat| !pat.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_split_on_newlines_and_commas() {
        let raw = "dist/*.zip, dist/*.tar.gz\nchecksums.txt\n\n  notes.md  ";
        assert_eq!(
            parse_file_patterns(raw),
            vec!["dist/*.zip", "dist/*.tar.gz", "checksums.txt", "notes.md"]
        );
    }

    #[test]
    fn empty_input_yields_no_patterns() {
        assert!(parse_file_patterns("").is_empty());
        assert!(parse_file_patterns(" , \n ,").is_empty());
    }

    #[test]
    fn repository_coordinates_round_trip() {
        let (owner, repo) = parse_repository("octo/widgets").expect("valid coords");
        assert_eq!(owner, "octo");
        assert_eq!(repo, "widgets");
    }

    #[test]
    fn malformed_repository_is_rejected() {
        assert!(parse_repository("justaname").is_err());
        assert!(parse_repository("a/b/c").is_err());
        assert!(parse_repository("/repo").is_err());
    }

    #[test]
    fn empty_tag_fails_validation() {
        let desired = DesiredRelease {
            tag_name: "   ".to_string(),
            target_commitish: None,
            draft: false,
            prerelease: false,
            recreate: false,
            move_tag: false,
            keep_assets: false,
            file_patterns: Vec::new(),
        };
        assert!(desired.validate().is_err());
    }
}
