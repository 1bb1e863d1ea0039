//! Binary surface smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn missing_tag_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("gh_release_sync").expect("binary");
    cmd.env_remove("INPUT_TAG_NAME");
    cmd.env_remove("GITHUB_REPOSITORY");
    cmd.env_remove("GITHUB_SHA");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--tag-name"));
}

#[test]
fn help_lists_reconciliation_flags() {
    let mut cmd = Command::cargo_bin("gh_release_sync").expect("binary");
    cmd.arg("--help");

    cmd.assert().success().stdout(
        predicate::str::contains("--recreate")
            .and(predicate::str::contains("--move-tag"))
            .and(predicate::str::contains("--keep-assets")),
    );
}
