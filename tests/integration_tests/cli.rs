//! The `baserepo` binary, run without network access.
//!
//! Every case here is answered by an override, a saved tag or the
//! no-prompt fallback, so `glab` is never invoked.

use insta::assert_snapshot;

use crate::common::{TestRepo, stderr, stdout};

fn forked_repo() -> TestRepo {
    let test = TestRepo::new();
    test.add_remote("origin", "git@gitlab.com:me/cli.git");
    test.add_remote("upstream", "https://gitlab.com/gitlab-org/cli.git");
    test
}

#[test]
fn test_remotes_in_priority_order() {
    let test = forked_repo();
    test.add_remote("alice", "https://gitlab.com/alice/cli.git");
    test.git(&["config", "remote.alice.glab-resolved", "head:alice/cli"]);

    let output = test.baserepo(&["remotes"]);
    assert!(output.status.success(), "{}", stderr(&output));

    assert_snapshot!(
        stdout(&output),
        @"upstream\tgitlab.com/gitlab-org/cli\norigin\tgitlab.com/me/cli\nalice\tgitlab.com/alice/cli [head:alice/cli]"
    );
}

#[test]
fn test_base_without_prompt_uses_first_remote() {
    let test = forked_repo();

    let output = test.baserepo(&["base", "--no-prompt"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "gitlab.com/gitlab-org/cli\n");
    assert_eq!(test.resolution("upstream"), None);
    assert_eq!(test.resolution("origin"), None);
}

#[test]
fn test_base_override() {
    let test = forked_repo();

    let output = test.baserepo(&["base", "--repo", "gitlab.example.com/team/tool"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "gitlab.example.com/team/tool\n");
}

#[test]
fn test_base_malformed_override() {
    let test = forked_repo();

    let output = test.baserepo(&["base", "--repo", "tool"]);
    assert!(!output.status.success());
    assert_snapshot!(
        stderr(&output),
        @r#"✗ expected the "[HOST/]OWNER/REPO" format, got "tool""#
    );
}

#[test]
fn test_base_uses_saved_tag() {
    let test = forked_repo();
    test.git(&["config", "remote.origin.glab-resolved", "base"]);

    let output = test.baserepo(&["base"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "gitlab.com/me/cli\n");
}

#[test]
fn test_base_without_remotes() {
    let test = TestRepo::new();

    let output = test.baserepo(&["base", "--no-prompt"]);
    assert!(!output.status.success());
    assert_snapshot!(stderr(&output), @"✗ no git remotes found");
}

#[test]
fn test_reset_clears_tags() {
    let test = forked_repo();
    test.git(&["config", "remote.origin.glab-resolved", "base:gitlab-org/cli"]);

    let output = test.baserepo(&["reset"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_snapshot!(stdout(&output), @"✓ Cleared resolution on origin");
    assert_eq!(test.resolution("origin"), None);

    let output = test.baserepo(&["reset"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_snapshot!(stdout(&output), @"○ No saved resolutions");
}
