//! Resolution decisions saved to and read back from a real git config.

use baserepo::config::ResolverConfig;
use baserepo::git::{RemoteStore, Repository};
use baserepo::resolve::{Collaborators, ResolvedRemotes};

use crate::common::{FakeApi, FixedChooser, TestRepo, project};

fn fork_network() -> FakeApi {
    FakeApi::default()
        .with(project("gitlab-org/cli", None))
        .with(project("me/cli", Some("gitlab-org/cli")))
        .with(project("alice/cli", Some("gitlab-org/cli")))
}

fn resolve_base(
    repo: &Repository,
    config: &ResolverConfig,
    api: &FakeApi,
    chooser: &FixedChooser,
) -> String {
    let resolved = ResolvedRemotes::from_store(
        None,
        config,
        Collaborators {
            store: repo,
            api,
            chooser,
        },
    )
    .unwrap();
    let base = resolved.base_repo(true).unwrap();
    assert!(base.persist_error.is_none(), "{:?}", base.persist_error);
    base.repo.to_string()
}

#[test]
fn test_remoteless_choice_is_saved_and_reused() {
    let test = TestRepo::new();
    test.add_remote("origin", "git@gitlab.com:me/cli.git");
    test.add_remote("alice", "https://gitlab.com/alice/cli.git");
    let repo = Repository::at(test.path());
    let config = ResolverConfig::default();
    let api = fork_network();

    let first = resolve_base(&repo, &config, &api, &FixedChooser(Some("gitlab-org/cli")));
    assert_eq!(first, "gitlab.com/gitlab-org/cli");
    assert_eq!(
        test.resolution("origin").as_deref(),
        Some("base:gitlab-org/cli")
    );
    assert_eq!(test.resolution("alice"), None);

    let lookups = api.lookup_count();
    let second = resolve_base(&repo, &config, &api, &FixedChooser(None));
    assert_eq!(second, first);
    assert_eq!(api.lookup_count(), lookups);
}

#[test]
fn test_choice_with_remote_is_tagged_base() {
    let test = TestRepo::new();
    test.add_remote("origin", "git@gitlab.com:me/cli.git");
    test.add_remote("upstream", "https://gitlab.com/gitlab-org/cli.git");
    let repo = Repository::at(test.path());

    let base = resolve_base(
        &repo,
        &ResolverConfig::default(),
        &fork_network(),
        &FixedChooser(Some("me/cli")),
    );

    assert_eq!(base, "gitlab.com/me/cli");
    assert_eq!(test.resolution("origin").as_deref(), Some("base"));
    assert_eq!(test.resolution("upstream"), None);
}

#[test]
fn test_legacy_tag_is_rewritten() {
    let test = TestRepo::new();
    test.add_remote("origin", "git@gitlab.com:me/cli.git");
    test.git(&["config", "remote.origin.glab-resolved", "gitlab-org/cli"]);
    let repo = Repository::at(test.path());
    let api = FakeApi::default();

    let base = resolve_base(&repo, &ResolverConfig::default(), &api, &FixedChooser(None));

    assert_eq!(base, "gitlab.com/gitlab-org/cli");
    assert_eq!(
        test.resolution("origin").as_deref(),
        Some("base:gitlab-org/cli")
    );
    assert_eq!(api.lookup_count(), 0);
}

#[test]
fn test_custom_resolution_key() {
    let test = TestRepo::new();
    test.add_remote("origin", "git@gitlab.com:gitlab-org/cli.git");
    let config = ResolverConfig {
        resolution_key: "baserepo-resolved".into(),
        ..Default::default()
    };
    let repo = Repository::at(test.path()).with_resolution_key(&config.resolution_key);
    let api = FakeApi::default().with(project("gitlab-org/cli", None));

    resolve_base(&repo, &config, &api, &FixedChooser(None));

    assert_eq!(
        test.git(&["config", "remote.origin.baserepo-resolved"]).trim(),
        "base"
    );
    assert_eq!(test.resolution("origin"), None);
    assert_eq!(repo.list_remotes().unwrap()[0].resolved, "base");
}
