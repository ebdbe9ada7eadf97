//! Base repository resolution.
//!
//! A working copy with several remotes (a fork as `origin`, the project it
//! came from as `upstream`, colleagues' forks...) needs one of them as the
//! default target for cross-repository operations. [`ResolvedRemotes`]
//! decides which, in this order:
//!
//! 1. an explicit override (`--repo`)
//! 2. a resolution tag already saved on a remote
//! 3. without prompting, the highest-priority remote
//! 4. the fork network: the only candidate, or the user's choice among several
//!
//! Decisions from step 4 are saved back to git config, so later runs stop at
//! step 2 without touching the network.

mod network;

use once_cell::sync::OnceCell;

use crate::config::ResolverConfig;
use crate::git::{
    Remote, RemoteStore, RepoIdentity, RepoRef, Resolution, ResolveError, is_same,
    sort_by_priority,
};
use crate::platform::{Project, ProjectApi};
use crate::prompt::Chooser;

use network::{Candidates, fetch_network};

const BASE_PROMPT: &str =
    "Which should be the base repository (used for e.g. querying issues) for this directory?";

/// The external pieces resolution talks to.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub store: &'a dyn RemoteStore,
    pub api: &'a dyn ProjectApi,
    pub chooser: &'a dyn Chooser,
}

/// Outcome of [`ResolvedRemotes::base_repo`].
#[derive(Debug)]
pub struct BaseRepo {
    pub repo: RepoRef,
    /// Set when the decision couldn't be saved. The repository is still the
    /// right answer for this run; the user will just be asked again next time.
    pub persist_error: Option<ResolveError>,
}

impl BaseRepo {
    fn new(repo: RepoRef) -> Self {
        Self {
            repo,
            persist_error: None,
        }
    }
}

/// Remotes of one working copy, ready for base repository resolution.
///
/// The fork network and the candidates expanded from it (fork parents
/// included) are fetched at most once per instance, including when that
/// first fetch came back empty.
pub struct ResolvedRemotes<'a> {
    remotes: Vec<Remote>,
    base_override: Option<RepoRef>,
    network: OnceCell<Vec<Project>>,
    candidates: OnceCell<Candidates>,
    max_remotes_for_lookup: usize,
    collaborators: Collaborators<'a>,
}

impl<'a> ResolvedRemotes<'a> {
    /// Sort `remotes` by the configured priority and parse `base_override`.
    ///
    /// An override without a host lands on `config.default_host`.
    pub fn new(
        mut remotes: Vec<Remote>,
        base_override: Option<&str>,
        config: &ResolverConfig,
        collaborators: Collaborators<'a>,
    ) -> Result<Self, ResolveError> {
        sort_by_priority(&mut remotes, &config.remote_priority);

        let base_override = base_override
            .filter(|base| !base.is_empty())
            .map(|base| RepoRef::parse_full_name_on(base, &config.default_host))
            .transpose()?;

        Ok(Self {
            remotes,
            base_override,
            network: OnceCell::new(),
            candidates: OnceCell::new(),
            max_remotes_for_lookup: config.max_remotes_for_lookup,
            collaborators,
        })
    }

    /// Load remotes from the store and wrap them.
    pub fn from_store(
        base_override: Option<&str>,
        config: &ResolverConfig,
        collaborators: Collaborators<'a>,
    ) -> anyhow::Result<Self> {
        let remotes = collaborators.store.list_remotes()?;
        Ok(Self::new(remotes, base_override, config, collaborators)?)
    }

    /// Remotes in priority order.
    pub fn remotes(&self) -> &[Remote] {
        &self.remotes
    }

    pub fn base_override(&self) -> Option<&RepoRef> {
        self.base_override.as_ref()
    }

    /// Determine the base repository.
    ///
    /// With `prompt` false, nothing is fetched or asked: without a saved
    /// resolution the highest-priority remote is returned as a best guess.
    pub fn base_repo(&self, prompt: bool) -> anyhow::Result<BaseRepo> {
        if let Some(repo) = &self.base_override {
            return Ok(BaseRepo::new(repo.clone()));
        }

        if let Some(repo) = self.saved_base()? {
            return Ok(BaseRepo::new(repo));
        }

        if !prompt {
            return Ok(BaseRepo::new(self.first_remote()?.repo.clone()));
        }

        let candidates = self.candidates();
        let Some(first) = candidates.first() else {
            log::debug!("No projects found in the fork network; using the first remote");
            return Ok(BaseRepo::new(self.first_remote()?.repo.clone()));
        };

        let selected = if candidates.len() == 1 {
            first
        } else {
            let choice = self
                .collaborators
                .chooser
                .select_one(BASE_PROMPT, &candidates.names())?;
            candidates
                .get(&choice)
                .ok_or_else(|| anyhow::anyhow!("{choice} is not one of the offered repositories"))?
        };

        let repo = RepoRef::from_url(&selected.http_url_to_repo)?;
        let (remote, resolution) = match self.remote_for_repo(&repo) {
            Ok(remote) => (remote, Resolution::Base),
            Err(_) => (
                self.first_remote()?,
                Resolution::BaseOf(repo.full_name()),
            ),
        };

        let persist_error = self.save_resolution(remote, &resolution).err();
        Ok(BaseRepo {
            repo,
            persist_error,
        })
    }

    /// Every project found for the remotes (fetching them if needed).
    ///
    /// Used when the whole fork fan-out matters rather than a single base.
    pub fn head_repos(&self) -> &[Project] {
        self.network()
    }

    /// The configured remote that points to `repo`.
    pub fn remote_for_repo(&self, repo: &impl RepoIdentity) -> Result<&Remote, ResolveError> {
        self.remotes
            .iter()
            .find(|remote| is_same(*remote, repo))
            .ok_or_else(|| ResolveError::NotFound {
                repo: repo.full_name(),
            })
    }

    fn network(&self) -> &[Project] {
        self.network.get_or_init(|| {
            fetch_network(
                &self.remotes,
                self.collaborators.api,
                self.max_remotes_for_lookup,
            )
        })
    }

    fn candidates(&self) -> &Candidates {
        self.candidates
            .get_or_init(|| Candidates::collect(self.network(), self.collaborators.api))
    }

    fn first_remote(&self) -> Result<&Remote, ResolveError> {
        self.remotes.first().ok_or(ResolveError::NoRemotes)
    }

    /// A base recorded by an earlier run, if any remote carries one.
    fn saved_base(&self) -> Result<Option<RepoRef>, ResolveError> {
        for remote in &self.remotes {
            let resolution = remote.resolution();
            match &resolution {
                Resolution::Base => return Ok(Some(remote.repo.clone())),
                Resolution::BaseOf(full_name) => {
                    let repo = RepoRef::parse_full_name(full_name)?;
                    return Ok(Some(repo.with_host(remote.host())));
                }
                Resolution::Legacy(full_name) => {
                    let repo = RepoRef::parse_full_name(full_name)?;
                    self.migrate_legacy_resolution(remote, &resolution);
                    return Ok(Some(repo.with_host(remote.host())));
                }
                Resolution::Unresolved | Resolution::Head(_) => {}
            }
        }
        Ok(None)
    }

    /// Rewrite a pre-`base:` tag in the current format.
    ///
    /// The legacy tag keeps working, so failure only gets a warning.
    fn migrate_legacy_resolution(&self, remote: &Remote, resolution: &Resolution) {
        let Some(migrated) = resolution.migrated() else {
            return;
        };
        if let Err(e) = self.save_resolution(remote, &migrated) {
            log::warn!("{e}");
        }
    }

    fn save_resolution(&self, remote: &Remote, resolution: &Resolution) -> Result<(), ResolveError> {
        let tag = resolution.to_string();
        self.collaborators
            .store
            .set_remote_resolution(&remote.name, &tag)
            .map_err(|e| ResolveError::PersistenceFailure {
                remote: remote.name.clone(),
                message: format!("{e:#}"),
            })?;
        log::debug!("Saved resolution {tag:?} on remote {}", remote.name);
        Ok(())
    }
}
