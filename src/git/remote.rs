//! Git remotes and their persisted base-repository resolutions.

use std::fmt;

use indexmap::IndexMap;

use super::{RepoIdentity, RepoRef};

/// Git config key (under `remote.<name>.`) that stores a resolution tag.
pub const DEFAULT_RESOLUTION_KEY: &str = "glab-resolved";

/// A decoded resolution tag.
///
/// Tags are opaque strings in git config; this is their meaning:
///
/// | tag               | meaning                                          |
/// |-------------------|--------------------------------------------------|
/// | (empty)           | never resolved                                   |
/// | `base`            | this remote is the base repository               |
/// | `base:OWNER/NAME` | the base is another (maybe remote-less) repo     |
/// | `head:...`        | recorded for head selection, not a base          |
/// | `OWNER/NAME`      | legacy remote-less base, migrated to `base:`     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unresolved,
    Base,
    BaseOf(String),
    Head(String),
    Legacy(String),
}

impl Resolution {
    pub fn decode(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.is_empty() {
            Self::Unresolved
        } else if tag == "base" {
            Self::Base
        } else if let Some(full_name) = tag.strip_prefix("base:") {
            Self::BaseOf(full_name.to_string())
        } else if let Some(head) = tag.strip_prefix("head:") {
            Self::Head(head.to_string())
        } else {
            Self::Legacy(tag.to_string())
        }
    }

    /// The tag a legacy resolution should be rewritten to, if any.
    pub fn migrated(&self) -> Option<Self> {
        match self {
            Self::Legacy(full_name) => Some(Self::BaseOf(full_name.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => Ok(()),
            Self::Base => write!(f, "base"),
            Self::BaseOf(full_name) => write!(f, "base:{full_name}"),
            Self::Head(head) => write!(f, "head:{head}"),
            Self::Legacy(full_name) => write!(f, "{full_name}"),
        }
    }
}

/// A configured git remote and the repository it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub fetch_url: String,
    pub push_url: Option<String>,
    pub repo: RepoRef,
    /// Raw resolution tag from git config (empty when unset).
    pub resolved: String,
}

impl Remote {
    pub fn resolution(&self) -> Resolution {
        Resolution::decode(&self.resolved)
    }
}

impl RepoIdentity for Remote {
    fn host(&self) -> &str {
        self.repo.host()
    }

    fn owner(&self) -> &str {
        self.repo.owner()
    }

    fn name(&self) -> &str {
        self.repo.name()
    }
}

/// Default remote ordering: the most upstream-looking names first.
pub fn default_remote_priority() -> Vec<String> {
    ["upstream", "gitlab", "origin"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Stable-sort remotes so names listed earlier in `priority` come first.
///
/// Remotes not named in `priority` keep their relative order after the
/// listed ones.
pub fn sort_by_priority(remotes: &mut [Remote], priority: &[String]) {
    remotes.sort_by_key(|remote| {
        priority
            .iter()
            .position(|name| *name == remote.name)
            .unwrap_or(priority.len())
    });
}

/// Build remotes from `git remote -v` output and resolution config lines.
///
/// `resolutions` is the output of
/// `git config --get-regexp '^remote\..*\.<key>$'`. Remotes whose URL doesn't
/// name a hosted repository are skipped.
pub fn parse_remotes(remote_v: &str, resolutions: &str, key: &str) -> Vec<Remote> {
    // name -> (fetch, push), in first-seen order
    let mut urls: IndexMap<&str, (Option<&str>, Option<&str>)> = IndexMap::new();
    for line in remote_v.lines() {
        let mut fields = line.split_whitespace();
        let (Some(name), Some(url), Some(kind)) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        let entry = urls.entry(name).or_default();
        match kind {
            "(fetch)" => entry.0 = Some(url),
            "(push)" => entry.1 = Some(url),
            _ => {}
        }
    }

    let tags = parse_resolution_lines(resolutions, key);

    urls.into_iter()
        .filter_map(|(name, (fetch, push))| {
            let fetch_url = fetch.or(push)?;
            let parsed = RepoRef::from_url(fetch_url).or_else(|e| match push {
                Some(push_url) => RepoRef::from_url(push_url),
                None => Err(e),
            });
            let repo = match parsed {
                Ok(repo) => repo,
                Err(e) => {
                    log::debug!("Skipping remote {name}: {e}");
                    return None;
                }
            };
            Some(Remote {
                name: name.to_string(),
                fetch_url: fetch_url.to_string(),
                push_url: push.map(String::from),
                repo,
                resolved: tags.get(name).cloned().unwrap_or_default(),
            })
        })
        .collect()
}

/// Parse `remote.<name>.<key> <value>` lines into name -> value.
///
/// Remote names may contain dots, so split on `.<key>` rather than `.`.
fn parse_resolution_lines(output: &str, key: &str) -> IndexMap<String, String> {
    let suffix = format!(".{key}");
    output
        .lines()
        .filter_map(|line| {
            let rest = line.strip_prefix("remote.")?;
            let (config_name, value) = rest.split_once(' ').unwrap_or((rest, ""));
            let name = config_name.strip_suffix(&suffix)?;
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}
