//! Fork network discovery.
//!
//! Looks up each remote's project, then each project's fork parent (one hop),
//! and collects the distinct repositories found, in discovery order.

use indexmap::IndexMap;

use crate::git::{Remote, RepoIdentity, full_name_from_url};
use crate::platform::{Project, ProjectApi};

/// Fetch project records for the first `limit` remotes.
///
/// Lookups are best-effort: a remote whose project can't be fetched is left
/// out, and the walk continues with the next one.
pub(crate) fn fetch_network(
    remotes: &[Remote],
    api: &dyn ProjectApi,
    limit: usize,
) -> Vec<Project> {
    remotes
        .iter()
        .take(limit)
        .filter_map(|remote| {
            let full_name = remote.full_name();
            match api.get_project(&full_name) {
                Ok(project) => Some(project),
                Err(e) => {
                    log::debug!("Skipping remote {} ({full_name}): {e:#}", remote.name);
                    None
                }
            }
        })
        .collect()
}

/// Repositories a user can pick as the base, deduplicated by full name.
#[derive(Debug, Clone, Default)]
pub(crate) struct Candidates {
    /// Lowercased full name -> (full name as first seen, project)
    projects: IndexMap<String, (String, Project)>,
}

impl Candidates {
    /// Expand a network with each project's fork parent.
    ///
    /// A parent is listed before the fork that points at it. Parent lookups
    /// that fail are skipped like any other lookup.
    pub(crate) fn collect(network: &[Project], api: &dyn ProjectApi) -> Self {
        let mut candidates = Self::default();
        for project in network {
            if let Some(parent) = &project.forked_from_project {
                match api.get_project(&parent.path_with_namespace) {
                    Ok(parent_project) => candidates.add(parent_project),
                    Err(e) => log::debug!(
                        "Skipping fork parent {} of {}: {e:#}",
                        parent.path_with_namespace,
                        project.path_with_namespace
                    ),
                }
            }
            candidates.add(project.clone());
        }
        candidates
    }

    /// Insert unless a project with the same full name is already present.
    fn add(&mut self, project: Project) {
        let full_name = full_name_from_url(&project.http_url_to_repo)
            .unwrap_or_else(|| project.path_with_namespace.clone());
        self.projects
            .entry(full_name.to_lowercase())
            .or_insert((full_name, project));
    }

    /// Full names in discovery order.
    pub fn names(&self) -> Vec<String> {
        self.projects
            .values()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn get(&self, full_name: &str) -> Option<&Project> {
        self.projects
            .get(&full_name.to_lowercase())
            .map(|(_, project)| project)
    }

    pub fn first(&self) -> Option<&Project> {
        self.projects.first().map(|(_, (_, project))| project)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }
}
