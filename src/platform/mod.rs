//! GitLab project lookups.
//!
//! [`ProjectApi`] is the narrow seam the resolver uses; [`GlabApi`] implements
//! it with the `glab` CLI so authentication stays with `glab auth login`.

use std::process::Command;

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::shell_exec::run;

/// The project a fork was created from, as embedded in a project record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForkParent {
    pub path_with_namespace: String,
}

/// A GitLab project record (subset of `GET /projects/:id`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub path_with_namespace: String,
    pub http_url_to_repo: String,
    #[serde(default)]
    pub web_url: String,
    #[serde(default)]
    pub forked_from_project: Option<ForkParent>,
}

/// Fetch project records by full name (`owner/name`).
pub trait ProjectApi {
    fn get_project(&self, full_name: &str) -> anyhow::Result<Project>;
}

/// [`ProjectApi`] backed by `glab api`.
#[derive(Debug, Clone, Default)]
pub struct GlabApi {
    hostname: Option<String>,
}

impl GlabApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query a specific GitLab instance (`glab api --hostname`).
    pub fn with_hostname(hostname: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
        }
    }

    /// `glab api` arguments for one project lookup.
    fn project_args(&self, full_name: &str) -> Vec<String> {
        let mut args = vec![
            "api".to_string(),
            format!("projects/{}", urlencoding::encode(full_name)),
        ];
        if let Some(hostname) = &self.hostname {
            args.push("--hostname".to_string());
            args.push(hostname.clone());
        }
        args
    }
}

impl ProjectApi for GlabApi {
    fn get_project(&self, full_name: &str) -> anyhow::Result<Project> {
        let mut cmd = Command::new("glab");
        cmd.args(self.project_args(full_name));
        disable_color_output(&mut cmd);
        cmd.env("PAGER", "cat");

        let output = run(&mut cmd, None).context("Failed to execute glab")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("glab api failed for {}: {}", full_name, stderr.trim());
        }

        serde_json::from_slice(&output.stdout)
            .with_context(|| format!("Failed to parse glab api response for {full_name}"))
    }
}

/// Configure command to disable color output
fn disable_color_output(cmd: &mut Command) {
    cmd.env_remove("CLICOLOR_FORCE");
    cmd.env_remove("GLAB_FORCE_TTY");
    cmd.env("NO_COLOR", "1");
    cmd.env("CLICOLOR", "0");
}
