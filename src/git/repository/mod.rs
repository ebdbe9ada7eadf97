use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use anyhow::{Context, bail};

use super::{DEFAULT_RESOLUTION_KEY, Remote, RemoteStore, parse_remotes};

/// Global base path for repository operations, set by -C flag
static BASE_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global base path for repository operations.
///
/// This should be called once at program startup from main().
/// If not called, defaults to "." (current directory).
pub fn set_base_path(path: PathBuf) {
    BASE_PATH.set(path).ok();
}

fn base_path() -> &'static PathBuf {
    static DEFAULT: OnceLock<PathBuf> = OnceLock::new();
    BASE_PATH
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(|| PathBuf::from(".")))
}

/// A local working copy, backed by the `git` executable.
///
/// Implements [`RemoteStore`]: remotes come from `git remote -v`, resolution
/// tags live in `remote.<name>.glab-resolved` (key configurable).
///
/// # Examples
///
/// ```no_run
/// use baserepo::git::{RemoteStore, Repository};
///
/// let repo = Repository::current();
/// for remote in repo.list_remotes()? {
///     println!("{} -> {}", remote.name, remote.repo);
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    resolution_key: String,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            resolution_key: DEFAULT_RESOLUTION_KEY.to_string(),
        }
    }

    /// Create a repository context for the current directory.
    ///
    /// If the -C flag was used, this uses that path instead.
    pub fn current() -> Self {
        Self::at(base_path().clone())
    }

    /// Store resolutions under `remote.<name>.<key>` instead of the default.
    pub fn with_resolution_key(mut self, key: impl Into<String>) -> Self {
        // git reports variable names lowercased
        self.resolution_key = key.into().to_ascii_lowercase();
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.path
    }

    pub fn resolution_key(&self) -> &str {
        &self.resolution_key
    }

    /// Remove the resolution tag from every remote.
    ///
    /// Returns the names of remotes that had one.
    pub fn clear_resolutions(&self) -> anyhow::Result<Vec<String>> {
        let mut cleared = Vec::new();
        for remote in self.list_remotes()? {
            if remote.resolved.is_empty() {
                continue;
            }
            let key = self.config_key(&remote.name);
            self.run_command(&["config", "--unset", &key])
                .with_context(|| format!("Failed to clear {key}"))?;
            cleared.push(remote.name);
        }
        Ok(cleared)
    }

    fn config_key(&self, remote: &str) -> String {
        format!("remote.{}.{}", remote, self.resolution_key)
    }

    /// Resolution tags as raw `git config --get-regexp` output.
    ///
    /// git exits 1 when nothing matches; that's an empty result, not an error.
    fn resolution_lines(&self) -> anyhow::Result<String> {
        let pattern = format!(
            r"^remote\..*\.{}$",
            self.resolution_key.replace('.', r"\.")
        );
        let output = self.git_output(&["config", "--get-regexp", &pattern])?;
        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            Some(1) => Ok(String::new()),
            _ => bail!(
                "git config --get-regexp failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        }
    }

    fn logging_context(&self) -> String {
        if self.path.to_str() == Some(".") {
            ".".to_string()
        } else {
            self.path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("?")
                .to_string()
        }
    }

    fn git_output(&self, args: &[&str]) -> anyhow::Result<std::process::Output> {
        use crate::shell_exec::run;

        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.current_dir(&self.path);

        run(&mut cmd, Some(&self.logging_context()))
            .with_context(|| format!("Failed to execute: git {}", args.join(" ")))
    }

    /// Run a git command in this repository's context.
    ///
    /// Returns stdout on success; on failure the error carries stderr (and
    /// stdout, since some git commands report errors there).
    pub fn run_command(&self, args: &[&str]) -> anyhow::Result<String> {
        let output = self.git_output(args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            for line in stderr.trim().lines() {
                log::debug!("  ! {}", line);
            }
            let stdout = String::from_utf8_lossy(&output.stdout);
            let error_msg = [stderr.trim(), stdout.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{}", error_msg);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        for line in stdout.trim().lines() {
            log::debug!("  {}", line);
        }
        Ok(stdout)
    }
}

impl RemoteStore for Repository {
    fn list_remotes(&self) -> anyhow::Result<Vec<Remote>> {
        let remote_v = self
            .run_command(&["remote", "-v"])
            .context("Failed to list git remotes")?;
        let resolutions = self.resolution_lines()?;
        Ok(parse_remotes(&remote_v, &resolutions, &self.resolution_key))
    }

    fn set_remote_resolution(&self, remote: &str, tag: &str) -> anyhow::Result<()> {
        let key = self.config_key(remote);
        self.run_command(&["config", &key, tag])
            .with_context(|| format!("Failed to set {key}"))?;
        Ok(())
    }
}
