#![allow(dead_code)]

//! # Test utilities for baserepo
//!
//! `TestRepo` creates an isolated git repository in a temporary directory.
//! Git and the `baserepo` binary run with global and system git config
//! disabled and the user config pointed at a nonexistent file, so nothing
//! from the host machine leaks into a test.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use baserepo::platform::{ForkParent, Project, ProjectApi};
use baserepo::prompt::Chooser;

#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Isolate a git (or baserepo) command from the host's configuration.
pub fn configure_git_cmd(cmd: &mut Command) {
    cmd.env("GIT_CONFIG_GLOBAL", NULL_DEVICE);
    cmd.env("GIT_CONFIG_SYSTEM", NULL_DEVICE);
    cmd.env("LC_ALL", "C");
    cmd.env("LANG", "C");
    cmd.env("GIT_TERMINAL_PROMPT", "0");
}

pub struct TestRepo {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_path_buf();
        let repo = Self { _dir: dir, path };
        repo.git(&["init", "--quiet"]);
        repo
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run git in the repository, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.path);
        configure_git_cmd(&mut cmd);
        let output = cmd.output().unwrap();
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    pub fn add_remote(&self, name: &str, url: &str) {
        self.git(&["remote", "add", name, url]);
    }

    /// The saved resolution tag on `remote`, if any.
    pub fn resolution(&self, remote: &str) -> Option<String> {
        let mut cmd = Command::new("git");
        cmd.args(["config", &format!("remote.{remote}.glab-resolved")])
            .current_dir(&self.path);
        configure_git_cmd(&mut cmd);
        let output = cmd.output().unwrap();
        output
            .status
            .success()
            .then(|| String::from_utf8(output.stdout).unwrap().trim().to_string())
    }

    /// Run the `baserepo` binary against this repository.
    pub fn baserepo(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_baserepo"));
        cmd.arg("-C").arg(&self.path).args(args);
        configure_git_cmd(&mut cmd);
        cmd.env("BASEREPO_CONFIG_PATH", "/nonexistent/test/config.toml");
        cmd.env("RUST_LOG", "warn");
        cmd.env_remove("CLICOLOR_FORCE");
        cmd.env("NO_COLOR", "1");
        cmd.output().unwrap()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn project(path: &str, parent: Option<&str>) -> Project {
    Project {
        path_with_namespace: path.to_string(),
        http_url_to_repo: format!("https://gitlab.com/{path}.git"),
        web_url: format!("https://gitlab.com/{path}"),
        forked_from_project: parent.map(|p| ForkParent {
            path_with_namespace: p.to_string(),
        }),
    }
}

/// GitLab stand-in serving canned projects.
#[derive(Default)]
pub struct FakeApi {
    projects: HashMap<String, Project>,
    lookups: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn with(mut self, project: Project) -> Self {
        self.projects
            .insert(project.path_with_namespace.clone(), project);
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.borrow().len()
    }
}

impl ProjectApi for FakeApi {
    fn get_project(&self, full_name: &str) -> anyhow::Result<Project> {
        self.lookups.borrow_mut().push(full_name.to_string());
        self.projects
            .get(full_name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("404 Project Not Found"))
    }
}

/// Always picks the same option; fails the test if asked unexpectedly.
pub struct FixedChooser(pub Option<&'static str>);

impl Chooser for FixedChooser {
    fn select_one(&self, _message: &str, options: &[String]) -> anyhow::Result<String> {
        let answer = self.0.expect("chooser should not be asked");
        assert!(options.iter().any(|o| o == answer), "{answer} not in {options:?}");
        Ok(answer.to_string())
    }
}
