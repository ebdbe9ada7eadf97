//! Subprocess execution with trace logging.
//!
//! Both collaborators that leave the process (`git` for remotes and config,
//! `glab` for the GitLab API) go through [`run`], so `-v` shows every command
//! with its duration.

use std::process::{Command, Output};
use std::time::Instant;

/// Execute a command with timing and debug logging.
///
/// ```text
/// $ git remote -v [myrepo]                 # with context
/// $ glab api projects/gitlab-org%2Fcli     # without context
/// [baserepo-trace] context=myrepo cmd="..." dur=12.3ms ok=true
/// ```
///
/// The `context` parameter is typically the repository directory name for
/// git commands, or `None` for standalone CLI tools like `glab`.
pub fn run(cmd: &mut Command, context: Option<&str>) -> std::io::Result<Output> {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    let cmd_str = if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    };

    match context {
        Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
        None => log::debug!("$ {}", cmd_str),
    }

    let t0 = Instant::now();
    let result = cmd.output();
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let prefix = match context {
        Some(ctx) => format!("[baserepo-trace] context={ctx} "),
        None => "[baserepo-trace] ".to_string(),
    };
    match &result {
        Ok(output) => log::debug!(
            "{}cmd=\"{}\" dur={:.1}ms ok={}",
            prefix,
            cmd_str,
            duration_ms,
            output.status.success()
        ),
        Err(e) => log::debug!(
            "{}cmd=\"{}\" dur={:.1}ms err=\"{}\"",
            prefix,
            cmd_str,
            duration_ms,
            e
        ),
    }

    result
}
