//! Base repository resolution for GitLab working copies.
//!
//! Given the remotes of a local repository, decide which GitLab project is
//! the "base" for cross-repository operations (issues, merge request
//! targets), asking the user when the fork network leaves a real choice and
//! remembering the answer in git config.
//!
//! The entry point is [`resolve::ResolvedRemotes`]. Its collaborators are
//! traits so callers can swap the git config store ([`git::RemoteStore`]),
//! the GitLab API ([`platform::ProjectApi`]) and the prompt
//! ([`prompt::Chooser`]).
//!
//! The library API is not stable.

pub mod config;
pub mod git;
pub mod platform;
pub mod prompt;
pub mod resolve;
pub mod shell_exec;
