//! Resolution error types
//!
//! **`ResolveError`** is a typed enum for domain errors that can be
//! pattern-matched and tested. Use `.into()` to convert to `anyhow::Error`
//! while preserving the type; recover it with `downcast_ref`.
//!
//! ```ignore
//! if let Some(ResolveError::PromptCancelled) = err.downcast_ref() {
//!     return Ok(());
//! }
//! ```

use std::fmt;

/// Domain errors for base repository resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A full name or URL could not be split into host/owner/name.
    MalformedReference { input: String },
    /// No configured remote points at the repository.
    NotFound { repo: String },
    /// Writing a resolution tag to git config failed.
    PersistenceFailure { remote: String, message: String },
    /// The user aborted the interactive selection.
    PromptCancelled,
    /// There is no remote to fall back to.
    NoRemotes,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedReference { input } => {
                write!(f, r#"expected the "[HOST/]OWNER/REPO" format, got "{input}""#)
            }
            Self::NotFound { repo } => write!(f, "no git remote points to {repo}"),
            Self::PersistenceFailure { remote, message } => {
                write!(f, "could not save resolution for remote {remote}: {message}")
            }
            Self::PromptCancelled => write!(f, "base repository selection cancelled"),
            Self::NoRemotes => write!(f, "no git remotes found"),
        }
    }
}

impl std::error::Error for ResolveError {}
