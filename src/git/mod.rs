//! Git remotes, repository references and resolution storage

mod error;
mod remote;
mod repo_ref;
mod repository;
mod url;

pub use error::ResolveError;
pub use remote::{
    DEFAULT_RESOLUTION_KEY, Remote, Resolution, default_remote_priority, parse_remotes,
    sort_by_priority,
};
pub use repo_ref::{DEFAULT_HOST, RepoIdentity, RepoRef, is_same};
pub use repository::{Repository, set_base_path};
pub use url::{GitRemoteUrl, full_name_from_url};

/// Where remotes and their resolution tags come from.
///
/// The resolver owns the tag format (see [`Resolution`]); the store only
/// reads and writes strings.
pub trait RemoteStore {
    /// Remotes in configuration order, each with its current tag.
    fn list_remotes(&self) -> anyhow::Result<Vec<Remote>>;

    /// Persist `tag` for the remote called `remote`.
    fn set_remote_resolution(&self, remote: &str, tag: &str) -> anyhow::Result<()>;
}
