//! Hosted repository references.

use std::fmt;

use super::{GitRemoteUrl, ResolveError};

/// Host assumed when a full name carries none.
pub const DEFAULT_HOST: &str = "gitlab.com";

/// Anything that names a hosted repository.
///
/// Implemented by [`RepoRef`] and by [`Remote`](super::Remote) so the two can
/// be compared directly with [`is_same`].
pub trait RepoIdentity {
    fn host(&self) -> &str;
    fn owner(&self) -> &str;
    fn name(&self) -> &str;

    /// "owner/name", the path GitLab uses to identify a project.
    fn full_name(&self) -> String {
        format!("{}/{}", self.owner(), self.name())
    }
}

/// Whether two repositories are the same, ignoring ASCII case.
pub fn is_same<A, B>(a: &A, b: &B) -> bool
where
    A: RepoIdentity + ?Sized,
    B: RepoIdentity + ?Sized,
{
    a.host().eq_ignore_ascii_case(b.host())
        && a.owner().eq_ignore_ascii_case(b.owner())
        && a.name().eq_ignore_ascii_case(b.name())
}

/// A repository on a code-hosting platform: host, owner (namespace), name.
///
/// # Example
///
/// ```
/// use baserepo::git::{RepoIdentity, RepoRef};
///
/// let repo = RepoRef::parse_full_name("gitlab-org/cli").unwrap();
/// assert_eq!(repo.host(), "gitlab.com");
/// assert_eq!(repo.full_name(), "gitlab-org/cli");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    host: String,
    owner: String,
    name: String,
}

impl RepoRef {
    pub fn new(host: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host: normalize_host(&host.into()),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `OWNER/NAME`, `HOST/OWNER/NAME`, or a repository URL.
    ///
    /// References without a host land on [`DEFAULT_HOST`].
    pub fn parse_full_name(input: &str) -> Result<Self, ResolveError> {
        Self::parse_full_name_on(input, DEFAULT_HOST)
    }

    /// Like [`parse_full_name`](Self::parse_full_name) with an explicit
    /// fallback host.
    ///
    /// A leading segment containing `.` or `:` is a hostname; otherwise three
    /// or more segments are a nested namespace (`group/subgroup/name`).
    pub fn parse_full_name_on(input: &str, default_host: &str) -> Result<Self, ResolveError> {
        let trimmed = input.trim();
        if trimmed.contains("://") || trimmed.starts_with("git@") {
            return Self::from_url(trimmed);
        }

        let malformed = || ResolveError::MalformedReference {
            input: input.to_string(),
        };

        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.len() < 2 || segments.iter().any(|s| s.is_empty()) {
            return Err(malformed());
        }

        let (name, rest) = segments.split_last().ok_or_else(malformed)?;
        let (host, owner_segments) = match rest {
            [first, tail @ ..] if !tail.is_empty() && looks_like_host(first) => (*first, tail),
            _ => (default_host, rest),
        };

        Ok(Self::new(host, owner_segments.join("/"), *name))
    }

    /// Parse a clone or web URL, dropping scheme, credentials and `.git`.
    pub fn from_url(url: &str) -> Result<Self, ResolveError> {
        let parsed = GitRemoteUrl::parse(url).ok_or_else(|| ResolveError::MalformedReference {
            input: url.to_string(),
        })?;
        Ok(Self::new(parsed.host(), parsed.owner(), parsed.repo()))
    }

    /// Same owner and name, on another host.
    pub fn with_host(&self, host: &str) -> Self {
        Self::new(host, self.owner.clone(), self.name.clone())
    }

    pub fn same_as(&self, other: &impl RepoIdentity) -> bool {
        is_same(self, other)
    }
}

impl RepoIdentity for RepoRef {
    fn host(&self) -> &str {
        &self.host
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.name)
    }
}

fn looks_like_host(segment: &str) -> bool {
    segment.contains('.') || segment.contains(':')
}

/// Lowercase and drop a leading `www.`.
pub(crate) fn normalize_host(host: &str) -> String {
    let host = host.to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}
