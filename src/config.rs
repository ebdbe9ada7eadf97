//! User configuration.
//!
//! Stored at `~/.config/baserepo/config.toml` (or platform equivalent). Every
//! key is optional:
//!
//! ```toml
//! # Host for references without one ("owner/repo")
//! default-host = "gitlab.com"
//!
//! # Remotes looked up on the API before giving up on the rest
//! max-remotes-for-lookup = 5
//!
//! # Remote names tried first; others keep their git order after these
//! remote-priority = ["upstream", "gitlab", "origin"]
//!
//! # git config key under remote.<name>. holding the resolution tag
//! resolution-key = "glab-resolved"
//!
//! # Passed to `glab api --hostname` for self-managed instances
//! api-hostname = "gitlab.example.com"
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use serde::{Deserialize, Serialize};

use crate::git::{DEFAULT_HOST, DEFAULT_RESOLUTION_KEY, default_remote_priority};

/// Cap on API lookups; users can have an unusually large number of remotes.
pub const DEFAULT_MAX_REMOTES_FOR_LOOKUP: usize = 5;

/// Override for config path, set via --config CLI flag
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Set the config path override (called from CLI --config flag)
pub fn set_config_path(path: PathBuf) {
    CONFIG_PATH.set(path).ok();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ResolverConfig {
    pub default_host: String,
    pub max_remotes_for_lookup: usize,
    pub remote_priority: Vec<String>,
    pub resolution_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_hostname: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_host: DEFAULT_HOST.to_string(),
            max_remotes_for_lookup: DEFAULT_MAX_REMOTES_FOR_LOOKUP,
            remote_priority: default_remote_priority(),
            resolution_key: DEFAULT_RESOLUTION_KEY.to_string(),
            api_hostname: None,
        }
    }
}

impl ResolverConfig {
    /// Load from the configured path, falling back to defaults when the file
    /// doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    // Priority 1: CLI --config flag
    if let Some(path) = CONFIG_PATH.get() {
        return Some(path.clone());
    }

    // Priority 2: Environment variable (also used by tests)
    if let Ok(path) = std::env::var("BASEREPO_CONFIG_PATH") {
        return Some(PathBuf::from(path));
    }

    // XDG on Linux and macOS, %APPDATA% on Windows
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("baserepo").join("config.toml"))
}
