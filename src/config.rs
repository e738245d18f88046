use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Per-repository config file, looked up in the repository root.
pub const CONFIG_FILE: &str = "component-docs.toml";

/// Persisted settings for a repository. Every field is optional; an empty
/// string counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Project path, e.g. `my-group/ci/components`
    #[serde(default)]
    pub project: Option<String>,

    /// Component version to reference in usage snippets
    #[serde(default)]
    pub version: Option<String>,
}

impl RepoConfig {
    /// Load `component-docs.toml` from `repo_root`.
    /// A missing or unparsable file yields the empty default.
    pub fn load(repo_root: &Path) -> Self {
        let path = repo_root.join(CONFIG_FILE);
        match Self::load_from_path(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                debug!("No usable config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: RepoConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
