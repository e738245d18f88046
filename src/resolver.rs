//! Project path and version resolution.
//!
//! Each setting walks the same chain and takes the first non-empty value:
//! explicit override > environment variable > `component-docs.toml` >
//! git working copy > placeholder.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use tracing::info;

use crate::config::RepoConfig;
use crate::git::{GitCli, VcsInspector};

/// `user@host:path` or `scheme://host/path`, minus a trailing `.git`.
static REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:[A-Za-z][A-Za-z0-9+.\-]*://[^/]+/|[^@/\s]+@[^:/\s]+:)",
        r"(?P<path>.+?)(?:\.git)?/?$",
    ))
    .expect("remote regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Project,
    Version,
}

impl Setting {
    pub fn as_str(&self) -> &str {
        match self {
            Setting::Project => "project",
            Setting::Version => "version",
        }
    }

    /// Environment variable consulted for this setting.
    pub fn env_var(&self) -> &'static str {
        match self {
            Setting::Project => "CI_PROJECT_PATH",
            Setting::Version => "VERSION",
        }
    }

    /// Last-resort value, so resolution never comes back empty.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Setting::Project => "my-group/my-project",
            Setting::Version => "~latest",
        }
    }
}

/// Lookup of named environment values.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// The two values handed to the template next to the components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub project: String,
    pub version: String,
}

/// Reduce a git remote address to `group/subgroup/.../project`.
///
/// Returns an empty string when the address is neither scp-style
/// (`git@host:path`) nor URL-style (`scheme://host/path`).
pub fn project_path_from_remote(remote: &str) -> String {
    REMOTE_RE
        .captures(remote.trim())
        .and_then(|caps| caps.name("path"))
        .map(|m| m.as_str().trim_matches('/').to_string())
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct Resolver {
    env: Box<dyn Environment>,
    config: RepoConfig,
    vcs: Box<dyn VcsInspector>,
}

impl Resolver {
    /// Resolver over the process environment, the repository's config file
    /// and its git working copy.
    pub fn new(repo_root: &Path) -> Self {
        Self {
            env: Box::new(ProcessEnv),
            config: RepoConfig::load(repo_root),
            vcs: Box::new(GitCli::new(repo_root)),
        }
    }

    pub fn with_env(mut self, env: impl Environment + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    pub fn with_config(mut self, config: RepoConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_vcs(mut self, vcs: impl VcsInspector + 'static) -> Self {
        self.vcs = Box::new(vcs);
        self
    }

    /// Resolve one setting. Always returns a non-empty string.
    pub fn resolve(&self, explicit: Option<&str>, setting: Setting) -> String {
        let name = setting.as_str();

        if let Some(value) = non_empty(explicit.map(str::to_string)) {
            info!("Using explicit {}: {}", name, value);
            return value;
        }

        if let Some(value) = non_empty(self.env.var(setting.env_var())) {
            info!("Using {} from ${}: {}", name, setting.env_var(), value);
            return value;
        }

        let configured = match setting {
            Setting::Project => self.config.project.clone(),
            Setting::Version => self.config.version.clone(),
        };
        if let Some(value) = non_empty(configured) {
            info!("Using {} from config: {}", name, value);
            return value;
        }

        if let Some(value) = non_empty(self.detect(setting)) {
            info!("Detected {} from git: {}", name, value);
            return value;
        }

        info!("No {} found, using placeholder {}", name, setting.placeholder());
        setting.placeholder().to_string()
    }

    pub fn resolve_all(&self, project: Option<&str>, version: Option<&str>) -> ResolvedConfig {
        ResolvedConfig {
            project: self.resolve(project, Setting::Project),
            version: self.resolve(version, Setting::Version),
        }
    }

    fn detect(&self, setting: Setting) -> Option<String> {
        match setting {
            Setting::Project => self
                .vcs
                .remote_url()
                .map(|url| project_path_from_remote(&url)),
            Setting::Version => self.vcs.latest_tag(),
        }
    }
}
