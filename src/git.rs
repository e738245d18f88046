use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Read-only view of the version-control working copy.
/// Any failure (not a repo, no remote, no tags, no git binary) is `None`.
pub trait VcsInspector {
    fn remote_url(&self) -> Option<String>;
    fn latest_tag(&self) -> Option<String>;
}

/// Inspects a working copy through the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    pub fn new(repo_path: &Path) -> Self {
        Self {
            repo_path: repo_path.to_path_buf(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()?;

        if !output.status.success() {
            bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8(output.stdout)?.trim().to_string())
    }

    fn non_empty(&self, args: &[&str]) -> Option<String> {
        match self.git(args) {
            Ok(out) if !out.is_empty() => Some(out),
            Ok(_) => None,
            Err(e) => {
                debug!("{}", e);
                None
            }
        }
    }
}

impl VcsInspector for GitCli {
    fn remote_url(&self) -> Option<String> {
        self.non_empty(&["remote", "get-url", "origin"])
    }

    /// Most recent tag reachable from HEAD, verbatim (a leading `v` is kept).
    fn latest_tag(&self) -> Option<String> {
        self.non_empty(&["describe", "--tags", "--abbrev=0"])
    }
}
