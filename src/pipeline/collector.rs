use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ExtractError;
use crate::pipeline::extractor::{extract_file, Component, DescriptionLookup, SiblingDescriptions};

const PATTERNS: &[&str] = &["*.yml", "*.yaml"];

/// Finds component definitions in a templates directory and extracts them.
pub struct Collector {
    templates_dir: PathBuf,
}

impl Collector {
    pub fn new(templates_dir: &Path) -> Self {
        Self {
            templates_dir: templates_dir.to_path_buf(),
        }
    }

    /// Component files directly inside the templates directory, sorted by path.
    /// A missing directory yields an empty list.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for pattern in PATTERNS {
            let full = self.templates_dir.join(pattern);
            let full = full.to_string_lossy();
            for entry in glob::glob(&full).with_context(|| format!("Invalid glob: {}", full))? {
                let path = entry.context("Failed to read templates directory entry")?;
                // Broken symlinks stay in so they fail as read errors
                if !path.is_dir() {
                    files.push(path);
                }
            }
        }
        files.sort();
        Ok(files)
    }

    /// Extract every file in order, stopping at the first failure.
    pub fn extract_all(
        &self,
        files: &[PathBuf],
        descriptions: &dyn DescriptionLookup,
    ) -> Result<Vec<Component>, ExtractError> {
        files
            .iter()
            .map(|path| {
                info!("Parsing {}", path.display());
                extract_file(path, descriptions)
            })
            .collect()
    }

    /// Discover and extract, with descriptions from `<name>.md` siblings.
    pub fn collect(&self) -> Result<Vec<Component>> {
        let files = self.discover()?;
        let descriptions = SiblingDescriptions::new(&self.templates_dir);
        Ok(self.extract_all(&files, &descriptions)?)
    }
}
