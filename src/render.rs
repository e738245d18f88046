//! README rendering with a user-editable Tera template.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tera::{Context, Tera};

use crate::pipeline::Component;
use crate::resolver::ResolvedConfig;

/// Template written when the repository does not have one yet.
pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/README.md.tmpl");

/// Everything the template can see.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateData {
    pub components: Vec<Component>,
    pub project: String,
    pub version: String,
}

impl TemplateData {
    pub fn new(components: Vec<Component>, config: ResolvedConfig) -> Self {
        Self {
            components,
            project: config.project,
            version: config.version,
        }
    }
}

/// Write `content` to `path` unless a file is already there.
/// Returns whether the file was created.
pub fn ensure_template(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to create template {}", path.display()))?;
    Ok(true)
}

pub fn render(template: &str, data: &TemplateData) -> Result<String> {
    let context = Context::from_serialize(data).context("Failed to build template context")?;
    Tera::one_off(template, &context, false).context("Error executing template")
}
