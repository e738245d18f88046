use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::pipeline::{Collector, SiblingDescriptions};
use crate::render::{self, TemplateData, DEFAULT_TEMPLATE};
use crate::resolver::Resolver;

/// Outcome of a generate run, for callers that want more than the README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub template_created: bool,
    pub components: usize,
    pub written: bool,
}

/// Generate the README for the repository at `path`.
///
/// `templates_dir`, `template` and `output` are relative to `path` unless
/// absolute. Nothing is written when any component fails to extract.
pub fn run(
    path: &str,
    templates_dir: &str,
    template: &str,
    output: &str,
    project_override: Option<String>,
    version_override: Option<String>,
) -> Result<GenerateReport> {
    let repo_path = Path::new(path);
    let templates_dir = repo_path.join(templates_dir);
    let template_path = repo_path.join(template);
    let output_path = repo_path.join(output);

    info!("Repository path: {}", repo_path.display());
    info!("Templates: {}", templates_dir.display());
    info!("Output: {}", output_path.display());

    let template_created = render::ensure_template(&template_path, DEFAULT_TEMPLATE)?;
    if template_created {
        println!("Created default {}", template);
    }

    let collector = Collector::new(&templates_dir);
    let files = collector.discover()?;
    if files.is_empty() {
        println!("No template files found in {}", templates_dir.display());
        return Ok(GenerateReport {
            template_created,
            components: 0,
            written: false,
        });
    }

    let descriptions = SiblingDescriptions::new(&templates_dir);
    let components = collector.extract_all(&files, &descriptions)?;
    info!("Extracted {} components", components.len());

    let resolver = Resolver::new(repo_path);
    let config = resolver.resolve_all(project_override.as_deref(), version_override.as_deref());

    let template_text = fs::read_to_string(&template_path)
        .with_context(|| format!("Error reading template file {}", template_path.display()))?;
    let count = components.len();
    let doc = render::render(&template_text, &TemplateData::new(components, config))?;

    fs::write(&output_path, doc)
        .with_context(|| format!("Error writing Markdown file {}", output_path.display()))?;
    println!("Documentation generated successfully!");

    Ok(GenerateReport {
        template_created,
        components: count,
        written: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo_with(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("templates")).unwrap();
        for (name, content) in files {
            fs::write(dir.path().join("templates").join(name), content).unwrap();
        }
        dir
    }

    fn run_in(dir: &TempDir) -> Result<GenerateReport> {
        run(
            dir.path().to_str().unwrap(),
            "templates",
            "README.md.tmpl",
            "README.md",
            Some("group/ci".to_string()),
            Some("1.0.0".to_string()),
        )
    }

    #[test]
    fn test_generates_readme_and_default_template() {
        let dir = repo_with(&[(
            "build.yml",
            concat!(
                "spec:\n  inputs:\n    app_name:\n      description: \"Application name\"\n",
                "    stage:\n      default: build\n",
            ),
        )]);

        let report = run_in(&dir).unwrap();
        assert!(report.template_created);
        assert!(report.written);
        assert_eq!(report.components, 1);

        let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(readme.contains("## build"));
        assert!(readme.contains("Application name"));
        assert!(readme.contains("group/ci/build@1.0.0"));
        assert!(dir.path().join("README.md.tmpl").exists());
    }

    #[test]
    fn test_existing_template_is_used() {
        let dir = repo_with(&[("lint.yml", "spec:\n  inputs: {}\n")]);
        fs::write(
            dir.path().join("README.md.tmpl"),
            "{% for c in components %}{{ c.name }} {% endfor %}{{ version }}",
        )
        .unwrap();

        let report = run_in(&dir).unwrap();
        assert!(!report.template_created);
        let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert_eq!(readme, "lint 1.0.0");
    }

    #[test]
    fn test_no_templates_writes_nothing() {
        let dir = repo_with(&[]);
        let report = run_in(&dir).unwrap();
        assert!(!report.written);
        assert!(!dir.path().join("README.md").exists());
    }

    #[test]
    fn test_parse_error_aborts_without_output() {
        let dir = repo_with(&[
            ("a.yml", "spec:\n  inputs: {}\n"),
            ("b.yml", "spec: [unclosed"),
        ]);
        let err = run_in(&dir).unwrap_err();
        assert!(err.to_string().contains("b.yml"));
        assert!(!dir.path().join("README.md").exists());
    }
}
