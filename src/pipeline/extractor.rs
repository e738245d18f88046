use serde::Serialize;
use serde_yaml::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::pipeline::collator::{collate, Input};
use crate::pipeline::document::parse_documents;

/// One documented CI/CD component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: String,
    pub description: String,
    pub inputs: Vec<Input>,
}

/// Source of free-text component descriptions, keyed by component name.
pub trait DescriptionLookup {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Reads `<dir>/<name>.md` next to the component definitions.
#[derive(Debug, Clone)]
pub struct SiblingDescriptions {
    dir: PathBuf,
}

impl SiblingDescriptions {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

impl DescriptionLookup for SiblingDescriptions {
    fn lookup(&self, name: &str) -> Option<String> {
        let path = self.dir.join(format!("{}.md", name));
        match fs::read_to_string(&path) {
            Ok(text) => Some(text.trim().to_string()),
            Err(_) => {
                debug!("No description file at {}", path.display());
                None
            }
        }
    }
}

/// No descriptions at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDescriptions;

impl DescriptionLookup for NoDescriptions {
    fn lookup(&self, _name: &str) -> Option<String> {
        None
    }
}

impl DescriptionLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Component name for a source: base name without its last extension.
/// `templates/deploy.yml` -> `deploy`
pub fn component_name(source_id: &str) -> String {
    Path::new(source_id)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Extract one component record from a YAML document.
///
/// Only the first non-empty document of a multi-document stream is inspected
/// for `spec.inputs`, but every document has to parse.
pub fn extract(
    bytes: &[u8],
    source_id: &str,
    descriptions: &dyn DescriptionLookup,
) -> Result<Component, ExtractError> {
    let documents = parse_documents(bytes).map_err(|error| ExtractError::Parse {
        source_id: source_id.to_string(),
        error,
    })?;
    let header = documents.into_iter().find(|doc| !doc.is_null());

    let inputs = match header
        .as_ref()
        .and_then(|h| h.get("spec"))
        .and_then(|spec| spec.get("inputs"))
    {
        Some(Value::Mapping(raw)) => collate(raw),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            warn!("{}: spec.inputs is not a mapping, ignoring it", source_id);
            Vec::new()
        }
    };

    let name = component_name(source_id);
    let description = descriptions.lookup(&name).unwrap_or_default();
    debug!("Extracted {} with {} inputs", name, inputs.len());

    Ok(Component {
        name,
        description,
        inputs,
    })
}

/// Read and extract a component file.
pub fn extract_file(
    path: &Path,
    descriptions: &dyn DescriptionLookup,
) -> Result<Component, ExtractError> {
    let bytes = fs::read(path).map_err(|error| ExtractError::Read {
        path: path.to_path_buf(),
        error,
    })?;
    extract(&bytes, &path.to_string_lossy(), descriptions)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::pipeline::normalizer::DefaultValue;

    #[test]
    fn test_component_name() {
        assert_eq!(component_name("templates/deploy.yml"), "deploy");
        assert_eq!(component_name("/abs/path/build.yaml"), "build");
        assert_eq!(component_name("docker.build.yml"), "docker.build");
        assert_eq!(component_name("noext"), "noext");
    }

    #[test]
    fn test_extract_basic() {
        let yaml = r#"spec:
  inputs:
    app_name:
      description: "Application name"
    stage:
      description: "Pipeline stage"
      default: "build"
"#;
        let component =
            extract(yaml.as_bytes(), "templates/build.yml", &NoDescriptions).unwrap();
        assert_eq!(component.name, "build");
        assert_eq!(component.description, "");
        assert_eq!(
            component.inputs,
            vec![
                Input::new("app_name", "Application name", &DefaultValue::Absent),
                Input::new(
                    "stage",
                    "Pipeline stage",
                    &DefaultValue::Str("build".to_string())
                ),
            ]
        );
    }

    #[test]
    fn test_extract_multi_document() {
        let yaml = "spec:\n  inputs:\n    image: {default: 'alpine:3'}\n\
                    ---\njob:\n  script: [echo hi]\n";
        let component = extract(yaml.as_bytes(), "lint.yml", &NoDescriptions).unwrap();
        assert_eq!(component.inputs.len(), 1);
        assert_eq!(component.inputs[0].default_display(), "alpine:3");
    }

    #[test]
    fn test_leading_empty_documents_skipped() {
        let yaml = "---\n---\nspec:\n  inputs:\n    a: {}\n";
        let component = extract(yaml.as_bytes(), "late.yml", &NoDescriptions).unwrap();
        assert_eq!(component.inputs.len(), 1);
        assert_eq!(component.inputs[0].name, "a");
    }

    #[test]
    fn test_out_of_range_integer_default() {
        let yaml = "spec:\n  inputs:\n    build_id:\n      default: 12345678901234567890123\n";
        let component = extract(yaml.as_bytes(), "big.yml", &NoDescriptions).unwrap();
        assert!(!component.inputs[0].required());
        assert_eq!(component.inputs[0].default_display(), "12345678901234567890123");
    }

    #[test]
    fn test_extract_no_inputs_block() {
        for yaml in ["spec: {}\n", "job:\n  script: [true]\n", "spec:\n  inputs:\n", ""] {
            let component = extract(yaml.as_bytes(), "simple.yml", &NoDescriptions).unwrap();
            assert_eq!(component.name, "simple");
            assert!(component.inputs.is_empty(), "expected no inputs for {:?}", yaml);
        }
    }

    #[test]
    fn test_extract_invalid_yaml() {
        let err = extract(b"not: [valid: yaml: {{{}", "bad.yml", &NoDescriptions).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
        assert_eq!(err.source_id(), "bad.yml");
        assert!(err.to_string().contains("bad.yml"));
    }

    #[test]
    fn test_extract_invalid_second_document() {
        let yaml = "spec:\n  inputs: {}\n---\njob: [unclosed\n";
        assert!(extract(yaml.as_bytes(), "broken.yml", &NoDescriptions).is_err());
    }

    #[test]
    fn test_description_from_lookup() {
        let mut descriptions = HashMap::new();
        descriptions.insert("deploy".to_string(), "Deploys the app".to_string());
        let component = extract(b"spec:\n  inputs: {}\n", "deploy.yml", &descriptions).unwrap();
        assert_eq!(component.description, "Deploys the app");
    }

    #[test]
    fn test_extract_file_missing() {
        let err = extract_file(Path::new("/nonexistent/file.yml"), &NoDescriptions).unwrap_err();
        assert!(matches!(err, ExtractError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/file.yml"));
    }

    #[test]
    fn test_sibling_descriptions() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("deploy.md"), "  Deploys things.\n\n").unwrap();
        let lookup = SiblingDescriptions::new(dir.path());
        assert_eq!(lookup.lookup("deploy"), Some("Deploys things.".to_string()));
        assert_eq!(lookup.lookup("missing"), None);
    }
}
