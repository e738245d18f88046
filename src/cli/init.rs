use anyhow::Result;
use std::path::Path;

use crate::render::{self, DEFAULT_TEMPLATE};

/// Write the bundled README template into the repository if it has none.
pub fn run(path: &str, template: &str) -> Result<bool> {
    let template_path = Path::new(path).join(template);
    let created = render::ensure_template(&template_path, DEFAULT_TEMPLATE)?;
    if created {
        println!("Created default {}", template);
    } else {
        println!("{} already exists, leaving it untouched", template_path.display());
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_default_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_str().unwrap();

        assert!(run(path, "README.md.tmpl").unwrap());
        let written = fs::read_to_string(dir.path().join("README.md.tmpl")).unwrap();
        assert_eq!(written, DEFAULT_TEMPLATE);

        fs::write(dir.path().join("README.md.tmpl"), "custom").unwrap();
        assert!(!run(path, "README.md.tmpl").unwrap());
        assert_eq!(
            fs::read_to_string(dir.path().join("README.md.tmpl")).unwrap(),
            "custom"
        );
    }
}
