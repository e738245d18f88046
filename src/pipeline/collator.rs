use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::cmp::Ordering;

use crate::pipeline::normalizer::{normalize, DefaultValue};

/// One declared input of a component, ready for rendering.
///
/// `required` and `default` are derived together from the raw default, so
/// there is no way to build an input that is required but has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Input {
    pub name: String,
    pub description: String,
    required: bool,
    /// Display form of the default; empty iff `required`.
    default: String,
}

impl Input {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        default: &DefaultValue,
    ) -> Self {
        let (required, default) = normalize(default);
        Self {
            name: name.into(),
            description: description.into(),
            required,
            default,
        }
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn default_display(&self) -> &str {
        &self.default
    }
}

/// Required inputs first, then by name.
fn input_order(a: &Input, b: &Input) -> Ordering {
    b.required
        .cmp(&a.required)
        .then_with(|| a.name.cmp(&b.name))
}

/// Build the ordered input list from a raw `spec.inputs` mapping.
///
/// Entries whose spec is not a mapping (e.g. `name:` with nothing after it)
/// are kept as required inputs without a description.
pub fn collate(raw: &Mapping) -> Vec<Input> {
    let mut inputs: Vec<Input> = raw
        .iter()
        .map(|(key, spec)| {
            let name = match key {
                Value::String(s) => s.clone(),
                other => serde_yaml::to_string(other)
                    .map(|s| s.trim_end().to_string())
                    .unwrap_or_default(),
            };
            let description = spec
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default();
            Input::new(name, description, &DefaultValue::from_yaml(spec.get("default")))
        })
        .collect();

    inputs.sort_by(input_order);
    inputs
}
