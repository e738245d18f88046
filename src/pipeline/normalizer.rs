//! Turns loosely-typed input defaults into a display string and a required flag.
//! Total over every YAML value kind - nothing in here can fail.

use serde_yaml::{Mapping, Number, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Declared default of a component input.
///
/// `Absent` is distinct from `Str(String::new())`: an explicit empty string is
/// a real default and makes the input optional.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Absent,
    Str(String),
    Bool(bool),
    Number(Number),
    List(Vec<Value>),
    Map(Mapping),
    /// Tagged or otherwise unusual values (e.g. `!reference [...]`).
    Other(Value),
}

impl DefaultValue {
    /// Classify a raw YAML value. A missing key and an explicit `null` are both absent.
    pub fn from_yaml(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => DefaultValue::Absent,
            Some(Value::String(s)) => DefaultValue::Str(s.clone()),
            Some(Value::Bool(b)) => DefaultValue::Bool(*b),
            Some(Value::Number(n)) => DefaultValue::Number(n.clone()),
            Some(Value::Sequence(seq)) => DefaultValue::List(seq.clone()),
            Some(Value::Mapping(map)) => DefaultValue::Map(map.clone()),
            Some(other @ Value::Tagged(_)) => DefaultValue::Other(other.clone()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, DefaultValue::Absent)
    }
}

/// Normalize a default into `(required, display)`.
///
/// `required` is true only for [`DefaultValue::Absent`], and only then is
/// `display` empty by construction.
pub fn normalize(value: &DefaultValue) -> (bool, String) {
    let display = match value {
        DefaultValue::Absent => return (true, String::new()),
        DefaultValue::Str(s) => s.clone(),
        DefaultValue::Bool(b) => b.to_string(),
        DefaultValue::Number(n) => n.to_string(),
        DefaultValue::List(items) => inline_code(&serde_json::Value::Array(
            items.iter().map(to_canonical_json).collect(),
        )),
        DefaultValue::Map(map) => inline_code(&mapping_to_json(map)),
        DefaultValue::Other(raw) => generic_text(raw),
    };
    (false, display)
}

/// Compact JSON wrapped in backticks so markdown tables survive `|`, `*` etc.
fn inline_code(json: &serde_json::Value) -> String {
    format!("`{}`", json)
}

/// Convert a YAML value into JSON with deterministic key ordering.
fn to_canonical_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(seq) => {
            serde_json::Value::Array(seq.iter().map(to_canonical_json).collect())
        }
        Value::Mapping(map) => mapping_to_json(map),
        Value::Tagged(tagged) => to_canonical_json(&tagged.value),
    }
}

fn mapping_to_json(map: &Mapping) -> serde_json::Value {
    // Sort through a BTreeMap so the result does not depend on whether
    // serde_json was built with `preserve_order`.
    let mut sorted = BTreeMap::new();
    for (k, v) in map {
        let key = key_text(k);
        if sorted.insert(key.clone(), to_canonical_json(v)).is_some() {
            // e.g. `1` and `'1'`; the later entry wins
            warn!("Default mapping has more than one key rendering as {:?}", key);
        }
    }
    serde_json::Value::Object(sorted.into_iter().collect())
}

fn number_to_json(n: &Number) -> serde_json::Value {
    if let Some(i) = n.as_i64() {
        serde_json::Value::from(i)
    } else if let Some(u) = n.as_u64() {
        serde_json::Value::from(u)
    } else {
        // NaN and infinities have no JSON form
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(n.to_string()))
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => to_canonical_json(other).to_string(),
    }
}

fn generic_text(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", value))
}
