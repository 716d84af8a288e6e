//! # Source Loading
//!
//! Resolves a file path or a reader to a parsed `serde_json::Value`.
//! Sources are JSON or YAML text; YAML is evaluated and converted to the
//! equivalent JSON tree. Jsonnet sources are recognised by extension and
//! rejected with [`SourceError::Unsupported`].
//!
//! ## Format Detection
//!
//! With [`SourceFormat::Auto`], `.json` is parsed as JSON, `.yaml`/`.yml`
//! as YAML, and anything else (including stdin) is tried as JSON first and
//! then as YAML. A source that is empty or only whitespace loads as `{}`.
//! When both parsers reject text that opens with `{` or `[`, the JSON
//! diagnostic is reported, since that text was almost certainly meant as
//! JSON.

use std::io::Read;
use std::path::Path;

use jsfill_core::SourceError;
use serde_json::Value;

/// Extensions of templating sources jsfill does not evaluate.
const UNSUPPORTED_EXTENSIONS: &[&str] = &["jsonnet", "libsonnet"];

/// How to interpret source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceFormat {
    /// Decide by file extension, then by content.
    #[default]
    Auto,
    Json,
    Yaml,
}

impl SourceFormat {
    fn for_path(self, path: &Path) -> Result<Self, SourceError> {
        if self != Self::Auto {
            return Ok(self);
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            e if UNSUPPORTED_EXTENSIONS.contains(&e) => Err(SourceError::Unsupported {
                source_name: path.display().to_string(),
                extension: e.to_string(),
            }),
            _ => Ok(Self::Auto),
        }
    }
}

/// Load and parse the source at `path`.
pub fn load_path(path: &Path, format: SourceFormat) -> Result<Value, SourceError> {
    let source_name = path.display().to_string();
    let format = format.for_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|io| SourceError::Read {
        source_name: source_name.clone(),
        io,
    })?;
    tracing::debug!(source = %source_name, ?format, bytes = text.len(), "read source");
    parse_text(&source_name, &text, format)
}

/// Load and parse a source from a reader such as stdin.
pub fn load_reader(
    source_name: &str,
    mut reader: impl Read,
    format: SourceFormat,
) -> Result<Value, SourceError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|io| SourceError::Read {
            source_name: source_name.to_string(),
            io,
        })?;
    tracing::debug!(source = %source_name, ?format, bytes = text.len(), "read source");
    parse_text(source_name, &text, format)
}

/// Parse source text in the given format.
pub fn parse_text(source_name: &str, text: &str, format: SourceFormat) -> Result<Value, SourceError> {
    if text.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    match format {
        SourceFormat::Json => parse_json(source_name, text),
        SourceFormat::Yaml => parse_yaml(source_name, text),
        SourceFormat::Auto => parse_json(source_name, text).or_else(|json_err| {
            tracing::trace!(source = %source_name, error = %json_err, "not JSON, trying YAML");
            parse_yaml(source_name, text).map_err(|yaml_err| {
                if text.trim_start().starts_with(|c: char| matches!(c, '{' | '[')) {
                    json_err
                } else {
                    yaml_err
                }
            })
        }),
    }
}

fn parse_json(source_name: &str, text: &str) -> Result<Value, SourceError> {
    serde_json::from_str(text).map_err(|e| SourceError::Parse {
        source_name: source_name.to_string(),
        format: "JSON",
        reason: e.to_string(),
    })
}

fn parse_yaml(source_name: &str, text: &str) -> Result<Value, SourceError> {
    let parse_error = |reason: String| SourceError::Parse {
        source_name: source_name.to_string(),
        format: "YAML",
        reason,
    };
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
    yaml_to_json_value(&yaml).map_err(parse_error)
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Scalar map keys are stringified; tags are dropped in favour of the
/// tagged value.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
