//! # Schema Validation
//!
//! Validation of merged documents against the full JSON Schema, backed by
//! the `jsonschema` crate. Hydration only reads a handful of keywords; the
//! validator sees every keyword the schema declares.
//!
//! ## Draft Selection
//!
//! The draft is detected from the schema's `$schema` keyword. Schemas
//! without one are validated as Draft 2020-12.
//!
//! ## Reference Resolution
//!
//! Cross-file `$ref`s are resolved by [`LocalSchemaRetriever`] from the
//! local filesystem only:
//!
//! - `file://` URIs are read directly.
//! - Relative references (resolved by `jsonschema` against its default
//!   `json-schema:///` base) are read relative to the schema's directory.
//! - Anything else, notably `http(s)://`, is refused.
//!
//! Referenced files may be JSON or YAML, like any other jsfill source.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use jsfill_core::JsfillError;

use crate::load::{load_path, SourceFormat};

/// Base URI `jsonschema` assigns to schemas without an `$id`.
const DEFAULT_BASE_URI: &str = "json-schema:///";

/// Retriever that reads referenced schemas from the local filesystem.
struct LocalSchemaRetriever {
    /// Directory relative references resolve against.
    base_dir: Option<PathBuf>,
}

impl LocalSchemaRetriever {
    fn resolve(&self, uri: &str) -> Result<PathBuf, String> {
        let uri = uri.split('#').next().unwrap_or(uri);

        if let Some(path) = uri.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }

        if let Some(relative) = uri.strip_prefix(DEFAULT_BASE_URI) {
            return match &self.base_dir {
                Some(dir) => Ok(dir.join(relative)),
                None => Err(format!(
                    "cannot resolve '{uri}': schema was not loaded from a file"
                )),
            };
        }

        Err(format!("remote schema retrieval is disabled: '{uri}'"))
    }
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let path = self.resolve(uri.as_str())?;
        tracing::debug!(uri = uri.as_str(), path = %path.display(), "retrieving referenced schema");
        Ok(load_path(&path, SourceFormat::Auto)?)
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations, in the order the validator
/// reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The first violation reported.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {v}")?;
        }
        Ok(())
    }
}

/// A compiled validator for one schema.
pub struct SchemaValidator {
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile a validator for `schema`.
    ///
    /// `base_dir` is the directory relative `$ref`s resolve against,
    /// normally the directory of the schema file.
    ///
    /// # Errors
    ///
    /// Returns [`JsfillError::ValidatorBuild`] if the schema is not a valid
    /// JSON Schema or a reference cannot be retrieved.
    pub fn new(schema: &Value, base_dir: Option<&Path>) -> Result<Self, JsfillError> {
        let retriever = LocalSchemaRetriever {
            base_dir: base_dir.map(Path::to_path_buf),
        };

        let validator = jsonschema::options()
            .with_retriever(retriever)
            .build(schema)
            .map_err(|e| JsfillError::ValidatorBuild(e.to_string()))?;

        Ok(Self { validator })
    }

    /// Validate a document, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationViolations`] if the document is invalid.
    pub fn validate(&self, instance: &Value) -> Result<(), ValidationViolations> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationViolations { violations })
        }
    }

    /// Returns true if the document has no violations.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}
