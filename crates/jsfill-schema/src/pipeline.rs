//! # Fill Pipeline
//!
//! One run of jsfill, start to finish:
//!
//! 1. load the schema and parse its [`SchemaNode`] tree;
//! 2. hydrate the document of defaults;
//! 3. load the user document;
//! 4. merge the defaults beneath it;
//! 5. validate the merged document.
//!
//! Steps 1 and 3 fail fatally with [`JsfillError`]. Validation violations
//! are not errors: they are reported as [`Outcome::Invalid`] and the merged
//! document is dropped.
//!
//! [`Pipeline::fill_reporting`] also returns a [`Conformance`] report of
//! the defaults that were applied and the input keys the schema does not
//! declare.
//!
//! The validator is compiled when the pipeline is built, so a schema the
//! validator rejects fails before any input is read.

use std::path::Path;

use jsfill_core::{JsfillError, SchemaNode};
use serde_json::Value;

use crate::conformance::{undeclared_keys, Conformance, DefaultedField};
use crate::hydrate::{hydrate, Hydrated};
use crate::load::{load_path, SourceFormat};
use crate::merge::merge_recording_defaults;
use crate::validate::{SchemaValidator, ValidationViolations};

/// The result of filling one user document.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The merged document passed validation.
    Valid(Value),
    /// The merged document violated the schema and is not emitted.
    Invalid(ValidationViolations),
}

/// A loaded schema, ready to fill user documents.
#[derive(Debug)]
pub struct Pipeline {
    schema: SchemaNode,
    validator: SchemaValidator,
}

impl Pipeline {
    /// Load the schema at `path` and prepare the pipeline.
    ///
    /// Relative `$ref`s resolve against the schema file's directory.
    pub fn from_schema_path(path: &Path, format: SourceFormat) -> Result<Self, JsfillError> {
        let schema = load_path(path, format)?;
        tracing::info!(schema = %path.display(), "loaded schema");
        Self::from_schema_value(&schema, path.parent())
    }

    /// Prepare the pipeline from an already-parsed schema.
    pub fn from_schema_value(schema: &Value, base_dir: Option<&Path>) -> Result<Self, JsfillError> {
        let node = SchemaNode::from_value(schema)?;
        let validator = SchemaValidator::new(schema, base_dir)?;
        Ok(Self {
            schema: node,
            validator,
        })
    }

    /// Hydrate the document of defaults for this schema.
    pub fn defaults(&self) -> Hydrated {
        let hydrated = hydrate(&self.schema);
        tracing::debug!(
            fields = hydrated.document.len(),
            unsupported = hydrated.unsupported.len(),
            "hydrated defaults"
        );
        hydrated
    }

    /// Merge defaults beneath `user` and validate the result.
    pub fn fill(&self, user: Value) -> Outcome {
        self.fill_reporting(user).0
    }

    /// [`fill`](Self::fill), also reporting how the input departed from
    /// the schema.
    pub fn fill_reporting(&self, user: Value) -> (Outcome, Conformance) {
        let undeclared = undeclared_keys(&self.schema, &user);
        let defaults = self.defaults();
        let (merged, installed) = merge_recording_defaults(user, &defaults.document);

        let defaulted = installed
            .into_iter()
            .map(|path| {
                let value = merged.pointer(&path.to_pointer()).cloned().unwrap_or(Value::Null);
                DefaultedField { path, value }
            })
            .collect();
        let conformance = Conformance {
            defaulted,
            undeclared,
        };
        tracing::debug!(
            defaulted = conformance.defaulted.len(),
            undeclared = conformance.undeclared.len(),
            "merged defaults"
        );

        let outcome = match self.validator.validate(&merged) {
            Ok(()) => {
                tracing::info!("merged document passed validation");
                Outcome::Valid(merged)
            }
            Err(violations) => {
                tracing::info!(count = violations.len(), "merged document failed validation");
                Outcome::Invalid(violations)
            }
        };
        (outcome, conformance)
    }
}
