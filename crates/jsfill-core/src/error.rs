//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout jsfill. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Source errors name the source that failed (a path or `<stdin>`).
//! - Schema shape errors name the JSON Pointer of the offending schema node.
//! - Every variant here is fatal to a run. Validation violations are not
//!   errors at this level; they are an outcome of the pipeline.

use thiserror::Error;

use crate::path::JsonPath;

/// Top-level error type for jsfill.
#[derive(Error, Debug)]
pub enum JsfillError {
    /// A schema or input source could not be loaded.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// The schema tree is malformed for hydration.
    #[error("schema shape error: {0}")]
    SchemaShape(#[from] SchemaShapeError),

    /// The validator could not be compiled from the schema.
    #[error("validator build error: {0}")]
    ValidatorBuild(String),
}

/// A schema or input document could not be loaded or evaluated to JSON.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source could not be read.
    #[error("cannot read {source_name}: {io}")]
    Read {
        /// Path of the source, or `<stdin>`.
        source_name: String,
        /// Underlying IO failure.
        #[source]
        io: std::io::Error,
    },

    /// The source text is not valid in the selected format.
    #[error("cannot parse {source_name} as {format}: {reason}")]
    Parse {
        /// Path of the source, or `<stdin>`.
        source_name: String,
        /// Format the text was parsed as.
        format: &'static str,
        /// Parser diagnostic.
        reason: String,
    },

    /// The source is in a format jsfill does not evaluate.
    #[error("unsupported source format '.{extension}' for {source_name}")]
    Unsupported {
        /// Path of the source.
        source_name: String,
        /// File extension without the leading dot.
        extension: String,
    },
}

/// The schema does not have the shape hydration requires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaShapeError {
    /// An `object` node has no `properties` mapping.
    #[error("object schema at {path} has no 'properties' mapping")]
    MissingProperties {
        /// Pointer to the object node.
        path: JsonPath,
    },

    /// An `array` node has no `items` schema.
    #[error("array schema at {path} has no 'items' schema")]
    MissingItems {
        /// Pointer to the array node.
        path: JsonPath,
    },

    /// A schema node is not a JSON object.
    #[error("schema node at {path} is not an object")]
    NotAnObject {
        /// Pointer to the node.
        path: JsonPath,
    },

    /// A local `$ref` points at nothing.
    #[error("unresolved reference '{reference}' at {path}")]
    UnresolvedRef {
        /// Pointer to the node holding the reference.
        path: JsonPath,
        /// The `$ref` value.
        reference: String,
    },
}

impl SchemaShapeError {
    /// Pointer to the offending schema node.
    pub fn path(&self) -> &JsonPath {
        match self {
            Self::MissingProperties { path }
            | Self::MissingItems { path }
            | Self::NotAnObject { path }
            | Self::UnresolvedRef { path, .. } => path,
        }
    }
}
