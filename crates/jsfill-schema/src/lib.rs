//! # jsfill-schema — Hydrate, Merge, Validate
//!
//! The document pipeline behind the `jsfill` CLI:
//!
//! 1. [`load`] turns a JSON or YAML source into a `serde_json::Value`.
//! 2. [`hydrate`] derives a document of defaults from a parsed
//!    [`SchemaNode`](jsfill_core::SchemaNode).
//! 3. [`merge`] fills the gaps of the caller's document with those defaults;
//!    caller values always win.
//! 4. [`validate`] checks the merged document against the full schema with
//!    the `jsonschema` crate.
//!
//! [`Pipeline`] sequences the four stages for one run, and [`conformance`]
//! reports the defaults applied and the input keys the schema lacks.
//!
//! ## Crate Policy
//!
//! - Depends only on `jsfill-core` internally.
//! - Hydration and merge are pure functions over owned trees; only the
//!   loader and the validator's file retriever touch the filesystem.
//! - No network I/O: remote `$ref` retrieval is refused.

pub mod conformance;
pub mod hydrate;
pub mod load;
pub mod merge;
pub mod pipeline;
pub mod render;
pub mod validate;

pub use conformance::{Conformance, DefaultedField};
pub use hydrate::{hydrate, Hydrated};
pub use load::{load_path, load_reader, SourceFormat};
pub use merge::{merge_recording_defaults, merge_with_defaults};
pub use pipeline::{Outcome, Pipeline};
pub use render::to_pretty_json;
pub use validate::{SchemaValidator, ValidationViolations, Violation};
