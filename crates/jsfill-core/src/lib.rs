//! # jsfill-core — Foundational Types for jsfill
//!
//! This crate defines the types every other jsfill crate builds on. It
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed schema tree.** [`SchemaNode`] is a tagged variant
//!    (`Object`, `Array`, `Scalar`). Schema JSON is parsed into it once, so
//!    shape errors surface at parse time with a path instead of as failed
//!    runtime casts deep inside hydration.
//!
//! 2. **Paths are values.** [`JsonPath`] renders as a JSON Pointer
//!    (RFC 6901). Every shape error and every hydration note carries one.
//!
//! 3. **Structured errors.** [`JsfillError`] aggregates [`SourceError`] and
//!    [`SchemaShapeError`]; all use `thiserror`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jsfill-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod schema;

pub use error::{JsfillError, SchemaShapeError, SourceError};
pub use path::JsonPath;
pub use schema::SchemaNode;
