//! # jsfill-cli — Command-Line Interface
//!
//! Provides the `jsfill` binary:
//!
//! ```bash
//! jsfill schema.json input.json      # fill input.json
//! jsfill schema.yaml < input.yaml    # fill stdin
//! jsfill --defaults-only schema.json # print the hydrated defaults
//! ```
//!
//! ## Output Contract
//!
//! - stdout carries only the merged (or hydrated) document, 4-space
//!   indented JSON followed by a newline.
//! - stderr carries violations and logs.
//! - Exit code 0 on success, 1 when the merged document violates the
//!   schema, 2 when a source or the schema itself cannot be used.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; the pipeline lives in `jsfill-schema`.
//! - Handlers take their streams as arguments so they can be tested
//!   without a process boundary.

pub mod fill;

/// Exit code for a merged document that passed validation.
pub const EXIT_OK: u8 = 0;
/// Exit code for a merged document that violated the schema.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for source, schema, or validator-build errors.
pub const EXIT_ERROR: u8 = 2;
