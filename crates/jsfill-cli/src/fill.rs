//! # Fill Command
//!
//! Loads the schema, fills the user document with defaults, validates the
//! result, and writes it out. Without an input path (or with `-`), the user
//! document is read from the supplied reader, which is stdin in the binary.
//!
//! By default only the first violation is printed, one line on stderr.
//! `--all-errors` prints every violation, one per line.
//!
//! `--conformance` controls how fields left to their defaults and input keys
//! the schema does not declare are treated: ignored (`off`), logged as
//! warnings (`warn`), or, for undeclared keys, reported as violations
//! (`require`).

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use jsfill_schema::{
    load_path, load_reader, to_pretty_json, Conformance, Outcome, Pipeline, SourceFormat,
};

use crate::{EXIT_INVALID, EXIT_OK};

/// Source name used in diagnostics for the fallback reader.
const STDIN_NAME: &str = "<stdin>";

/// Source format selection for `--format`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Detect by extension, then by content.
    #[default]
    Auto,
    /// Parse as JSON.
    Json,
    /// Parse as YAML.
    Yaml,
}

impl From<FormatArg> for SourceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => SourceFormat::Auto,
            FormatArg::Json => SourceFormat::Json,
            FormatArg::Yaml => SourceFormat::Yaml,
        }
    }
}

/// How strictly the input must match the schema's declared keys.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConformanceArg {
    /// Say nothing about defaulted or undeclared keys.
    #[default]
    Off,
    /// Warn for every defaulted field and every undeclared key.
    Warn,
    /// Warn as above, and treat undeclared keys as violations.
    Require,
}

/// Arguments for filling a document.
#[derive(Args, Debug, Clone)]
pub struct FillArgs {
    /// Schema file (JSON or YAML).
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Input document (JSON or YAML). Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Print every violation instead of only the first.
    #[arg(long)]
    pub all_errors: bool,

    /// Print the defaults hydrated from SCHEMA and exit.
    #[arg(long, conflicts_with = "input")]
    pub defaults_only: bool,

    /// Source format for both SCHEMA and INPUT.
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// Treatment of defaulted fields and keys missing from SCHEMA.
    #[arg(long, value_enum, default_value_t = ConformanceArg::Off)]
    pub conformance: ConformanceArg,
}

impl FillArgs {
    fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}

/// Execute the fill command.
///
/// Returns the process exit code: [`EXIT_OK`] when the document was written
/// to `out`, [`EXIT_INVALID`] when violations were written to `err`.
/// Source and schema failures are returned as errors.
pub fn run_fill(
    args: &FillArgs,
    stdin: impl Read,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8> {
    let format = SourceFormat::from(args.format);

    let pipeline = Pipeline::from_schema_path(&args.schema, format)
        .with_context(|| format!("failed to prepare schema {}", args.schema.display()))?;

    if args.defaults_only {
        let hydrated = pipeline.defaults();
        for path in &hydrated.unsupported {
            tracing::warn!(%path, "no default available for array field");
        }
        writeln!(out, "{}", to_pretty_json(&hydrated.into_value())?)?;
        return Ok(EXIT_OK);
    }

    let user = match args.input_path() {
        Some(path) => load_path(path, format)
            .with_context(|| format!("failed to load input {}", path.display()))?,
        None => load_reader(STDIN_NAME, stdin, format)
            .with_context(|| format!("failed to load input from {STDIN_NAME}"))?,
    };

    let (outcome, conformance) = pipeline.fill_reporting(user);
    if args.conformance != ConformanceArg::Off {
        warn_nonconformance(&conformance);
    }

    let mut problems: Vec<String> = match &outcome {
        Outcome::Valid(_) => Vec::new(),
        Outcome::Invalid(violations) => violations.violations().iter().map(ToString::to_string).collect(),
    };
    if args.conformance == ConformanceArg::Require {
        problems.extend(
            conformance
                .undeclared
                .iter()
                .map(|path| format!("{path}: key is not declared in the schema")),
        );
    }

    match outcome {
        Outcome::Valid(document) if problems.is_empty() => {
            writeln!(out, "{}", to_pretty_json(&document)?)?;
            Ok(EXIT_OK)
        }
        _ => {
            let shown = if args.all_errors { problems.len() } else { 1 };
            for problem in problems.iter().take(shown) {
                writeln!(err, "{problem}")?;
            }
            Ok(EXIT_INVALID)
        }
    }
}

fn warn_nonconformance(conformance: &Conformance) {
    for field in &conformance.defaulted {
        tracing::warn!(path = %field.path, default = %field.value, "missing from input, using default");
    }
    for path in &conformance.undeclared {
        tracing::warn!(%path, "present in input but not declared in schema");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SCHEMA: &str = r#"{
        "type": "object",
        "properties": {
            "name": {"type": "string", "default": "anon"},
            "tags": {"type": "array", "items": {"type": "string"}}
        }
    }"#;

    fn args(schema: &Path, input: Option<&Path>) -> FillArgs {
        FillArgs {
            schema: schema.to_path_buf(),
            input: input.map(Path::to_path_buf),
            all_errors: false,
            defaults_only: false,
            format: FormatArg::Auto,
            conformance: ConformanceArg::Off,
        }
    }

    fn run(args: &FillArgs, stdin: &str) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run_fill(args, stdin.as_bytes(), &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn fills_stdin_and_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        std::fs::write(&schema, SCHEMA).unwrap();

        let (code, out, err) = run(&args(&schema, None), "{}");
        assert_eq!(code, EXIT_OK);
        assert_eq!(out, "{\n    \"name\": \"anon\",\n    \"tags\": []\n}\n");
        assert!(err.is_empty());
    }

    #[test]
    fn reads_input_file_and_keeps_user_values() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        let input = dir.path().join("input.yaml");
        std::fs::write(&schema, SCHEMA).unwrap();
        std::fs::write(&input, "name: alice\n").unwrap();

        let (code, out, _) = run(&args(&schema, Some(&input)), "ignored");
        assert_eq!(code, EXIT_OK);
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc, serde_json::json!({"name": "alice", "tags": []}));
    }

    #[test]
    fn dash_means_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        std::fs::write(&schema, SCHEMA).unwrap();

        let (code, out, _) = run(&args(&schema, Some(Path::new("-"))), r#"{"tags": ["x"]}"#);
        assert_eq!(code, EXIT_OK);
        assert!(out.contains("\"x\""));
    }

    #[test]
    fn violation_goes_to_stderr_and_document_is_withheld() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        std::fs::write(&schema, SCHEMA).unwrap();

        let (code, out, err) = run(&args(&schema, None), r#"{"name": 42, "tags": [1, 2]}"#);
        assert_eq!(code, EXIT_INVALID);
        assert!(out.is_empty());
        assert_eq!(err.lines().count(), 1, "{err}");
    }

    #[test]
    fn all_errors_prints_every_violation() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        std::fs::write(&schema, SCHEMA).unwrap();

        let mut a = args(&schema, None);
        a.all_errors = true;
        let (code, _, err) = run(&a, r#"{"name": 42, "tags": [1, 2]}"#);
        assert_eq!(code, EXIT_INVALID);
        assert_eq!(err.lines().count(), 3, "{err}");
        assert!(err.contains("/name"));
        assert!(err.contains("/tags/1"));
    }

    #[test]
    fn defaults_only_skips_input() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        std::fs::write(&schema, SCHEMA).unwrap();

        let mut a = args(&schema, None);
        a.defaults_only = true;
        let (code, out, _) = run(&a, "this is not read");
        assert_eq!(code, EXIT_OK);
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc, serde_json::json!({"name": "anon", "tags": []}));
    }

    #[test]
    fn undeclared_keys_pass_unless_conformance_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        std::fs::write(&schema, SCHEMA).unwrap();
        let input = r#"{"name": "alice", "colour": "red"}"#;

        let mut a = args(&schema, None);
        a.conformance = ConformanceArg::Warn;
        let (code, out, err) = run(&a, input);
        assert_eq!(code, EXIT_OK);
        assert!(out.contains("\"colour\": \"red\""));
        assert!(err.is_empty());

        a.conformance = ConformanceArg::Require;
        let (code, out, err) = run(&a, input);
        assert_eq!(code, EXIT_INVALID);
        assert!(out.is_empty());
        assert_eq!(err, "/colour: key is not declared in the schema\n");
    }

    #[test]
    fn required_conformance_follows_violations() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        std::fs::write(&schema, SCHEMA).unwrap();

        let mut a = args(&schema, None);
        a.conformance = ConformanceArg::Require;
        a.all_errors = true;
        let (code, _, err) = run(&a, r#"{"name": 42, "extra": true}"#);
        assert_eq!(code, EXIT_INVALID);
        let lines: Vec<&str> = err.lines().collect();
        assert_eq!(lines.len(), 2, "{err}");
        assert!(lines[0].starts_with("/name: "));
        assert_eq!(lines[1], "/extra: key is not declared in the schema");
    }

    #[test]
    fn missing_schema_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let a = args(&dir.path().join("missing.json"), None);
        let err = run_fill(&a, "{}".as_bytes(), &mut Vec::<u8>::new(), &mut Vec::<u8>::new()).unwrap_err();
        assert!(format!("{err:#}").contains("missing.json"));
    }

    #[test]
    fn unparseable_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        let input = dir.path().join("input.json");
        std::fs::write(&schema, SCHEMA).unwrap();
        std::fs::write(&input, "{not json").unwrap();

        let err = run_fill(&args(&schema, Some(&input)), "".as_bytes(), &mut Vec::<u8>::new(), &mut Vec::<u8>::new())
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to load input"));
    }
}
