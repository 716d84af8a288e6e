//! # Conformance Report
//!
//! How far a caller's document strays from its schema without necessarily
//! failing validation: which fields had to be filled from defaults, and
//! which keys the schema never declares.
//!
//! An object schema that declares no properties (one accepted only for its
//! `default`) says nothing about its keys, so nothing beneath it is
//! reported as undeclared.

use jsfill_core::{JsonPath, SchemaNode};
use serde::Serialize;
use serde_json::Value;

/// A field the caller left out, and the default it received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultedField {
    pub path: JsonPath,
    pub value: Value,
}

/// Nonconformance found while filling one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conformance {
    /// Fields absent or `null` in the input that were filled from defaults.
    pub defaulted: Vec<DefaultedField>,
    /// Input keys with no matching property in the schema.
    pub undeclared: Vec<JsonPath>,
}

/// Collect every key of `user` that `schema` does not declare.
///
/// The walk follows objects on both sides; arrays are not descended into.
pub fn undeclared_keys(schema: &SchemaNode, user: &Value) -> Vec<JsonPath> {
    let mut out = Vec::new();
    collect_undeclared(schema, user, &JsonPath::root(), &mut out);
    out
}

fn collect_undeclared(schema: &SchemaNode, user: &Value, path: &JsonPath, out: &mut Vec<JsonPath>) {
    let (SchemaNode::Object { properties, .. }, Value::Object(map)) = (schema, user) else {
        return;
    };
    if properties.is_empty() {
        return;
    }
    for (key, value) in map {
        let key_path = path.child(key);
        match properties.get(key) {
            Some(field) => collect_undeclared(field, value, &key_path, out),
            None => out.push(key_path),
        }
    }
}
