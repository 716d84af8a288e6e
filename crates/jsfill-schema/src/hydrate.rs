//! # Default Hydration
//!
//! Derives a document of defaults from a [`SchemaNode`] alone, with no
//! caller input. The root object is unwrapped one level: the document's
//! keys are the root's property names.
//!
//! For each property, in order of precedence:
//!
//! 1. a declared `default` is used verbatim, whatever the property's type;
//! 2. an `object` recurses into a nested document;
//! 3. an `array` of `number`, `integer`, `string`, or `boolean` elements
//!    becomes `[]`;
//! 4. any other scalar becomes `null`.
//!
//! Arrays of any other element type get no entry at all. Their paths are
//! collected in [`Hydrated::unsupported`] so callers can see which fields
//! were left without a default.

use std::collections::BTreeMap;

use jsfill_core::{JsonPath, SchemaNode};
use serde_json::{Map, Value};

/// Element types whose arrays hydrate to an empty array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementType {
    Number,
    String,
    Boolean,
}

impl ElementType {
    fn from_tag(tag: Option<&str>) -> Option<Self> {
        match tag? {
            "number" | "integer" => Some(Self::Number),
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// The result of hydrating a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hydrated {
    /// The document of defaults.
    pub document: Map<String, Value>,
    /// Document paths of array fields with no typed-empty default.
    pub unsupported: Vec<JsonPath>,
}

impl Hydrated {
    /// Consumes self and returns the document as a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.document)
    }
}

/// Hydrate a document of defaults from a schema.
///
/// A root that is not an `object` schema hydrates to an empty document.
pub fn hydrate(schema: &SchemaNode) -> Hydrated {
    let mut unsupported = Vec::new();
    let document = match schema {
        SchemaNode::Object { properties, .. } => {
            hydrate_properties(properties, &JsonPath::root(), &mut unsupported)
        }
        SchemaNode::Array { .. } | SchemaNode::Scalar { .. } => Map::new(),
    };
    Hydrated {
        document,
        unsupported,
    }
}

fn hydrate_properties(
    properties: &BTreeMap<String, SchemaNode>,
    path: &JsonPath,
    unsupported: &mut Vec<JsonPath>,
) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, field) in properties {
        let field_path = path.child(key);

        if let Some(default) = field.default_value() {
            out.insert(key.clone(), default.clone());
            continue;
        }

        match field {
            SchemaNode::Object { properties, .. } => {
                let nested = hydrate_properties(properties, &field_path, unsupported);
                out.insert(key.clone(), Value::Object(nested));
            }
            SchemaNode::Array { items, .. } => match ElementType::from_tag(items.type_tag()) {
                Some(element) => {
                    tracing::trace!(path = %field_path, ?element, "typed-empty array");
                    out.insert(key.clone(), Value::Array(Vec::new()));
                }
                None => {
                    tracing::debug!(
                        path = %field_path,
                        element_type = items.type_tag().unwrap_or("<none>"),
                        "no default available for array elements"
                    );
                    unsupported.push(field_path);
                }
            },
            SchemaNode::Scalar { .. } => {
                out.insert(key.clone(), Value::Null);
            }
        }
    }
    out
}
