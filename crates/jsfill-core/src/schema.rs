//! # Schema Tree
//!
//! [`SchemaNode`] is the hydration-relevant view of a JSON Schema: the
//! `type`, `properties`, `items`, and `default` keywords, plus local
//! `$ref` indirection. Every other keyword is ignored here and left to the
//! validator, which works from the original schema value.
//!
//! ## Shape Rules
//!
//! - An `object` node needs a `properties` mapping unless it carries a
//!   `default`.
//! - An `array` node needs an `items` schema unless it carries a `default`.
//! - Every node reached through `properties` or `items` must be a JSON
//!   object.
//!
//! Violations are reported as [`SchemaShapeError`] with the pointer of the
//! offending node.
//!
//! ## References
//!
//! A `$ref` starting with `#` is a JSON Pointer into the same schema and is
//! inlined at parse time. The fragment is percent-decoded first, so
//! `#/definitions/a%20b` names the `a b` definition. A `default` next to the
//! `$ref` overrides the target's own.
//!
//! A reference that re-enters a definition already being expanded (a
//! recursive tree schema, say) is not inlined again: it becomes an untyped
//! scalar, like any field without a `type`. Non-local references become an
//! untyped scalar as well; the validator still resolves them.

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

use crate::error::SchemaShapeError;
use crate::path::JsonPath;

/// A parsed schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// `"type": "object"` with its property schemas.
    Object {
        properties: BTreeMap<String, SchemaNode>,
        default: Option<Value>,
    },
    /// `"type": "array"` with its element schema.
    Array {
        items: Box<SchemaNode>,
        default: Option<Value>,
    },
    /// Any other `type`, a union of types, or no `type` at all.
    Scalar {
        type_tag: Option<String>,
        default: Option<Value>,
    },
}

impl SchemaNode {
    /// Parse a schema value, resolving local references against `root`
    /// itself.
    pub fn from_value(root: &Value) -> Result<Self, SchemaShapeError> {
        let mut parser = Parser {
            root,
            active_refs: Vec::new(),
        };
        parser.parse(root, &JsonPath::root())
    }

    /// The node's declared `default`, if any.
    pub fn default_value(&self) -> Option<&Value> {
        match self {
            Self::Object { default, .. }
            | Self::Array { default, .. }
            | Self::Scalar { default, .. } => default.as_ref(),
        }
    }

    /// The node's `type` keyword as a single tag.
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            Self::Object { .. } => Some("object"),
            Self::Array { .. } => Some("array"),
            Self::Scalar { type_tag, .. } => type_tag.as_deref(),
        }
    }

    fn with_default_override(mut self, replacement: Option<Value>) -> Self {
        if let Some(value) = replacement {
            match &mut self {
                Self::Object { default, .. }
                | Self::Array { default, .. }
                | Self::Scalar { default, .. } => *default = Some(value),
            }
        }
        self
    }
}

struct Parser<'a> {
    root: &'a Value,
    /// References currently being expanded, innermost last.
    active_refs: Vec<String>,
}

impl<'a> Parser<'a> {
    fn parse(&mut self, node: &'a Value, path: &JsonPath) -> Result<SchemaNode, SchemaShapeError> {
        let map = node
            .as_object()
            .ok_or_else(|| SchemaShapeError::NotAnObject { path: path.clone() })?;
        let default = map.get("default").cloned();

        if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
            return self.parse_ref(reference, default, path);
        }

        match TypeKeyword::of(map) {
            TypeKeyword::Object => {
                let properties = match map.get("properties") {
                    Some(Value::Object(props)) => self.parse_properties(props, path)?,
                    None if default.is_some() => BTreeMap::new(),
                    _ => return Err(SchemaShapeError::MissingProperties { path: path.clone() }),
                };
                Ok(SchemaNode::Object {
                    properties,
                    default,
                })
            }
            TypeKeyword::Array => {
                let items = match map.get("items") {
                    Some(items) if items.is_object() => self.parse(items, &path.child("items"))?,
                    None if default.is_some() => SchemaNode::Scalar {
                        type_tag: None,
                        default: None,
                    },
                    _ => return Err(SchemaShapeError::MissingItems { path: path.clone() }),
                };
                Ok(SchemaNode::Array {
                    items: Box::new(items),
                    default,
                })
            }
            TypeKeyword::Other(type_tag) => Ok(SchemaNode::Scalar { type_tag, default }),
        }
    }

    fn parse_properties(
        &mut self,
        props: &'a Map<String, Value>,
        path: &JsonPath,
    ) -> Result<BTreeMap<String, SchemaNode>, SchemaShapeError> {
        let props_path = path.child("properties");
        props
            .iter()
            .map(|(key, field)| Ok((key.clone(), self.parse(field, &props_path.child(key))?)))
            .collect()
    }

    fn parse_ref(
        &mut self,
        reference: &str,
        default: Option<Value>,
        path: &JsonPath,
    ) -> Result<SchemaNode, SchemaShapeError> {
        let opaque = |default: Option<Value>| SchemaNode::Scalar {
            type_tag: None,
            default,
        };

        let Some(fragment) = reference.strip_prefix('#') else {
            return Ok(opaque(default));
        };

        // Recursive definitions stop here; hydration has nothing to descend into.
        if self.active_refs.iter().any(|active| active == reference) {
            return Ok(opaque(default));
        }

        let unresolved = || SchemaShapeError::UnresolvedRef {
            path: path.clone(),
            reference: reference.to_string(),
        };
        let pointer = percent_decode_str(fragment)
            .decode_utf8()
            .map_err(|_| unresolved())?;
        let root = self.root;
        let target = root.pointer(&pointer).ok_or_else(unresolved)?;

        self.active_refs.push(reference.to_string());
        let resolved = self.parse(target, path);
        self.active_refs.pop();

        Ok(resolved?.with_default_override(default))
    }
}

/// The `type` keyword, reduced to what hydration distinguishes.
enum TypeKeyword {
    Object,
    Array,
    Other(Option<String>),
}

impl TypeKeyword {
    fn of(map: &Map<String, Value>) -> Self {
        match map.get("type") {
            Some(Value::String(tag)) if tag == "object" => Self::Object,
            Some(Value::String(tag)) if tag == "array" => Self::Array,
            Some(Value::String(tag)) => Self::Other(Some(tag.clone())),
            // A union such as ["string", "null"] is never unwrapped.
            Some(Value::Array(tags)) => Self::Other(
                tags.iter()
                    .filter_map(Value::as_str)
                    .find(|tag| *tag != "null")
                    .map(str::to_string),
            ),
            _ => Self::Other(None),
        }
    }
}
