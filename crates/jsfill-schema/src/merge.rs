//! # Precedence Merge
//!
//! Fills the gaps of a caller's document with hydrated defaults.
//!
//! ## Invariant
//!
//! Every value the caller supplied, present and non-null, survives the
//! merge unchanged at every depth. Defaults only land where the caller's
//! document has no key or an explicit `null`. When both sides hold an
//! object the merge recurses; any other pairing (arrays, scalars, or a
//! type mismatch) keeps the caller's value as-is.

use jsfill_core::JsonPath;
use serde_json::{Map, Value};

/// Merge `defaults` beneath `user`.
///
/// A `null` user document is treated as empty. A user document of any
/// other non-object type is returned unchanged; the validator decides
/// whether it is acceptable.
pub fn merge_with_defaults(user: Value, defaults: &Map<String, Value>) -> Value {
    merge_recording_defaults(user, defaults).0
}

/// Like [`merge_with_defaults`], also returning the path of every default
/// that was installed.
///
/// A default object installed whole is recorded once, at its own path.
pub fn merge_recording_defaults(
    user: Value,
    defaults: &Map<String, Value>,
) -> (Value, Vec<JsonPath>) {
    let mut installed = Vec::new();
    let merged = match user {
        Value::Object(mut target) => {
            fill_gaps(&mut target, defaults, &JsonPath::root(), &mut installed);
            Value::Object(target)
        }
        Value::Null => {
            installed.extend(defaults.keys().map(|key| JsonPath::root().child(key)));
            Value::Object(defaults.clone())
        }
        other => {
            tracing::debug!(
                kind = value_kind(&other),
                "user document is not an object; defaults not applied"
            );
            other
        }
    };
    (merged, installed)
}

/// Install every default whose key is absent or null in `target`,
/// recursing where both sides are objects.
fn fill_gaps(
    target: &mut Map<String, Value>,
    defaults: &Map<String, Value>,
    path: &JsonPath,
    installed: &mut Vec<JsonPath>,
) {
    for (key, default) in defaults {
        let slot = target.entry(key.clone()).or_insert(Value::Null);
        if slot.is_null() {
            *slot = default.clone();
            installed.push(path.child(key));
        } else if let (Value::Object(existing), Value::Object(nested)) = (slot, default) {
            fill_gaps(existing, nested, &path.child(key), installed);
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-z0-9 ]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                json_object(inner),
            ]
        })
    }

    /// Objects over a small key alphabet so user and default keys collide.
    fn json_object(inner: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
        prop::collection::btree_map("[a-e]", inner, 0..5)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    }

    fn object_map() -> impl Strategy<Value = Map<String, Value>> {
        json_object(json_value()).prop_map(|v| match v {
            Value::Object(map) => map,
            _ => Map::new(),
        })
    }

    /// Every non-null leaf of `user` appears unchanged in `merged`.
    fn user_values_preserved(user: &Value, merged: &Value) -> bool {
        match (user, merged) {
            (Value::Object(u), Value::Object(m)) => u.iter().all(|(key, value)| {
                value.is_null() || m.get(key).is_some_and(|mv| user_values_preserved(value, mv))
            }),
            (u, m) => u == m,
        }
    }

    /// Every default lands where `user` had no key or a null.
    fn gaps_filled(user: &Map<String, Value>, defaults: &Map<String, Value>, merged: &Map<String, Value>) -> bool {
        defaults.iter().all(|(key, default)| match user.get(key) {
            None | Some(Value::Null) => merged.get(key) == Some(default),
            Some(Value::Object(u)) => match (default, merged.get(key)) {
                (Value::Object(d), Some(Value::Object(m))) => gaps_filled(u, d, m),
                _ => true,
            },
            Some(_) => true,
        })
    }

    proptest! {
        /// Defaults never overwrite a present, non-null user value.
        #[test]
        fn merge_preserves_user_values(user in object_map(), defaults in object_map()) {
            let user = Value::Object(user);
            let merged = merge_with_defaults(user.clone(), &defaults);
            prop_assert!(user_values_preserved(&user, &merged), "user {user} merged {merged}");
        }

        /// Every absent or null user path receives the default.
        #[test]
        fn merge_fills_every_gap(user in object_map(), defaults in object_map()) {
            let merged = merge_with_defaults(Value::Object(user.clone()), &defaults);
            prop_assert!(merged.is_object());
            let merged = merged.as_object().cloned().unwrap_or_default();
            prop_assert!(gaps_filled(&user, &defaults, &merged));
        }

        /// Merging with no defaults is the identity.
        #[test]
        fn merge_with_empty_defaults_is_identity(user in object_map()) {
            let user = Value::Object(user);
            prop_assert_eq!(merge_with_defaults(user.clone(), &Map::new()), user);
        }
    }
}
