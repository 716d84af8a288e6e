//! Output rendering: 4-space indented JSON.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

const INDENT: &[u8] = b"    ";

/// Serialize `value` as JSON indented with four spaces, without a
/// trailing newline.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn indents_with_four_spaces() {
        let out = to_pretty_json(&json!({"name": "anon", "tags": []})).unwrap();
        assert_eq!(out, "{\n    \"name\": \"anon\",\n    \"tags\": []\n}");
    }

    #[test]
    fn nested_levels_indent_further() {
        let out = to_pretty_json(&json!({"a": {"b": [1]}})).unwrap();
        assert_eq!(out, "{\n    \"a\": {\n        \"b\": [\n            1\n        ]\n    }\n}");
    }
}
