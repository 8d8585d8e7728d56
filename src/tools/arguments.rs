//! Raw arguments of a single tool call.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::error::AgentError;

/// Arguments decoded from the model's function call.
///
/// Declared arguments are strings, but the model may send other JSON scalars;
/// they are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    value: serde_json::Map<String, serde_json::Value>,
}

impl ToolArguments {
    pub fn new(value: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { value }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Accept an object, `null`, or a string holding a JSON object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, AgentError> {
        match value {
            serde_json::Value::Object(map) => Ok(Self::new(map)),
            serde_json::Value::Null => Ok(Self::empty()),
            serde_json::Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(Self::empty());
                }
                let parsed: serde_json::Value = serde_json::from_str(trimmed)?;
                match parsed {
                    serde_json::Value::Object(map) => Ok(Self::new(map)),
                    other => Err(AgentError::InvalidArgument(format!(
                        "expected object arguments, got {}",
                        json_type_name(&other)
                    ))),
                }
            }
            other => Err(AgentError::InvalidArgument(format!(
                "expected object arguments, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Get the raw argument map.
    pub fn raw(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }

    /// JSON payload for an RPC, or an empty string when there are no
    /// arguments.
    ///
    /// Keys keep the order the model sent them in. Separators are `", "` and
    /// `": "`, and non-ASCII characters are written as `\uXXXX` escapes, so
    /// `{"x":"1"}` is sent as `{"x": "1"}`.
    pub fn to_payload(&self) -> Result<String, AgentError> {
        if self.value.is_empty() {
            return Ok(String::new());
        }

        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
        self.value.serialize(&mut serializer)?;
        String::from_utf8(out).map_err(|e| AgentError::InvalidArgument(e.to_string()))
    }

    /// Copy of the arguments with `key` removed, plus the removed value.
    /// The remaining keys keep their order.
    pub fn split_off(&self, key: &str) -> (Option<serde_json::Value>, serde_json::Map<String, serde_json::Value>) {
        let taken = self.value.get(key).cloned();
        let rest = self
            .value
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        (taken, rest)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for ToolArguments {
    fn from(value: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::new(value)
    }
}

/// Render a JSON scalar the way it should appear in a URL or query string.
///
/// Strings are used verbatim; everything else uses its JSON text.
pub fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Writes `", "` and `": "` between items and escapes everything outside
/// printable ASCII.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if (' '..='~').contains(&ch) {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: serde_json::Value) -> ToolArguments {
        ToolArguments::from_value(value).expect("arguments should parse")
    }

    #[test]
    fn empty_arguments_produce_empty_payload() {
        assert_eq!(ToolArguments::empty().to_payload().unwrap(), "");
        assert_eq!(args(json!(null)).to_payload().unwrap(), "");
    }

    #[test]
    fn payload_uses_spaced_separators() {
        let payload = args(json!({"x": "1"})).to_payload().unwrap();
        assert_eq!(payload, r#"{"x": "1"}"#);
    }

    #[test]
    fn payload_keeps_key_order_and_nests_separators() {
        let parsed = args(json!(r#"{"zone": "b", "items": [1, 2], "meta": {"on": true}}"#));
        assert_eq!(
            parsed.to_payload().unwrap(),
            r#"{"zone": "b", "items": [1, 2], "meta": {"on": true}}"#
        );
    }

    #[test]
    fn payload_escapes_non_ascii() {
        let payload = args(json!({"name": "Café 🙂", "quote": "a\"b"})).to_payload().unwrap();
        assert_eq!(payload, r#"{"name": "Caf\u00e9 \ud83d\ude42", "quote": "a\"b"}"#);
    }

    #[test]
    fn accepts_stringified_object() {
        let parsed = args(json!(r#"{"room": "kitchen"}"#));
        assert_eq!(parsed.get_str("room"), Some("kitchen"));
        assert!(args(json!("  ")).is_empty());
    }

    #[test]
    fn rejects_non_object_values() {
        let err = ToolArguments::from_value(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("expected object arguments, got array"));
    }

    #[test]
    fn split_off_leaves_original_untouched() {
        let original = args(json!({"id": "42", "foo": "bar"}));
        let (id, rest) = original.split_off("id");

        assert_eq!(id, Some(json!("42")));
        assert_eq!(serde_json::Value::Object(rest), json!({"foo": "bar"}));
        assert_eq!(original.get_str("id"), Some("42"));
    }

    #[test]
    fn split_off_keeps_remaining_order() {
        let original = args(json!(r#"{"z": "1", "id": "7", "a": "2"}"#));
        let (_, rest) = original.split_off("id");

        let keys: Vec<&str> = rest.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn scalar_text_renders_numbers_without_quotes() {
        assert_eq!(scalar_text(&json!(42)), "42");
        assert_eq!(scalar_text(&json!("abc")), "abc");
        assert_eq!(scalar_text(&json!(true)), "true");
    }
}
