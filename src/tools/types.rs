//! Model-facing tool schemas.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Strict function-call schema derived from a tool descriptor.
///
/// Every declared argument is a required string property and no other
/// properties are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    /// JSON Schema object describing the parameters.
    pub parameters: serde_json::Value,
}

impl ToolSchema {
    /// Names listed under `parameters.required`.
    pub fn required(&self) -> Vec<&str> {
        self.parameters["required"]
            .as_array()
            .map(|names| names.iter().filter_map(|n| n.as_str()).collect())
            .unwrap_or_default()
    }

    /// Whether the schema rejects undeclared arguments.
    pub fn is_strict(&self) -> bool {
        self.parameters["additionalProperties"] == serde_json::Value::Bool(false)
    }

    /// The `{"type": "function", ...}` shape handed to the model's tool API.
    pub fn to_function_json(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters,
        })
    }
}

/// Compile a tool's name, description and string arguments into a schema.
///
/// Each key of `args` becomes a required string property whose description is
/// the mapped value.
pub fn compile_schema(name: &str, description: &str, args: &BTreeMap<String, String>) -> ToolSchema {
    let parameters = args
        .iter()
        .fold(ParameterBuilder::new(), |builder, (arg, arg_description)| {
            builder.string(arg, arg_description)
        })
        .build();

    ToolSchema {
        name: name.to_string(),
        description: description.to_string(),
        parameters,
    }
}

/// Builder for strict object parameter schemas.
#[derive(Debug, Default)]
pub struct ParameterBuilder {
    properties: serde_json::Map<String, serde_json::Value>,
    required: Vec<String>,
}

impl ParameterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required string property.
    pub fn string(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        self.properties.insert(
            name.clone(),
            serde_json::json!({
                "type": "string",
                "description": description.into(),
            }),
        );
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    pub fn build(self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": self.properties,
            "required": self.required,
            "additionalProperties": false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_args_still_produce_strict_object() {
        let schema = compile_schema("ping", "Ping the page", &BTreeMap::new());

        assert_eq!(schema.parameters["type"], "object");
        assert!(schema.required().is_empty());
        assert!(schema.is_strict());
    }

    #[test]
    fn repeated_property_is_required_once() {
        let params = ParameterBuilder::new()
            .string("q", "first")
            .string("q", "second")
            .build();

        assert_eq!(params["required"], serde_json::json!(["q"]));
        assert_eq!(params["properties"]["q"]["description"], "second");
    }
}
