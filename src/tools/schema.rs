//! JSON Schema construction for tool argument declarations.

use serde::{Deserialize, Serialize};

/// JSON Schema describing a tool's accepted arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    schema: serde_json::Value,
}

impl ToolSchema {
    /// Wrap a raw JSON Schema value.
    pub fn from_value(schema: serde_json::Value) -> Self {
        Self { schema }
    }

    /// Schema for a tool that takes no arguments.
    pub fn empty() -> Self {
        SchemaBuilder::object().build()
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.schema
    }
}

/// Builder for object schemas with typed properties.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    properties: serde_json::Map<String, serde_json::Value>,
    required: Vec<String>,
}

impl SchemaBuilder {
    pub fn object() -> Self {
        Self::default()
    }

    fn property(
        mut self,
        name: impl Into<String>,
        kind: &str,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.properties.insert(
            name.clone(),
            serde_json::json!({
                "type": kind,
                "description": description.into(),
            }),
        );
        if required {
            self.required.push(name);
        }
        self
    }

    pub fn string(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.property(name, "string", description, required)
    }

    pub fn integer(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.property(name, "integer", description, required)
    }

    pub fn boolean(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.property(name, "boolean", description, required)
    }

    pub fn object_prop(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.property(name, "object", description, required)
    }

    pub fn build(self) -> ToolSchema {
        ToolSchema {
            schema: serde_json::json!({
                "type": "object",
                "properties": self.properties,
                "required": self.required,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_properties_and_required_list() {
        let schema = SchemaBuilder::object()
            .string("project_id", "UUID of the project", true)
            .integer("x", "X position", false)
            .build();
        let value = schema.as_value();

        assert_eq!(value["type"], "object");
        assert_eq!(value["properties"]["project_id"]["type"], "string");
        assert_eq!(value["properties"]["x"]["type"], "integer");
        assert_eq!(value["required"], serde_json::json!(["project_id"]));
    }

    #[test]
    fn empty_schema_is_an_object_with_no_requirements() {
        let schema = ToolSchema::empty();
        let value = schema.as_value();
        assert_eq!(value["type"], "object");
        assert!(value["required"].as_array().unwrap().is_empty());
    }
}
