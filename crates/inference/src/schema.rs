//! Declared structured-output schemas
//!
//! A `ResponseSchema` describes the JSON a model must return. Gemini expects
//! its OpenAPI subset (`"type": "OBJECT"`), OpenAI-compatible servers expect
//! plain JSON Schema (`"type": "object"`), so the schema is kept abstract and
//! rendered per backend.

use serde_json::{json, Map, Value};

/// Shape of a schema node
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Object {
        properties: Vec<(String, ResponseSchema)>,
        required: Vec<String>,
    },
    Array {
        items: Box<ResponseSchema>,
    },
    String {
        /// Closed set of allowed values
        enumeration: Option<Vec<String>>,
    },
    Number,
    Boolean,
}

/// A schema node with an optional description for the model
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub kind: SchemaKind,
    pub description: Option<String>,
}

impl ResponseSchema {
    fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }

    /// An object with no properties yet
    pub fn object() -> Self {
        Self::new(SchemaKind::Object {
            properties: Vec::new(),
            required: Vec::new(),
        })
    }

    /// An array of `items`
    pub fn array(items: ResponseSchema) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
        })
    }

    /// A free-form string
    pub fn string() -> Self {
        Self::new(SchemaKind::String { enumeration: None })
    }

    /// A string restricted to `values`
    pub fn enumeration(values: &[&str]) -> Self {
        Self::new(SchemaKind::String {
            enumeration: Some(values.iter().map(|v| v.to_string()).collect()),
        })
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    /// Attach a description shown to the model
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a property to an object schema. Ignored for other kinds.
    pub fn property(mut self, name: impl Into<String>, schema: ResponseSchema) -> Self {
        if let SchemaKind::Object { properties, .. } = &mut self.kind {
            let name = name.into();
            properties.retain(|(existing, _)| *existing != name);
            properties.push((name, schema));
        }
        self
    }

    /// Mark properties of an object schema as required. Ignored for other kinds.
    pub fn required(mut self, names: &[&str]) -> Self {
        if let SchemaKind::Object { required, .. } = &mut self.kind {
            for name in names {
                if !required.iter().any(|r| r == name) {
                    required.push(name.to_string());
                }
            }
        }
        self
    }

    /// Look up a direct property of an object schema
    pub fn get_property(&self, name: &str) -> Option<&ResponseSchema> {
        match &self.kind {
            SchemaKind::Object { properties, .. } => properties
                .iter()
                .find(|(existing, _)| existing == name)
                .map(|(_, schema)| schema),
            _ => None,
        }
    }

    /// Render in Gemini's OpenAPI subset
    pub fn to_gemini(&self) -> Value {
        self.render(&|kind| match kind {
            "object" => "OBJECT",
            "array" => "ARRAY",
            "string" => "STRING",
            "number" => "NUMBER",
            _ => "BOOLEAN",
        })
    }

    /// Render as standard JSON Schema
    pub fn to_json_schema(&self) -> Value {
        self.render(&|kind| kind)
    }

    fn render(&self, type_name: &dyn Fn(&'static str) -> &'static str) -> Value {
        let mut node = Map::new();

        match &self.kind {
            SchemaKind::Object {
                properties,
                required,
            } => {
                node.insert("type".into(), json!(type_name("object")));
                let rendered: Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.render(type_name)))
                    .collect();
                node.insert("properties".into(), Value::Object(rendered));
                if !required.is_empty() {
                    node.insert("required".into(), json!(required));
                }
            }
            SchemaKind::Array { items } => {
                node.insert("type".into(), json!(type_name("array")));
                node.insert("items".into(), items.render(type_name));
            }
            SchemaKind::String { enumeration } => {
                node.insert("type".into(), json!(type_name("string")));
                if let Some(values) = enumeration {
                    node.insert("enum".into(), json!(values));
                }
            }
            SchemaKind::Number => {
                node.insert("type".into(), json!(type_name("number")));
            }
            SchemaKind::Boolean => {
                node.insert("type".into(), json!(type_name("boolean")));
            }
        }

        if let Some(description) = &self.description {
            node.insert("description".into(), json!(description));
        }

        Value::Object(node)
    }
}
