use serde::Serialize;
use std::collections::BTreeMap;

/// Primitive kinds accepted by the structured-output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

/// Output-shape declaration sent with a structured request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
}

impl Schema {
    fn of(kind: SchemaType) -> Self {
        Self {
            kind,
            properties: BTreeMap::new(),
            items: None,
            required: Vec::new(),
            minimum: None,
            maximum: None,
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::of(SchemaType::Integer)
    }

    pub fn integer_in(min: i64, max: i64) -> Self {
        Self {
            minimum: Some(min),
            maximum: Some(max),
            ..Self::of(SchemaType::Integer)
        }
    }

    pub fn array_of(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    pub fn string_list() -> Self {
        Self::array_of(Self::string())
    }

    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    /// Add an optional property.
    #[must_use]
    pub fn property(mut self, name: &str, schema: Schema) -> Self {
        self.properties.insert(name.to_string(), schema);
        self
    }

    /// Add a property and mark it required.
    #[must_use]
    pub fn required_property(mut self, name: &str, schema: Schema) -> Self {
        self.required.push(name.to_string());
        self.property(name, schema)
    }

    pub fn requires(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_schema_serializes_in_provider_format() {
        let schema = Schema::object()
            .required_property("question", Schema::string())
            .required_property("points", Schema::string_list())
            .property("score", Schema::integer_in(0, 5));

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["type"], "OBJECT");
        assert_eq!(value["properties"]["points"]["type"], "ARRAY");
        assert_eq!(value["properties"]["points"]["items"]["type"], "STRING");
        assert_eq!(value["properties"]["score"]["maximum"], 5);
        assert_eq!(value["required"], serde_json::json!(["question", "points"]));
    }

    #[test]
    fn leaf_schema_omits_empty_fields() {
        let value = serde_json::to_value(Schema::integer()).unwrap();
        assert_eq!(value, serde_json::json!({"type": "INTEGER"}));
    }

    #[test]
    fn requires_reports_required_names_only() {
        let schema = Schema::object()
            .required_property("a", Schema::string())
            .property("b", Schema::string());
        assert!(schema.requires("a"));
        assert!(!schema.requires("b"));
    }
}
