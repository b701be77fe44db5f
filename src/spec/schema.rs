use super::types::{Property, Schema};
use oas3::spec::ObjectOrReference;
use oas3::OpenApiV3Spec;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Prefix of references into `components.schemas`.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Reasons a schema node cannot be described.
///
/// `pointer` is the location of the offending node, rooted at `#` for the node
/// handed to [`SchemaRegistry::describe`], or at the reference path once a
/// `$ref` has been followed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema at `{pointer}` declares no type")]
    MissingType { pointer: String },
    #[error("array schema at `{pointer}` declares no items")]
    MissingItems { pointer: String },
    #[error("schema reference `{reference}` at `{pointer}` does not resolve")]
    UnresolvedReference { reference: String, pointer: String },
    #[error("schema reference `{reference}` at `{pointer}` refers back to itself")]
    CyclicReference { reference: String, pointer: String },
    #[error("schema at `{pointer}` cannot be re-encoded as JSON: {message}")]
    Encode { pointer: String, message: String },
}

/// Re-encode a typed schema node as raw JSON for the describer.
pub(crate) fn raw_schema<T: Serialize>(node: &T, pointer: &str) -> Result<Value, SchemaError> {
    serde_json::to_value(node).map_err(|e| SchemaError::Encode {
        pointer: pointer.to_string(),
        message: e.to_string(),
    })
}

/// Component schemas addressable through `$ref`, kept as raw JSON.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Value>,
}

impl SchemaRegistry {
    /// Collect `components.schemas` from a parsed document.
    pub fn from_spec(spec: &OpenApiV3Spec) -> Result<Self, SchemaError> {
        let mut schemas = BTreeMap::new();
        let Some(components) = spec.components.as_ref() else {
            return Ok(Self { schemas });
        };
        for (name, schema) in &components.schemas {
            let value = match schema {
                ObjectOrReference::Object(obj) => {
                    raw_schema(obj, &format!("{SCHEMA_REF_PREFIX}{name}"))?
                }
                ObjectOrReference::Ref { ref_path, .. } => json!({ "$ref": ref_path }),
            };
            schemas.insert(name.clone(), value);
        }
        Ok(Self { schemas })
    }

    pub fn from_components<I>(schemas: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self {
            schemas: schemas.into_iter().collect(),
        }
    }

    /// Look up `#/components/schemas/{name}`.
    pub fn resolve(&self, reference: &str) -> Option<&Value> {
        reference
            .strip_prefix(SCHEMA_REF_PREFIX)
            .and_then(|name| self.schemas.get(name))
    }

    /// Recursively describe a raw schema node.
    ///
    /// References are followed every time they are met; nothing is cached, so
    /// a schema used from two places yields two equal but distinct values.
    pub fn describe(&self, node: &Value) -> Result<Schema, SchemaError> {
        Describer {
            registry: self,
            active: Vec::new(),
        }
        .describe_at(node, "#")
    }
}

/// Describe a node that contains no `$ref`s.
pub fn describe_schema(node: &Value) -> Result<Schema, SchemaError> {
    SchemaRegistry::default().describe(node)
}

struct Describer<'a> {
    registry: &'a SchemaRegistry,
    // references currently being expanded, innermost last
    active: Vec<String>,
}

impl Describer<'_> {
    fn describe_at(&mut self, node: &Value, pointer: &str) -> Result<Schema, SchemaError> {
        if let Some(reference) = node.get("$ref").and_then(Value::as_str) {
            return self.describe_reference(reference, pointer);
        }

        let kind = declared_type(node).ok_or_else(|| SchemaError::MissingType {
            pointer: pointer.to_string(),
        })?;

        match kind {
            "array" => {
                let items = node.get("items").ok_or_else(|| SchemaError::MissingItems {
                    pointer: pointer.to_string(),
                })?;
                let items = self.describe_at(items, &format!("{pointer}/items"))?;
                Ok(Schema::Array {
                    items: Box::new(items),
                })
            }
            "object" => Ok(Schema::Object {
                properties: self.describe_properties(node, pointer)?,
            }),
            _ => {
                let values = enum_values(node);
                if values.is_empty() {
                    Ok(Schema::Scalar {
                        kind: kind.to_string(),
                    })
                } else {
                    Ok(Schema::Enum {
                        kind: kind.to_string(),
                        values,
                    })
                }
            }
        }
    }

    fn describe_reference(&mut self, reference: &str, pointer: &str) -> Result<Schema, SchemaError> {
        if self.active.iter().any(|r| r == reference) {
            return Err(SchemaError::CyclicReference {
                reference: reference.to_string(),
                pointer: pointer.to_string(),
            });
        }
        let target = self
            .registry
            .resolve(reference)
            .ok_or_else(|| SchemaError::UnresolvedReference {
                reference: reference.to_string(),
                pointer: pointer.to_string(),
            })?;

        self.active.push(reference.to_string());
        let described = self.describe_at(target, reference);
        self.active.pop();
        described
    }

    fn describe_properties(
        &mut self,
        node: &Value,
        pointer: &str,
    ) -> Result<Vec<Property>, SchemaError> {
        let Some(props) = node.get("properties").and_then(Value::as_object) else {
            return Ok(Vec::new());
        };
        let required: HashSet<&str> = node
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut entries: Vec<(&String, &Value)> = props.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut properties = Vec::with_capacity(entries.len());
        for (name, prop) in entries {
            let schema = self.describe_at(prop, &format!("{pointer}/properties/{name}"))?;
            properties.push(Property {
                name: name.clone(),
                required: required.contains(name.as_str()),
                schema,
            });
        }
        Ok(properties)
    }
}

/// The node's declared type. A type list (`[string, "null"]`) yields its first
/// non-null entry.
fn declared_type(node: &Value) -> Option<&str> {
    match node.get("type")? {
        Value::String(s) if !s.is_empty() => Some(s.as_str()),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| !t.is_empty() && *t != "null"),
        _ => None,
    }
}

fn enum_values(node: &Value) -> Vec<String> {
    node.get("enum")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_scalar() {
        let schema = describe_schema(&json!({"type": "integer", "format": "int64"})).unwrap();
        assert_eq!(
            schema,
            Schema::Scalar {
                kind: "integer".to_string()
            }
        );
    }

    #[test]
    fn test_describe_enum_keeps_declaration_order() {
        let schema = describe_schema(&json!({
            "type": "string",
            "enum": ["pending", "available", "sold"]
        }))
        .unwrap();
        assert_eq!(schema.kind(), "string");
        assert_eq!(schema.enum_values(), ["pending", "available", "sold"]);
    }

    #[test]
    fn test_describe_enum_stringifies_literals() {
        let schema = describe_schema(&json!({"type": "integer", "enum": [3, 1, 2]})).unwrap();
        assert_eq!(schema.enum_values(), ["3", "1", "2"]);
    }

    #[test]
    fn test_array_items_match_direct_description() {
        let item = json!({
            "type": "object",
            "required": ["id"],
            "properties": {"id": {"type": "integer"}, "tags": {"type": "array", "items": {"type": "string"}}}
        });
        let array = json!({"type": "array", "items": item.clone()});

        let described = describe_schema(&array).unwrap();
        assert_eq!(described.array_items(), Some(&describe_schema(&item).unwrap()));
        assert!(described.properties().is_empty());
    }

    #[test]
    fn test_required_flags_ignore_declaration_order() {
        let schema = describe_schema(&json!({
            "type": "object",
            "required": ["a"],
            "properties": {"b": {"type": "string"}, "a": {"type": "string"}}
        }))
        .unwrap();
        let props = schema.properties();
        assert_eq!(props.len(), 2);
        let a = props.iter().find(|p| p.name == "a").unwrap();
        let b = props.iter().find(|p| p.name == "b").unwrap();
        assert!(a.required);
        assert!(!b.required);
    }

    #[test]
    fn test_required_match_is_case_sensitive() {
        let schema = describe_schema(&json!({
            "type": "object",
            "required": ["Name"],
            "properties": {"name": {"type": "string"}}
        }))
        .unwrap();
        assert!(!schema.properties()[0].required);
    }

    #[test]
    fn test_missing_type_reports_pointer() {
        let err = describe_schema(&json!({
            "type": "object",
            "properties": {"owner": {"properties": {}}}
        }))
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingType {
                pointer: "#/properties/owner".to_string()
            }
        );
    }

    #[test]
    fn test_array_without_items_fails() {
        let err = describe_schema(&json!({"type": "array"})).unwrap_err();
        assert!(matches!(err, SchemaError::MissingItems { .. }));
    }

    #[test]
    fn test_type_list_uses_first_non_null() {
        let schema = describe_schema(&json!({"type": ["null", "string"]})).unwrap();
        assert_eq!(schema.kind(), "string");
    }

    #[test]
    fn test_references_are_followed() {
        let registry = SchemaRegistry::from_components([
            (
                "Pet".to_string(),
                json!({"type": "object", "properties": {"tag": {"$ref": "#/components/schemas/Tag"}}}),
            ),
            ("Tag".to_string(), json!({"type": "string"})),
        ]);
        let schema = registry
            .describe(&json!({"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}))
            .unwrap();
        let pet = schema.array_items().unwrap();
        assert_eq!(pet.properties()[0].schema.kind(), "string");
    }

    #[test]
    fn test_shared_reference_is_described_twice() {
        let registry = SchemaRegistry::from_components([(
            "Money".to_string(),
            json!({"type": "number"}),
        )]);
        let schema = registry
            .describe(&json!({
                "type": "object",
                "properties": {
                    "price": {"$ref": "#/components/schemas/Money"},
                    "tax": {"$ref": "#/components/schemas/Money"}
                }
            }))
            .unwrap();
        let props = schema.properties();
        assert_eq!(props[0].schema, props[1].schema);
    }

    #[test]
    fn test_unresolved_reference() {
        let err = describe_schema(&json!({"$ref": "#/components/schemas/Missing"})).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnresolvedReference {
                reference: "#/components/schemas/Missing".to_string(),
                pointer: "#".to_string()
            }
        );
    }

    #[test]
    fn test_encode_failure_is_reported() {
        // JSON objects need string keys
        let node = BTreeMap::from([((1, 2), "pair")]);
        let err = raw_schema(&node, "#/components/schemas/Pair").unwrap_err();
        match err {
            SchemaError::Encode { pointer, .. } => {
                assert_eq!(pointer, "#/components/schemas/Pair");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cyclic_reference_is_reported() {
        let registry = SchemaRegistry::from_components([(
            "Node".to_string(),
            json!({
                "type": "object",
                "properties": {"children": {"type": "array", "items": {"$ref": "#/components/schemas/Node"}}}
            }),
        )]);
        let err = registry
            .describe(&json!({"$ref": "#/components/schemas/Node"}))
            .unwrap_err();
        assert!(matches!(err, SchemaError::CyclicReference { .. }));
    }
}
