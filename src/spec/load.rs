use super::build::extract_operations;
use super::error::SpecError;
use super::types::OperationDefinition;
use oas3::OpenApiV3Spec;
use std::path::Path;
use tracing::debug;

fn strip_unknown_verbs(val: &mut serde_json::Value) {
    const METHODS: [&str; 8] = ["get", "post", "put", "delete", "patch", "options", "head", "trace"];

    if let Some(serde_json::Value::Object(paths_map)) = val.get_mut("paths") {
        for item in paths_map.values_mut() {
            if let serde_json::Value::Object(obj) = item {
                let keys: Vec<String> = obj.keys().cloned().collect();
                for k in keys {
                    let lk = k.to_ascii_lowercase();
                    let keep = match lk.as_str() {
                        "summary" | "description" | "servers" | "parameters" | "$ref" => true,
                        m if METHODS.contains(&m) => true,
                        _ => k.starts_with("x-"),
                    };
                    if !keep {
                        debug!(key = %k, "Dropping unknown path item key");
                        obj.remove(&k);
                    }
                }
            }
        }
    }
}

/// Rewrite OpenAPI 3.0 schema keywords into their 3.1 form.
///
/// `nullable: true` joins `"null"` to the type; boolean `exclusiveMinimum` and
/// `exclusiveMaximum` take the value of `minimum`/`maximum`, or vanish when
/// `false`. Only boolean values are touched, so properties that happen to be
/// called `nullable` are left alone.
fn normalize_v30_schemas(val: &mut serde_json::Value) {
    match val {
        serde_json::Value::Object(obj) => {
            if let Some(serde_json::Value::Bool(nullable)) = obj.get("nullable").cloned() {
                obj.remove("nullable");
                if nullable {
                    if let Some(serde_json::Value::String(kind)) = obj.get("type").cloned() {
                        obj.insert("type".to_string(), serde_json::json!([kind, "null"]));
                    }
                }
            }
            for (exclusive, bound) in [
                ("exclusiveMinimum", "minimum"),
                ("exclusiveMaximum", "maximum"),
            ] {
                if let Some(serde_json::Value::Bool(flag)) = obj.get(exclusive).cloned() {
                    obj.remove(exclusive);
                    if flag {
                        if let Some(limit) = obj.remove(bound) {
                            obj.insert(exclusive.to_string(), limit);
                        }
                    }
                }
            }
            for child in obj.values_mut() {
                normalize_v30_schemas(child);
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(normalize_v30_schemas),
        _ => {}
    }
}

fn is_v30(val: &serde_json::Value) -> bool {
    val.get("openapi")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|version| version.starts_with("3.0"))
}

/// Parse an OpenAPI document from text. YAML is a superset of JSON, so
/// `is_yaml` only picks the friendlier error message.
pub fn parse_spec(content: &str, path: &Path) -> Result<OpenApiV3Spec, SpecError> {
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let parse_err = |message: String| SpecError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let mut value: serde_json::Value = if is_yaml {
        serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?
    } else {
        serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?
    };

    strip_unknown_verbs(&mut value);
    if is_v30(&value) {
        debug!(path = %path.display(), "Normalizing OpenAPI 3.0 schema keywords");
        normalize_v30_schemas(&mut value);
    }
    serde_json::from_value(value).map_err(|e| parse_err(e.to_string()))
}

/// Read and parse an OpenAPI document (`.yaml`/`.yml` or JSON).
pub fn load_spec(path: &Path) -> Result<OpenApiV3Spec, SpecError> {
    let content = std::fs::read_to_string(path).map_err(|source| SpecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_spec(&content, path)
}

/// Read a document and extract its operations in one step.
pub fn load_operations(path: &Path) -> Result<Vec<OperationDefinition>, SpecError> {
    let spec = load_spec(path)?;
    extract_operations(&spec)
}
