use super::error::{BodyError, NoBody, SpecError};
use super::schema::{raw_schema, SchemaError, SchemaRegistry};
use super::types::{
    ClassifiedParameters, OperationDefinition, ParameterDefinition, ParameterLocation,
    RequestBodyDefinition,
};
use oas3::spec::{ObjectOrReference, ObjectSchema, Operation, Parameter, RequestBody};
use oas3::OpenApiV3Spec;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Media types accepted for request bodies, in order of preference.
pub const BODY_CONTENT_TYPES: [&str; 2] = ["application/json", "application/x-www-form-urlencoded"];

const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";
const REQUEST_BODY_REF_PREFIX: &str = "#/components/requestBodies/";

fn resolve_parameter_ref<'a>(spec: &'a OpenApiV3Spec, ref_path: &str) -> Option<&'a Parameter> {
    let name = ref_path.strip_prefix(PARAMETER_REF_PREFIX)?;
    spec.components
        .as_ref()?
        .parameters
        .get(name)
        .and_then(|param_ref| match param_ref {
            ObjectOrReference::Object(param) => Some(param),
            _ => None,
        })
}

fn resolve_request_body_ref<'a>(
    spec: &'a OpenApiV3Spec,
    ref_path: &str,
) -> Option<&'a RequestBody> {
    let name = ref_path.strip_prefix(REQUEST_BODY_REF_PREFIX)?;
    spec.components
        .as_ref()?
        .request_bodies
        .get(name)
        .and_then(|body_ref| match body_ref {
            ObjectOrReference::Object(body) => Some(body),
            _ => None,
        })
}

/// Raw JSON for a schema slot; references stay as `{"$ref": ...}` and are
/// followed by the [`SchemaRegistry`].
fn schema_value(schema: &ObjectOrReference<ObjectSchema>) -> Result<Value, SchemaError> {
    match schema {
        ObjectOrReference::Object(obj) => raw_schema(obj, "#"),
        ObjectOrReference::Ref { ref_path, .. } => Ok(json!({ "$ref": ref_path })),
    }
}

/// Split parameters by location.
///
/// Query and path parameters keep their relative order. Header and cookie
/// parameters end up in [`ClassifiedParameters::excluded`].
pub fn classify_parameters(params: Vec<ParameterDefinition>) -> ClassifiedParameters {
    let mut classified = ClassifiedParameters::default();
    for param in params {
        match param.location {
            ParameterLocation::Query => classified.query.push(param),
            ParameterLocation::Path => classified.path.push(param),
            ParameterLocation::Header | ParameterLocation::Cookie => {
                classified.excluded.push(param)
            }
        }
    }
    classified
}

/// Extract the primary request-body schema.
///
/// `application/json` wins over `application/x-www-form-urlencoded`; any other
/// content yields [`NoBody::UnsupportedContent`].
pub fn describe_request_body(
    body: Option<&RequestBody>,
    registry: &SchemaRegistry,
) -> Result<RequestBodyDefinition, BodyError> {
    let body = body.ok_or(NoBody::Absent)?;

    let (content_type, media) = BODY_CONTENT_TYPES
        .iter()
        .find_map(|ct| body.content.get(*ct).map(|media| (*ct, media)))
        .ok_or_else(|| NoBody::UnsupportedContent {
            content_types: body.content.keys().cloned().collect(),
        })?;

    let schema = media.schema.as_ref().ok_or_else(|| NoBody::Untyped {
        content_type: content_type.to_string(),
    })?;

    Ok(RequestBodyDefinition {
        content_type: content_type.to_string(),
        schema: registry.describe(&schema_value(schema)?)?,
    })
}

/// Everything needed to describe the pieces of one operation.
struct OperationContext<'a> {
    spec: &'a OpenApiV3Spec,
    registry: &'a SchemaRegistry,
    path: &'a str,
    method: &'a str,
}

impl OperationContext<'_> {
    fn schema_error(&self, subject: String, source: SchemaError) -> SpecError {
        SpecError::Schema {
            path: self.path.to_string(),
            method: self.method.to_string(),
            subject,
            source,
        }
    }

    fn describe_parameter(
        &self,
        raw: &ObjectOrReference<Parameter>,
    ) -> Result<ParameterDefinition, SpecError> {
        let param = match raw {
            ObjectOrReference::Object(obj) => obj,
            ObjectOrReference::Ref { ref_path, .. } => resolve_parameter_ref(self.spec, ref_path)
                .ok_or_else(|| SpecError::UnresolvedParameter {
                    path: self.path.to_string(),
                    method: self.method.to_string(),
                    reference: ref_path.clone(),
                })?,
        };

        let schema = param
            .schema
            .as_ref()
            .ok_or_else(|| SpecError::ParameterWithoutSchema {
                path: self.path.to_string(),
                method: self.method.to_string(),
                name: param.name.clone(),
            })?;
        let schema = schema_value(schema)
            .and_then(|raw| self.registry.describe(&raw))
            .map_err(|e| self.schema_error(format!("parameter `{}`", param.name), e))?;

        let location = ParameterLocation::from(param.location);
        Ok(ParameterDefinition {
            name: param.name.clone(),
            location,
            required: location == ParameterLocation::Path || param.required.unwrap_or(false),
            schema,
        })
    }

    /// Path-item parameters followed by operation parameters; an operation
    /// parameter replaces a path-item one with the same name and location.
    fn collect_parameters(
        &self,
        item_params: &[ObjectOrReference<Parameter>],
        op_params: &[ObjectOrReference<Parameter>],
    ) -> Result<Vec<ParameterDefinition>, SpecError> {
        let mut params: Vec<ParameterDefinition> = Vec::new();
        for raw in item_params.iter().chain(op_params) {
            let def = self.describe_parameter(raw)?;
            match params
                .iter_mut()
                .find(|p| p.name == def.name && p.location == def.location)
            {
                Some(existing) => *existing = def,
                None => params.push(def),
            }
        }
        Ok(params)
    }

    fn request_body(
        &self,
        operation: &Operation,
    ) -> Result<Option<RequestBodyDefinition>, SpecError> {
        let body = match operation.request_body.as_ref() {
            None => None,
            Some(ObjectOrReference::Object(body)) => Some(body),
            Some(ObjectOrReference::Ref { ref_path, .. }) => Some(
                resolve_request_body_ref(self.spec, ref_path).ok_or_else(|| {
                    SpecError::UnresolvedRequestBody {
                        path: self.path.to_string(),
                        method: self.method.to_string(),
                        reference: ref_path.clone(),
                    }
                })?,
            ),
        };

        match describe_request_body(body, self.registry) {
            Ok(def) => Ok(Some(def)),
            Err(BodyError::NoBody(reason)) => {
                debug!(path = self.path, method = self.method, %reason, "Operation has no usable body");
                Ok(None)
            }
            Err(BodyError::Schema(e)) => Err(self.schema_error("request body".to_string(), e)),
        }
    }
}

/// Build one [`OperationDefinition`] per (path, method) pair.
///
/// Paths are visited in lexicographic order of their template, and methods
/// within a path in lexicographic order of their lower-case name. The first
/// invalid operation aborts extraction; no partial list is returned.
///
/// # Errors
///
/// Fails when an operation has no `operationId` or no tag, or when one of its
/// parameter or body schemas cannot be described.
pub fn extract_operations(spec: &OpenApiV3Spec) -> Result<Vec<OperationDefinition>, SpecError> {
    let registry = SchemaRegistry::from_spec(spec)?;
    let mut operations = Vec::new();

    let Some(paths_map) = spec.paths.as_ref() else {
        return Ok(operations);
    };

    let mut paths: Vec<_> = paths_map.iter().collect();
    paths.sort_by(|a, b| a.0.cmp(b.0));

    for (path, item) in paths {
        let mut methods: Vec<(String, &Operation)> = item
            .methods()
            .into_iter()
            .map(|(method, op)| (method.as_str().to_ascii_lowercase(), op))
            .collect();
        methods.sort_by(|a, b| a.0.cmp(&b.0));

        for (method, operation) in methods {
            let operation_id = match operation.operation_id.as_deref().map(str::trim) {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => {
                    return Err(SpecError::MissingOperationId {
                        path: path.clone(),
                        method,
                    })
                }
            };
            let tag = match operation.tags.first().map(|t| t.trim()) {
                Some(tag) if !tag.is_empty() => tag.to_string(),
                _ => {
                    return Err(SpecError::MissingTag {
                        path: path.clone(),
                        method,
                        operation_id,
                    })
                }
            };

            let ctx = OperationContext {
                spec,
                registry: &registry,
                path,
                method: &method,
            };
            let params = ctx.collect_parameters(&item.parameters, &operation.parameters)?;
            let ClassifiedParameters {
                query,
                path: path_params,
                excluded,
            } = classify_parameters(params);
            if !excluded.is_empty() {
                debug!(
                    path = %path,
                    method = %method,
                    excluded = ?excluded.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
                    "Header/cookie parameters are not rendered"
                );
            }
            let body = ctx.request_body(operation)?;

            operations.push(OperationDefinition {
                tag,
                operation_id,
                method,
                path: path.clone(),
                path_params,
                query_params: query,
                excluded_params: excluded,
                body,
            });
        }
    }

    info!(operations = operations.len(), "Extracted operations");
    Ok(operations)
}
