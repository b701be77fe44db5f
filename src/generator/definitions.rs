use super::error::GenerateError;
use super::naming::{
    pascal_case, prefix_segments, qualified_class_name, rails_route_path, ruby_hash_key,
    ruby_symbol, snake_case,
};
use crate::config::OutputOptions;
use crate::spec::{OperationDefinition, ParameterDefinition, Property, Schema};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Rails resource-action hints for a definition.
///
/// Always all-false today: every operation renders as a custom action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestConventions {
    pub index: bool,
    pub show: bool,
    pub create: bool,
    pub update: bool,
    pub destroy: bool,
}

/// Template-facing view of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    /// Ruby method name, unique within its controller.
    pub method_name: String,
    pub operation_id: String,
    pub http_method: String,
    pub path: String,
    /// Query parameters first, then path parameters.
    pub params: Vec<ParameterDefinition>,
    pub body: Option<Schema>,
    /// Arguments for `params.permit(...)`; empty when there is no body.
    pub permitted_params: Vec<String>,
    pub conventions: RestConventions,
}

/// Everything needed to render one controller and its service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerData {
    pub tag: String,
    /// `snake(tag)`; stem of `<stem>_controller.rb` and `<stem>_service.rb`.
    pub file_stem: String,
    pub controller_name: String,
    pub service_name: String,
    pub controller_parent_class: String,
    pub service_parent_class: String,
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub http_method: String,
    /// Rails path syntax (`/users/:id`).
    pub path: String,
    /// Controller path relative to the routes file, e.g. `api/v1/users`.
    pub controller: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assembly {
    /// One entry per distinct tag, in tag order.
    pub controllers: Vec<ControllerData>,
    /// One entry per operation, in operation order.
    pub routes: Vec<RouteEntry>,
}

/// Return `name`, or `name_1`, `name_2`, ... when already taken.
pub(crate) fn unique_method_name(seen: &mut HashSet<String>, name: &str) -> String {
    if seen.insert(name.to_string()) {
        return name.to_string();
    }
    let mut counter = 1;
    loop {
        let candidate = format!("{name}_{counter}");
        if seen.insert(candidate.clone()) {
            warn!(method = %name, renamed = %candidate, "Duplicate method name");
            return candidate;
        }
        counter += 1;
    }
}

/// Strong-parameter entries for a request body.
///
/// Scalars come first as symbols (`:name`); arrays and objects follow as hash
/// entries (`tags: []`, `address: [:city, :zip]`) so the argument list stays
/// valid Ruby. Names that are not Ruby identifiers are quoted
/// (`:"display-name"`). Non-object bodies are permitted under Rails' `_json` key.
pub fn permitted_params(body: &Schema) -> Vec<String> {
    match body {
        Schema::Object { properties } => permit_entries(properties),
        other => permit_entries(&[Property {
            name: "_json".to_string(),
            required: true,
            schema: other.clone(),
        }]),
    }
}

fn permit_entries(properties: &[Property]) -> Vec<String> {
    let mut symbols = Vec::new();
    let mut nested = Vec::new();
    for prop in properties {
        match &prop.schema {
            Schema::Scalar { .. } | Schema::Enum { .. } => symbols.push(ruby_symbol(&prop.name)),
            Schema::Array { items } => match items.as_ref() {
                Schema::Object { properties } => nested.push(format!(
                    "{} [{}]",
                    ruby_hash_key(&prop.name),
                    permit_entries(properties).join(", ")
                )),
                _ => nested.push(format!("{} []", ruby_hash_key(&prop.name))),
            },
            Schema::Object { properties } => nested.push(format!(
                "{} [{}]",
                ruby_hash_key(&prop.name),
                permit_entries(properties).join(", ")
            )),
        }
    }
    symbols.extend(nested);
    symbols
}

/// Group operations by tag into controller data, and build the route list.
///
/// Controllers come out in tag order; definitions inside a controller and the
/// route list keep the operation order. Two tags whose snake_case forms
/// collide are rejected since they would overwrite each other's files.
pub fn assemble_definitions(
    operations: &[OperationDefinition],
    options: &OutputOptions,
) -> Result<Assembly, GenerateError> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, op) in operations.iter().enumerate() {
        groups.entry(op.tag.as_str()).or_default().push(index);
    }

    let mut stems: BTreeMap<String, &str> = BTreeMap::new();
    let mut actions: Vec<String> = vec![String::new(); operations.len()];
    let mut controller_paths: Vec<String> = vec![String::new(); operations.len()];
    let controller_segments = prefix_segments(&options.controller_prefix);
    let mut controllers = Vec::with_capacity(groups.len());

    for (tag, indices) in groups {
        let file_stem = snake_case(tag);
        if let Some(first) = stems.insert(file_stem.clone(), tag) {
            return Err(GenerateError::TagCollision {
                stem: file_stem,
                first: first.to_string(),
                second: tag.to_string(),
            });
        }

        let controller_path = controller_segments
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(file_stem.as_str()))
            .collect::<Vec<_>>()
            .join("/");

        let mut seen = HashSet::new();
        let mut definitions = Vec::with_capacity(indices.len());
        for index in indices {
            let op = &operations[index];
            let method_name = unique_method_name(&mut seen, &snake_case(&op.operation_id));
            let body = op.body.as_ref().map(|b| b.schema.clone());
            definitions.push(Definition {
                method_name: method_name.clone(),
                operation_id: op.operation_id.clone(),
                http_method: op.method.clone(),
                path: op.path.clone(),
                params: op.query_params.iter().chain(&op.path_params).cloned().collect(),
                permitted_params: body.as_ref().map(permitted_params).unwrap_or_default(),
                body,
                conventions: RestConventions::default(),
            });
            actions[index] = method_name;
            controller_paths[index] = controller_path.clone();
        }

        controllers.push(ControllerData {
            tag: tag.to_string(),
            controller_name: qualified_class_name(
                &options.controller_prefix,
                &pascal_case(&format!("{tag}_controller")),
            ),
            service_name: qualified_class_name(
                &options.service_prefix,
                &pascal_case(&format!("{tag}_service")),
            ),
            controller_parent_class: options.controller_parent_class.clone(),
            service_parent_class: options.service_parent_class.clone(),
            file_stem,
            definitions,
        });
    }

    let routes = operations
        .iter()
        .zip(actions)
        .zip(controller_paths)
        .map(|((op, action), controller)| RouteEntry {
            http_method: op.method.clone(),
            path: rails_route_path(&op.path),
            controller,
            action,
        })
        .collect();

    Ok(Assembly {
        controllers,
        routes,
    })
}
