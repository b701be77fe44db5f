use serde::Serialize;

/// Where a parameter is carried in the request.
///
/// Only [`ParameterLocation::Query`] and [`ParameterLocation::Path`] reach the
/// generated code; header and cookie parameters are classified as excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Cookie => write!(f, "cookie"),
        }
    }
}

impl From<oas3::spec::ParameterIn> for ParameterLocation {
    fn from(loc: oas3::spec::ParameterIn) -> Self {
        match loc {
            oas3::spec::ParameterIn::Path => ParameterLocation::Path,
            oas3::spec::ParameterIn::Query => ParameterLocation::Query,
            oas3::spec::ParameterIn::Header => ParameterLocation::Header,
            oas3::spec::ParameterIn::Cookie => ParameterLocation::Cookie,
        }
    }
}

/// Normalized description of an OpenAPI schema node.
///
/// Serialized with a `shape` tag so templates can branch on
/// `schema.shape == "array"` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Schema {
    /// A plain typed value (`string`, `integer`, `number`, `boolean`, ...).
    Scalar { kind: String },
    /// A typed value restricted to the listed literals, in declaration order.
    Enum { kind: String, values: Vec<String> },
    /// A list whose elements are described by `items`.
    Array { items: Box<Schema> },
    /// An object with named properties, sorted by property name.
    Object { properties: Vec<Property> },
}

impl Schema {
    /// The declared OpenAPI type of this node.
    pub fn kind(&self) -> &str {
        match self {
            Schema::Scalar { kind } | Schema::Enum { kind, .. } => kind,
            Schema::Array { .. } => "array",
            Schema::Object { .. } => "object",
        }
    }

    pub fn enum_values(&self) -> &[String] {
        match self {
            Schema::Enum { values, .. } => values,
            _ => &[],
        }
    }

    pub fn properties(&self) -> &[Property] {
        match self {
            Schema::Object { properties } => properties,
            _ => &[],
        }
    }

    pub fn array_items(&self) -> Option<&Schema> {
        match self {
            Schema::Array { items } => Some(items),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub required: bool,
    pub schema: Schema,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDefinition {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Schema,
}

/// Parameters of one operation split by location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedParameters {
    pub query: Vec<ParameterDefinition>,
    pub path: Vec<ParameterDefinition>,
    /// Header and cookie parameters; parsed but never rendered.
    pub excluded: Vec<ParameterDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestBodyDefinition {
    /// The media type the schema was taken from.
    pub content_type: String,
    pub schema: Schema,
}

/// One HTTP method bound to one path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDefinition {
    /// First declared tag; the controller/service grouping key.
    pub tag: String,
    pub operation_id: String,
    /// Lower-case HTTP method name (`get`, `post`, ...).
    pub method: String,
    /// Raw OpenAPI path template, e.g. `/users/{id}`.
    pub path: String,
    pub path_params: Vec<ParameterDefinition>,
    pub query_params: Vec<ParameterDefinition>,
    pub excluded_params: Vec<ParameterDefinition>,
    pub body: Option<RequestBodyDefinition>,
}
