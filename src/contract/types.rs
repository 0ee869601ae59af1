use crate::typemap::ContractType;
use http::Method;
use std::collections::BTreeMap;

/// Constraint metadata carried from the source declaration into the contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub max_length: Option<u32>,
    /// Declared enum value set, copied verbatim from the source.
    pub enum_values: Vec<String>,
    pub precision: Option<u32>,
    pub default: Option<serde_json::Value>,
}

/// One field of a schema, fully mapped to a contract type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    /// Framework-native type tag the field was declared with.
    pub source_type: String,
    pub contract: ContractType,
    pub nullable: bool,
    pub constraints: Constraints,
}

/// A named schema with ordered fields and a required-field set.
///
/// A field is required iff it has no default and is non-nullable; the
/// introspector enforces that rule when it builds the set.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaType {
    pub name: String,
    /// Backend module the entity came from; surfaces in collision errors.
    pub source_module: String,
    pub fields: Vec<FieldSpec>,
    pub required: std::collections::BTreeSet<String>,
}

impl SchemaType {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// CRUD shape of an operation, classified from method and path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// GET on a collection path.
    List,
    /// GET on an item path (trailing placeholder).
    Get,
    /// POST on a collection path.
    Create,
    /// PUT or PATCH on an item path.
    Update,
    /// DELETE on an item path.
    Delete,
    /// Anything else; emitted in the client, skipped by stores.
    Custom,
}

/// A path or query parameter with its contract type.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub contract: ContractType,
    pub required: bool,
}

/// Response payload reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRef {
    pub schema: String,
    pub many: bool,
}

/// One API operation in the contract.
#[derive(Debug, Clone)]
pub struct Operation {
    pub method: Method,
    /// Path template, may contain `{param}` placeholders.
    pub path: String,
    /// Canonical snake_case callable name, e.g. `get_work_order`.
    pub name: String,
    pub kind: OperationKind,
    /// Resource tag grouping operations in the client (first static segment).
    pub tag: String,
    /// Path params in path-declaration order.
    pub path_params: Vec<ParamSpec>,
    pub query_params: Vec<ParamSpec>,
    /// Schema name of the request body, if any.
    pub request_body: Option<String>,
    pub response: Option<ResponseRef>,
    pub requires_auth: bool,
}

impl Operation {
    /// Stable display form used in error messages.
    pub fn display(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// A security scheme entry for `components.securitySchemes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityScheme {
    pub scheme_type: String,
    pub scheme: String,
}

impl SecurityScheme {
    pub fn bearer() -> Self {
        SecurityScheme {
            scheme_type: "http".to_string(),
            scheme: "bearer".to_string(),
        }
    }
}

/// The synthesized contract: the single immutable source of truth every
/// generator consumes. Regeneration builds a fresh `Contract`; nothing
/// mutates one in place.
#[derive(Debug, Clone)]
pub struct Contract {
    pub title: String,
    pub version: String,
    pub schemas: BTreeMap<String, SchemaType>,
    /// Sorted by `(path, method)`, case-sensitive.
    pub operations: Vec<Operation>,
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}

impl Contract {
    /// Operations whose response payload references `schema`. Request-body
    /// references do not count: an entity used only as an input payload gets
    /// no store or scaffolds of its own.
    pub fn operations_for(&self, schema: &str) -> Vec<&Operation> {
        self.operations
            .iter()
            .filter(|op| op.response.as_ref().map(|r| r.schema.as_str()) == Some(schema))
            .collect()
    }

    /// Whether the schema is listed by at least one List operation.
    pub fn has_list_operation(&self, schema: &str) -> bool {
        self.operations_for(schema)
            .iter()
            .any(|op| op.kind == OperationKind::List)
    }
}
