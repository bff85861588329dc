//! OpenAPI document structs for serde deserialization.
//!
//! Only the parts of the document that end up on a reference page are
//! modelled. Everything else is ignored, but `openapi` and `info.title`
//! must be present for a document to be accepted.

use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};

/// Root OpenAPI document.
#[derive(Debug, Deserialize)]
pub struct OpenApiDocument {
    /// Version string; any version is accepted.
    #[serde(deserialize_with = "scalar_string")]
    pub openapi: String,
    pub info: Info,
    #[serde(default)]
    pub tags: Vec<TagObject>,
    /// Sorted so repeated runs emit operations in the same order. Optional
    /// since 3.1 (webhook- or component-only documents).
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    #[serde(default)]
    pub components: Option<Components>,
}

#[derive(Debug, Deserialize)]
pub struct Info {
    pub title: String,
}

/// Top-level tag declaration.
#[derive(Debug, Deserialize)]
pub struct TagObject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "x-displayName", default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub parameters: HashMap<String, Parameter>,
}

/// A path item containing operations for the HTTP methods.
#[derive(Debug, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
    /// Path-level parameters shared by all operations.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
            Self::Trace => "TRACE",
        }
    }
}

impl PathItem {
    /// Operations in fixed method order.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        [
            (Method::Get, &self.get),
            (Method::Put, &self.put),
            (Method::Post, &self.post),
            (Method::Delete, &self.delete),
            (Method::Options, &self.options),
            (Method::Head, &self.head),
            (Method::Patch, &self.patch),
            (Method::Trace, &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}

/// An API operation (endpoint).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    /// Sorted by status code.
    #[serde(default)]
    pub responses: BTreeMap<StatusKey, Response>,
}

/// A parameter, or a `$ref` to one in `components.parameters`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "in")]
    pub location: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub description: Option<String>,
    pub schema: Option<Schema>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub required: bool,
    pub description: Option<String>,
    /// Media type name to its definition; sorted.
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Response {
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// Response map key. YAML documents often leave status codes unquoted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StatusKey(pub String);

impl<'de> Deserialize<'de> for StatusKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        scalar_string(deserializer).map(StatusKey)
    }
}

/// Accept a string, integer or float scalar as a string (`openapi: 3.0`).
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(u64),
        Float(f64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(f) => format!("{f:?}"),
    })
}

/// The slice of JSON Schema used to print a parameter's type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    pub items: Option<Box<Schema>>,
    pub format: Option<String>,
}

/// Schema type can be a single type or an array of types (3.1 nullable).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

impl Schema {
    /// Short type label such as `string`, `array<User>` or `integer | null`.
    pub fn type_label(&self) -> String {
        if let Some(ref r) = self.ref_path {
            return ref_name(r).to_string();
        }
        let base = match &self.schema_type {
            Some(SchemaType::Single(t)) => t.clone(),
            Some(SchemaType::Multiple(ts)) => ts.join(" | "),
            None => return String::new(),
        };
        if base == "array" {
            if let Some(ref items) = self.items {
                return format!("array<{}>", items.type_label());
            }
        }
        match self.format {
            Some(ref f) => format!("{base} ({f})"),
            None => base,
        }
    }
}

/// Last segment of a JSON reference, e.g. `User` for `#/components/schemas/User`.
pub fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

impl OpenApiDocument {
    /// Resolve a `$ref` parameter against `components.parameters`.
    pub fn resolve_parameter<'a>(&'a self, param: &'a Parameter) -> Option<&'a Parameter> {
        match param.ref_path {
            None => Some(param),
            Some(ref r) => {
                let name = r.strip_prefix("#/components/parameters/")?;
                self.components.as_ref()?.parameters.get(name)
            }
        }
    }

    pub fn tag(&self, name: &str) -> Option<&TagObject> {
        self.tags.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_order_is_fixed() {
        let item: PathItem = serde_yaml::from_str(
            "post: {summary: b}\nget: {summary: a}\ndelete: {summary: c}\n",
        )
        .unwrap();
        let methods: Vec<Method> = item.operations().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![Method::Get, Method::Post, Method::Delete]);
    }

    #[test]
    fn type_labels() {
        let schema: Schema =
            serde_yaml::from_str("{type: array, items: {$ref: '#/components/schemas/User'}}")
                .unwrap();
        assert_eq!(schema.type_label(), "array<User>");

        let schema: Schema = serde_yaml::from_str("{type: [integer, 'null']}").unwrap();
        assert_eq!(schema.type_label(), "integer | null");

        let schema: Schema = serde_yaml::from_str("{type: string, format: uuid}").unwrap();
        assert_eq!(schema.type_label(), "string (uuid)");
    }

    #[test]
    fn unquoted_status_codes_and_version() {
        let doc: OpenApiDocument = serde_yaml::from_str(
            r#"
openapi: 3.0
info: {title: T}
paths:
  /a:
    get:
      responses:
        404: {description: Not found}
        200: {description: OK}
        default: {description: Error}
"#,
        )
        .unwrap();
        assert_eq!(doc.openapi, "3.0");
        let op = doc.paths["/a"].get.as_ref().unwrap();
        let codes: Vec<&str> = op.responses.keys().map(|k| k.0.as_str()).collect();
        assert_eq!(codes, vec!["200", "404", "default"]);
    }

    #[test]
    fn paths_are_optional() {
        let doc: OpenApiDocument =
            serde_yaml::from_str("openapi: 3.1.0\ninfo: {title: Hooks}\nwebhooks: {}\n").unwrap();
        assert!(doc.paths.is_empty());
    }

    #[test]
    fn missing_info_is_rejected() {
        let result: Result<OpenApiDocument, _> =
            serde_yaml::from_str("openapi: 3.1.0\npaths: {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn resolves_component_parameter() {
        let doc: OpenApiDocument = serde_yaml::from_str(
            r#"
openapi: 3.0.3
info: {title: T}
paths: {}
components:
  parameters:
    Limit: {name: limit, in: query}
"#,
        )
        .unwrap();
        let reference = Parameter {
            ref_path: Some("#/components/parameters/Limit".to_string()),
            ..Parameter::default()
        };
        let resolved = doc.resolve_parameter(&reference).unwrap();
        assert_eq!(resolved.name.as_deref(), Some("limit"));

        let dangling = Parameter {
            ref_path: Some("#/components/parameters/Missing".to_string()),
            ..Parameter::default()
        };
        assert!(doc.resolve_parameter(&dangling).is_none());
    }
}
