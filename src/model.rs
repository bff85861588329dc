//! Render-ready page model, independent of the OpenAPI document layout.

use crate::frontmatter::PageHeader;
use crate::openapi::spec::Method;

/// One generated page: all operations whose first tag is `tag`.
#[derive(Debug)]
pub struct TagPage {
    pub tag: String,
    /// File stem of the page.
    pub slug: String,
    pub header: PageHeader,
    pub operations: Vec<OperationDoc>,
}

/// A single documented operation.
#[derive(Debug)]
pub struct OperationDoc {
    pub method: Method,
    pub path: String,
    /// Summary, else operationId, else `METHOD path`.
    pub heading: String,
    pub description: Option<String>,
    pub deprecated: bool,
    /// Path-level parameters first, then operation parameters.
    pub parameters: Vec<ParameterDoc>,
    pub request_body: Option<RequestBodyDoc>,
    pub responses: Vec<ResponseDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDoc {
    pub name: String,
    /// `path`, `query`, `header`, `cookie`, or `ref` when unresolved.
    pub location: String,
    pub type_label: String,
    pub required: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBodyDoc {
    pub required: bool,
    pub description: Option<String>,
    /// `(media type, schema type label)`
    pub media_types: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDoc {
    pub status: String,
    pub description: Option<String>,
}
