//! Group operations from one or more documents into per-tag pages.

use crate::frontmatter::PageHeader;
use crate::model::{OperationDoc, ParameterDoc, RequestBodyDoc, ResponseDoc, TagPage};
use crate::openapi::spec::{ref_name, Method, OpenApiDocument, Operation, Parameter, PathItem};
use crate::slug::page_slug;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Tag used for operations that declare none.
pub const FALLBACK_TAG: &str = "default";

/// Assign every operation to exactly one page, keyed by its first tag.
///
/// Pages with the same tag merge across documents. Page order follows
/// first appearance, with each document's declared tags ahead of tags it
/// only uses on operations. Declared tags without operations get no page.
pub fn group_by_tag(documents: &[(PathBuf, OpenApiDocument)]) -> Vec<TagPage> {
    let mut pages: HashMap<String, TagPage> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for (path, doc) in documents {
        let source = path.display().to_string();

        let mut tagged: Vec<(String, OperationDoc)> = Vec::new();
        for (route, item) in &doc.paths {
            for (method, op) in item.operations() {
                let tag = match op.tags.first() {
                    Some(tag) => tag.clone(),
                    None => {
                        warn!(
                            document = %source,
                            operation = %format!("{} {}", method.as_str(), route),
                            "operation has no tags; grouping under '{FALLBACK_TAG}'"
                        );
                        FALLBACK_TAG.to_string()
                    }
                };
                let operation = operation_doc(doc, route, item, method, op);
                tagged.push((tag, operation));
            }
        }

        for declared in &doc.tags {
            if tagged.iter().any(|(tag, _)| *tag == declared.name) {
                register(&mut pages, &mut order, doc, &declared.name);
            }
        }
        for (tag, operation) in tagged {
            register(&mut pages, &mut order, doc, &tag);
            if let Some(page) = pages.get_mut(&tag) {
                page.operations.push(operation);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|tag| pages.remove(&tag))
        .collect()
}

/// Create the page for `tag` on first sight, or fill in tag metadata a
/// later document declares.
fn register(
    pages: &mut HashMap<String, TagPage>,
    order: &mut Vec<String>,
    doc: &OpenApiDocument,
    tag: &str,
) {
    let declared = doc.tag(tag);
    let display_name = declared.and_then(|t| t.display_name.clone());
    let description = declared.and_then(|t| t.description.clone());

    if let Some(page) = pages.get_mut(tag) {
        if page.header.description.is_empty() {
            if let Some(description) = description {
                page.header.description = description;
            }
        }
        if page.header.title == tag {
            if let Some(display_name) = display_name {
                page.header.title = display_name;
            }
        }
        return;
    }

    order.push(tag.to_string());
    pages.insert(
        tag.to_string(),
        TagPage {
            tag: tag.to_string(),
            slug: page_slug(tag),
            header: PageHeader {
                document_title: doc.info.title.clone(),
                title: display_name.unwrap_or_else(|| tag.to_string()),
                description: description.unwrap_or_default(),
            },
            operations: Vec::new(),
        },
    );
}

fn operation_doc(
    doc: &OpenApiDocument,
    route: &str,
    item: &PathItem,
    method: Method,
    op: &Operation,
) -> OperationDoc {
    let heading = op
        .summary
        .clone()
        .or_else(|| op.operation_id.clone())
        .unwrap_or_else(|| format!("{} {}", method.as_str(), route));

    // Operation-level parameters override path-level ones with the same
    // name and location.
    let mut parameters: Vec<ParameterDoc> = Vec::new();
    for param in item.parameters.iter().chain(&op.parameters) {
        let param = parameter_doc(doc, param);
        match parameters
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(existing) => *existing = param,
            None => parameters.push(param),
        }
    }

    let request_body = op.request_body.as_ref().map(|body| RequestBodyDoc {
        required: body.required,
        description: body.description.clone(),
        media_types: body
            .content
            .iter()
            .map(|(media, def)| {
                let label = def
                    .schema
                    .as_ref()
                    .map(|s| s.type_label())
                    .unwrap_or_default();
                (media.clone(), label)
            })
            .collect(),
    });

    let responses = op
        .responses
        .iter()
        .map(|(status, response)| ResponseDoc {
            status: status.0.clone(),
            description: response.description.clone(),
        })
        .collect();

    OperationDoc {
        method,
        path: route.to_string(),
        heading,
        description: op.description.clone(),
        deprecated: op.deprecated,
        parameters,
        request_body,
        responses,
    }
}

fn parameter_doc(doc: &OpenApiDocument, param: &Parameter) -> ParameterDoc {
    match doc.resolve_parameter(param) {
        Some(resolved) => ParameterDoc {
            name: resolved.name.clone().unwrap_or_default(),
            location: resolved.location.clone().unwrap_or_default(),
            type_label: resolved
                .schema
                .as_ref()
                .map(|s| s.type_label())
                .unwrap_or_default(),
            required: resolved.required,
            description: resolved.description.clone(),
        },
        None => {
            let reference = param.ref_path.as_deref().unwrap_or_default();
            warn!(reference = %reference, "unresolved parameter reference");
            ParameterDoc {
                name: ref_name(reference).to_string(),
                location: "ref".to_string(),
                type_label: String::new(),
                required: false,
                description: None,
            }
        }
    }
}
