//! MDX renderer for per-tag API reference pages.

use crate::frontmatter::FrontmatterRenderer;
use crate::model::{OperationDoc, RequestBodyDoc, TagPage};
use crate::slug::github_slug;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Extension of generated API pages.
pub const PAGE_EXTENSION: &str = "mdx";

static RE_MDX_SPECIAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[{}<>]").unwrap());

static RE_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\r?\n\s*").unwrap());

/// Render a complete page: front-matter, index, then one section per
/// operation. Always ends with a single newline.
pub fn render_page(page: &TagPage, frontmatter: &dyn FrontmatterRenderer) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push(frontmatter.render(&page.header));
    sections.push(String::new());
    sections.push("{/* Generated by docgen. Do not edit. */}".to_string());
    sections.push(String::new());

    let anchors = unique_anchors(&page.operations);

    if !page.operations.is_empty() {
        sections.push("## Index\n".to_string());
        for (op, anchor) in page.operations.iter().zip(&anchors) {
            sections.push(format!("* [{}](#{})", escape_mdx(&op.heading), anchor));
        }
        sections.push(String::new());
    }

    for op in &page.operations {
        sections.push(render_operation(op));
    }

    let mut output = sections.join("\n");
    let trimmed = output.trim_end().len();
    output.truncate(trimmed);
    output.push('\n');
    output
}

/// Anchors for each operation heading, de-duplicated the way GitHub does:
/// the second `foo` becomes `foo-1`.
fn unique_anchors(operations: &[OperationDoc]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    operations
        .iter()
        .map(|op| {
            let slug = github_slug(&op.heading);
            let count = seen.entry(slug.clone()).or_insert(0);
            let anchor = if *count == 0 {
                slug
            } else {
                format!("{slug}-{count}")
            };
            *count += 1;
            anchor
        })
        .collect()
}

fn render_operation(op: &OperationDoc) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("## {}\n", escape_mdx(&op.heading)));

    let mut badge = format!("> `{}` `{}`", op.method.as_str(), op.path);
    if op.deprecated {
        badge.push_str(" *deprecated*");
    }
    lines.push(badge);
    lines.push(String::new());

    if let Some(ref desc) = op.description {
        let desc = desc.trim();
        if !desc.is_empty() {
            lines.push(escape_mdx(desc));
            lines.push(String::new());
        }
    }

    if !op.parameters.is_empty() {
        lines.push("#### Parameters\n".to_string());
        lines.push("| Name | In | Type | Required | Description |".to_string());
        lines.push("| --- | --- | --- | --- | --- |".to_string());
        for param in &op.parameters {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                code(&param.name),
                table_cell(&param.location),
                code(&param.type_label),
                if param.required { "yes" } else { "no" },
                table_cell(param.description.as_deref().unwrap_or_default()),
            ));
        }
        lines.push(String::new());
    }

    if let Some(ref body) = op.request_body {
        render_request_body(&mut lines, body);
    }

    if !op.responses.is_empty() {
        lines.push("#### Responses\n".to_string());
        for response in &op.responses {
            match response.description.as_deref().map(str::trim) {
                Some(desc) if !desc.is_empty() => lines.push(format!(
                    "* **{}**: {}",
                    response.status,
                    table_cell(desc)
                )),
                _ => lines.push(format!("* **{}**", response.status)),
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn render_request_body(lines: &mut Vec<String>, body: &RequestBodyDoc) {
    lines.push("#### Request body\n".to_string());
    if body.required {
        lines.push("_Required._\n".to_string());
    }
    if let Some(ref desc) = body.description {
        let desc = desc.trim();
        if !desc.is_empty() {
            lines.push(escape_mdx(desc));
            lines.push(String::new());
        }
    }
    for (media, label) in &body.media_types {
        if label.is_empty() {
            lines.push(format!("* `{media}`"));
        } else {
            lines.push(format!("* `{media}`: `{label}`"));
        }
    }
    if !body.media_types.is_empty() {
        lines.push(String::new());
    }
}

/// Escape characters MDX would read as JSX.
fn escape_mdx(text: &str) -> String {
    RE_MDX_SPECIAL.replace_all(text, r"\$0").into_owned()
}

/// Single-line, pipe-safe, MDX-safe text for a table cell or list item.
fn table_cell(text: &str) -> String {
    let single = RE_LINE_BREAK.replace_all(text.trim(), " ");
    escape_mdx(&single).replace('|', "\\|")
}

fn code(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("`{}`", text.replace('|', "\\|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::{PageHeader, YamlFrontmatter};
    use crate::model::{ParameterDoc, ResponseDoc};
    use crate::openapi::spec::Method;

    fn operation(heading: &str) -> OperationDoc {
        OperationDoc {
            method: Method::Get,
            path: "/users/{id}".to_string(),
            heading: heading.to_string(),
            description: Some("Fetch a <User> by {id}.".to_string()),
            deprecated: false,
            parameters: vec![ParameterDoc {
                name: "id".to_string(),
                location: "path".to_string(),
                type_label: "string".to_string(),
                required: true,
                description: Some("The id\nof the | user".to_string()),
            }],
            request_body: None,
            responses: vec![
                ResponseDoc {
                    status: "200".to_string(),
                    description: Some("OK".to_string()),
                },
                ResponseDoc {
                    status: "404".to_string(),
                    description: None,
                },
            ],
        }
    }

    fn page(operations: Vec<OperationDoc>) -> TagPage {
        TagPage {
            tag: "users".to_string(),
            slug: "users".to_string(),
            header: PageHeader {
                document_title: "Academy API".to_string(),
                title: "Users".to_string(),
                description: String::new(),
            },
            operations,
        }
    }

    #[test]
    fn page_starts_with_frontmatter() {
        let out = render_page(&page(vec![operation("Get user")]), &YamlFrontmatter);
        assert!(out.starts_with(
            "---\ndocument: Academy API\ntitle: Users\ndescription: \"\"\ntoc: false\n---\n"
        ));
        assert!(out.ends_with('\n'));
        assert!(!out.ends_with("\n\n"));
    }

    #[test]
    fn operation_section() {
        let out = render_page(&page(vec![operation("Get user")]), &YamlFrontmatter);
        assert!(out.contains("* [Get user](#get-user)"));
        assert!(out.contains("## Get user\n"));
        assert!(out.contains("> `GET` `/users/{id}`"));
        assert!(out.contains("Fetch a \\<User\\> by \\{id\\}."));
        assert!(out.contains("| `id` | path | `string` | yes | The id of the \\| user |"));
        assert!(out.contains("* **200**: OK"));
        assert!(out.contains("* **404**\n"));
    }

    #[test]
    fn index_anchor_keeps_underscores() {
        let out = render_page(&page(vec![operation("list_users")]), &YamlFrontmatter);
        assert!(out.contains("* [list_users](#list_users)"));
        assert!(out.contains("## list_users\n"));
    }

    #[test]
    fn duplicate_headings_get_unique_anchors() {
        let out = render_page(
            &page(vec![operation("Get user"), operation("Get user")]),
            &YamlFrontmatter,
        );
        assert!(out.contains("(#get-user)"));
        assert!(out.contains("(#get-user-1)"));
    }

    #[test]
    fn custom_frontmatter_is_used_verbatim() {
        let custom = |h: &PageHeader| format!("+++\ntitle = \"{}\"\n+++", h.title);
        let out = render_page(&page(vec![]), &custom);
        assert!(out.starts_with("+++\ntitle = \"Users\"\n+++\n"));
        assert!(!out.contains("## Index"));
    }

    #[test]
    fn request_body_section() {
        let mut op = operation("Create user");
        op.request_body = Some(RequestBodyDoc {
            required: true,
            description: None,
            media_types: vec![("application/json".to_string(), "User".to_string())],
        });
        let out = render_page(&page(vec![op]), &YamlFrontmatter);
        assert!(out.contains("#### Request body\n\n_Required._\n\n* `application/json`: `User`"));
    }

    #[test]
    fn deprecated_badge() {
        let mut op = operation("Old");
        op.deprecated = true;
        let out = render_page(&page(vec![op]), &YamlFrontmatter);
        assert!(out.contains("> `GET` `/users/{id}` *deprecated*"));
    }
}
