//! OpenAPI expansion: one MDX reference page per API tag.

pub mod group;
pub mod render;
pub mod spec;

use crate::config::{GroupingKey, OpenApiConfig};
use crate::error::{Error, Result};
use crate::files::{self, GeneratedFile};
use crate::frontmatter::FrontmatterRenderer;
use spec::OpenApiDocument;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extensions picked up when a pattern names a directory.
const SUPPORTED_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Parse one OpenAPI document; `.json` files are read as JSON, anything
/// else as YAML.
pub fn parse_document(path: &Path, content: &str) -> Result<OpenApiDocument> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(content).map_err(|source| Error::ParseJson {
            path: path.to_path_buf(),
            source,
        }),
        _ => serde_yaml::from_str(content).map_err(|source| Error::ParseYaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Plan the pages for every document matched by `config`.
///
/// All documents are parsed before any page is rendered, so a malformed
/// document aborts the run with nothing planned.
pub fn expand(
    config: &OpenApiConfig,
    frontmatter: &dyn FrontmatterRenderer,
) -> Result<Vec<GeneratedFile>> {
    let inputs = files::expand_globs(&config.input_patterns, SUPPORTED_EXTENSIONS)?;

    let mut documents: Vec<(PathBuf, OpenApiDocument)> = Vec::with_capacity(inputs.len());
    for path in inputs {
        let content = files::read_input(&path)?;
        let document = parse_document(&path, &content)?;
        debug!(
            path = %path.display(),
            version = %document.openapi,
            paths = document.paths.len(),
            "parsed OpenAPI document"
        );
        documents.push((path, document));
    }

    let pages = match config.grouping_key {
        GroupingKey::Tag => group::group_by_tag(&documents),
    };
    info!(
        documents = documents.len(),
        pages = pages.len(),
        "expanded OpenAPI documents"
    );

    let planned: Vec<GeneratedFile> = pages
        .iter()
        .map(|page| GeneratedFile {
            path: config
                .output_directory
                .join(format!("{}.{}", page.slug, render::PAGE_EXTENSION)),
            contents: render::render_page(page, frontmatter),
            origin: format!("tag '{}'", page.tag),
        })
        .collect();

    files::check_collisions(&planned)?;
    Ok(planned)
}
