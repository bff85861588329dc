//! Front-matter rendering for generated pages.
//!
//! The OpenAPI expansion never formats its own header: it computes a
//! [`PageHeader`] and hands it to a [`FrontmatterRenderer`], so the header
//! format can be swapped without touching the expansion.

/// Values computed for one generated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeader {
    /// Title of the OpenAPI document the page was expanded from.
    pub document_title: String,
    pub title: String,
    pub description: String,
}

/// Produces the literal text block prepended to a page body.
pub trait FrontmatterRenderer {
    fn render(&self, header: &PageHeader) -> String;
}

impl<F> FrontmatterRenderer for F
where
    F: Fn(&PageHeader) -> String,
{
    fn render(&self, header: &PageHeader) -> String {
        self(header)
    }
}

/// YAML front-matter with the fields `document`, `title`, `description`
/// and `toc`, in that order. `toc` is always `false`.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlFrontmatter;

impl FrontmatterRenderer for YamlFrontmatter {
    fn render(&self, header: &PageHeader) -> String {
        let lines = [
            "---".to_string(),
            format!("document: {}", quote_yaml_string(&header.document_title)),
            format!("title: {}", quote_yaml_string(&header.title)),
            format!("description: {}", quote_yaml_string(&header.description)),
            "toc: false".to_string(),
            "---".to_string(),
        ];
        lines.join("\n")
    }
}

/// Quote a YAML string value unless it reads back as the same plain string.
fn quote_yaml_string(s: &str) -> String {
    let needs_quotes = s.is_empty()
        || s.contains(&[':', '#', '"', '\'', '\n', '\\'][..])
        || s.starts_with(
            &[' ', '-', '[', '{', '&', '*', '!', '|', '>', '%', '@', '`', '?', ','][..],
        )
        || s.ends_with(' ')
        // YAML 1.1 booleans; serde_yaml reads these back as strings.
        || matches!(
            s.to_ascii_lowercase().as_str(),
            "yes" | "no" | "on" | "off" | "y" | "n"
        )
        || !reads_back_as_string(s);
    if needs_quotes {
        let escaped = s
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n");
        format!("\"{escaped}\"")
    } else {
        s.to_string()
    }
}

/// Whether `s` parses as a YAML string scalar equal to itself.
fn reads_back_as_string(s: &str) -> bool {
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(s),
        Ok(serde_yaml::Value::String(ref parsed)) if parsed == s
    )
}
