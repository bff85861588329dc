//! GitHub-flavored anchor/slug generation for headings and page names.

/// GitHub heading anchor slug generation.
///
/// - lowercase
/// - remove all chars that aren't alphanumeric, space, underscore, or hyphen
/// - replace spaces with hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

/// Page file stem for a tag; never empty.
pub fn page_slug(tag: &str) -> String {
    let slug = github_slug(tag.trim());
    if slug.is_empty() {
        "default".to_string()
    } else {
        slug
    }
}
