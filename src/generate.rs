//! Entry points that plan a batch and then write or check it.

use crate::config::{OpenApiConfig, TypeTableConfig};
use crate::error::Result;
use crate::files::{self, GeneratedFile};
use crate::frontmatter::FrontmatterRenderer;
use crate::{openapi, type_table};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Write every planned file.
    #[default]
    Write,
    /// Compare the plan against disk without writing.
    Check,
}

/// What a run did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Number of files in the plan.
    pub planned: usize,
    /// In [`Mode::Check`], outputs that are missing or differ from the plan.
    pub stale: Vec<PathBuf>,
}

impl Outcome {
    pub fn is_up_to_date(&self) -> bool {
        self.stale.is_empty()
    }
}

/// Expand OpenAPI documents into per-tag pages.
pub fn generate_openapi(
    config: &OpenApiConfig,
    frontmatter: &dyn FrontmatterRenderer,
    mode: Mode,
) -> Result<Outcome> {
    let planned = openapi::expand(config, frontmatter)?;
    apply(&planned, mode)
}

/// Rewrite type-table templates into their sibling pages.
pub fn generate_type_tables(config: &TypeTableConfig, mode: Mode) -> Result<Outcome> {
    let planned = type_table::plan(config)?;
    apply(&planned, mode)
}

fn apply(planned: &[GeneratedFile], mode: Mode) -> Result<Outcome> {
    let stale = match mode {
        Mode::Write => {
            files::write_files(planned)?;
            Vec::new()
        }
        Mode::Check => files::stale_files(planned)
            .into_iter()
            .map(|file| {
                warn!(path = %file.path.display(), origin = %file.origin, "stale output");
                file.path.clone()
            })
            .collect(),
    };
    Ok(Outcome {
        planned: planned.len(),
        stale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupingKey;
    use crate::frontmatter::YamlFrontmatter;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn openapi_rerun_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("api.yaml"),
            "openapi: 3.1.0\ninfo: {title: T}\npaths:\n  /a:\n    get: {tags: [alpha], summary: A}\n",
        )
        .unwrap();
        let config = OpenApiConfig {
            input_patterns: vec![format!("{}/*.yaml", dir.path().display())],
            output_directory: dir.path().join("out"),
            grouping_key: GroupingKey::Tag,
        };

        generate_openapi(&config, &YamlFrontmatter, Mode::Write).unwrap();
        let first = fs::read(dir.path().join("out/alpha.mdx")).unwrap();
        generate_openapi(&config, &YamlFrontmatter, Mode::Write).unwrap();
        let second = fs::read(dir.path().join("out/alpha.mdx")).unwrap();
        assert_eq!(first, second);

        let outcome = generate_openapi(&config, &YamlFrontmatter, Mode::Check).unwrap();
        assert!(outcome.is_up_to_date());
        assert_eq!(outcome.planned, 1);
    }

    #[test]
    fn check_reports_without_writing() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("foo.model.mdx");
        fs::write(&template, "---type-table-demo---\nx\n---end---\n").unwrap();
        let config = TypeTableConfig {
            input_patterns: vec![template.display().to_string()],
        };

        let outcome = generate_type_tables(&config, Mode::Check).unwrap();
        assert_eq!(outcome.stale, vec![dir.path().join("foo.mdx")]);
        assert!(!dir.path().join("foo.mdx").exists());

        generate_type_tables(&config, Mode::Write).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("foo.mdx")).unwrap(),
            "---type-table---\nx\n---end---\n"
        );
        assert!(generate_type_tables(&config, Mode::Check)
            .unwrap()
            .is_up_to_date());
    }
}
