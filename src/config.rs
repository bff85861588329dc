//! Generator configuration, loaded from `docgen.yaml`.
//!
//! Every section is optional; missing sections and fields fall back to the
//! site's conventional layout.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "docgen.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Config {
    pub openapi: OpenApiConfig,
    pub type_table: TypeTableConfig,
}

/// How operations are grouped onto generated pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingKey {
    /// One page per tag; each operation lands on its first tag's page.
    #[default]
    Tag,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct OpenApiConfig {
    pub input_patterns: Vec<String>,
    pub output_directory: PathBuf,
    pub grouping_key: GroupingKey,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            input_patterns: vec!["openapi/*.yaml".to_string()],
            output_directory: PathBuf::from("content/docs/ui"),
            grouping_key: GroupingKey::Tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct TypeTableConfig {
    pub input_patterns: Vec<String>,
}

impl Default for TypeTableConfig {
    fn default() -> Self {
        Self {
            input_patterns: vec!["content/docs/**/*.model.mdx".to_string()],
        }
    }
}

impl Config {
    pub fn from_yaml(path: &Path, text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used if present, otherwise the defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };
        let text = fs::read_to_string(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        // An empty file deserializes to `null`, which means "all defaults".
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_yaml(&path, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<Config> {
        Config::from_yaml(Path::new("docgen.yaml"), yaml)
    }

    #[test]
    fn full_config() {
        let config = parse(
            r#"
openapi:
  inputPatterns: ["specs/*.yaml", "specs/*.json"]
  outputDirectory: out/api
  groupingKey: tag
typeTable:
  inputPatterns: ["docs/**/*.model.mdx"]
"#,
        )
        .unwrap();
        assert_eq!(
            config.openapi.input_patterns,
            vec!["specs/*.yaml", "specs/*.json"]
        );
        assert_eq!(config.openapi.output_directory, PathBuf::from("out/api"));
        assert_eq!(config.openapi.grouping_key, GroupingKey::Tag);
        assert_eq!(config.type_table.input_patterns, vec!["docs/**/*.model.mdx"]);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config = parse("openapi:\n  outputDirectory: api\n").unwrap();
        assert_eq!(config.openapi.input_patterns, vec!["openapi/*.yaml"]);
        assert_eq!(config.openapi.output_directory, PathBuf::from("api"));
        assert_eq!(config.type_table, TypeTableConfig::default());
    }

    #[test]
    fn unknown_key_rejected() {
        let err = parse("openapi:\n  per: tag\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn unknown_grouping_rejected() {
        assert!(parse("openapi:\n  groupingKey: path\n").is_err());
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let err = Config::load(Some(Path::new("/nonexistent/docgen.yaml"))).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
