//! docgen — build-time page generation for the academy documentation site.
//!
//! Two independent operations:
//!
//! - **OpenAPI expansion** ([`generate_openapi`]): one MDX reference page per
//!   API tag, headed by front-matter from an injected [`FrontmatterRenderer`].
//! - **Type-table rewriting** ([`generate_type_tables`]): demo blocks in
//!   `*.model.mdx` templates become final blocks in a sibling `*.mdx`.
//!
//! Both plan their output in memory first, so input errors abort before
//! anything is written.

pub mod config;
pub mod error;
pub mod files;
pub mod frontmatter;
pub mod generate;
pub mod logging;
pub mod model;
pub mod openapi;
pub mod slug;
pub mod type_table;

pub use config::{Config, GroupingKey, OpenApiConfig, TypeTableConfig};
pub use error::{Error, Result};
pub use frontmatter::{FrontmatterRenderer, PageHeader, YamlFrontmatter};
pub use generate::{generate_openapi, generate_type_tables, Mode, Outcome};
