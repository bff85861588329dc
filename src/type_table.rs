//! Type-table template rewriting.
//!
//! Templates such as `button.model.mdx` carry demo blocks:
//!
//! ```text
//! ---type-table-demo---
//! <content>
//! ---end---
//! ```
//!
//! Each block is rewritten to its final `---type-table---` form and the
//! whole file is written next to the template as `button.mdx`.

use crate::config::TypeTableConfig;
use crate::error::Result;
use crate::files::{self, GeneratedFile};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEMO_START: &str = "---type-table-demo---";
pub const FINAL_START: &str = "---type-table---";
pub const END: &str = "---end---";

/// Extension of every rewritten output file.
pub const OUTPUT_EXTENSION: &str = "mdx";

/// File extensions picked up when a pattern names a directory.
const SUPPORTED_EXTENSIONS: &[&str] = &["mdx"];

/// Result of rewriting one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Number of demo blocks that were rewritten.
    pub blocks: usize,
}

/// Rewrite every demo block in `text`.
///
/// A block starts at a line that is exactly [`DEMO_START`] and ends at the
/// first following line that is exactly [`END`] with non-empty content in
/// between. Marker lines may end in `\r\n` or `\n`. Text outside blocks is
/// copied byte for byte.
pub fn rewrite_blocks(text: &str) -> Rewrite {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut out = String::with_capacity(text.len());
    let mut blocks = 0;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let opens = line.ends_with('\n') && strip_line_ending(line) == DEMO_START;
        let close = if opens { find_end(&lines, i) } else { None };

        match close {
            Some((end, content)) => {
                out.push_str(FINAL_START);
                out.push('\n');
                out.push_str(&content);
                out.push('\n');
                out.push_str(END);
                // Keep whatever terminated the end marker line.
                out.push_str(&lines[end][END.len()..]);
                blocks += 1;
                i = end + 1;
            }
            None => {
                out.push_str(line);
                i += 1;
            }
        }
    }

    Rewrite { text: out, blocks }
}

/// Find the end marker closing the block opened at `start`, returning its
/// line index and the captured content.
fn find_end(lines: &[&str], start: usize) -> Option<(usize, String)> {
    for end in start + 1..lines.len() {
        if strip_line_ending(lines[end]) != END {
            continue;
        }
        let joined: String = lines[start + 1..end].concat();
        // Every line before `end` carries a '\n'; drop the break that
        // precedes the end marker, and its '\r' unless nothing else is left.
        let Some(content) = joined.strip_suffix('\n') else {
            continue;
        };
        let content = match content.strip_suffix('\r') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => content,
        };
        if content.is_empty() {
            continue;
        }
        return Some((end, content.to_string()));
    }
    None
}

/// Strip a trailing `\n` and one trailing `\r`.
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Derive the output path for a template: the base name up to its first
/// `.`, with the `.mdx` extension, in the same directory.
///
/// `docs/foo.model.mdx` becomes `docs/foo.mdx`; `docs/bar.mdx` maps onto
/// itself.
pub fn output_path(source: &Path) -> PathBuf {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or_default();
    source.with_file_name(format!("{stem}.{OUTPUT_EXTENSION}"))
}

/// Plan the rewritten output for every template matched by `config`.
pub fn plan(config: &TypeTableConfig) -> Result<Vec<GeneratedFile>> {
    let inputs = files::expand_globs(&config.input_patterns, SUPPORTED_EXTENSIONS)?;

    let mut planned = Vec::with_capacity(inputs.len());
    for path in inputs {
        let content = files::read_input(&path)?;
        let rewrite = rewrite_blocks(&content);
        let target = output_path(&path);
        debug!(
            source = %path.display(),
            target = %target.display(),
            blocks = rewrite.blocks,
            "rewrote template"
        );
        planned.push(GeneratedFile {
            path: target,
            contents: rewrite.text,
            origin: path.display().to_string(),
        });
    }

    files::check_collisions(&planned)?;
    Ok(planned)
}
