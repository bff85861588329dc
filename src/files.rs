//! Input discovery and planned output handling shared by both generators.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// One output file, fully rendered in memory before anything touches disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
    /// Human-readable description of what produced this file.
    pub origin: String,
}

/// Expand patterns into a sorted, de-duplicated list of input files.
///
/// A pattern may name a file, a directory (scanned non-recursively for
/// `extensions`), or a glob. A pattern that resolves to nothing is an error,
/// and so is an I/O error while listing a directory.
pub fn expand_globs(patterns: &[String], extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(normalize(path));
            continue;
        }
        if path.is_dir() {
            let before = files.len();
            let entries = fs::read_dir(path).map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
            for entry in entries {
                let p = entry
                    .map_err(|source| Error::Read {
                        path: path.to_path_buf(),
                        source,
                    })?
                    .path();
                if p.is_file() && has_extension(&p, extensions) {
                    files.push(normalize(&p));
                }
            }
            if files.len() == before {
                return Err(Error::NoMatches {
                    pattern: pattern.clone(),
                });
            }
            continue;
        }
        let mut matches = Vec::new();
        for entry in glob::glob(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })? {
            let p = entry.map_err(|e| Error::Read {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;
            if p.is_file() {
                matches.push(normalize(&p));
            }
        }
        if matches.is_empty() {
            return Err(Error::NoMatches {
                pattern: pattern.clone(),
            });
        }
        debug!(pattern = %pattern, count = matches.len(), "expanded glob");
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Drop `.` components so `./foo.mdx` and `foo.mdx` compare equal.
fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        normalized
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reject a plan in which two entries target the same path.
pub fn check_collisions(files: &[GeneratedFile]) -> Result<()> {
    let mut seen: HashMap<&Path, &str> = HashMap::new();
    for file in files {
        if let Some(first) = seen.insert(&file.path, &file.origin) {
            return Err(Error::OutputCollision {
                path: file.path.clone(),
                first: first.to_string(),
                second: file.origin.clone(),
            });
        }
    }
    Ok(())
}

/// Write every planned file, creating parent directories as needed.
///
/// Existing files are overwritten. Nothing is rolled back if a later write
/// fails.
pub fn write_files(files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&file.path, &file.contents).map_err(|source| Error::Write {
            path: file.path.clone(),
            source,
        })?;
        info!(path = %file.path.display(), origin = %file.origin, "wrote");
    }
    Ok(())
}

/// Return the planned files whose on-disk contents differ (or are missing).
pub fn stale_files(files: &[GeneratedFile]) -> Vec<&GeneratedFile> {
    files
        .iter()
        .filter(|file| match fs::read_to_string(&file.path) {
            Ok(existing) => existing != file.contents,
            Err(_) => true,
        })
        .collect()
}
