//! Marker substitution in a single file or across the whole working tree
//!
//! Replacement works on raw bytes, so a tree-wide substitution walks past
//! binary or non-UTF-8 files without failing; the marker just never matches.

use crate::error::{EngineError, Result};
use crate::manifest::Scope;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Totals for one substitution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionStats {
    /// Regular files read
    pub files_visited: usize,
    /// Files rewritten because they contained the marker
    pub files_changed: usize,
    /// Marker occurrences replaced across all files
    pub occurrences: usize,
}

/// Indent every line of `value` after the first by `indent` spaces.
///
/// The first line takes the place of the marker, which already sits at its
/// own indentation in the target file.
pub fn indent_block(value: &str, indent: Option<usize>) -> String {
    let pad = " ".repeat(indent.unwrap_or(0));
    if pad.is_empty() {
        return value.to_string();
    }

    value
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace every occurrence of `marker` in `haystack`, left to right, without
/// rescanning inserted text. Returns the new bytes and the number of matches.
pub fn replace_all(haystack: &[u8], marker: &[u8], replacement: &[u8]) -> (Vec<u8>, usize) {
    if marker.is_empty() || haystack.len() < marker.len() {
        return (haystack.to_vec(), 0);
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut count = 0;
    let mut i = 0;

    while i < haystack.len() {
        if haystack[i..].starts_with(marker) {
            out.extend_from_slice(replacement);
            i += marker.len();
            count += 1;
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }

    (out, count)
}

/// Replace every occurrence of `marker` in the file at `path`.
///
/// The file is rewritten in place (truncate then write) only when the marker
/// occurs. A missing marker is not an error; the returned count is zero.
pub async fn substitute_in_file(
    path: &Path,
    marker: &str,
    value: &str,
    indent: Option<usize>,
) -> Result<usize> {
    let content = fs::read(path)
        .await
        .map_err(|e| EngineError::io("read", path, e))?;

    let block = indent_block(value, indent);
    let (updated, count) = replace_all(&content, marker.as_bytes(), block.as_bytes());

    if count > 0 {
        fs::write(path, updated)
            .await
            .map_err(|e| EngineError::io("write", path, e))?;
    }

    Ok(count)
}

/// Apply [`substitute_in_file`] to every regular file under `root`.
///
/// The first failing file aborts the walk; files already rewritten stay
/// rewritten.
pub async fn substitute_in_tree(
    root: &Path,
    marker: &str,
    value: &str,
    indent: Option<usize>,
) -> Result<SubstitutionStats> {
    let mut stats = SubstitutionStats::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            EngineError::io("walk", path, e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        debug!(path = %entry.path().display(), "visiting");
        let count = substitute_in_file(entry.path(), marker, value, indent).await?;

        stats.files_visited += 1;
        if count > 0 {
            stats.files_changed += 1;
            stats.occurrences += count;
        }
    }

    Ok(stats)
}

/// Route a substitution to a single file or the whole tree depending on scope.
/// File paths are relative to `root`.
pub async fn substitute(
    root: &Path,
    scope: &Scope,
    marker: &str,
    value: &str,
    indent: Option<usize>,
) -> Result<SubstitutionStats> {
    match scope {
        Scope::File(path) => {
            let full: PathBuf = root.join(path);
            let occurrences = substitute_in_file(&full, marker, value, indent).await?;
            Ok(SubstitutionStats {
                files_visited: 1,
                files_changed: usize::from(occurrences > 0),
                occurrences,
            })
        }
        Scope::Tree => substitute_in_tree(root, marker, value, indent).await,
    }
}
