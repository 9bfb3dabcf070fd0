//! Post-run scan for `[cappuccino-warning]` markers left in the tree

use crate::report::Reporter;
use crate::{MANIFEST_FILE, TEMPLATE_DIR, WARNING_MARKER};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// One line containing the warning marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningLocation {
    /// Path relative to the working tree root
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
}

/// Result of one warning scan
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Marker lines found, in walk order
    pub locations: Vec<WarningLocation>,
    /// Files and directories that could not be read and were skipped, relative
    /// to the working tree root
    pub unreadable: Vec<PathBuf>,
}

/// 1-based numbers of the lines in `content` that contain `marker`
pub fn marker_lines(content: &[u8], marker: &[u8]) -> Vec<usize> {
    if marker.is_empty() {
        return Vec::new();
    }

    content
        .split(|b| *b == b'\n')
        .enumerate()
        .filter(|(_, line)| line.windows(marker.len()).any(|w| w == marker))
        .map(|(idx, _)| idx + 1)
        .collect()
}

fn relative(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

fn is_excluded(entry: &DirEntry, root: &Path) -> bool {
    match entry.path().strip_prefix(root) {
        Ok(rel) => rel == Path::new(TEMPLATE_DIR) || rel == Path::new(MANIFEST_FILE),
        Err(_) => false,
    }
}

/// Walk the working tree and report every line carrying the warning marker.
///
/// Never fails: unreadable files and walk errors are logged and skipped.
pub async fn scan_warnings(root: &Path, reporter: &dyn Reporter) -> ScanReport {
    reporter.info("Parsing repository for valuable information");

    let mut report = ScanReport::default();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e, root));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                if let Some(path) = e.path() {
                    report.unreadable.push(relative(path, root));
                }
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let rel = relative(entry.path(), root);

        let content = match fs::read(entry.path()).await {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %rel.display(), "skipping unreadable file: {}", e);
                report.unreadable.push(rel);
                continue;
            }
        };

        for line in marker_lines(&content, WARNING_MARKER.as_bytes()) {
            reporter.warning(&format!(
                "Please make sure to setup needed information located L-{:03} in {}",
                line,
                rel.display()
            ));
            report.locations.push(WarningLocation {
                path: rel.clone(),
                line,
            });
        }
    }

    report
}
