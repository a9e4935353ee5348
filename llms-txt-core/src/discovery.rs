//! Filesystem discovery of source documents.
//!
//! Walks the content root depth-first with entries sorted by file name, keeps
//! files matching any include pattern and drops those matching an ignore
//! pattern. Patterns are matched against the `/`-separated relative path.
//! Directories covered by a `dir/**` ignore pattern are not walked at all.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use glob::{MatchOptions, Pattern};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::contract::{DiscoveryError, SourceDiscovery};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Discovery backed by `walkdir` and `glob` patterns.
#[derive(Debug, Clone)]
pub struct GlobDiscovery {
    include: Vec<String>,
    ignore: Vec<String>,
}

impl GlobDiscovery {
    pub fn new(include: Vec<String>, ignore: Vec<String>) -> Self {
        Self { include, ignore }
    }

    fn compile(patterns: &[String]) -> Result<Vec<Pattern>, DiscoveryError> {
        patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| DiscoveryError::Pattern {
                    pattern: p.clone(),
                    message: e.msg.to_string(),
                })
            })
            .collect()
    }

    fn walk(&self, root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
        let include = Self::compile(&self.include)?;
        let ignore = Self::compile(&self.ignore)?;
        let pruned = self.pruned_dirs()?;

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let Ok(rel) = entry.path().strip_prefix(root) else {
                    return true;
                };
                let rel_str = to_slash(rel);
                let skip = pruned.iter().any(|p| p.matches_with(&rel_str, MATCH_OPTIONS));
                if skip {
                    debug!(path = %rel_str, "Skipping ignored directory");
                }
                !skip
            });

        let mut results = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| DiscoveryError::Walk {
                path: e.path().unwrap_or(root).to_path_buf(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(root) else {
                continue;
            };
            let rel_str = to_slash(rel);

            if !include.iter().any(|p| p.matches_with(&rel_str, MATCH_OPTIONS)) {
                continue;
            }
            if ignore.iter().any(|p| p.matches_with(&rel_str, MATCH_OPTIONS)) {
                debug!(path = %rel_str, "Skipping ignored file");
                continue;
            }
            results.push(rel.to_path_buf());
        }
        Ok(results)
    }

    /// Directory patterns derived from ignore patterns of the form `dir/**`.
    /// Everything below a matching directory is ignored, so it is not walked.
    fn pruned_dirs(&self) -> Result<Vec<Pattern>, DiscoveryError> {
        let prefixes: Vec<String> = self
            .ignore
            .iter()
            .filter_map(|p| p.strip_suffix("/**"))
            .filter(|prefix| !prefix.is_empty())
            .map(str::to_string)
            .collect();
        Self::compile(&prefixes)
    }
}

#[async_trait]
impl SourceDiscovery for GlobDiscovery {
    async fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
        info!(root = %root.display(), "Discovering source documents");
        let discovery = self.clone();
        let root = root.to_path_buf();
        let found = tokio::task::spawn_blocking(move || discovery.walk(&root)).await??;
        info!(count = found.len(), "Discovery complete");
        Ok(found)
    }
}

/// Render a relative path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
