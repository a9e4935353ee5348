//! # contract: data model and collaborator seams for the llms.txt pipeline
//!
//! This module defines the plain data types that flow through a run
//! (metadata, processed content, manifest entries) and the two traits the
//! pipeline uses to talk to the outside world:
//!
//! - [`SourceDiscovery`]: enumerates source files under a content root.
//! - [`ContentStore`]: reads and writes files.
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall` so tests can drive the
//!   orchestrator without touching the filesystem.
//!
//! ## Adding New Collaborators
//! - Implement the trait for your backend (e.g. an in-memory store).
//! - Convert backend failures into the error types below; the pipeline does
//!   not retry and aborts on the first error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;

/// A single metadata value: either a plain string or an ordered list (used for `tags`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
}

impl MetaValue {
    /// Returns the string value, if this is a non-list value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            MetaValue::List(_) => None,
        }
    }
}

/// Metadata extracted from a source file.
///
/// Keys are stored verbatim. An absent key is distinct from a key with an
/// empty value.
pub type Metadata = BTreeMap<String, MetaValue>;

/// The source dialect, inferred from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Plain Markdown (`.md`): block-header metadata only.
    Plain,
    /// Markdown with embedded components (`.mdx`): block header or exported
    /// object literal, plus markup stripping.
    Extended,
}

impl Dialect {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("mdx") => Dialect::Extended,
            _ => Dialect::Plain,
        }
    }
}

/// Metadata plus the normalized body text of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedContent {
    pub metadata: Metadata,
    /// Body with no leading/trailing whitespace. For the extended dialect it
    /// also carries no component markup or import statements.
    pub body: String,
}

/// One row of the manifest, produced per processed source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Path of the source file relative to the content root, as discovered.
    pub relative_path: PathBuf,
    /// Site-relative URL, always starting with `/md/`.
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
}

/// Error type for the discovery collaborator.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("invalid pattern {pattern:?}: {message}")]
    Pattern { pattern: String, message: String },
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("discovery task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Enumerates source files under a content root.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SourceDiscovery: Send + Sync {
    /// Return every matching file below `root`, as paths relative to `root`,
    /// in traversal order.
    async fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, DiscoveryError>;
}

/// Blocking file access used by the pipeline.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait ContentStore: Send + Sync {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Write `contents` to `path`, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
}

/// Errors that abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("content directory does not exist: {}", .0.display())]
    ContentDirMissing(PathBuf),
    #[error("source discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }
}
