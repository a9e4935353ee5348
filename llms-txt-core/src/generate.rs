//! High-level pipeline: orchestrates discover → process → index for a content tree.
//!
//! This module provides the top-level orchestration for a generation run. It:
//!   - Validates that the content directory exists before any other I/O
//!   - Ensures `<output>/md` exists
//!   - Discovers source documents through a [`SourceDiscovery`]
//!   - Processes each document in discovery order, writing its Markdown copy
//!   - Renders and writes `<output>/llms.txt`
//!
//! # Major Types
//! - [`GenerateReport`]: what was written, for the CLI summary and for tests
//!
//! # Error Handling
//! Fail-fast: the first failing step returns its [`GenerateError`]. Files
//! written before the failure are left in place. Every run is a full
//! regeneration; nothing from earlier runs is consulted.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::config::GeneratorConfig;
use crate::contract::{ContentStore, GenerateError, ManifestEntry, SourceDiscovery};
use crate::corpus::process_corpus;
use crate::index::{group_by_category, render_index};

#[derive(Debug)]
pub struct GenerateReport {
    pub manifest: Vec<ManifestEntry>,
    pub index_path: PathBuf,
    pub documents_written: usize,
    /// Category names in first-seen order.
    pub categories: Vec<String>,
    /// Output paths produced by more than one source file.
    pub collisions: Vec<(String, Vec<PathBuf>)>,
}

pub async fn generate<D, S>(
    config: &GeneratorConfig,
    discovery: &D,
    store: &S,
) -> Result<GenerateReport, GenerateError>
where
    D: SourceDiscovery + ?Sized,
    S: ContentStore + ?Sized,
{
    info!(
        content_dir = %config.content_dir.display(),
        output_dir = %config.output_dir.display(),
        "[GENERATE] Starting llms.txt generation"
    );

    if !store.exists(&config.content_dir) {
        error!(content_dir = %config.content_dir.display(), "[GENERATE][ERROR] Content directory does not exist");
        return Err(GenerateError::ContentDirMissing(config.content_dir.clone()));
    }

    let markdown_dir = config.markdown_dir();
    store.create_dir_all(&markdown_dir).map_err(|e| {
        error!(path = %markdown_dir.display(), error = ?e, "[GENERATE][ERROR] Failed to create output directory");
        GenerateError::io(&markdown_dir, e)
    })?;

    // --- Step 1: Discover ---
    let sources = discovery.discover(&config.content_dir).await.map_err(|e| {
        error!(error = %e, "[GENERATE][ERROR] Discovery failed");
        GenerateError::from(e)
    })?;
    info!(count = sources.len(), "[GENERATE] Discovered source documents");

    // --- Step 2: Process ---
    let outcome = process_corpus(store, config, &sources)?;
    for (path, writers) in &outcome.collisions {
        warn!(url_path = %path, sources = ?writers, "[GENERATE] Output path collision");
    }

    // --- Step 3: Index ---
    let index = render_index(config, &outcome.manifest);
    let index_path = config.index_path();
    store.write(&index_path, &index).map_err(|e| {
        error!(path = %index_path.display(), error = ?e, "[GENERATE][ERROR] Failed to write index");
        GenerateError::io(&index_path, e)
    })?;

    let categories: Vec<String> = group_by_category(&outcome.manifest)
        .into_iter()
        .map(|(name, _)| name.to_string())
        .collect();
    info!(
        documents = outcome.manifest.len(),
        categories = categories.len(),
        index = %index_path.display(),
        "[GENERATE] Generation complete"
    );

    Ok(GenerateReport {
        documents_written: outcome.manifest.len(),
        manifest: outcome.manifest,
        index_path,
        categories,
        collisions: outcome.collisions,
    })
}
