//! Per-file processing: read, extract metadata, normalize body, write the
//! Markdown copy and record a manifest entry.
//!
//! Files are handled strictly one after another. The first read or write
//! failure aborts the whole corpus; files written before it stay on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::config::GeneratorConfig;
use crate::contract::{ContentStore, Dialect, GenerateError, ManifestEntry, ProcessedContent};
use crate::frontmatter::extract_metadata;
use crate::markup::strip_markup;
use crate::paths::{category, site_url, url_path};
use crate::resolve::{resolve_description, resolve_title};

/// Extract metadata and produce the normalized body for one file's text.
pub fn process_content(dialect: Dialect, raw: &str) -> ProcessedContent {
    let (metadata, body) = extract_metadata(dialect, raw);
    let body = match dialect {
        Dialect::Extended => strip_markup(&body),
        Dialect::Plain => body,
    };
    ProcessedContent {
        metadata,
        body: body.trim().to_string(),
    }
}

/// Everything derived from one source file.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub entry: ManifestEntry,
    /// Output path relative to the Markdown directory.
    pub url_path: String,
    pub content: ProcessedContent,
}

/// Build the manifest entry and normalized content for `relative` from its raw text.
pub fn describe_file(relative: &Path, raw: &str) -> ProcessedFile {
    let content = process_content(Dialect::from_path(relative), raw);
    let title = resolve_title(relative, &content.metadata, &content.body);
    let description = resolve_description(&content.metadata, &content.body);
    let url_path = url_path(relative);

    let entry = ManifestEntry {
        relative_path: relative.to_path_buf(),
        url: site_url(&url_path),
        title,
        description,
        category: category(relative),
    };
    ProcessedFile {
        entry,
        url_path,
        content,
    }
}

/// Read one source file, write its normalized body and return its manifest entry.
pub fn process_file<S>(
    store: &S,
    config: &GeneratorConfig,
    relative: &Path,
) -> Result<ProcessedFile, GenerateError>
where
    S: ContentStore + ?Sized,
{
    let source_path = config.content_dir.join(relative);
    let raw = store.read_to_string(&source_path).map_err(|e| {
        error!(path = %source_path.display(), error = ?e, "Failed to read source file");
        GenerateError::io(&source_path, e)
    })?;

    let processed = describe_file(relative, &raw);

    let target = config.markdown_dir().join(&processed.url_path);
    store.write(&target, &processed.content.body).map_err(|e| {
        error!(path = %target.display(), error = ?e, "Failed to write Markdown copy");
        GenerateError::io(&target, e)
    })?;

    match serde_json::to_string(&processed.entry) {
        Ok(json) => debug!(json = %json, "Manifest entry"),
        Err(e) => debug!(error = ?e, "Failed to serialize manifest entry"),
    }
    info!(
        source = %relative.display(),
        target = %target.display(),
        "Wrote Markdown copy"
    );
    Ok(processed)
}

/// Result of processing every discovered file.
#[derive(Debug, Default)]
pub struct CorpusOutcome {
    /// Entries in discovery order.
    pub manifest: Vec<ManifestEntry>,
    /// Output paths written by more than one source file, with the sources
    /// in discovery order. The last source wins on disk.
    pub collisions: Vec<(String, Vec<PathBuf>)>,
}

/// Process every discovered file in order.
pub fn process_corpus<S>(
    store: &S,
    config: &GeneratorConfig,
    sources: &[PathBuf],
) -> Result<CorpusOutcome, GenerateError>
where
    S: ContentStore + ?Sized,
{
    let mut outcome = CorpusOutcome::default();
    let mut writers: HashMap<String, Vec<PathBuf>> = HashMap::new();
    let mut collision_order: Vec<String> = Vec::new();

    for relative in sources {
        let processed = process_file(store, config, relative)?;

        let sources_for_path = writers.entry(processed.url_path.clone()).or_default();
        sources_for_path.push(relative.clone());
        if sources_for_path.len() == 2 {
            collision_order.push(processed.url_path.clone());
        }
        if sources_for_path.len() > 1 {
            warn!(
                url_path = %processed.url_path,
                source = %relative.display(),
                "Output path already written by an earlier source; overwriting"
            );
        }

        outcome.manifest.push(processed.entry);
    }

    outcome.collisions = collision_order
        .into_iter()
        .filter_map(|path| writers.remove(&path).map(|srcs| (path, srcs)))
        .collect();
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{MetaValue, MockContentStore};
    use std::io;

    #[test]
    fn extended_dialect_scenario() {
        let raw = "export const metadata = {title: 'X', slug: 'x'};\nimport Foo from 'bar';\n<Foo/>\nHello world";
        let content = process_content(Dialect::Extended, raw);
        assert_eq!(content.metadata.len(), 2);
        assert_eq!(content.metadata["title"], MetaValue::Text("X".into()));
        assert_eq!(content.metadata["slug"], MetaValue::Text("x".into()));
        assert_eq!(content.body, "Hello world");
    }

    #[test]
    fn plain_dialect_keeps_markup() {
        let raw = "---\ntitle: T\n---\n\nimport Foo from 'bar';\n<Foo/>\n";
        let content = process_content(Dialect::Plain, raw);
        assert_eq!(content.body, "import Foo from 'bar';\n<Foo/>");
    }

    #[test]
    fn describe_file_fills_entry() {
        let file = describe_file(
            Path::new("posts/my-article/index.mdx"),
            "# My Article\n\nSome words.",
        );
        assert_eq!(file.entry.title, "My Article");
        assert_eq!(file.entry.category, "posts");
        assert_eq!(file.entry.url, "/md/posts/my-article/my-article.md");
        assert_eq!(file.entry.description, None);
        assert_eq!(file.url_path, "posts/my-article/my-article.md");
    }

    #[test]
    fn process_file_writes_normalized_body() {
        let config = GeneratorConfig::new("/content", "/site");
        let mut store = MockContentStore::new();
        store
            .expect_read_to_string()
            .withf(|path| path == Path::new("/content/blog/post.en.md"))
            .times(1)
            .returning(|_| Ok("---\ntitle: Post\n---\n\nBody text\n".to_string()));
        store
            .expect_write()
            .withf(|path, contents| path == Path::new("/site/md/blog/post.md") && contents == "Body text")
            .times(1)
            .returning(|_, _| Ok(()));

        let processed = process_file(&store, &config, Path::new("blog/post.en.md")).unwrap();
        assert_eq!(processed.entry.title, "Post");
        assert_eq!(processed.entry.url, "/md/blog/post.md");
    }

    #[test]
    fn read_failure_aborts_before_any_write() {
        let config = GeneratorConfig::new("/content", "/site");
        let mut store = MockContentStore::new();
        store
            .expect_read_to_string()
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "gone")));
        store.expect_write().never();

        let err = process_corpus(
            &store,
            &config,
            &[PathBuf::from("a.md"), PathBuf::from("b.md")],
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::Io { ref path, .. } if path == Path::new("/content/a.md")));
    }

    #[test]
    fn collisions_keep_both_entries() {
        let config = GeneratorConfig::new("/content", "/site");
        let mut store = MockContentStore::new();
        store
            .expect_read_to_string()
            .returning(|_| Ok("Body".to_string()));
        store
            .expect_write()
            .withf(|path, _| path == Path::new("/site/md/blog/post.md"))
            .times(2)
            .returning(|_, _| Ok(()));

        let outcome = process_corpus(
            &store,
            &config,
            &[PathBuf::from("blog/post.md"), PathBuf::from("blog/post.en.mdx")],
        )
        .unwrap();
        assert_eq!(outcome.manifest.len(), 2);
        assert_eq!(outcome.collisions.len(), 1);
        assert_eq!(outcome.collisions[0].0, "blog/post.md");
        assert_eq!(
            outcome.collisions[0].1,
            vec![PathBuf::from("blog/post.md"), PathBuf::from("blog/post.en.mdx")]
        );
    }
}
