use std::path::PathBuf;
use tracing::{debug, info};

pub const DEFAULT_PROJECT_NAME: &str = "Personal Website & Blog";
pub const DEFAULT_PROJECT_DESCRIPTION: &str =
    "Articles, notes and project write-ups from a personal website and blog.";

pub(crate) fn default_project_name() -> String {
    DEFAULT_PROJECT_NAME.to_string()
}

pub(crate) fn default_project_description() -> String {
    DEFAULT_PROJECT_DESCRIPTION.to_string()
}

pub(crate) fn default_include() -> Vec<String> {
    vec!["**/*.mdx".to_string(), "**/*.md".to_string()]
}

pub(crate) fn default_ignore() -> Vec<String> {
    vec![
        "node_modules/**".to_string(),
        ".next/**".to_string(),
        "out/**".to_string(),
    ]
}

/// Options for a single generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Prefix prepended to every link in `llms.txt`.
    pub base_url: String,
    pub project_name: String,
    pub project_description: String,
    pub include: Vec<String>,
    pub ignore: Vec<String>,
}

impl GeneratorConfig {
    pub fn new(content_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
            base_url: String::new(),
            project_name: default_project_name(),
            project_description: default_project_description(),
            include: default_include(),
            ignore: default_ignore(),
        }
    }

    /// Directory receiving the per-document Markdown copies.
    pub fn markdown_dir(&self) -> PathBuf {
        self.output_dir.join("md")
    }

    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join("llms.txt")
    }

    pub fn trace_loaded(&self) {
        info!(
            content_dir = %self.content_dir.display(),
            output_dir = %self.output_dir.display(),
            base_url = %self.base_url,
            "Loaded GeneratorConfig"
        );
        debug!(?self, "GeneratorConfig loaded (full debug)");
    }
}
