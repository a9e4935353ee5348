/// `load_config` module: builds the [`GeneratorConfig`] for a run from a YAML file,
/// environment variables and command-line overrides.
///
/// This module is the only place where user-supplied YAML is parsed and mapped to the
/// strongly-typed core configuration.
///
/// # Precedence
/// Later sources win:
/// 1. built-in defaults from `llms-txt-core`
/// 2. the YAML file passed with `--config`
/// 3. `LLMS_TXT_BASE_URL`, `LLMS_TXT_PROJECT_NAME`, `LLMS_TXT_PROJECT_DESCRIPTION`
/// 4. command-line flags
///
/// # Errors
/// All errors in this module use `anyhow::Error` for context-rich diagnostics, and are
/// surfaced at the CLI boundary. A missing `content_dir` or `output_dir` after layering
/// is an error.
use anyhow::{Context, Result};
use llms_txt_core::config::GeneratorConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const ENV_BASE_URL: &str = "LLMS_TXT_BASE_URL";
pub const ENV_PROJECT_NAME: &str = "LLMS_TXT_PROJECT_NAME";
pub const ENV_PROJECT_DESCRIPTION: &str = "LLMS_TXT_PROJECT_DESCRIPTION";

/// Optional settings, as found in the YAML file or on the command line.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub content_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub include: Option<Vec<String>>,
    pub ignore: Option<Vec<String>>,
}

impl ConfigOverrides {
    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn merge(self, other: ConfigOverrides) -> ConfigOverrides {
        ConfigOverrides {
            content_dir: other.content_dir.or(self.content_dir),
            output_dir: other.output_dir.or(self.output_dir),
            base_url: other.base_url.or(self.base_url),
            project_name: other.project_name.or(self.project_name),
            project_description: other.project_description.or(self.project_description),
            include: other.include.or(self.include),
            ignore: other.ignore.or(self.ignore),
        }
    }

    fn from_env() -> ConfigOverrides {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        ConfigOverrides {
            base_url: var(ENV_BASE_URL),
            project_name: var(ENV_PROJECT_NAME),
            project_description: var(ENV_PROJECT_DESCRIPTION),
            ..ConfigOverrides::default()
        }
    }
}

/// Read the YAML config file at `path`.
pub fn read_config_file<P: AsRef<Path>>(path: P) -> Result<ConfigOverrides> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = fs::read_to_string(path_ref)
        .inspect_err(|e| error!(error = ?e, config_path = ?path_ref, "Failed to read config file"))
        .with_context(|| format!("Failed to read config file {}", path_ref.display()))?;

    let parsed: ConfigOverrides = serde_yaml::from_str(&config_content)
        .inspect_err(|e| error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML"))
        .with_context(|| format!("Failed to parse config YAML {}", path_ref.display()))?;

    info!(config_path = ?path_ref, "Parsed config YAML successfully");
    Ok(parsed)
}

/// Build the run configuration from an optional YAML file, the environment and
/// command-line overrides.
pub fn load_config(config_file: Option<&Path>, cli: ConfigOverrides) -> Result<GeneratorConfig> {
    let from_file = match config_file {
        Some(path) => read_config_file(path)?,
        None => ConfigOverrides::default(),
    };
    let merged = from_file.merge(ConfigOverrides::from_env()).merge(cli);

    let content_dir = merged.content_dir.ok_or_else(|| {
        error!("No content directory configured");
        anyhow::anyhow!("content_dir is required (set it in the config file or pass --content-dir)")
    })?;
    let output_dir = merged.output_dir.ok_or_else(|| {
        error!("No output directory configured");
        anyhow::anyhow!("output_dir is required (set it in the config file or pass --output-dir)")
    })?;

    let mut config = GeneratorConfig::new(content_dir, output_dir);
    if let Some(base_url) = merged.base_url {
        config.base_url = base_url;
    }
    if let Some(project_name) = merged.project_name {
        config.project_name = project_name;
    }
    if let Some(project_description) = merged.project_description {
        config.project_description = project_description;
    }
    if let Some(include) = merged.include {
        config.include = include;
    }
    if let Some(ignore) = merged.ignore {
        config.ignore = ignore;
    }

    config.trace_loaded();
    Ok(config)
}
