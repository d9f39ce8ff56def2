use crate::errors::MergeError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::debug;

pub const DEFAULT_IGNORE_EXTENSIONS: &[&str] = &[
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".bmp",
    // Audio
    ".mp3", ".wav", ".flac", ".ogg",
    // Video
    ".mp4", ".mov", ".avi", ".mkv",
    // Documents
    ".pdf",
    // Archives
    ".zip", ".rar", ".tar", ".gz",
];

/// File written inside each folder in per-folder output mode.
pub const PER_FOLDER_OUTPUT_NAME: &str = "output.txt";

/// Always skipped in per-folder output mode.
pub const PER_FOLDER_EXCLUDED_FILES: &[&str] = &["package-lock.json", PER_FOLDER_OUTPUT_NAME];

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum OutputMode {
    /// All folders merged into the single `output` file.
    #[default]
    Shared,
    /// Each folder gets its own `output.txt`.
    PerFolder,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum IdentifierMode {
    /// `--- <folder>/<name> ---`
    #[default]
    Path,
    /// `--- <name> ---`
    Name,
}

/// Exclusions supplied by configuration rather than discovered in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticExclusions {
    files: HashSet<String>,
    extensions: HashSet<String>,
}

impl Default for StaticExclusions {
    fn default() -> Self {
        StaticExclusions::new(
            Vec::<String>::new(),
            DEFAULT_IGNORE_EXTENSIONS.iter().copied(),
        )
    }
}

impl StaticExclusions {
    pub fn new<F, E>(files: F, extensions: E) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        StaticExclusions {
            files: files.into_iter().map(Into::into).collect(),
            extensions: extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .filter(|ext| ext.len() > 1)
                .collect(),
        }
    }

    pub fn with_file(mut self, name: impl Into<String>) -> Self {
        self.files.insert(name.into());
        self
    }

    pub fn excludes_file(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    /// `extension` is expected in the normalized `.ext` form.
    pub fn excludes_extension(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }
}

/// Lower-cases an extension and makes sure it carries a leading dot.
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().to_lowercase();
    if trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{}", trimmed)
    }
}

/// Shape of the JSON configuration file.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawConfig {
    pub folders: Option<Vec<PathBuf>>,
    pub output: Option<PathBuf>,
    pub output_mode: OutputMode,
    pub identifier: IdentifierMode,
    pub ignore_extensions: Option<Vec<String>>,
    pub ignore_files: Option<Vec<String>>,
    pub consider_gitignore: Option<bool>,
    pub share_rules_across_folders: bool,
}

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub folders: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub output_mode: OutputMode,
    pub identifier: IdentifierMode,
    pub exclusions: StaticExclusions,
    pub consider_gitignore: bool,
    pub share_rules_across_folders: bool,
}

impl MergeConfig {
    /// Shared-output configuration with every other option at its default.
    pub fn new(folders: Vec<PathBuf>, output: impl Into<PathBuf>) -> Self {
        MergeConfig {
            folders,
            output: Some(output.into()),
            output_mode: OutputMode::Shared,
            identifier: IdentifierMode::Path,
            exclusions: StaticExclusions::default(),
            consider_gitignore: true,
            share_rules_across_folders: false,
        }
    }

    pub fn per_folder(folders: Vec<PathBuf>) -> Self {
        MergeConfig {
            output: None,
            output_mode: OutputMode::PerFolder,
            ..MergeConfig::new(folders, PathBuf::new())
        }
    }

    pub fn from_raw(raw: RawConfig) -> Result<Self, MergeError> {
        let folders = raw.folders.ok_or_else(|| {
            MergeError::ConfigError("Expected { folders: [...], output: '...' }".to_owned())
        })?;

        let extensions = raw.ignore_extensions.unwrap_or_else(|| {
            DEFAULT_IGNORE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect()
        });
        let exclusions = StaticExclusions::new(raw.ignore_files.unwrap_or_default(), extensions);

        let config = MergeConfig {
            folders,
            output: raw.output,
            output_mode: raw.output_mode,
            identifier: raw.identifier,
            exclusions,
            consider_gitignore: raw.consider_gitignore.unwrap_or(true),
            share_rules_across_folders: raw.share_rules_across_folders,
        };
        config.validate()?;
        Ok(config)
    }

    /// Static filename check, including the names always skipped in
    /// per-folder mode.
    pub fn excludes_file(&self, name: &str) -> bool {
        self.exclusions.excludes_file(name)
            || (self.output_mode == OutputMode::PerFolder
                && PER_FOLDER_EXCLUDED_FILES.contains(&name))
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        if self.folders.is_empty() {
            return Err(MergeError::ConfigError("No folders to process".to_owned()));
        }
        if self.output_mode == OutputMode::Shared {
            match &self.output {
                Some(output) if !output.as_os_str().is_empty() => {}
                _ => {
                    return Err(MergeError::ConfigError(
                        "`output` is required when outputMode is shared".to_owned(),
                    ))
                }
            }
        }
        Ok(())
    }
}

pub fn parse_config(text: &str) -> Result<RawConfig, MergeError> {
    Ok(serde_json::from_str(text)?)
}

/// `Ok(None)` when nothing exists at `path`.
pub async fn load_config_if_present(path: &Path) -> Result<Option<RawConfig>, MergeError> {
    if !async_fs::try_exists(path).await? {
        return Ok(None);
    }
    load_config(path).await.map(Some)
}

pub async fn load_config(path: &Path) -> Result<RawConfig, MergeError> {
    debug!("Loading configuration from {}", path.display());
    let text = async_fs::read_to_string(path).await.map_err(|e| {
        MergeError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_config(&text)
}
