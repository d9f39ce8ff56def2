use crate::config::{MergeConfig, OutputMode, PER_FOLDER_OUTPUT_NAME};
use crate::folder::{process_folder, FolderStatus};
use crate::rules::IgnoreRules;
use crate::utils::{ensure_writable_dir, output_directory};
use crate::MergeError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderReport {
    pub folder: PathBuf,
    pub status: FolderStatus,
    pub bytes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MergeSummary {
    pub folders: Vec<FolderReport>,
    pub outputs: Vec<PathBuf>,
    pub total_bytes: usize,
}

#[async_trait]
pub trait FolderMerger {
    async fn merge_folders(&self) -> Result<MergeSummary, MergeError>;
}

pub struct BasicFolderMerger {
    config: MergeConfig,
}

impl BasicFolderMerger {
    pub fn new(config: MergeConfig) -> Self {
        BasicFolderMerger { config }
    }

    /// Runs every folder in order and returns the concatenated text of the
    /// folders with content. Per-folder outputs are written as they finish.
    async fn collect(&self, summary: &mut MergeSummary) -> String {
        let config = &self.config;
        let mut overall_content = String::new();
        let mut shared_rules = IgnoreRules::new();

        info!("Processing {} folders...", config.folders.len());
        for folder in &config.folders {
            let rules = if config.share_rules_across_folders {
                std::mem::take(&mut shared_rules)
            } else {
                IgnoreRules::new()
            };

            let outcome = process_folder(folder, rules, config).await;
            if config.share_rules_across_folders {
                shared_rules = outcome.rules;
            }

            if config.output_mode == OutputMode::PerFolder
                && matches!(outcome.status, FolderStatus::Completed { .. })
            {
                let destination = folder.join(PER_FOLDER_OUTPUT_NAME);
                match async_fs::write(&destination, &outcome.content).await {
                    Ok(()) => {
                        info!(
                            "Merged content of {} into {}",
                            folder.display(),
                            destination.display()
                        );
                        summary.outputs.push(destination);
                    }
                    Err(e) => error!("Error writing {}: {}", destination.display(), e),
                }
            }

            summary.folders.push(FolderReport {
                folder: outcome.folder,
                status: outcome.status,
                bytes: outcome.content.len(),
            });
            summary.total_bytes += outcome.content.len();
            if !outcome.content.is_empty() {
                overall_content.push_str(&outcome.content);
            }
        }
        overall_content
    }
}

#[async_trait]
impl FolderMerger for BasicFolderMerger {
    async fn merge_folders(&self) -> Result<MergeSummary, MergeError> {
        let config = &self.config;
        config.validate()?;

        let shared_output = match config.output_mode {
            OutputMode::Shared => {
                let output = config
                    .output
                    .as_deref()
                    .ok_or_else(|| MergeError::ConfigError("Missing `output`".to_owned()))?;
                ensure_writable_dir(output_directory(output)).await?;
                Some(output)
            }
            OutputMode::PerFolder => None,
        };

        let mut summary = MergeSummary::default();
        let overall_content = self.collect(&mut summary).await;

        if let Some(output) = shared_output {
            write_output(output, &overall_content).await?;
            info!("Merged content from all folders into {}", output.display());
            summary.outputs.push(output.to_path_buf());
        }

        Ok(summary)
    }
}

async fn write_output(output: &Path, content: &str) -> Result<(), MergeError> {
    debug!("Writing {} bytes to {}", content.len(), output.display());
    async_fs::write(output, content)
        .await
        .map_err(|e| MergeError::IoError(format!("{}: {}", output.display(), e)))
}

pub async fn merge_folders(config: MergeConfig) -> Result<MergeSummary, MergeError> {
    let merger = BasicFolderMerger::new(config);
    merger.merge_folders().await
}
