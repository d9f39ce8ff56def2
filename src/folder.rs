use crate::config::MergeConfig;
use crate::rules::{IgnoreRules, IGNORE_FILE_NAME};
use crate::utils::{extension_of, format_block, identifier_for, read_file_content};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, error, info, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    Completed { included: usize, skipped: usize },
    /// Missing or not a directory.
    Invalid,
    /// Ignore file or directory listing could not be read.
    Aborted,
}

/// What one folder contributed, plus the rule set to hand to the next folder.
#[derive(Debug)]
pub struct FolderOutcome {
    pub folder: PathBuf,
    pub content: String,
    pub rules: IgnoreRules,
    pub status: FolderStatus,
}

impl FolderOutcome {
    fn empty(folder: &Path, rules: IgnoreRules, status: FolderStatus) -> Self {
        FolderOutcome {
            folder: folder.to_path_buf(),
            content: String::new(),
            rules,
            status,
        }
    }
}

/// Merges the regular files directly inside `folder`.
///
/// Entries are visited in lexicographic name order. Errors on a single entry
/// only skip that entry; a missing folder, an unreadable ignore file or an
/// unreadable listing yield an empty outcome instead of an error.
pub async fn process_folder(
    folder: &Path,
    mut rules: IgnoreRules,
    config: &MergeConfig,
) -> FolderOutcome {
    let is_dir = matches!(async_fs::metadata(folder).await, Ok(m) if m.is_dir());
    if !is_dir {
        warn!("Skipping invalid folder: {}", folder.display());
        return FolderOutcome::empty(folder, rules, FolderStatus::Invalid);
    }

    info!("Processing: {}", folder.display());

    if config.consider_gitignore {
        let ignore_file = folder.join(IGNORE_FILE_NAME);
        let present = match async_fs::try_exists(&ignore_file).await {
            Ok(present) => present,
            Err(e) => {
                error!(
                    "Error reading {} in {}: {}",
                    IGNORE_FILE_NAME,
                    folder.display(),
                    e
                );
                return FolderOutcome::empty(folder, rules, FolderStatus::Aborted);
            }
        };
        if present {
            match read_file_content(&ignore_file).await {
                Ok(text) => {
                    rules.add_from_source(&ignore_file, &text);
                }
                Err(e) => {
                    error!(
                        "Error reading {} in {}: {}",
                        IGNORE_FILE_NAME,
                        folder.display(),
                        e
                    );
                    return FolderOutcome::empty(folder, rules, FolderStatus::Aborted);
                }
            }
        }
    }

    let names = match list_entry_names(folder).await {
        Ok(names) => names,
        Err(e) => {
            error!("Error reading directory {}: {}", folder.display(), e);
            return FolderOutcome::empty(folder, rules, FolderStatus::Aborted);
        }
    };

    let mut content = String::new();
    let mut included = 0;
    let mut skipped = 0;

    for entry_name in names {
        let path = folder.join(&entry_name);
        let name = entry_name.to_string_lossy();
        let extension = extension_of(&name);

        if config.excludes_file(&name)
            || config.exclusions.excludes_extension(&extension)
            || rules.matches(&name)
        {
            info!("Skipping: {}", name);
            skipped += 1;
            continue;
        }

        let metadata = match async_fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Error processing file {}: {}", path.display(), e);
                skipped += 1;
                continue;
            }
        };
        if !metadata.is_file() {
            trace!("Not a regular file: {}", path.display());
            continue;
        }

        match read_file_content(&path).await {
            Ok(text) => {
                let identifier = identifier_for(folder, &entry_name, config.identifier);
                content.push_str(&format_block(&identifier, &text));
                included += 1;
            }
            Err(e) => {
                warn!("Error processing file {}: {}", path.display(), e);
                skipped += 1;
            }
        }
    }

    debug!(
        "Folder {} done: {} included, {} skipped",
        folder.display(),
        included,
        skipped
    );

    FolderOutcome {
        folder: folder.to_path_buf(),
        content,
        rules,
        status: FolderStatus::Completed { included, skipped },
    }
}

/// Immediate entry names of `dir`, sorted.
async fn list_entry_names(dir: &Path) -> std::io::Result<Vec<OsString>> {
    let mut entries = async_fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name());
    }
    names.sort();
    Ok(names)
}
