use crate::config::IdentifierMode;
use crate::MergeError;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tokio::fs as async_fs;
use tracing::trace;

/// Lower-cased extension of `name` including the dot, or an empty string.
/// Dotfiles such as `.gitignore` have no extension.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

pub fn identifier_for(folder: &Path, name: &OsStr, mode: IdentifierMode) -> String {
    match mode {
        IdentifierMode::Path => clean_path(&folder.join(name)).display().to_string(),
        IdentifierMode::Name => name.to_string_lossy().into_owned(),
    }
}

/// Lexically normalizes `path`: drops `.` components and folds `..` into the
/// preceding component. Leading `..` of a relative path are kept.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Provenance block appended for every merged file.
pub fn format_block(identifier: &str, content: &str) -> String {
    format!("\n--- {} ---\n{}\n", identifier, content)
}

pub async fn read_file_content(file_path: &Path) -> Result<String, MergeError> {
    async_fs::read_to_string(file_path)
        .await
        .map_err(|err| MergeError::FileReadError(format!("{}: {}", file_path.display(), err)))
}

/// Parent directory the output file will be written into.
pub fn output_directory(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

pub async fn ensure_writable_dir(dir: &Path) -> Result<(), MergeError> {
    let metadata = async_fs::metadata(dir)
        .await
        .map_err(|e| MergeError::OutputNotWritable(format!("{}: {}", dir.display(), e)))?;
    if !metadata.is_dir() {
        return Err(MergeError::OutputNotWritable(format!(
            "{}: not a directory",
            dir.display()
        )));
    }

    // Permission bits ignore the effective user, so create a scratch file.
    let scratch_dir = dir.to_path_buf();
    let created =
        tokio::task::spawn_blocking(move || tempfile::NamedTempFile::new_in(&scratch_dir))
            .await
            .map_err(|e| MergeError::IoError(e.to_string()))?;
    match created {
        Ok(file) => {
            trace!("Output directory {} is writable", dir.display());
            drop(file);
            Ok(())
        }
        Err(e) => Err(MergeError::OutputNotWritable(format!(
            "{}: {}",
            dir.display(),
            e
        ))),
    }
}
