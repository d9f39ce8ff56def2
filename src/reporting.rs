use crate::folder::FolderStatus;
use crate::merge::MergeSummary;
use std::path::Path;
use tracing::{debug, info};

/// Logs a tree of every processed folder with its status.
pub fn print_summary(summary: &MergeSummary) {
    debug!("Printing summary for {} folders", summary.folders.len());
    info!(
        "Overall ({} folders, {} bytes)",
        summary.folders.len(),
        summary.total_bytes
    );

    for (i, report) in summary.folders.iter().enumerate() {
        let connector = if i == summary.folders.len() - 1 {
            "┗━━"
        } else {
            "┣━━"
        };
        info!(
            "{} {} {} ({})",
            connector,
            get_folder_icon(report.status),
            report.folder.display(),
            describe_status(report.status, report.bytes)
        );
    }

    for output in &summary.outputs {
        info!("{} {}", get_file_icon(output), output.display());
    }
}

pub fn describe_status(status: FolderStatus, bytes: usize) -> String {
    match status {
        FolderStatus::Completed { included, skipped } => format!(
            "{} files, {} skipped, {} bytes",
            included, skipped, bytes
        ),
        FolderStatus::Invalid => "invalid folder".to_owned(),
        FolderStatus::Aborted => "aborted".to_owned(),
    }
}

fn get_folder_icon(status: FolderStatus) -> &'static str {
    match status {
        FolderStatus::Completed { included: 0, .. } => "📁",
        FolderStatus::Completed { .. } => "📂",
        FolderStatus::Invalid => "⚠️",
        FolderStatus::Aborted => "❌",
    }
}

pub fn get_file_icon(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md") | Some("markdown") => "📝",
        Some("txt") => "📄",
        Some("json") => "🔖",
        None => "📁",
        _ => "📄",
    }
}
