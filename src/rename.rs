/// The rename module walks a directory tree and applies the filename
/// normalizer to every file in it. Planning is separated from execution so
/// a dry run is exactly the real run minus the renames. Existing targets are
/// never overwritten; per-file failures are logged and the batch continues.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::errors::{ReelExpectedError, Result};
use crate::normalize::normalize_filename;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    DryRun,
    Execute,
}

/// One proposed rename, staying within the file's own directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameAction {
    pub source: PathBuf,
    pub target: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameSummary {
    /// Files renamed, or proposed for rename in a dry run.
    pub renamed: usize,
    /// Files skipped because the target already exists.
    pub skipped: usize,
    /// Files whose rename failed with a filesystem error.
    pub failed: usize,
}

/// Walk `dir` and collect every file whose normalized name differs from its
/// current one. Unreadable entries are logged and skipped.
pub fn plan_renames(dir: &Path) -> Result<Vec<RenameAction>> {
    if !dir.is_dir() {
        return Err(ReelExpectedError::DirectoryNotFound { path: dir.to_path_buf() }.into());
    }

    let mut actions = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let filename = entry.file_name().to_string_lossy();
        let new_filename = normalize_filename(&filename);
        if new_filename == filename {
            continue;
        }
        let target = entry.path().with_file_name(&new_filename);
        actions.push(RenameAction { source: entry.path().to_path_buf(), target });
    }
    actions.sort_by(|a, b| a.source.cmp(&b.source));
    Ok(actions)
}

/// Apply a rename plan. In dry-run mode nothing on disk is touched and every
/// action counts as renamed.
pub fn execute_renames(actions: &[RenameAction], mode: Mode) -> RenameSummary {
    let mut summary = RenameSummary::default();
    for action in actions {
        match mode {
            Mode::DryRun => {
                info!("Would rename '{}' -> '{}'", action.source.display(), action.target.display());
                summary.renamed += 1;
            }
            Mode::Execute => {
                if action.target.exists() {
                    warn!("Cannot rename '{}' to '{}': target already exists", action.source.display(), action.target.display());
                    summary.skipped += 1;
                    continue;
                }
                match fs::rename(&action.source, &action.target) {
                    Ok(()) => {
                        info!("Renamed '{}' -> '{}'", action.source.display(), action.target.display());
                        summary.renamed += 1;
                    }
                    Err(e) => {
                        warn!("Failed to rename '{}': {}", action.source.display(), e);
                        summary.failed += 1;
                    }
                }
            }
        }
    }
    summary
}

/// Plan and apply in one step.
pub fn rename_directory(dir: &Path, mode: Mode) -> Result<RenameSummary> {
    let actions = plan_renames(dir)?;
    Ok(execute_renames(&actions, mode))
}
