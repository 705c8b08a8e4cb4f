/// The titles module derives catalog display titles for library files from
/// the directory they live in. A movie's title is its release directory
/// name, cleaned up; an episode's title additionally carries the season and
/// episode markers recovered from the file name.
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;
use walkdir::WalkDir;

use crate::config::Config;
use crate::errors::{ReelExpectedError, Result};
use crate::normalize::{extract_episode_info, format_show_title};

static YEAR_PARENS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\((\d{4})\)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryKind {
    Movies,
    Shows,
}

/// A proposed display title for one library file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitlePlan {
    pub path: PathBuf,
    pub title: String,
}

/// Clean a release directory name into a display title: percent-encoded
/// characters are decoded, and a "(1999)" parenthetical is unwrapped so the
/// year stays in the title without the brackets.
pub fn extract_title(directory_name: &str) -> String {
    let decoded = match urlencoding::decode(directory_name) {
        Ok(s) => s.into_owned(),
        Err(_) => directory_name.to_string(),
    };
    YEAR_PARENS_REGEX.replace_all(&decoded, " $1").trim().to_string()
}

/// Derive the display title for a file under a library root, or None when
/// the file sits directly in the root (there is no release directory to name
/// it after).
pub fn derive_title(base_dir: &Path, file_path: &Path, kind: LibraryKind) -> Option<String> {
    let rel = file_path.strip_prefix(base_dir).ok()?;
    let mut components = rel.components();
    let first = components.next()?.as_os_str().to_string_lossy().into_owned();
    // A lone component means the file itself, not a release directory.
    components.next()?;

    let base_title = extract_title(&first);
    match kind {
        LibraryKind::Movies => Some(base_title),
        LibraryKind::Shows => {
            let filename = file_path.file_name()?.to_string_lossy();
            let info = extract_episode_info(&filename);
            Some(format_show_title(&base_title, info.season.as_deref(), info.episode.as_deref(), info.title.as_deref()))
        }
    }
}

/// Walk a library root and propose a display title for every video file.
/// Unreadable directory entries are logged and skipped.
pub fn plan_titles(config: &Config, base_dir: &Path, kind: LibraryKind) -> Result<Vec<TitlePlan>> {
    if !base_dir.is_dir() {
        return Err(ReelExpectedError::DirectoryNotFound { path: base_dir.to_path_buf() }.into());
    }

    let mut plans = Vec::new();
    for entry in WalkDir::new(base_dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", base_dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !config.is_video_file(entry.path()) {
            continue;
        }
        if let Some(title) = derive_title(base_dir, entry.path(), kind) {
            plans.push(TitlePlan { path: entry.path().to_path_buf(), title });
        }
    }
    plans.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(plans)
}
