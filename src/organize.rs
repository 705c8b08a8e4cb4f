/// The organize module files music into an Artist/Album tree based on its
/// tags. Planning is pure given a tag reader, so the whole pipeline is
/// testable without audio fixtures; the real reader goes through the id3
/// crate. Lyric sidecars (.lrc) travel with their audio file.
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use id3::{Tag, TagLike};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::common::{sanitize_artist_name, sanitize_path_component};
use crate::errors::{ReelExpectedError, Result};
use crate::rename::Mode;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongTags {
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Read artist and album from an mp3's ID3 tag.
pub fn read_song_tags(path: &Path) -> Result<SongTags> {
    let tag = Tag::read_from_path(path).map_err(|e| ReelExpectedError::Generic(format!("Failed to read tags from {}: {e}", path.display())))?;
    Ok(SongTags { artist: tag.artist().map(|s| s.to_string()), album: tag.album().map(|s| s.to_string()) })
}

/// One planned move, with an optional lyric sidecar that moves along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAction {
    pub source: PathBuf,
    pub target: PathBuf,
    pub companion: Option<(PathBuf, PathBuf)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganizeSummary {
    /// Files moved, or proposed for moving in a dry run.
    pub moved: usize,
    /// Files skipped because the target already exists.
    pub skipped: usize,
    /// Files whose move failed with a filesystem or tag error.
    pub failed: usize,
}

/// Compute the organized location for one file from its tags.
pub fn target_for(target_dir: &Path, tags: &SongTags, filename: &str) -> PathBuf {
    let artist = sanitize_artist_name(tags.artist.as_deref().unwrap_or(UNKNOWN_ARTIST));
    let album = sanitize_path_component(tags.album.as_deref().unwrap_or(UNKNOWN_ALBUM));
    target_dir.join(artist).join(album).join(filename)
}

/// Collect the mp3 files under `source_dir`, sorted for stable planning.
pub fn collect_music_files(source_dir: &Path) -> Result<Vec<PathBuf>> {
    if !source_dir.is_dir() {
        return Err(ReelExpectedError::DirectoryNotFound { path: source_dir.to_path_buf() }.into());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(source_dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", source_dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let is_mp3 = entry.path().extension().and_then(|e| e.to_str()).map(|e| e.eq_ignore_ascii_case("mp3")).unwrap_or(false);
        if is_mp3 {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Plan moves with an injected tag reader. Files whose tags cannot be read
/// are logged and dropped; two sources resolving to the same target keep the
/// first and log the collision.
pub fn plan_moves_with<F>(source_dir: &Path, target_dir: &Path, read_tags: F) -> Result<Vec<MoveAction>>
where
    F: Fn(&Path) -> Result<SongTags>,
{
    let files = collect_music_files(source_dir)?;
    let mut planned_targets: HashSet<PathBuf> = HashSet::new();
    let mut actions = Vec::new();

    for file in files {
        let tags = match read_tags(&file) {
            Ok(t) => t,
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                continue;
            }
        };
        let filename = match file.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => {
                warn!("Skipping {}: file name is not valid UTF-8", file.display());
                continue;
            }
        };
        let target = target_for(target_dir, &tags, &filename);
        if target == file {
            continue;
        }
        if !planned_targets.insert(target.clone()) {
            warn!("Skipping {}: another file already maps to {}", file.display(), target.display());
            continue;
        }

        let lrc_source = file.with_extension("lrc");
        let companion = if lrc_source.is_file() {
            let lrc_target = target.with_extension("lrc");
            Some((lrc_source, lrc_target))
        } else {
            None
        };

        actions.push(MoveAction { source: file, target, companion });
    }

    Ok(actions)
}

/// Plan moves using the real ID3 tag reader.
pub fn plan_moves(source_dir: &Path, target_dir: &Path) -> Result<Vec<MoveAction>> {
    plan_moves_with(source_dir, target_dir, read_song_tags)
}

/// Apply a move plan. Dry runs touch nothing; real runs create target
/// directories as needed, never overwrite, and keep going past failures.
pub fn execute_moves(actions: &[MoveAction], mode: Mode) -> OrganizeSummary {
    let mut summary = OrganizeSummary::default();
    for action in actions {
        match mode {
            Mode::DryRun => {
                info!("Would move '{}' -> '{}'", action.source.display(), action.target.display());
                summary.moved += 1;
            }
            Mode::Execute => {
                if action.target.exists() {
                    warn!("Cannot move '{}' to '{}': target already exists", action.source.display(), action.target.display());
                    summary.skipped += 1;
                    continue;
                }
                let parent_ok = action.target.parent().map(fs::create_dir_all).unwrap_or(Ok(()));
                let moved = parent_ok.and_then(|_| fs::rename(&action.source, &action.target));
                match moved {
                    Ok(()) => {
                        info!("Moved '{}' -> '{}'", action.source.display(), action.target.display());
                        summary.moved += 1;
                        if let Some((lrc_source, lrc_target)) = &action.companion {
                            if lrc_target.exists() {
                                warn!("Cannot move '{}': target already exists", lrc_source.display());
                            } else if let Err(e) = fs::rename(lrc_source, lrc_target) {
                                warn!("Failed to move lyric file '{}': {}", lrc_source.display(), e);
                            }
                        }
                    }
                    Err(e) => {
                        warn!("Failed to move '{}': {}", action.source.display(), e);
                        summary.failed += 1;
                    }
                }
            }
        }
    }
    summary
}

/// Plan and apply in one step.
pub fn organize_music(source_dir: &Path, target_dir: &Path, mode: Mode) -> Result<OrganizeSummary> {
    let actions = plan_moves(source_dir, target_dir)?;
    Ok(execute_moves(&actions, mode))
}
