/// The config module provides the config schema and parsing logic. We take
/// care to produce detailed errors when an invalid configuration is
/// detected: the failing key and the file path are always named.
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::errors::{ReelExpectedError, Result};

pub const DEFAULT_MAX_PROC: usize = 4;

pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv"];

#[derive(Debug, Clone)]
pub struct Config {
    /// Library roots containing one directory per movie.
    pub movie_dirs: Vec<PathBuf>,
    /// Library roots containing one directory per show.
    pub show_dirs: Vec<PathBuf>,
    /// Default source directory for the music organizer.
    pub music_source_dir: Option<PathBuf>,
    /// Default target directory for the music organizer.
    pub music_target_dir: Option<PathBuf>,
    /// Extensions treated as video files, dot-prefixed and lowercase.
    pub video_extensions: Vec<String>,
    /// Worker pool size for the library scan.
    pub max_proc: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            movie_dirs: Vec::new(),
            show_dirs: Vec::new(),
            music_source_dir: None,
            music_target_dir: None,
            video_extensions: DEFAULT_VIDEO_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_proc: DEFAULT_MAX_PROC,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    movie_dirs: Option<Vec<String>>,
    show_dirs: Option<Vec<String>>,
    music_source_dir: Option<String>,
    music_target_dir: Option<String>,
    video_extensions: Option<Vec<String>>,
    max_proc: Option<i64>,
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "reel").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    /// Parse the configuration file at `path`, or at the platform config dir
    /// when no path is given. An explicitly-passed path must exist; a missing
    /// file at the default location just yields the default configuration.
    pub fn parse(path: Option<&Path>) -> Result<Config> {
        let cfgpath = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ReelExpectedError::ConfigNotFound { path: p.to_path_buf() }.into());
                }
                p.to_path_buf()
            }
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Config::default()),
            },
        };

        let contents = std::fs::read_to_string(&cfgpath)?;
        let raw: RawConfig = toml::from_str(&contents).map_err(|e| ReelExpectedError::ConfigDecode { path: cfgpath.clone(), message: e.to_string() })?;

        let defaults = Config::default();

        let video_extensions = match raw.video_extensions {
            Some(exts) => {
                let mut out = Vec::with_capacity(exts.len());
                for ext in exts {
                    if ext.is_empty() {
                        return Err(ReelExpectedError::InvalidConfigValue {
                            key: "video_extensions".to_string(),
                            path: cfgpath.clone(),
                            message: "extensions must be non-empty".to_string(),
                        }
                        .into());
                    }
                    out.push(normalize_extension(&ext));
                }
                out
            }
            None => defaults.video_extensions,
        };

        let max_proc = match raw.max_proc {
            Some(n) if n >= 1 => n as usize,
            Some(n) => {
                return Err(ReelExpectedError::InvalidConfigValue {
                    key: "max_proc".to_string(),
                    path: cfgpath.clone(),
                    message: format!("must be a positive integer: got {n}"),
                }
                .into())
            }
            None => defaults.max_proc,
        };

        Ok(Config {
            movie_dirs: raw.movie_dirs.unwrap_or_default().iter().map(|s| expand_path(s)).collect(),
            show_dirs: raw.show_dirs.unwrap_or_default().iter().map(|s| expand_path(s)).collect(),
            music_source_dir: raw.music_source_dir.as_deref().map(expand_path),
            music_target_dir: raw.music_target_dir.as_deref().map(expand_path),
            video_extensions,
            max_proc,
        })
    }

    /// True when the path carries one of the configured video extensions.
    pub fn is_video_file(&self, path: &Path) -> bool {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(e) => format!(".{}", e.to_lowercase()),
            None => return false,
        };
        self.video_extensions.iter().any(|v| v == &ext)
    }
}

fn expand_path(s: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(s).into_owned())
}

/// Dot-prefix and lowercase an extension, accepting "mkv" and ".mkv" alike.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}
