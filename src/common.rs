/// The common module is our grab bag of small shared toys: path-component
/// sanitization, tiny collection helpers, and logging initialization.
use std::collections::HashSet;
use std::fs;
use std::hash::Hash;
use std::sync::Mutex;

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::errors::{ReelError, Result};

pub fn uniq<T: Clone + Eq + Hash>(xs: Vec<T>) -> Vec<T> {
    let mut rv = Vec::new();
    let mut seen = HashSet::new();
    for x in xs {
        if seen.insert(x.clone()) {
            rv.push(x);
        }
    }
    rv
}

static ARTIST_ILLEGAL_CHARS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:|?*\x00]"#).unwrap());

/// Typographic stand-ins for characters that are unsafe in file names. Artist
/// directories keep more of the original text (only strictly-invalid
/// characters are replaced), so this table applies to albums and the like.
const COMPONENT_REPLACEMENTS: &[(char, &str)] = &[
    (':', " -"),
    ('/', "\u{2044}"),
    ('\\', "\u{2044}"),
    ('|', "\u{01c0}"),
    ('*', "\u{2217}"),
    ('?', "\u{ff1f}"),
    ('"', "\u{201d}"),
    ('<', "\u{2039}"),
    ('>', "\u{203a}"),
    ('\0', ""),
];

/// Sanitize an artist name for use as a directory name. Only characters that
/// are strictly invalid on common filesystems are replaced; everything else
/// is preserved exactly as tagged.
pub fn sanitize_artist_name(name: &str) -> String {
    if name.is_empty() {
        return "Unknown".to_string();
    }
    let cleaned = ARTIST_ILLEGAL_CHARS_REGEX.replace_all(name, "_");
    finish_component(&cleaned)
}

/// Sanitize a non-artist path component (album, file stem). Unsafe characters
/// are swapped for typographic lookalikes rather than dropped.
pub fn sanitize_path_component(name: &str) -> String {
    if name.is_empty() {
        return "Unknown".to_string();
    }
    let mut result = String::with_capacity(name.len());
    for c in name.chars() {
        match COMPONENT_REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => result.push_str(to),
            None => result.push(c),
        }
    }
    finish_component(&result)
}

fn finish_component(name: &str) -> String {
    // Leading/trailing periods and spaces are invalid on Windows.
    let trimmed = name.trim_matches(|c| c == '.' || c == ' ');
    if trimmed.is_empty() {
        return "Unknown".to_string();
    }
    trimmed.nfd().collect::<String>()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stderr,
    File,
}

static LOGGING_INITIALIZED: Mutex<bool> = Mutex::new(false);

pub fn initialize_logging(output: LogOutput) -> Result<()> {
    let mut initialized = LOGGING_INITIALIZED.lock().unwrap();
    if *initialized {
        return Ok(());
    }
    *initialized = true;
    drop(initialized);

    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match output {
        LogOutput::Stderr => {
            let subscriber = fmt::Subscriber::builder().with_env_filter(env_filter).with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber).map_err(|e| ReelError::Generic(format!("Failed to set logging subscriber: {e}")))?;
        }
        LogOutput::File => {
            let proj_dirs = ProjectDirs::from("", "", "reel").ok_or_else(|| ReelError::Generic("Failed to resolve project directories".to_string()))?;
            let log_dir = if cfg!(target_os = "macos") {
                proj_dirs.cache_dir().to_path_buf()
            } else {
                proj_dirs.state_dir().unwrap_or(proj_dirs.cache_dir()).to_path_buf()
            };
            fs::create_dir_all(&log_dir)?;

            let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
                .rotation(tracing_appender::rolling::Rotation::NEVER)
                .max_log_files(10)
                .filename_prefix("reel")
                .filename_suffix("log")
                .build(&log_dir)
                .map_err(|e| ReelError::Generic(format!("Failed to create log file appender: {e}")))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            // The worker guard must outlive the subscriber or buffered lines are lost.
            std::mem::forget(guard);

            let subscriber = fmt::Subscriber::builder().with_env_filter(env_filter).with_writer(non_blocking).with_target(true).finish();
            tracing::subscriber::set_global_default(subscriber).map_err(|e| ReelError::Generic(format!("Failed to set logging subscriber: {e}")))?;
        }
    }

    Ok(())
}
