/// The scan module inventories a video library into a flat report: one row
/// per file with its size, cleaned display title, and episode markers. Files
/// are probed on a bounded worker pool; each probe is independent, so the
/// order workers finish in never affects the result.
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::common::uniq;
use crate::config::{normalize_extension, Config};
use crate::errors::{ReelError, ReelExpectedError, Result};
use crate::normalize::{extract_episode_info, normalize_filename, split_extension};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Extensions to include, dot-prefixed and lowercase.
    pub extensions: Vec<String>,
    /// Worker pool size. Zero means one worker per CPU.
    pub workers: usize,
}

impl ScanOptions {
    pub fn from_config(config: &Config) -> Self {
        ScanOptions { extensions: config.video_extensions.clone(), workers: config.max_proc }
    }

    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        if !extensions.is_empty() {
            self.extensions = uniq(extensions.iter().map(|e| normalize_extension(e)).collect());
        }
        self
    }
}

/// One scanned file. Numeric fields are pre-formatted strings so the CSV
/// output matches what a human expects to read in a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub filename: String,
    pub path: String,
    pub size_gb: String,
    pub extension: String,
    pub title: String,
    pub season: Option<String>,
    pub episode: Option<String>,
    pub scanned_at: String,
}

/// Collect every file under `dir` carrying one of the wanted extensions.
pub fn collect_video_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ReelExpectedError::DirectoryNotFound { path: dir.to_path_buf() }.into());
    }
    let mut files = Vec::new();
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
        let ext = match entry.path().extension().and_then(|e| e.to_str()) {
            Some(e) => format!(".{}", e.to_lowercase()),
            None => continue,
        };
        if extensions.iter().any(|v| v == &ext) {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Scan a directory tree and build a report for each video file found.
/// Probing runs on a dedicated pool of `opts.workers` threads; files that
/// cannot be probed are logged and dropped from the report.
pub fn scan_directory(dir: &Path, opts: &ScanOptions) -> Result<Vec<FileReport>> {
    let files = collect_video_files(dir, &opts.extensions)?;
    debug!("Probing {} files under {}", files.len(), dir.display());

    let workers = if opts.workers == 0 { num_cpus::get() } else { opts.workers };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| ReelError::Generic(format!("Failed to build worker pool: {e}")))?;

    let mut reports: Vec<FileReport> = pool.install(|| files.par_iter().filter_map(|path| probe_file(path)).collect());
    reports.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(reports)
}

/// Probe a single file with filesystem metadata only.
pub fn probe_file(path: &Path) -> Option<FileReport> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            warn!("Failed to probe {}: {}", path.display(), e);
            return None;
        }
    };

    let filename = path.file_name()?.to_string_lossy().into_owned();
    let (_, ext) = split_extension(&filename);
    let normalized = normalize_filename(&filename);
    let (title, _) = split_extension(&normalized);
    let info = extract_episode_info(&filename);
    let abs = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    Some(FileReport {
        path: abs.to_string_lossy().into_owned(),
        size_gb: format!("{:.2}", metadata.len() as f64 / (1024.0 * 1024.0 * 1024.0)),
        extension: ext.to_string(),
        title: title.to_string(),
        season: info.season,
        episode: info.episode,
        scanned_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        filename,
    })
}

/// Write the report as CSV with a header row.
pub fn write_csv(reports: &[FileReport], output: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output)?;
    for report in reports {
        writer.serialize(report)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the report as pretty-printed JSON.
pub fn write_json(reports: &[FileReport], output: &Path) -> Result<()> {
    let file = fs::File::create(output)?;
    serde_json::to_writer_pretty(file, reports).map_err(|e| ReelError::Generic(format!("Failed to serialize report: {e}")))?;
    Ok(())
}
