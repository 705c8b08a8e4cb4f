use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use reel::common::{initialize_logging, LogOutput};
use reel::config::Config;
use reel::errors::{ReelExpectedError, Result};
use reel::rename::{self, Mode};
use reel::scan::{self, ScanOptions};
use reel::titles::{self, LibraryKind};
use reel::organize;

#[derive(Parser)]
#[command(name = "reel")]
#[command(about = "Tidy a personal media library: rename, retitle, inventory, organize")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize release-style file names under a directory
    Rename {
        /// Directory containing files to rename
        directory: PathBuf,
        /// Perform the renames (default is a dry run)
        #[arg(long)]
        execute: bool,
    },
    /// Propose catalog display titles for library files
    Titles {
        /// Library roots to scan; defaults to the configured libraries
        #[arg(long = "base-dir")]
        base_dirs: Vec<PathBuf>,
        /// Treat the libraries as shows and append episode markers
        #[arg(long)]
        shows: bool,
        #[arg(long, value_enum, default_value = "text")]
        format: TitleFormat,
    },
    /// Inventory a video library into a report file
    Scan {
        /// Directory containing video files
        directory: PathBuf,
        /// Report file to write
        #[arg(short, long, default_value = "video_report.csv")]
        output: PathBuf,
        #[arg(long, value_enum, default_value = "csv")]
        format: ReportFormat,
        /// Worker threads for probing (0 = one per CPU)
        #[arg(long)]
        workers: Option<usize>,
        /// Extensions to include instead of the configured set
        #[arg(long)]
        extensions: Vec<String>,
    },
    /// File music into an Artist/Album tree by tag
    Organize {
        /// Directory containing music files; defaults to the configured source
        source: Option<PathBuf>,
        /// Base directory for the organized tree; defaults to the configured
        /// target, then to the source itself
        #[arg(long)]
        target: Option<PathBuf>,
        /// Perform the moves (default is a dry run)
        #[arg(long)]
        execute: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TitleFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Csv,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = initialize_logging(LogOutput::Stderr) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::parse(cli.config.as_deref())?;

    match cli.command {
        Commands::Rename { directory, execute } => {
            let mode = if execute { Mode::Execute } else { Mode::DryRun };
            if mode == Mode::DryRun {
                info!("Running in dry run mode; no files will be renamed");
            }
            let summary = rename::rename_directory(&directory, mode)?;
            match mode {
                Mode::DryRun => println!("{} files would be renamed", summary.renamed),
                Mode::Execute => println!("{} renamed, {} skipped, {} failed", summary.renamed, summary.skipped, summary.failed),
            }
        }
        Commands::Titles { base_dirs, shows, format } => {
            let kind = if shows { LibraryKind::Shows } else { LibraryKind::Movies };
            let base_dirs = if !base_dirs.is_empty() {
                base_dirs
            } else if shows {
                config.show_dirs.clone()
            } else {
                config.movie_dirs.clone()
            };
            if base_dirs.is_empty() {
                return Err(ReelExpectedError::Generic("No library roots given; pass --base-dir or configure movie_dirs/show_dirs".to_string()).into());
            }

            let mut plans = Vec::new();
            for dir in &base_dirs {
                plans.extend(titles::plan_titles(&config, dir, kind)?);
            }
            match format {
                TitleFormat::Text => {
                    for plan in &plans {
                        println!("{} -> {}", plan.path.display(), plan.title);
                    }
                }
                TitleFormat::Json => {
                    let json = serde_json::to_string_pretty(&plans).map_err(|e| reel::ReelError::Generic(format!("Failed to serialize titles: {e}")))?;
                    println!("{json}");
                }
            }
        }
        Commands::Scan { directory, output, format, workers, extensions } => {
            let mut opts = ScanOptions::from_config(&config).with_extensions(&extensions);
            if let Some(workers) = workers {
                opts.workers = workers;
            }
            let reports = scan::scan_directory(&directory, &opts)?;
            match format {
                ReportFormat::Csv => scan::write_csv(&reports, &output)?,
                ReportFormat::Json => scan::write_json(&reports, &output)?,
            }
            println!("Wrote {} entries to {}", reports.len(), output.display());
        }
        Commands::Organize { source, target, execute } => {
            let source = source
                .or_else(|| config.music_source_dir.clone())
                .ok_or_else(|| ReelExpectedError::Generic("No source directory given; pass one or configure music_source_dir".to_string()))?;
            let target = target.or_else(|| config.music_target_dir.clone()).unwrap_or_else(|| source.clone());
            let mode = if execute { Mode::Execute } else { Mode::DryRun };
            if mode == Mode::DryRun {
                info!("Running in dry run mode; no files will be moved");
            }
            let summary = organize::organize_music(&source, &target, mode)?;
            match mode {
                Mode::DryRun => println!("{} files would be moved", summary.moved),
                Mode::Execute => println!("{} moved, {} skipped, {} failed", summary.moved, summary.skipped, summary.failed),
            }
        }
    }

    Ok(())
}
