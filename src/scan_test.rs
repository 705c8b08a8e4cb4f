use crate::config::Config;
use crate::scan::*;
use crate::testing;

fn write_file(path: &std::path::Path, len: usize) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, vec![0u8; len]).unwrap();
}

#[test]
fn test_collect_video_files_filters_extensions() {
    let temp_dir = testing::init();
    let root = temp_dir.path();
    write_file(&root.join("a/Show.S01E02.mkv"), 10);
    write_file(&root.join("a/notes.txt"), 10);
    write_file(&root.join("b/Movie.MP4"), 10);

    let exts: Vec<String> = vec![".mkv".to_string(), ".mp4".to_string()];
    let files = collect_video_files(root, &exts).unwrap();
    assert_eq!(files, vec![root.join("a/Show.S01E02.mkv"), root.join("b/Movie.MP4")]);
}

#[test]
fn test_scan_directory_builds_reports() {
    let temp_dir = testing::init();
    let root = temp_dir.path();
    write_file(&root.join("Show.S01E02.mkv"), 2048);
    write_file(&root.join("The.Movie.2021.1080p.mkv"), 1024);

    let opts = ScanOptions { extensions: vec![".mkv".to_string()], workers: 2 };
    let reports = scan_directory(root, &opts).unwrap();
    assert_eq!(reports.len(), 2);

    let show = reports.iter().find(|r| r.filename == "Show.S01E02.mkv").unwrap();
    assert_eq!(show.extension, ".mkv");
    assert_eq!(show.title, "Show S01E02");
    assert_eq!(show.season.as_deref(), Some("01"));
    assert_eq!(show.episode.as_deref(), Some("02"));
    assert_eq!(show.size_gb, "0.00");

    let movie = reports.iter().find(|r| r.filename == "The.Movie.2021.1080p.mkv").unwrap();
    assert_eq!(movie.title, "The Movie (2021)");
    assert!(movie.season.is_none());
}

#[test]
fn test_scan_missing_directory_errors() {
    let temp_dir = testing::init();
    let opts = ScanOptions::from_config(&Config::default());
    assert!(scan_directory(&temp_dir.path().join("missing"), &opts).is_err());
}

#[test]
fn test_scan_options_override_extensions() {
    let opts = ScanOptions::from_config(&Config::default()).with_extensions(&["MKV".to_string(), "mkv".to_string()]);
    assert_eq!(opts.extensions, vec![".mkv"]);

    // An empty override keeps the configured set.
    let opts = ScanOptions::from_config(&Config::default()).with_extensions(&[]);
    assert_eq!(opts.extensions, Config::default().video_extensions);
}

#[test]
fn test_write_csv() {
    let temp_dir = testing::init();
    let root = temp_dir.path();
    write_file(&root.join("Show.S01E02.mkv"), 10);

    let opts = ScanOptions { extensions: vec![".mkv".to_string()], workers: 1 };
    let reports = scan_directory(root, &opts).unwrap();

    let out = root.join("report.csv");
    write_csv(&reports, &out).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("filename,path,size_gb,extension,title,season,episode,scanned_at"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("Show.S01E02.mkv,"));
    assert!(row.contains("Show S01E02"));
}

#[test]
fn test_write_json() {
    let temp_dir = testing::init();
    let root = temp_dir.path();
    write_file(&root.join("Movie.2020.mkv"), 10);

    let opts = ScanOptions { extensions: vec![".mkv".to_string()], workers: 1 };
    let reports = scan_directory(root, &opts).unwrap();

    let out = root.join("report.json");
    write_json(&reports, &out).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Movie (2020)");
    assert_eq!(rows[0]["season"], serde_json::Value::Null);
}
