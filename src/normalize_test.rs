use crate::normalize::*;

#[test]
fn test_subtitle_passthrough() {
    assert_eq!(normalize_filename("movie.srt"), "movie.srt");
    assert_eq!(normalize_filename("My_Messy_Subs_2019.SRT"), "My_Messy_Subs_2019.SRT");
    assert_eq!(normalize_filename("01.show.vtt"), "01.show.vtt");
}

#[test]
fn test_already_clean_bypass() {
    assert_eq!(normalize_filename("The Movie (2021).mkv"), "The Movie (2021).mkv");
    assert_eq!(normalize_filename("Some Show (1999).avi"), "Some Show (1999).avi");
}

#[test]
fn test_strip_leading_index() {
    assert_eq!(normalize_filename("03.The Movie.mkv"), "The Movie.mkv");
    assert_eq!(normalize_filename("12 The Movie.mkv"), "The Movie.mkv");
    assert_eq!(normalize_filename("07_The Movie.mkv"), "The Movie.mkv");
}

#[test]
fn test_leading_index_requires_separator() {
    // Four leading digits are a year candidate, not an index.
    assert_eq!(normalize_filename("1984 Movie.mkv"), "(1984).mkv");
    // Two digits with no separator stay put.
    assert_eq!(normalize_filename("99 Luftballons.mp3"), "Luftballons.mp3");
    assert_eq!(normalize_filename("99Luftballons.mp3"), "99Luftballons.mp3");
}

#[test]
fn test_year_extraction() {
    assert_eq!(normalize_filename("The.Movie.2021.1080p.mkv"), "The Movie (2021).mkv");
    assert_eq!(normalize_filename("My_Show_Name_2019.mp4"), "My Show Name (2019).mp4");
}

#[test]
fn test_year_out_of_range_ignored() {
    assert_eq!(normalize_filename("Movie 1776.mkv"), "Movie 1776.mkv");
    assert_eq!(normalize_filename("Movie 3021.mkv"), "Movie 3021.mkv");
}

#[test]
fn test_quality_tags_removed() {
    assert_eq!(normalize_filename("Movie.2020.2160p.HDR.REMUX.mkv"), "Movie (2020).mkv");
    assert_eq!(normalize_filename("Movie BluRay 4K.mkv"), "Movie.mkv");
    assert_eq!(normalize_filename("Movie.Web-DL.720p.mkv"), "Movie.mkv");
}

#[test]
fn test_balanced_parentheticals_dropped() {
    assert_eq!(normalize_filename("Movie (Director's Cut) 2001.mkv"), "Movie (2001).mkv");
    assert_eq!(normalize_filename("Movie (extended) (remastered).mkv"), "Movie.mkv");
}

#[test]
fn test_malformed_parentheses() {
    // A stray open bracket gets stripped, then the year is picked up again.
    assert_eq!(normalize_filename("Movie (2021.mkv"), "Movie (2021).mkv");
    assert_eq!(normalize_filename("Movie ((2002.mkv"), "Movie (2002).mkv");
}

#[test]
fn test_whitespace_collapsed() {
    assert_eq!(normalize_filename("The   Movie    2020.mkv"), "The Movie (2020).mkv");
}

#[test]
fn test_no_extension() {
    assert_eq!(normalize_filename("My_Show_2019"), "My Show (2019)");
    assert_eq!(normalize_filename(""), "");
}

#[test]
fn test_idempotence() {
    let corpus = [
        "The.Movie.2021.1080p.mkv",
        "My_Show_Name_2019.mp4",
        "03.The Movie.mkv",
        "Movie (2021.mkv",
        "Movie (Director's Cut) 2001.mkv",
        "movie.srt",
        "The Movie (2021).mkv",
        "Show - S02E05 - The Return.mkv",
        "plain.mkv",
        "no extension at all",
        "((((.mkv",
        "Movie BluRay 4K.mkv",
    ];
    for raw in corpus {
        let once = normalize_filename(raw);
        let twice = normalize_filename(&once);
        assert_eq!(once, twice, "not idempotent for {raw:?}");
    }
}

#[test]
fn test_split_extension() {
    assert_eq!(split_extension("movie.mkv"), ("movie", ".mkv"));
    assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
    assert_eq!(split_extension(".srt"), (".srt", ""));
    assert_eq!(split_extension("noext"), ("noext", ""));
    assert_eq!(split_extension("..weird"), ("..weird", ""));
}

#[test]
fn test_extract_episode_info_standard() {
    let info = extract_episode_info("Show - S02E05 - The Return.mkv");
    assert_eq!(info.season.as_deref(), Some("02"));
    assert_eq!(info.episode.as_deref(), Some("05"));
    assert_eq!(info.title.as_deref(), Some("The Return"));
}

#[test]
fn test_extract_episode_info_pads_single_digits() {
    let info = extract_episode_info("Show S2E5.mkv");
    assert_eq!(info.season.as_deref(), Some("02"));
    assert_eq!(info.episode.as_deref(), Some("05"));
    assert_eq!(info.title, None);
}

#[test]
fn test_extract_episode_info_alternate_pattern() {
    let info = extract_episode_info("Show 1x12.mkv");
    assert_eq!(info.season.as_deref(), Some("01"));
    assert_eq!(info.episode.as_deref(), Some("12"));
}

#[test]
fn test_extract_episode_info_prefers_standard_pattern() {
    let info = extract_episode_info("Show S01E02 3x04.mkv");
    assert_eq!(info.season.as_deref(), Some("01"));
    assert_eq!(info.episode.as_deref(), Some("02"));
}

#[test]
fn test_extract_episode_info_title_needs_three_segments() {
    let info = extract_episode_info("Show - S01E02.mkv");
    assert_eq!(info.title, None);

    let info = extract_episode_info("Show - S01E02 - Part 1 - Pilot.mkv");
    assert_eq!(info.title.as_deref(), Some("Pilot"));
}

#[test]
fn test_extract_episode_info_no_match() {
    let info = extract_episode_info("Just A Movie (2020).mkv");
    assert!(info.season.is_none());
    assert!(info.episode.is_none());
    assert!(info.title.is_none());
    assert!(info.is_empty());
}

#[test]
fn test_format_show_title() {
    assert_eq!(format_show_title("Show", Some("02"), Some("05"), Some("The Return")), "Show S02E05 - The Return");
    assert_eq!(format_show_title("Show", Some("02"), Some("05"), None), "Show S02E05");
    assert_eq!(format_show_title("Show", None, Some("05"), None), "Show E05");
    assert_eq!(format_show_title("Show", Some("02"), None, None), "Show");
    assert_eq!(format_show_title("Show", None, None, None), "Show");
}

#[test]
fn test_format_show_title_empty_strings_count_as_absent() {
    assert_eq!(format_show_title("Show", Some(""), Some("05"), Some("")), "Show E05");
}
