/// The normalize module turns noisy release-style file names into clean,
/// human-readable titles. Everything here is a pure function over strings:
/// no IO, no shared state, and no failure mode beyond returning the input
/// unchanged. Callers that walk directories own all filesystem concerns.
use once_cell::sync::Lazy;
use regex::Regex;

/// Subtitle sidecar formats are never renamed; their names must keep matching
/// the video files they belong to.
pub const SUBTITLE_EXTENSIONS: &[&str] = &[
    ".srt", ".sub", ".smi", ".ssa", ".ass", ".vtt", ".idx", ".scc", ".ttml", ".dfxp", ".sbv", ".sup",
];

/// Names already shaped like "Title (Year).ext" are left alone. The pattern
/// accepts any letter ahead of the year parenthetical, stray punctuation
/// included; that looseness is long-standing behavior and renames depend on
/// it being stable.
static ALREADY_CLEAN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^0-9]*[A-Za-z].*?\s\(\d{4}\)\.[^.]+$").unwrap());

static PAREN_GROUP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());

static QUALITY_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:720p|1080p|2160p|4k|hdr|remux|bluray|web-dl)\b").unwrap());

static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})\b").unwrap());

static TRAILING_SEPARATORS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[._\s]+$").unwrap());

static SEASON_EPISODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[Ss](\d{1,2})[Ee](\d{1,2})").unwrap());

static ALT_SEASON_EPISODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2})x(\d{1,2})").unwrap());

/// Split a file name into stem and extension. The extension starts at the
/// last dot, except that a dot run at the very start of the name (dotfiles,
/// ".srt" as a whole name) is part of the stem.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && !name[..idx].chars().all(|c| c == '.') => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Normalize a release-style file name into "Title (Year).ext" form.
///
/// The transformation is total and idempotent: any string in, exactly one
/// string out, and running the output back through is a no-op. Subtitle
/// files and names that already carry a trailing "(Year)" are returned
/// byte-identical.
pub fn normalize_filename(raw: &str) -> String {
    let (_, ext) = split_extension(raw);
    if SUBTITLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
        return raw.to_string();
    }
    if ALREADY_CLEAN_REGEX.is_match(raw) {
        return raw.to_string();
    }

    let (stem, ext) = split_extension(raw);
    let name = strip_leading_index(stem);
    let name = normalize_separators(name);
    let name = clean_parentheticals(&name);
    let name = strip_quality_tags(&name);
    let name = apply_year(&name);
    let name = collapse_whitespace(&name);
    format!("{name}{ext}")
}

/// Drop a leading two-digit track/episode index plus its separator, e.g.
/// "03.The Movie" -> "The Movie".
fn strip_leading_index(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() > 3 && bytes[0].is_ascii_digit() && bytes[1].is_ascii_digit() && matches!(bytes[2], b'.' | b' ' | b'_') {
        &name[3..]
    } else {
        name
    }
}

/// Underscores and interior dots are word separators in release names. A dot
/// run at the very start of the name (dotfile territory) is not a separator
/// and stays put.
fn normalize_separators(name: &str) -> String {
    let tail = name.trim_start_matches('.');
    let head = &name[..name.len() - tail.len()];
    format!("{head}{}", tail.replace(['_', '.'], " "))
}

/// Balanced "(...)" groups are junk tags and get dropped whole. When the
/// parentheses do not pair up, repair is ambiguous, so only the bracket
/// characters are stripped and the content stays.
fn clean_parentheticals(name: &str) -> String {
    let open = name.matches('(').count();
    let close = name.matches(')').count();
    if open != close {
        name.replace(['(', ')'], "")
    } else {
        PAREN_GROUP_REGEX.replace_all(name, "").trim().to_string()
    }
}

fn strip_quality_tags(name: &str) -> String {
    QUALITY_TAG_REGEX.replace_all(name, "").into_owned()
}

/// Find the first standalone four-digit token. If it reads as a plausible
/// release year, everything before it becomes the title and the year moves
/// into a parenthesized suffix.
fn apply_year(name: &str) -> String {
    if let Some(m) = YEAR_REGEX.find(name) {
        let year: u32 = m.as_str().parse().unwrap_or(0);
        if (1900..=2999).contains(&year) {
            let base = name[..m.start()].trim();
            let base = TRAILING_SEPARATORS_REGEX.replace(base, "");
            return format!("{} ({})", base, m.as_str());
        }
    }
    name.to_string()
}

fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Season/episode markers recovered from an episode file name. Numbers are
/// kept as zero-padded strings, ready for "S01E02"-style formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeInfo {
    pub season: Option<String>,
    pub episode: Option<String>,
    pub title: Option<String>,
}

impl EpisodeInfo {
    pub fn is_empty(&self) -> bool {
        self.season.is_none() && self.episode.is_none() && self.title.is_none()
    }
}

/// Recover season number, episode number, and episode title from a file
/// name. Looks for "S01E02" first, then the "1x02" convention. The episode
/// title is the final " - "-separated segment when the name has at least
/// three of them. Every field is independently optional; unrecognized names
/// yield an empty result, never an error.
pub fn extract_episode_info(filename: &str) -> EpisodeInfo {
    let (stem, _) = split_extension(filename);
    let mut info = EpisodeInfo::default();

    if let Some(caps) = SEASON_EPISODE_REGEX.captures(stem) {
        info.season = Some(zero_pad(&caps[1]));
        info.episode = Some(zero_pad(&caps[2]));
    } else if let Some(caps) = ALT_SEASON_EPISODE_REGEX.captures(stem) {
        info.season = Some(zero_pad(&caps[1]));
        info.episode = Some(zero_pad(&caps[2]));
    }

    let parts: Vec<&str> = stem.split(" - ").collect();
    if parts.len() > 2 {
        let title = parts[parts.len() - 1].trim();
        if !title.is_empty() {
            info.title = Some(title.to_string());
        }
    }

    info
}

fn zero_pad(digits: &str) -> String {
    format!("{:02}", digits.parse::<u32>().unwrap_or(0))
}

/// Append episode markers to a show title: " S01E02" when both numbers are
/// known, " E02" when only the episode is, then " - {title}" when the episode
/// title is known. Inputs are not validated; empty strings count as absent.
pub fn format_show_title(show: &str, season: Option<&str>, episode: Option<&str>, episode_title: Option<&str>) -> String {
    let season = season.filter(|s| !s.is_empty());
    let episode = episode.filter(|e| !e.is_empty());
    let episode_title = episode_title.filter(|t| !t.is_empty());

    let mut base = show.to_string();
    match (season, episode) {
        (Some(s), Some(e)) => base = format!("{base} S{s}E{e}"),
        (None, Some(e)) => base = format!("{base} E{e}"),
        _ => {}
    }
    if let Some(title) = episode_title {
        base = format!("{base} - {title}");
    }
    base
}
