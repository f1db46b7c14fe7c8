use regex::Regex;
use std::sync::LazyLock;

use crate::domain::models::{MediaType, ReleaseMeta};

// Leading release group, e.g. "[Group] Title ..."
static GROUP_PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[[^\]]*\]").unwrap());

static SEPARATOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[._\[\]()]+").unwrap());

static CN_SEASON_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"第\s*(\d{1,2})\s*季").unwrap());

static SXXEXX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bS(\d{1,2})(?:E(\d{1,3}))?\b").unwrap());

static SEASON_WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSeason\s+(\d{1,2})\b").unwrap());

static EPISODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bEP?(\d{1,3})\b").unwrap());

static YEAR_TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(19\d{2}|20\d{2})$").unwrap());

static MARKER_TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(S\d{1,2}(E\d{1,3})?|EP?\d{1,3}|season|complete)$").unwrap()
});

static TAG_TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(2160p|1080p|1080i|720p|480p|4k|bluray|blu-ray|remux|web-dl|webrip|web|hdtv|dvdrip|hdr|x264|x265|h264|h265|hevc|avc)$",
    )
    .unwrap()
});

static AMBIGUOUS_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(web|remux|hdr|avc)$").unwrap());

/// Parses a raw release title into structured metadata.
pub fn parse_release_title(title: &str) -> ReleaseMeta {
    let without_group = GROUP_PREFIX_PATTERN.replace(title, " ");
    let normalized = SEPARATOR_PATTERN.replace_all(&without_group, " ");
    let normalized = CN_SEASON_PATTERN.replace_all(&normalized, " S$1 ");

    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    // The first token always belongs to the name so titles like "2012" survive.
    // Years may be part of the name ("Blade Runner 2049"), so the last year
    // before the first season or tag marker is taken as the release year.
    let mut name_end = tokens.len();
    let mut last_year = None;
    for (idx, token) in tokens.iter().enumerate().skip(1) {
        if YEAR_TOKEN_PATTERN.is_match(token) {
            last_year = Some(idx);
            continue;
        }
        if MARKER_TOKEN_PATTERN.is_match(token)
            || is_unambiguous_tag(token)
            || (last_year.is_some() && is_tag(token))
        {
            name_end = idx;
            break;
        }
    }
    let name_len = last_year.unwrap_or(name_end);

    let name = tokens[..name_len]
        .iter()
        .copied()
        .filter(|token| *token != "-")
        .collect::<Vec<_>>()
        .join(" ");

    let year = match last_year {
        Some(idx) => tokens[idx].parse().ok(),
        None => tokens[name_len..]
            .iter()
            .find(|token| YEAR_TOKEN_PATTERN.is_match(token))
            .and_then(|token| token.parse().ok()),
    };

    let (season, mut episode) = match SXXEXX_PATTERN.captures(&normalized) {
        Some(caps) => (
            caps.get(1).and_then(|m| m.as_str().parse().ok()),
            caps.get(2).and_then(|m| m.as_str().parse().ok()),
        ),
        None => (
            SEASON_WORD_PATTERN
                .captures(&normalized)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok()),
            None,
        ),
    };
    if episode.is_none() {
        episode = EPISODE_PATTERN
            .captures(&normalized)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());
    }

    let media_type = if season.is_some() || episode.is_some() {
        Some(MediaType::Tv)
    } else {
        None
    };

    ReleaseMeta {
        name,
        year,
        season,
        episode,
        media_type,
        tags: collect_tags(&tokens[name_len..]),
    }
}

fn is_tag(token: &str) -> bool {
    TAG_TOKEN_PATTERN.is_match(token)
        || token.split('-').any(|part| TAG_TOKEN_PATTERN.is_match(part))
}

/// Tags that are never ordinary title words; "web" or "remux" only count
/// once a year has been seen.
fn is_unambiguous_tag(token: &str) -> bool {
    let strong =
        |word: &str| TAG_TOKEN_PATTERN.is_match(word) && !AMBIGUOUS_TAG_PATTERN.is_match(word);
    strong(token) || token.split('-').any(strong)
}

fn collect_tags(tokens: &[&str]) -> Vec<String> {
    let mut tags = Vec::new();
    for token in tokens {
        if TAG_TOKEN_PATTERN.is_match(token) {
            tags.push(token.to_string());
        } else {
            // "x264-GROUP" carries the codec in its first part
            tags.extend(
                token
                    .split('-')
                    .filter(|part| TAG_TOKEN_PATTERN.is_match(part))
                    .map(str::to_string),
            );
        }
    }
    tags
}

/// Lowercased, punctuation-free form of a title for loose comparisons.
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
