use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type SiteId = u32;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "film" | "电影" => Ok(MediaType::Movie),
            "tv" | "series" | "show" | "电视剧" => Ok(MediaType::Tv),
            other => Err(anyhow!("Unknown media type '{other}'")),
        }
    }
}

/// Metadata parsed out of a release title.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ReleaseMeta {
    pub name: String,
    pub year: Option<u32>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub media_type: Option<MediaType>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A raw record as exported by an indexer site.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TorrentInfo {
    pub site: SiteId,
    pub title: String,
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub enclosure: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub seeders: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MediaIdentity {
    pub title: String,
    pub media_type: MediaType,
    pub year: Option<u32>,
    pub tvdb_id: Option<String>,
    pub imdb_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub torrent: TorrentInfo,
    pub meta: ReleaseMeta,
    pub media: Option<MediaIdentity>,
}

impl Candidate {
    pub fn new(torrent: TorrentInfo, meta: ReleaseMeta) -> Self {
        Self {
            torrent,
            meta,
            media: None,
        }
    }

    /// Attaches a recognised identity, replacing any prior one.
    pub fn confirm(self, media: MediaIdentity) -> ConfirmedMatch {
        ConfirmedMatch {
            torrent: self.torrent,
            meta: self.meta,
            media,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ConfirmedMatch {
    pub torrent: TorrentInfo,
    pub meta: ReleaseMeta,
    pub media: MediaIdentity,
}

pub type ResultSet = Vec<ConfirmedMatch>;

/// Parameters of a single fetch invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub title: String,
    pub year: Option<u32>,
    pub media_type: Option<MediaType>,
    pub season: Option<u32>,
    pub sites: Vec<SiteId>,
}

impl Query {
    pub fn new(title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            bail!("Query title must not be empty");
        }
        Ok(Self {
            title: title.trim().to_string(),
            ..Self::default()
        })
    }

    pub fn with_year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn with_season(mut self, season: u32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_sites(mut self, sites: Vec<SiteId>) -> Self {
        self.sites = sites;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_str() {
        assert_eq!("movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!(" TV ".parse::<MediaType>().unwrap(), MediaType::Tv);
        assert_eq!("电影".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!("电视剧".parse::<MediaType>().unwrap(), MediaType::Tv);
        assert_eq!("Series".parse::<MediaType>().unwrap(), MediaType::Tv);
        assert!("anime".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_query_rejects_blank_title() {
        assert!(Query::new("   ").is_err());
        let query = Query::new("  Movie X ").unwrap().with_year(2020);
        assert_eq!(query.title, "Movie X");
        assert_eq!(query.year, Some(2020));
        assert!(query.sites.is_empty());
    }

    #[test]
    fn test_confirm_replaces_prior_identity() {
        let torrent = TorrentInfo {
            site: 1,
            title: "Movie.X.2020.1080p".to_string(),
            site_name: None,
            enclosure: None,
            size: None,
            seeders: None,
        };
        let mut candidate = Candidate::new(torrent, ReleaseMeta::default());
        candidate.media = Some(MediaIdentity {
            title: "Old".to_string(),
            media_type: MediaType::Tv,
            year: None,
            tvdb_id: None,
            imdb_id: None,
        });
        let resolved = MediaIdentity {
            title: "Movie X".to_string(),
            media_type: MediaType::Movie,
            year: Some(2020),
            tvdb_id: Some("42".to_string()),
            imdb_id: None,
        };
        let confirmed = candidate.confirm(resolved.clone());
        assert_eq!(confirmed.media, resolved);
    }
}
