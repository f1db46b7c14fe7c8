use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::CandidateSource;
use crate::domain::models::{Candidate, SiteId, TorrentInfo};
use crate::domain::release::{normalize_title, parse_release_title};

/// Candidate source backed by an indexer export on disk
/// (a JSON array of torrent records).
pub struct FeedSource {
    path: PathBuf,
}

impl FeedSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<Vec<TorrentInfo>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read feed {:?}", self.path))?;
        let records = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse feed {:?}", self.path))?;
        Ok(records)
    }
}

impl CandidateSource for FeedSource {
    fn search(&self, title: &str, sites: &[SiteId]) -> Result<Vec<Candidate>> {
        let wanted = normalize_title(title);
        let records = self.load()?;
        tracing::debug!("Loaded {} record(s) from {:?}", records.len(), self.path);

        let candidates = records
            .into_iter()
            .filter(|record| sites.is_empty() || sites.contains(&record.site))
            .filter_map(|record| {
                let meta = parse_release_title(&record.title);
                // Fall back to the whole title when the parsed name is cut short
                let matches = normalize_title(&meta.name).contains(&wanted)
                    || normalize_title(&record.title).contains(&wanted);
                matches.then(|| Candidate::new(record, meta))
            })
            .collect();

        Ok(candidates)
    }
}
