use anyhow::Result;

use crate::domain::models::{Candidate, SiteId};

/// Something that can look up raw candidates on indexer sites.
pub trait CandidateSource {
    /// An empty `sites` slice means every known site is searched.
    fn search(&self, title: &str, sites: &[SiteId]) -> Result<Vec<Candidate>>;
}

pub mod feed;
