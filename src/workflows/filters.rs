//! Metadata-only checks run before a candidate is sent for recognition.
//!
//! Every check is pure and cheap; `passes` evaluates them in a fixed order
//! and stops at the first failure.

use crate::domain::models::{Candidate, MediaType, Query};

pub fn passes(candidate: &Candidate, query: &Query) -> bool {
    year_matches(candidate, query)
        && type_matches(candidate, query)
        && season_matches(candidate, query)
}

fn year_matches(candidate: &Candidate, query: &Query) -> bool {
    match query.year {
        Some(year) => candidate.meta.year == Some(year),
        None => true,
    }
}

/// Preliminary check: only candidates that already carry an identity can
/// be rejected here. Unknown types are left for the post-recognition check.
fn type_matches(candidate: &Candidate, query: &Query) -> bool {
    match (query.media_type, &candidate.media) {
        (Some(wanted), Some(media)) => media.media_type == wanted,
        _ => true,
    }
}

fn season_matches(candidate: &Candidate, query: &Query) -> bool {
    match query.season {
        Some(season) => candidate.meta.season == Some(season),
        None => true,
    }
}

/// Authoritative type check against the recognised identity.
pub fn resolved_type_matches(resolved: MediaType, query: &Query) -> bool {
    query.media_type.map_or(true, |wanted| wanted == resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{MediaIdentity, ReleaseMeta, TorrentInfo};

    fn candidate(year: Option<u32>, season: Option<u32>) -> Candidate {
        Candidate::new(
            TorrentInfo {
                site: 1,
                title: "Example.Show".to_string(),
                site_name: None,
                enclosure: None,
                size: None,
                seeders: None,
            },
            ReleaseMeta {
                name: "Example Show".to_string(),
                year,
                season,
                ..ReleaseMeta::default()
            },
        )
    }

    fn identified(media_type: MediaType) -> Candidate {
        let mut c = candidate(None, None);
        c.media = Some(MediaIdentity {
            title: "Example Show".to_string(),
            media_type,
            year: None,
            tvdb_id: None,
            imdb_id: None,
        });
        c
    }

    #[test]
    fn test_unconstrained_query_passes_everything() {
        let query = Query::new("Example Show").unwrap();
        assert!(passes(&candidate(None, None), &query));
        assert!(passes(&candidate(Some(1999), Some(4)), &query));
    }

    #[test]
    fn test_year_filter() {
        let query = Query::new("Movie X").unwrap().with_year(2020);
        assert!(passes(&candidate(Some(2020), None), &query));
        assert!(!passes(&candidate(Some(2019), None), &query));
        assert!(!passes(&candidate(None, None), &query));
    }

    #[test]
    fn test_season_filter() {
        let query = Query::new("Example Show").unwrap().with_season(2);
        assert!(passes(&candidate(None, Some(2)), &query));
        assert!(!passes(&candidate(None, Some(1)), &query));
        assert!(!passes(&candidate(None, None), &query));
    }

    #[test]
    fn test_type_filter_only_applies_to_known_identity() {
        let query = Query::new("Example Show")
            .unwrap()
            .with_media_type(MediaType::Tv);
        assert!(passes(&candidate(None, None), &query));
        assert!(passes(&identified(MediaType::Tv), &query));
        assert!(!passes(&identified(MediaType::Movie), &query));
    }

    #[test]
    fn test_resolved_type_matches() {
        let query = Query::new("Movie X").unwrap();
        assert!(resolved_type_matches(MediaType::Tv, &query));
        let query = query.with_media_type(MediaType::Movie);
        assert!(resolved_type_matches(MediaType::Movie, &query));
        assert!(!resolved_type_matches(MediaType::Tv, &query));
    }
}
