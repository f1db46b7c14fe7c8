use crate::domain::models::{ConfirmedMatch, Query, ResultSet};
use crate::error::FetchError;
use crate::workflows::context::WorkflowContext;
use crate::workflows::filters;
use crate::workflows::resolvers::IdentityResolver;
use crate::workflows::sources::CandidateSource;

pub const STEP_NAME: &str = "fetch_torrents";

/// Collects the confirmed matches of a single invocation.
#[derive(Debug, Default)]
pub struct Accumulator {
    matches: ResultSet,
}

impl Accumulator {
    pub fn add(&mut self, confirmed: ConfirmedMatch) {
        self.matches.push(confirmed);
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn into_results(self) -> ResultSet {
        self.matches
    }
}

/// Searches sites for a title, keeps the candidates that fit the query and
/// can be recognised, and hands them to the workflow.
pub struct FetchTorrents<S, R> {
    source: S,
    resolver: R,
}

impl<S: CandidateSource, R: IdentityResolver> FetchTorrents<S, R> {
    pub fn new(source: S, resolver: R) -> Self {
        Self { source, resolver }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (S, R) {
        (self.source, self.resolver)
    }

    pub fn run(&mut self, query: &Query) -> Result<ResultSet, FetchError> {
        if query.title.trim().is_empty() {
            return Err(FetchError::InvalidQuery("title is empty".to_string()));
        }

        let candidates = self
            .source
            .search(&query.title, &query.sites)
            .map_err(FetchError::Source)?;
        tracing::debug!(
            "{} candidate(s) found for '{}'",
            candidates.len(),
            query.title
        );

        let mut accumulator = Accumulator::default();
        for candidate in candidates {
            if !filters::passes(&candidate, query) {
                continue;
            }

            let identity = self
                .resolver
                .recognize(&candidate.meta)
                .map_err(|cause| FetchError::Resolver {
                    title: candidate.torrent.title.clone(),
                    cause,
                })?;

            let Some(identity) = identity else {
                tracing::info!(
                    "No media identity recognised for {}",
                    candidate.torrent.title
                );
                continue;
            };

            if !filters::resolved_type_matches(identity.media_type, query) {
                tracing::info!(
                    "Skipping {}: recognised as {}",
                    candidate.torrent.title,
                    identity.media_type
                );
                continue;
            }

            accumulator.add(candidate.confirm(identity));
        }

        if accumulator.is_empty() {
            tracing::debug!("No candidate matched '{}'", query.title);
        } else {
            tracing::debug!("{} candidate(s) matched '{}'", accumulator.len(), query.title);
        }
        Ok(accumulator.into_results())
    }

    /// Runs the search and merges any matches into the workflow context.
    ///
    /// Returns `true` when at least one match was found. Finding nothing is
    /// not an error.
    pub fn execute(
        &mut self,
        query: &Query,
        context: &mut WorkflowContext,
    ) -> Result<bool, FetchError> {
        let results = self.run(query)?;
        let success = !results.is_empty();

        if success {
            let count = results.len();
            context.extend_torrents(results);
            tracing::info!("Found {} torrent(s) for '{}'", count, query.title);
        }

        context.job_done(STEP_NAME);
        Ok(success)
    }
}
