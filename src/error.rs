use thiserror::Error;

/// Failures that abort a fetch invocation.
///
/// Rejected or unidentified candidates are not errors; only collaborator
/// failures and unusable queries end up here.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Candidate search failed: {0:#}")]
    Source(anyhow::Error),

    #[error("Media recognition failed for '{title}': {cause:#}")]
    Resolver { title: String, cause: anyhow::Error },
}
