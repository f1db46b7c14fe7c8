use anyhow::Result;

use super::IdentityResolver;
use crate::domain::models::{MediaIdentity, ReleaseMeta};
use crate::infra::cache::Cache;
use crate::infra::tvdb::TvdbClient;

/// Recognises releases against TVDB, remembering earlier answers in the cache.
pub struct TvdbResolver<'a> {
    client: TvdbClient,
    cache: &'a mut Cache,
}

impl<'a> TvdbResolver<'a> {
    pub fn new(client: TvdbClient, cache: &'a mut Cache) -> Self {
        Self { client, cache }
    }
}

impl IdentityResolver for TvdbResolver<'_> {
    fn recognize(&mut self, meta: &ReleaseMeta) -> Result<Option<MediaIdentity>> {
        if meta.name.is_empty() {
            return Ok(None);
        }
        if let Some(identity) = self.cache.get_identity(meta) {
            return Ok(Some(identity.clone()));
        }

        let results = self.client.search(&meta.name, meta.media_type, meta.year)?;
        let identity = results
            .into_iter()
            .find_map(|result| result.into_identity());

        if let Some(identity) = &identity {
            self.cache.set_identity(meta, identity);
        }
        Ok(identity)
    }
}
