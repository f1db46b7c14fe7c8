use anyhow::Result;

use crate::domain::models::{MediaIdentity, ReleaseMeta};

pub trait IdentityResolver {
    /// `Ok(None)` means the release could not be identified.
    fn recognize(&mut self, meta: &ReleaseMeta) -> Result<Option<MediaIdentity>>;
}

pub mod tvdb;
