use crate::domain::models::{MediaIdentity, ReleaseMeta};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Recognition results persisted between runs.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Cache {
    #[serde(skip)]
    path: PathBuf,
    pub identities: HashMap<String, MediaIdentity>, // lookup key -> identity
}

impl Cache {
    pub fn load(path: &Path) -> Self {
        let mut cache = if path.exists() {
            fs::read_to_string(path)
                .ok()
                .and_then(|content| serde_json::from_str(&content).ok())
                .unwrap_or_default()
        } else {
            Cache::default()
        };
        cache.path = path.to_path_buf();
        cache
    }

    pub fn save(&self) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get_identity(&self, meta: &ReleaseMeta) -> Option<&MediaIdentity> {
        self.identities.get(&lookup_key(meta))
    }

    pub fn set_identity(&mut self, meta: &ReleaseMeta, identity: &MediaIdentity) {
        self.identities.insert(lookup_key(meta), identity.clone());
    }
}

fn lookup_key(meta: &ReleaseMeta) -> String {
    // Lookup is case-insensitive on the name
    format!(
        "{}|{}|{}",
        meta.media_type.map(|t| t.as_str()).unwrap_or("any"),
        meta.name.to_lowercase(),
        meta.year.map(|y| y.to_string()).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::MediaType;
    use tempfile::TempDir;

    fn identity() -> MediaIdentity {
        MediaIdentity {
            title: "Movie X".to_string(),
            media_type: MediaType::Movie,
            year: Some(2020),
            tvdb_id: Some("5".to_string()),
            imdb_id: None,
        }
    }

    #[test]
    fn test_round_trip_through_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("cache.json");
        let meta = ReleaseMeta {
            name: "Movie X".to_string(),
            year: Some(2020),
            ..ReleaseMeta::default()
        };

        let mut cache = Cache::load(&path);
        assert!(cache.get_identity(&meta).is_none());
        cache.set_identity(&meta, &identity());
        cache.save().unwrap();

        let reloaded = Cache::load(&path);
        let lookup = ReleaseMeta {
            name: "MOVIE x".to_string(),
            ..meta.clone()
        };
        assert_eq!(reloaded.get_identity(&lookup), Some(&identity()));
    }

    #[test]
    fn test_key_distinguishes_year_and_type() {
        let mut cache = Cache::default();
        let meta = ReleaseMeta {
            name: "Movie X".to_string(),
            year: Some(2020),
            ..ReleaseMeta::default()
        };
        cache.set_identity(&meta, &identity());

        let other_year = ReleaseMeta {
            year: Some(2019),
            ..meta.clone()
        };
        let as_tv = ReleaseMeta {
            media_type: Some(MediaType::Tv),
            ..meta.clone()
        };
        assert!(cache.get_identity(&other_year).is_none());
        assert!(cache.get_identity(&as_tv).is_none());
    }

    #[test]
    fn test_corrupt_cache_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        fs::write(&path, "not json").unwrap();
        assert!(Cache::load(&path).identities.is_empty());
    }
}
