use anyhow::bail;
use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub tvdb_api_key: Option<String>,
    pub feed_path: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path())
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(path)?;
        Ok(toml::from_str(&config_content)?)
    }

    pub fn tvdb_api_key(&self) -> Result<String> {
        // Environment wins over the config file
        if let Ok(key) = env::var("TVDB_API_KEY") {
            return Ok(key);
        }
        if let Some(key) = &self.tvdb_api_key {
            return Ok(key.clone());
        }

        bail!("TVDB API key not found. Set TVDB_API_KEY environment variable or create config file at {} with tvdb_api_key = \"your-key\"", get_config_path().display())
    }

    /// The command line flag takes precedence over `feed_path`.
    pub fn feed_path(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        match flag.or_else(|| self.feed_path.clone()) {
            Some(path) => Ok(path),
            None => bail!("No feed given. Pass --feed or set feed_path in {}", get_config_path().display()),
        }
    }
}

pub fn get_cache_path() -> PathBuf {
    get_config_dir_path().join("cache.json")
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("fetch-torrents"))
        // If the standard path could not be found (e.g.`$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}
