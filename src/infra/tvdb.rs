use serde::Deserialize;
use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::domain::models::{MediaIdentity, MediaType};

const TVDB_API_BASE: &str = "https://api4.thetvdb.com/v4";

#[derive(Debug)]
pub struct TvdbClient {
    api_key: String,
    token: Option<String>,
    http: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    data: LoginData,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Vec<SearchResult>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchResult {
    pub tvdb_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub year: Option<String>,
    pub translations: Option<HashMap<String, String>>,
    #[serde(default)]
    pub remote_ids: Vec<RemoteId>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteId {
    pub id: String,
    #[serde(rename = "sourceName")]
    pub source_name: String,
}

impl SearchResult {
    /// Converts a search hit into an identity; hits that are neither
    /// series nor movies (people, companies) yield `None`.
    pub fn into_identity(self) -> Option<MediaIdentity> {
        let media_type = match self.kind.as_str() {
            "series" => MediaType::Tv,
            "movie" => MediaType::Movie,
            _ => return None,
        };
        let title = self
            .translations
            .as_ref()
            .and_then(|t| t.get("eng"))
            .cloned()
            .unwrap_or(self.name);
        let imdb_id = self
            .remote_ids
            .iter()
            .find(|remote| remote.source_name.eq_ignore_ascii_case("imdb"))
            .map(|remote| remote.id.clone());

        Some(MediaIdentity {
            title,
            media_type,
            year: self.year.and_then(|y| y.parse().ok()),
            tvdb_id: Some(self.tvdb_id),
            imdb_id,
        })
    }
}

fn search_type(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "movie",
        MediaType::Tv => "series",
    }
}

impl TvdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            token: None,
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn login(&mut self) -> Result<()> {
        let body = serde_json::json!({
            "apikey": self.api_key
        });
        let response = self
            .http
            .post(format!("{}/login", TVDB_API_BASE))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()?;

        if !response.status().is_success() {
            bail!("TVDB login failed: HTTP {}", response.status());
        }

        let login_resp: LoginResponse = serde_json::from_str(&response.text()?)?;
        self.token = Some(login_resp.data.token);
        Ok(())
    }

    fn bearer(&mut self) -> Result<String> {
        if self.token.is_none() {
            tracing::debug!("Logging in to TVDB");
            self.login()?;
        }
        match &self.token {
            Some(token) => Ok(format!("Bearer {token}")),
            None => bail!("TVDB login returned no token"),
        }
    }

    pub fn search(
        &mut self,
        name: &str,
        media_type: Option<MediaType>,
        year: Option<u32>,
    ) -> Result<Vec<SearchResult>> {
        let bearer = self.bearer()?;

        let mut params = vec![("query", name.to_string())];
        if let Some(media_type) = media_type {
            params.push(("type", search_type(media_type).to_string()));
        }
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }

        let response = self
            .http
            .get(format!("{}/search", TVDB_API_BASE))
            .header("Authorization", bearer)
            .query(&params)
            .send()?;

        if !response.status().is_success() {
            bail!("TVDB search failed: HTTP {}", response.status());
        }

        let search_resp: SearchResponse = serde_json::from_str(&response.text()?)?;
        Ok(search_resp.data)
    }
}
