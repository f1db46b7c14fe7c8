use clap::Parser;
use std::path::PathBuf;

use crate::domain::models::{MediaType, SiteId};

#[derive(Parser)]
#[command(name = "fetch-torrents")]
#[command(about = "Search indexer sites for a title and keep the releases that can be identified")]
pub struct Cli {
    /// Title to search for
    #[arg(long)]
    pub title: String,

    /// Release year the results must carry
    #[arg(long)]
    pub year: Option<u32>,

    /// Media type (movie or tv)
    #[arg(long = "type", value_parser = parse_media_type)]
    pub media_type: Option<MediaType>,

    /// Season number the results must carry
    #[arg(long)]
    pub season: Option<u32>,

    /// Restrict the search to these site ids (repeatable)
    #[arg(long = "site")]
    pub sites: Vec<SiteId>,

    /// Indexer export to search (JSON)
    #[arg(long)]
    pub feed: Option<PathBuf>,

    /// Print matches as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

fn parse_media_type(value: &str) -> Result<MediaType, String> {
    value.parse().map_err(|e: anyhow::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "fetch-torrents",
            "--title",
            "Example Show",
            "--type",
            "tv",
            "--season",
            "2",
            "--site",
            "1",
            "--site",
            "4",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.title, "Example Show");
        assert_eq!(cli.media_type, Some(MediaType::Tv));
        assert_eq!(cli.season, Some(2));
        assert_eq!(cli.sites, vec![1, 4]);
        assert!(cli.json);
        assert!(cli.year.is_none());
    }

    #[test]
    fn test_unknown_media_type_rejected() {
        assert!(Cli::try_parse_from(["fetch-torrents", "--title", "X", "--type", "anime"]).is_err());
    }
}
