mod cli;
mod config;
mod domain;
mod error;
mod infra;
mod workflows;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::ConfigFile;
use domain::models::{ConfirmedMatch, Query};
use infra::cache::Cache;
use infra::tvdb::TvdbClient;
use workflows::context::WorkflowContext;
use workflows::fetch::FetchTorrents;
use workflows::resolvers::tvdb::TvdbResolver;
use workflows::sources::feed::FeedSource;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "fetch_torrents=debug"
    } else {
        "fetch_torrents=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = ConfigFile::load()?;
    let api_key = config.tvdb_api_key()?;
    let feed_path = config.feed_path(cli.feed.clone())?;

    let mut query = Query::new(cli.title.clone())?.with_sites(cli.sites.clone());
    if let Some(year) = cli.year {
        query = query.with_year(year);
    }
    if let Some(media_type) = cli.media_type {
        query = query.with_media_type(media_type);
    }
    if let Some(season) = cli.season {
        query = query.with_season(season);
    }

    let cache_path = config::get_cache_path();
    tracing::debug!("Using cache path: {}", cache_path.display());
    let mut cache = Cache::load(&cache_path);
    let mut context = WorkflowContext::default();

    let outcome = {
        let resolver = TvdbResolver::new(TvdbClient::new(api_key), &mut cache);
        let mut fetch = FetchTorrents::new(FeedSource::new(feed_path), resolver);
        fetch.execute(&query, &mut context)
    };

    // Save cache even when the invocation failed part way
    if let Err(e) = cache.save() {
        tracing::warn!("Failed to save cache: {e}");
    }

    if !outcome? {
        println!("No matching torrents found for '{}'", query.title);
        return Ok(());
    }

    print_matches(&context.torrents, cli.json)
}

fn print_matches(matches: &[ConfirmedMatch], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(matches)?);
        return Ok(());
    }

    for found in matches {
        let year = found
            .media
            .year
            .map(|y| format!(" ({y})"))
            .unwrap_or_default();
        println!(
            "[site {}] {} -> {}{} [{}]",
            found.torrent.site, found.torrent.title, found.media.title, year, found.media.media_type
        );
    }
    Ok(())
}
