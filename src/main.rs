use anyhow::Result;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use chanscope::cli::{Cli, Commands, ConfigCommands};
use chanscope::config::Config;
use chanscope::display::{
    display_boards, display_catalog_post, display_error, display_search_hit, display_stats,
    display_thread, print_header,
};
use chanscope::{FieldStats, FileCache, HttpFetcher, ResourceClient};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli);

    if let Err(e) = &result {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut stats = FieldStats::new();

    match &cli.command {
        Commands::Config { action } => return cmd_config(action.clone()),
        Commands::Boards => cmd_boards(&build_client(&cli)?)?,
        Commands::Catalog { board } => cmd_catalog(&build_client(&cli)?, board, &mut stats)?,
        Commands::Threads { board } => cmd_threads(&build_client(&cli)?, board, &mut stats)?,
        Commands::Archive { board } => cmd_archive(&build_client(&cli)?, board, &mut stats)?,
        Commands::Thread { board, no } => {
            cmd_thread(&build_client(&cli)?, board, *no, &mut stats)?
        }
        Commands::Search { keywords, board } => cmd_search(
            &build_client(&cli)?,
            &keywords.join(" "),
            board.as_deref(),
            &mut stats,
        )?,
    }

    if cli.stats {
        display_stats(&stats);
    }

    Ok(())
}

// ============================================================================
// Command handlers
// ============================================================================

/// Handle `boards` command - one line per board
fn cmd_boards(client: &ResourceClient<HttpFetcher>) -> Result<()> {
    if let Some(list) = client.boards()? {
        display_boards(&list.boards);
    }
    Ok(())
}

/// Handle `catalog` command - every catalog thread with its last replies
fn cmd_catalog(
    client: &ResourceClient<HttpFetcher>,
    board: &str,
    stats: &mut FieldStats,
) -> Result<()> {
    print_header(&format!("All cataloged threads on /{}/", board));
    if let Some(catalog) = client.catalog(board)? {
        for post in catalog.iter().flat_map(|page| &page.threads) {
            display_catalog_post(post, stats);
        }
    }
    Ok(())
}

/// Handle `threads` command - every current thread
fn cmd_threads(
    client: &ResourceClient<HttpFetcher>,
    board: &str,
    stats: &mut FieldStats,
) -> Result<()> {
    print_header(&format!("All current threads on /{}/", board));
    if let Some(threads) = client.threads(board)? {
        for thread in threads {
            display_thread(&thread?, stats);
        }
    }
    Ok(())
}

/// Handle `archive` command - every archived thread
fn cmd_archive(
    client: &ResourceClient<HttpFetcher>,
    board: &str,
    stats: &mut FieldStats,
) -> Result<()> {
    print_header(&format!("All archived threads on /{}/", board));
    if let Some(threads) = client.archive(board)? {
        for thread in threads {
            display_thread(&thread?, stats);
        }
    }
    Ok(())
}

/// Handle `thread` command - a single thread
fn cmd_thread(
    client: &ResourceClient<HttpFetcher>,
    board: &str,
    no: u64,
    stats: &mut FieldStats,
) -> Result<()> {
    if let Some(thread) = client.thread(board, no)? {
        display_thread(&thread, stats);
    }
    Ok(())
}

/// Handle `search` command - print hits as pages arrive
fn cmd_search(
    client: &ResourceClient<HttpFetcher>,
    keywords: &str,
    board: Option<&str>,
    stats: &mut FieldStats,
) -> Result<()> {
    print_header(&format!("Search results for \"{}\"", keywords));
    for hit in client.search(keywords, board) {
        display_search_hit(&hit?, stats);
    }
    Ok(())
}

/// Handle `config` subcommands
fn cmd_config(action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let config = Config::load()?;
            let config_path = Config::file_path()?;
            let exists = Config::exists();

            println!();
            println!("chanscope configuration:");
            println!("  Config file: {}", config_path.display());
            println!("  File exists: {}", if exists { "yes" } else { "no (using defaults)" });
            println!();
            println!("  API URL:    {}", config.api_url);
            println!("  Search URL: {}", config.search_url);
            println!("  Cache dir:  {}", config.resolved_cache_dir().display());
            println!("  Timeout:    {}s", config.timeout_secs);
            println!();
            Ok(())
        }
        ConfigCommands::Set {
            api_url,
            search_url,
            cache_dir,
            timeout,
        } => {
            if api_url.is_none() && search_url.is_none() && cache_dir.is_none() && timeout.is_none() {
                println!("No value provided to set.");
                println!("Usage: chanscope config set [--api-url <URL>] [--search-url <URL>] [--cache-dir <DIR>] [--timeout <SECS>]");
                return Ok(());
            }

            // Load existing config or defaults
            let mut config = Config::load()?;

            if let Some(url) = api_url {
                config.api_url = url;
            }
            if let Some(url) = search_url {
                config.search_url = url;
            }
            if let Some(dir) = cache_dir {
                config.cache_dir = Some(dir);
            }
            if let Some(secs) = timeout {
                config.timeout_secs = secs;
            }

            config.normalize();
            config.validate()?;
            config.save()?;

            println!("Saved configuration to {}", Config::file_path()?.display());
            Ok(())
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Build the cached client from config, honouring --cachedir
fn build_client(cli: &Cli) -> Result<ResourceClient<HttpFetcher>> {
    let config = Config::load()?;
    let cache_dir = cli
        .cachedir
        .clone()
        .unwrap_or_else(|| config.resolved_cache_dir());

    tracing::debug!(cache_dir = %cache_dir.display(), api_url = %config.api_url, "using cache");

    let fetcher = HttpFetcher::new(Duration::from_secs(config.timeout_secs))?;
    Ok(ResourceClient::new(fetcher, FileCache::new(cache_dir), &config))
}
