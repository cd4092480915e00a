use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, listing, show, watchlist, Context};
use nebulix_config::{Config, PathManager};

mod commands;
mod logging;
mod output;
mod render;
mod ui;

#[derive(Parser)]
#[command(name = "nebulix")]
#[command(about = "Nebulix - browse movies and keep a watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List popular movies
    Discover {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Search movies by title
    Search {
        /// Title text; blank text falls back to popular movies
        query: String,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show one movie in detail
    #[command(long_about = "Show one movie in detail. SLUG is a title slug such as 'the-matrix' (a route like '/m/the-matrix' or a plain title also works) and resolves to the provider's top search match. Use --id for an exact lookup.")]
    Show {
        #[arg(required_unless_present = "id")]
        slug: Option<String>,

        /// Look the movie up by provider id instead of by slug
        #[arg(long, conflicts_with = "slug")]
        id: Option<u64>,
    },
    /// Manage the local watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Interactive browser: search, load more, bookmark and open details
    Browse,
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// List bookmarked movies
    List,
    /// Bookmark a movie by provider id
    Add { id: u64 },
    /// Remove a bookmarked movie
    Remove { id: u64 },
    /// Bookmark the movie if absent, remove it otherwise
    Toggle { id: u64 },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show,
    /// Write config.toml, prompting for the API key when not given
    Init {
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_file = paths.config_file();
    let loaded = Config::load_or_default(&config_file);

    // Logging needs the config for its file target, so a broken config is
    // reported only after the subscriber is up
    let log_file = loaded.as_ref().ok().and_then(|c| c.logging.file.clone());
    logging::init_logging(cli.verbose, cli.quiet, log_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let config = loaded
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let ctx = Context::new(config, paths);

    let result = match cli.command {
        Commands::Discover { pages } => listing::run_listing(&ctx, "", pages, &output).await,
        Commands::Search { query, pages } => listing::run_listing(&ctx, &query, pages, &output).await,
        Commands::Show { slug, id } => show::run_show(&ctx, slug, id, &output).await,
        Commands::Watchlist { cmd } => {
            let cmd = cmd.unwrap_or(WatchlistCommands::List);
            watchlist::run_watchlist(&ctx, cmd, &output).await
        }
        Commands::Browse => browse::run_browse(&ctx, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(&ctx, cmd, &output)
        }
    };

    if let Err(e) = result {
        output.error(describe_error(&e));
        std::process::exit(1);
    }
    Ok(())
}

/// One-line message from the error and each of its causes
fn describe_error(error: &color_eyre::Report) -> String {
    error.chain().map(|cause| cause.to_string()).collect::<Vec<_>>().join(": ")
}
