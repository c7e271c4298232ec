//! Tag Catalog CLI
//!
//! Local entry point: builds a catalog for a keyword tag and prints it as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tag_catalog::{
    error::{AppError, Result},
    models::{Config, SortKey},
    services::CatalogService,
};

/// Tag Catalog - IMDb keyword catalogs for movies and series
#[derive(Parser, Debug)]
#[command(
    name = "tag-catalog",
    version,
    about = "Movie and series catalogs from IMDb keyword listings"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "catalog.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a catalog and print it as JSON
    Catalog {
        /// Catalog type: movie or series
        #[arg(long = "type", default_value = "movie")]
        subtype: String,

        /// Keyword tag (default: from config)
        #[arg(long)]
        tag: Option<String>,

        /// Sort order label, e.g. "Popular" or "Year Descending" (default: from config)
        #[arg(long)]
        sort: Option<String>,
    },

    /// Validate the configuration file
    Validate,

    /// List the supported sort orders
    Sorts,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, default_level: &str) {
    let level = if verbose { "debug" } else { default_level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = Config::load(&cli.config);
    let level = loaded
        .as_ref()
        .map(|config| config.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(cli.verbose, &level);

    let config = loaded.unwrap_or_else(|e| {
        log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        );
        Config::default()
    });
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Catalog { subtype, tag, sort } => {
            let tag = match tag {
                Some(tag) => tag,
                None => config.catalog.resolve_tag()?,
            };
            let sort = match sort {
                Some(sort) => sort.parse::<SortKey>()?,
                None => config.catalog.sort,
            };

            let service = CatalogService::new(&config)?;
            log::info!("Fetching {subtype} catalog for '{tag}' sorted by {sort}");
            let response = service.fetch_catalog(Some(&tag), sort, &subtype).await?;

            log::info!("{} entries", response.entries.len());
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            match config.catalog.resolve_tag() {
                Ok(tag) => log::info!("✓ Config OK (tag '{tag}', sort {})", config.catalog.sort),
                Err(AppError::MissingTag) => {
                    log::warn!("✓ Config OK, but no default tag is set; pass --tag")
                }
                Err(e) => return Err(e),
            }
        }

        Command::Sorts => {
            for sort in SortKey::ALL {
                println!("{:<16} {}", sort.label(), sort.query_param());
            }
        }
    }

    Ok(())
}
