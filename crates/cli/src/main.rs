mod commands;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tom_catalog_core::{DEFAULT_CONE_RADIUS_ARCSEC, DEFAULT_QUERY_LIMIT};
use tom_catalog_service::{MatchConfig, MatchManagerRegistry, TargetService};
use tom_catalog_storage::Storage;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tom-catalog")]
#[command(about = "Target catalogue with fuzzy-name and cone-search duplicate matching", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "TOM_DB_PATH")]
    db: Option<PathBuf>,
    /// Match manager used for duplicate checks (see `managers`)
    #[arg(short, long, global = true, env = "TOM_MATCH_MANAGER")]
    manager: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value = "37780")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Add a sidereal target, rejecting duplicates
    Add {
        name: String,
        /// Right ascension, degrees or HH:MM:SS.s
        #[arg(long, allow_hyphen_values = true)]
        ra: String,
        /// Declination, degrees or +DD:MM:SS.s
        #[arg(long, allow_hyphen_values = true)]
        dec: String,
        #[arg(short, long = "alias")]
        aliases: Vec<String>,
        /// Skip validation and duplicate matching
        #[arg(long)]
        unchecked: bool,
    },
    /// Attach an alias to an existing target
    Alias { target_id: i64, name: String },
    Get { id: i64 },
    List {
        #[arg(long, default_value = "0")]
        offset: usize,
        #[arg(short, long, default_value_t = DEFAULT_QUERY_LIMIT)]
        limit: usize,
    },
    /// Targets whose names match through the configured manager
    Match {
        name: String,
        /// Case-sensitive equality instead of fuzzy matching
        #[arg(long)]
        exact: bool,
    },
    /// Targets within a radius of a position
    Cone {
        #[arg(allow_hyphen_values = true)]
        ra: String,
        #[arg(allow_hyphen_values = true)]
        dec: String,
        /// Arcseconds
        #[arg(short, long, default_value_t = DEFAULT_CONE_RADIUS_ARCSEC)]
        radius: f64,
    },
    /// List the available match managers
    Managers,
    Stats,
}

fn get_db_path(override_path: Option<PathBuf>) -> PathBuf {
    override_path.unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tom-catalog")
            .join("catalog.db")
    })
}

fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Opens the catalogue and resolves the match manager. An unknown manager
/// name stops the command before anything is read or written.
fn open_service(db: Option<PathBuf>, manager: Option<String>) -> Result<TargetService> {
    let db_path = get_db_path(db);
    ensure_db_dir(&db_path)?;
    let storage = Arc::new(Storage::new(&db_path)?);

    let mut config = MatchConfig::from_env();
    if let Some(manager) = manager {
        config.manager = manager;
    }
    Ok(TargetService::from_config(storage, &MatchManagerRegistry::with_builtins(), &config)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if matches!(cli.command, Commands::Managers) {
        return commands::matching::run_managers();
    }
    let service = open_service(cli.db, cli.manager)?;

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(service, port, &host).await?,
        Commands::Add { name, ra, dec, aliases, unchecked } => {
            commands::targets::run_add(&service, name, &ra, &dec, aliases, unchecked).await?;
        },
        Commands::Alias { target_id, name } => {
            commands::targets::run_alias(&service, target_id, &name).await?;
        },
        Commands::Get { id } => commands::targets::run_get(&service, id).await?,
        Commands::List { offset, limit } => {
            commands::targets::run_list(&service, offset, limit).await?;
        },
        Commands::Match { name, exact } => {
            commands::matching::run_match(&service, &name, exact).await?;
        },
        Commands::Cone { ra, dec, radius } => {
            commands::matching::run_cone(&service, &ra, &dec, radius).await?;
        },
        Commands::Stats => commands::matching::run_stats(&service).await?,
        Commands::Managers => {},
    }

    Ok(())
}
