//! scoutbook command-line entry point.
//!
//! # Responsibility
//! - Load `.env` and environment configuration, failing fast on errors.
//! - Initialize logging before touching the database.
//! - Dispatch to `serve`, `seed` or `truncate`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use scoutbook_core::{
    init_logging, CompanyService, ProfileService, ServiceError, SqliteCompanyRepository,
    SqliteProfileRepository,
};
use scoutbook_server::ServerConfig;

#[derive(Parser)]
#[command(name = "scoutbook")]
#[command(version)]
#[command(about = "CRUD backend for scraped profile and company records")]
struct Cli {
    /// Log level (trace|debug|info|warn|error); overrides SCOUTBOOK_LOG_LEVEL
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; overrides SCOUTBOOK_LOG_DIR
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Address to listen on; overrides SCOUTBOOK_BIND
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Insert demo profiles that are not stored yet
    Seed,

    /// Delete every stored profile
    Truncate {
        /// Also delete every stored company
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if cli.log_dir.is_some() {
        config.log_dir = cli.log_dir;
    }

    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let store = config
        .database
        .open()
        .with_context(|| format!("failed to open database {}", config.database))?;

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            scoutbook_server::serve(config.bind_addr()?, store).await?;
        }
        Commands::Seed => {
            let inserted = store.unit_of_work(|conn| {
                ProfileService::new(SqliteProfileRepository::new(conn)).seed_demo_profiles()
            })?;
            info!("event=cli_seed module=cli status=ok inserted={inserted}");
            println!("seeded {inserted} profile(s)");
        }
        Commands::Truncate { all } => {
            let (profiles, companies) = store.unit_of_work(|conn| -> Result<_, ServiceError> {
                let profiles =
                    ProfileService::new(SqliteProfileRepository::new(conn)).truncate_profiles()?;
                let companies = if all {
                    CompanyService::new(SqliteCompanyRepository::new(conn)).truncate_companies()?
                } else {
                    0
                };
                Ok((profiles, companies))
            })?;
            println!("removed {profiles} profile(s) and {companies} company row(s)");
        }
    }

    Ok(())
}
