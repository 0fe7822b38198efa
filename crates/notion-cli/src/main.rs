//! notion - read-oriented command line access to a Notion workspace.
//!
//! Every command prints the decoded API response as pretty JSON on stdout;
//! logs go to stderr (`RUST_LOG=debug` shows each request).
//!
//! # Environment Variables
//!
//! - `NOTION_API_TOKEN` - integration token (required unless `--token` or config file)
//! - `NOTION_DATABASE_ID` - default database for database commands
//!
//! A `.env` file in the working directory is loaded first if present.

mod config;

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notion_core::{DataSourceSelection, DatabaseSummary, FilterParams, NotionClient};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;

/// Read-oriented command line client for the Notion API.
#[derive(Parser, Debug)]
#[command(name = "notion")]
#[command(version)]
struct Cli {
    /// Notion integration token (overrides NOTION_API_TOKEN and the config file)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search pages and data sources shared with the integration
    Search {
        /// Text to search for; omit to list everything accessible
        #[arg(default_value = "")]
        query: String,
    },

    /// Fetch a database object
    Database {
        /// Database ID (defaults to the configured database)
        id: Option<String>,

        /// Print a short summary instead of the raw object
        #[arg(long)]
        summary: bool,
    },

    /// List the data sources of a database
    DataSources {
        /// Database ID (defaults to the configured database)
        id: Option<String>,
    },

    /// Print the ID of the data source a database query would target
    PrimaryDataSource {
        /// Database ID (defaults to the configured database)
        id: Option<String>,

        /// Which data source to pick: first, index:N, id:ID or name:NAME
        #[arg(long = "data-source")]
        data_source: Option<DataSourceSelection>,
    },

    /// Query a data source directly
    QueryDataSource {
        /// Data source ID
        id: String,

        /// Filter/sort/pagination body as a JSON object
        #[arg(long, value_parser = parse_filter)]
        filter: Option<FilterParams>,
    },

    /// Query a database through one of its data sources
    Query {
        /// Database ID (defaults to the configured database)
        id: Option<String>,

        /// Which data source to pick: first, index:N, id:ID or name:NAME
        #[arg(long = "data-source")]
        data_source: Option<DataSourceSelection>,

        /// Filter/sort/pagination body as a JSON object
        #[arg(long, value_parser = parse_filter)]
        filter: Option<FilterParams>,
    },

    /// Show or change saved defaults
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration (the token is never shown)
    Show,
    /// Save the default database ID
    SetDatabase { id: String },
    /// Save the default data source selection
    SetDataSource { selection: DataSourceSelection },
}

fn parse_filter(raw: &str) -> Result<FilterParams, String> {
    match serde_json::from_str(raw) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err("filter must be a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {}", e)),
    }
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn build_client(cli_token: Option<String>, config: &Config) -> Result<NotionClient> {
    let token = cli_token.or_else(|| config.token.clone());
    NotionClient::new(token.as_deref()).with_context(|| {
        format!(
            "Cannot create Notion client; pass --token or set {}",
            config::TOKEN_ENV
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();
    let config = Config::load()?.with_env();
    debug!(command = ?cli.command, "Parsed command line");

    run(cli, config).await
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        // Config commands work without a token
        Commands::Config { action } => run_config(action, &config),
        command => {
            let client = build_client(cli.token, &config)?;
            run_api(command, &client, &config).await
        }
    }
}

async fn run_api(command: Commands, client: &NotionClient, config: &Config) -> Result<()> {
    match command {
        Commands::Search { query } => {
            let result = client.search(&query).await.context("Search failed")?;
            print_json(&result)
        }
        Commands::Database { id, summary } => {
            let id = config.resolve_database(id)?;
            let database = client
                .get_database(&id)
                .await
                .with_context(|| format!("Failed to fetch database {}", id))?;
            if summary {
                let summary = DatabaseSummary::from_value(&database)
                    .context("Failed to read database object")?;
                println!("{} ({})", summary.display_title(), summary.id);
                println!("Last edited: {}", summary.display_last_edited());
                for (i, source) in summary.data_sources.iter().enumerate() {
                    println!(
                        "  [{}] {} {}",
                        i,
                        source.id,
                        source.name.as_deref().unwrap_or("(unnamed)")
                    );
                }
                Ok(())
            } else {
                print_json(&database)
            }
        }
        Commands::DataSources { id } => {
            let id = config.resolve_database(id)?;
            let sources = client
                .get_database_data_sources(&id)
                .await
                .with_context(|| format!("Failed to list data sources of {}", id))?;
            print_json(&sources)
        }
        Commands::PrimaryDataSource { id, data_source } => {
            let id = config.resolve_database(id)?;
            let selection = config.resolve_selection(data_source)?;
            let source_id = client
                .get_data_source_id(&id, &selection)
                .await
                .with_context(|| format!("Failed to resolve data source of {}", id))?;
            println!("{}", source_id);
            Ok(())
        }
        Commands::QueryDataSource { id, filter } => {
            let result = client
                .query_data_source(&id, filter.as_ref())
                .await
                .with_context(|| format!("Failed to query data source {}", id))?;
            print_json(&result)
        }
        Commands::Query {
            id,
            data_source,
            filter,
        } => {
            let id = config.resolve_database(id)?;
            let selection = config.resolve_selection(data_source)?;
            let result = client
                .query_database_with(&id, &selection, filter.as_ref())
                .await
                .with_context(|| format!("Failed to query database {}", id))?;
            print_json(&result)
        }
        Commands::Config { action } => run_config(action, config),
    }
}

fn run_config(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print_json(&config.redacted())
        }
        // Saved files only get what the user set here, never values from the environment
        ConfigAction::SetDatabase { id } => {
            let mut saved = Config::load()?;
            saved.database_id = Some(id);
            let path = saved.save()?;
            info!(path = %path.display(), "Saved default database");
            Ok(())
        }
        ConfigAction::SetDataSource { selection } => {
            let mut saved = Config::load()?;
            saved.data_source = Some(selection.to_string());
            let path = saved.save()?;
            info!(path = %path.display(), "Saved default data source");
            Ok(())
        }
    }
}
