//! African fiscal dashboard server and command line tools

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use afrifiscal_core::{Config, ExportQuery, init_logging};
use afrifiscal_web::{ApiClient, api_client::export_file_name, build_app, pages::split_list};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};
use tokio::signal;
use tracing::info;

/// Command line interface for the dashboard
#[derive(Parser)]
#[command(
    name = "afrifiscal-dashboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Dashboard for African fiscal and economic indicators"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,

    /// Subcommand; `serve` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard server
    Serve,

    /// Download a data export from the analytics API
    Export {
        /// Countries to include, comma separated
        #[arg(long, value_name = "LIST")]
        countries: Option<String>,

        /// Years to include, comma separated
        #[arg(long, value_name = "LIST")]
        years: Option<String>,

        /// Metrics to include, comma separated
        #[arg(long, value_name = "LIST")]
        metrics: Option<String>,

        /// Output file; defaults to a dated name in the current directory
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Inspect the resolved configuration
    Config {
        /// Print the configuration as TOML
        #[arg(short, long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Some(note) = env_file_note(&dotenvy::dotenv()) {
        eprintln!("{note}");
    }

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Export {
            countries,
            years,
            metrics,
            output,
        } => {
            let query = ExportQuery {
                countries: split_list(countries.as_deref()),
                years: split_list(years.as_deref()),
                metrics: split_list(metrics.as_deref()),
            };
            export(&config, &query, output).await
        }
        Commands::Config { show } => {
            if show {
                print!("{}", config.to_toml()?);
            } else {
                println!("Configuration is valid");
            }
            Ok(())
        }
    }
}

/// Note for a `.env` file that exists but could not be loaded
fn env_file_note(result: &dotenvy::Result<PathBuf>) -> Option<String> {
    match result {
        Err(e) if !e.not_found() => Some(format!("Note: .env file not loaded: {e}")),
        _ => None,
    }
}

/// Resolve configuration and apply command line overrides
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };

    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    if cli.json {
        config.logging.format = "json".to_string();
    }
    Ok(config)
}

/// Run the dashboard server until Ctrl+C
async fn serve(config: Config) -> anyhow::Result<()> {
    let host: IpAddr = config
        .webserver
        .host
        .parse()
        .with_context(|| format!("invalid web server host '{}'", config.webserver.host))?;
    let addr = SocketAddr::new(host, config.webserver.port);
    let api_base_url = config.api.base_url.clone();

    let app = build_app(config)?;

    info!(%addr, api = %api_base_url, "Starting African fiscal dashboard");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, shutting down gracefully");
    }
}

/// Download `/export-data` into a file
async fn export(config: &Config, query: &ExportQuery, output: Option<PathBuf>) -> anyhow::Result<()> {
    let client = ApiClient::from_config(&config.api)?;
    let bytes = client.export_data(query).await?;

    let path = output.unwrap_or_else(|| {
        Path::new(".").join(export_file_name(chrono::Local::now().date_naive()))
    });
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), bytes = bytes.len(), "Export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_file_is_silent() {
        assert!(env_file_note(&Ok(PathBuf::from(".env"))).is_none());

        let missing = dotenvy::Error::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(env_file_note(&Err(missing)).is_none());
    }

    #[test]
    fn test_unreadable_env_file_is_reported() {
        let malformed = dotenvy::Error::LineParse("=value".to_string(), 0);
        let note = env_file_note(&Err(malformed)).unwrap_or_default();

        assert!(note.starts_with("Note: .env file not loaded"));
    }
}
