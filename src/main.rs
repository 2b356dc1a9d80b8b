use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use typeahead::{Catalog, Config, SearchService};
use typeahead::server::{self, AppState};

#[derive(Parser)]
#[command(name = "typeahead", about = "Search-as-you-type suggestions over a label catalog")]
struct Cli {
    /// TOML config file layered over the built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service.
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:3000.
        #[arg(long)]
        bind: Option<String>,
        /// Catalog file, one label per line.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Run one search locally and print the JSON response.
    Query {
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Query text; omit for the default suggestions.
        text: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut config = Config::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Command::Serve { bind, catalog } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            let addr = config.bind_addr().context("invalid bind address")?;
            let catalog = load_catalog(catalog.as_deref(), &config)?;

            let state = AppState::new(SearchService::new(catalog, &config), &config);
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            server::serve(listener, state, shutdown_signal())
                .await
                .context("server error")?;
        }
        Command::Query { catalog, text } => {
            let catalog = load_catalog(catalog.as_deref(), &config)?;
            let service = SearchService::new(catalog, &config);
            let response = service
                .handle(text.as_deref(), "cli")
                .context("search failed")?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

fn load_catalog(flag: Option<&Path>, config: &Config) -> anyhow::Result<Catalog> {
    match flag.or_else(|| config.search.catalog_path()) {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
