mod config;
mod repl;

use crate::config::ParleyConfig;
use clap::{Parser, Subcommand};
use parley_gateway::{GatewayServer, Sanitizer};
use parley_session::{BundledCatalog, CatalogSource, ConversationSession, FileCatalog, SessionRegistry};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parley", about = "Parley: rule-based chat responder")]
struct Cli {
    /// Path to config file (defaults to ./parley.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Intent definition file (overrides config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat in the terminal (default)
    Chat,
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_tracing(default_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn catalog_source(path: Option<PathBuf>) -> Arc<dyn CatalogSource> {
    match path {
        Some(path) => Arc::new(FileCatalog::new(path)),
        None => Arc::new(BundledCatalog),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Chat);

    match &command {
        Commands::Serve { .. } => init_tracing("info", true),
        Commands::Chat => init_tracing("warn", false),
    }

    let config = ParleyConfig::load(cli.config.as_deref()).await?;
    let source = catalog_source(cli.catalog.or(config.catalog));

    match command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);

            // Fail at startup rather than on the first request.
            let catalog = source.load().await?;
            info!(
                catalog = %source.describe(),
                intents = catalog.len(),
                "Intent catalog loaded"
            );

            let registry = Arc::new(SessionRegistry::new(source));
            let app = GatewayServer::build_with_sanitizer(
                registry,
                Sanitizer::new(config.security.max_message_length),
            );

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            let local = listener.local_addr()?;
            println!("Parley server running on http://{local}\nPress Ctrl+C to stop.");
            info!(addr = %local, "Parley gateway listening");

            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                    println!("\nShutting down...");
                })
                .await?;
        }
        Commands::Chat => {
            let mut session = ConversationSession::new(source.load().await?);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());

            tokio::select! {
                result = repl::run(&mut session, stdin, tokio::io::stdout()) => {
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    println!("\n{}", repl::GOODBYE);
                    std::io::stdout().flush()?;
                    // The blocking stdin read would otherwise keep the runtime alive.
                    std::process::exit(0);
                }
            }
        }
    }

    Ok(())
}
