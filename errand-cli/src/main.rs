// ABOUTME: Command-line host for the errand tools.
// ABOUTME: Registers the tools, then lists, searches, or sends mail.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use errand::prelude::*;

#[derive(Parser)]
#[command(name = "errand")]
#[command(about = "Run the mail and web-search tools from the command line")]
struct Cli {
    /// TOML secrets file; defaults to reading credentials from the environment
    #[arg(long, global = true)]
    secrets: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the registration records of all tools as JSON
    Tools,
    /// Search the web with Google Custom Search
    Search {
        /// The search query
        query: String,
        /// Number of results to request (capped at 10)
        #[arg(short = 'n', long, default_value_t = 10, allow_negative_numbers = true)]
        num: i64,
        /// Use this API key instead of the secret store
        #[arg(long, requires = "static_cx")]
        static_key: Option<String>,
        /// Use this search engine id instead of the secret store
        #[arg(long, requires = "static_key")]
        static_cx: Option<String>,
    },
    /// Send a plain-text email from the configured Gmail account
    Send {
        /// Recipient address
        to: String,
        /// Subject line
        subject: String,
        /// Message body
        body: String,
    },
}

fn credential_store(secrets: Option<PathBuf>) -> Arc<dyn CredentialStore> {
    match secrets {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using secrets file");
            Arc::new(FileStore::new(path))
        }
        None => {
            tracing::debug!("using environment credentials");
            Arc::new(EnvStore::new())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = credential_store(cli.secrets);

    match cli.command {
        Commands::Tools => {
            let registry = Registry::new();
            registry
                .register(GoogleSearchTool::new(
                    SearchCredentialSource::SecretStore(store.clone()),
                    SearchConfig::default(),
                )?)
                .await;
            registry.register(SendGmailTool::new(store)).await;

            println!("{}", serde_json::to_string_pretty(&registry.specs().await)?);
        }
        Commands::Search {
            query,
            num,
            static_key,
            static_cx,
        } => {
            let source = match (static_key, static_cx) {
                (Some(key), Some(cx)) => {
                    SearchCredentialSource::Static(SearchCredentials::new(key, cx))
                }
                _ => SearchCredentialSource::SecretStore(store),
            };
            let tool = GoogleSearchTool::new(source, SearchConfig::default())?;
            let records = tool.search(&query, num).await;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Send { to, subject, body } => {
            let tool = SendGmailTool::new(store);
            println!("{}", tool.send(&to, &subject, &body).await);
        }
    }

    Ok(())
}
