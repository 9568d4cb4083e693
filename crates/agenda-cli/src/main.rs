use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use agenda_infrastructure::{AgendaPaths, CatalogClient, Settings};
use agenda_interaction::{AiResponder, ChatSession};

mod render;
mod repl;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Chatbot over the Orléans Métropole event agenda", long_about = None)]
struct Cli {
    /// Number of events fetched from the catalog (1-100)
    #[arg(long, global = true)]
    limit: Option<u32>,

    /// Disable AI answers and use keyword search only
    #[arg(long, global = true)]
    no_ai: bool,

    /// Directory holding config.toml and secret.json
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive conversation (default)
    Chat,
    /// Keyword search, printed once
    Search {
        /// Text looked up in titles, descriptions, places and categories
        #[arg(default_value = "concert")]
        query: String,
    },
    /// Ask a single question (AI when configured, keyword search otherwise)
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// List the fetched events
    Events,
}

/// Priority: `--verbose` > `RUST_LOG` > default (warn). Logs go to stderr.
fn init_tracing(cli: &Cli) {
    let filter = if cli.verbose {
        EnvFilter::new("agenda=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let paths = match &cli.config_dir {
        Some(dir) => AgendaPaths::with_config_dir(dir),
        None => AgendaPaths::new()?,
    };

    let mut settings = Settings::load(&paths);
    for diagnostic in &settings.diagnostics {
        eprintln!("{}", format!("⚠️ {diagnostic}").yellow());
    }

    if let Some(limit) = cli.limit {
        settings.config.page_limit = limit;
    }
    if cli.no_ai {
        settings.credential = None;
    }

    Ok(settings)
}

fn build_session(settings: &Settings) -> ChatSession {
    tracing::debug!(
        catalog = %settings.config.catalog_url,
        page_limit = settings.config.effective_page_limit(),
        ai = settings.credential.is_some(),
        "Building chat session"
    );
    let source = Arc::new(CatalogClient::from_config(&settings.config));
    let responder = AiResponder::from_settings(settings);
    ChatSession::new(source, responder, settings.config.effective_page_limit())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let mut settings = load_settings(&cli)?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let session = build_session(&settings);
            repl::run(session).await?;
        }
        Commands::Search { query } => {
            settings.credential = None;
            let mut session = build_session(&settings);
            let answer = session.ask(&query).await;
            render::print_answer(&answer);
        }
        Commands::Ask { question } => {
            let mut session = build_session(&settings);
            let answer = session.ask(&question.join(" ")).await;
            render::print_answer(&answer);
        }
        Commands::Events => {
            let mut session = build_session(&settings);
            let corpus = session.corpus().await.to_vec();
            render::print_events(&corpus, session.diagnostic());
        }
    }

    Ok(())
}
