//! Orion CLI
//!
//! Terminal front end for the Orion studio backend:
//! - Chat, in general or in character
//! - Manage conversations, characters and the memory bank
//! - Generate and save novels
//! - Run the local utility tools

mod chat;
mod records;
mod tools;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use orion::api::ApiClient;
use orion::config::{generate_default_config, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "orion")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chat and roleplay studio client")]
#[command(long_about = "Orion talks to a local studio backend for chat, character roleplay,\nmemory and novel generation, and carries a set of offline utility tools.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/orion/config.toml, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend origin, overriding the configured host and port
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat. Ctrl-C stops a pending reply, Ctrl-D exits
    Chat {
        /// Continue an existing conversation
        #[arg(long)]
        id: Option<i64>,
    },

    /// Interactive roleplay with a character (/reset, /delete, /quit)
    CharacterChat {
        /// Character id
        id: String,
    },

    /// Manage conversations
    Conversations {
        #[command(subcommand)]
        action: records::ConversationAction,
    },

    /// Manage character personas
    Characters {
        #[command(subcommand)]
        action: records::CharacterAction,
    },

    /// Manage memory bank sources
    Memory {
        #[command(subcommand)]
        action: records::MemoryAction,
    },

    /// Generate and save novels
    Novel {
        #[command(subcommand)]
        action: records::NovelAction,
    },

    /// Offline utility tools
    Tool {
        #[command(subcommand)]
        tool: tools::ToolCommand,
    },

    /// Show or change the UI theme
    Theme {
        #[command(subcommand)]
        action: tools::ThemeAction,
    },

    /// Print a default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("orion={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::load_with_env(path)?),
        None => Ok(Config::load_default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    init_logging(&config);

    let base_url = cli
        .backend
        .clone()
        .unwrap_or_else(|| config.backend.base_url());
    tracing::debug!(backend = %base_url, "Orion v{}", env!("CARGO_PKG_VERSION"));
    let client = ApiClient::new(base_url);

    match cli.command {
        Commands::Chat { id } => chat::run_chat(client, &config, id).await?,
        Commands::CharacterChat { id } => chat::run_character_chat(client, &config, &id).await?,
        Commands::Conversations { action } => {
            records::conversations(&client, action, cli.json).await?
        }
        Commands::Characters { action } => records::characters(&client, action, cli.json).await?,
        Commands::Memory { action } => records::memory(&client, action, cli.json).await?,
        Commands::Novel { action } => records::novel(&client, &config, action).await?,
        Commands::Tool { tool } => tools::run(&config, tool)?,
        Commands::Theme { action } => tools::theme(&config, action)?,
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}
