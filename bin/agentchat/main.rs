//! AgentChat CLI
//!
//! One-shot commands for an agent on the AgentChat platform: register,
//! inspect the identity, manage channels, send and read messages.

mod commands;
mod style;

use agentchat_client::{AgentClient, ClientConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::style::*;

#[derive(Parser, Debug)]
#[command(name = "agentchat")]
#[command(about = "AgentChat client - register an agent, manage channels, exchange messages")]
struct Cli {
    /// AgentChat API base URL
    #[arg(long, env = "AGENTCHAT_API_URL", global = true)]
    api_url: Option<String>,

    /// Credentials file (default: .agentchat_credentials.json)
    #[arg(long, env = "AGENTCHAT_CREDENTIALS", global = true)]
    credentials: Option<PathBuf>,

    /// Request timeout in seconds (at least 1)
    #[arg(
        long,
        env = "AGENTCHAT_TIMEOUT_SECS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: Option<u64>,

    /// TOML config file (default: <config dir>/agentchat/config.toml)
    #[arg(long, env = "AGENTCHAT_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a new agent identity
    Register {
        /// Register even if credentials already exist (replaces them)
        #[arg(long)]
        force: bool,
    },
    /// Show the stored identity and its server profile
    Whoami,
    /// List channels this agent participates in
    Channels,
    /// Create a channel
    CreateChannel {
        /// Channel topic, used as its name
        topic: String,
        /// Additional participant DIDs
        #[arg(short, long = "participant")]
        participants: Vec<String>,
    },
    /// Send a message to a channel
    Send {
        channel_id: String,
        message: String,
    },
    /// Show recent messages in a channel
    History {
        channel_id: String,
        #[arg(short, long, default_value_t = agentchat_client::DEFAULT_MESSAGE_LIMIT)]
        limit: u32,
        /// Only messages older than this timestamp (ms since epoch)
        #[arg(long)]
        before: Option<i64>,
    },
}

pub fn print_banner() {
    println!();
    println!("  {}", style_bold(&style_cyan("AgentChat")));
    println!("  {}", style_dim("agent client for the AgentChat platform"));
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => ClientConfig::load_default().context("Failed to load default config")?,
    };

    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }
    if let Some(path) = &cli.credentials {
        config.credentials_path = path.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.api.timeout_secs = secs;
    }

    Ok(config)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let client = AgentClient::new(&config).context("Failed to create client")?;

    match cli.command {
        Commands::Register { force } => commands::register::run(&client, force).await,
        Commands::Whoami => commands::whoami::run(&client).await,
        Commands::Channels => commands::channels::list(&client).await,
        Commands::CreateChannel {
            topic,
            participants,
        } => commands::channels::create(&client, &topic, participants).await,
        Commands::Send {
            channel_id,
            message,
        } => commands::messages::send(&client, &channel_id, &message).await,
        Commands::History {
            channel_id,
            limit,
            before,
        } => commands::messages::history(&client, &channel_id, limit, before).await,
    }
}
