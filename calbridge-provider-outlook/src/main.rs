//! calbridge-provider-outlook - Outlook calendar tools for agent hosts
//!
//! Exposes two tools over a JSON line protocol on stdin/stdout:
//!   get_user_outlook_events  upcoming events for a user (tomorrow + 30 days)
//!   create_simple_event      create an event with required attendees
//!
//! Credentials and endpoints come from:
//!   ~/.config/calbridge/outlook.toml
//!   AZURE_* / CALBRIDGE_* environment variables

mod config;
mod credential;
mod graph;
mod serve;
mod tools;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::OutlookConfig;
use crate::tools::{Clock, Tool, ToolContext};

#[derive(Parser)]
#[command(name = "calbridge-provider-outlook")]
#[command(about = "Outlook calendar tools over a JSON line protocol")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer tool requests from stdin, one JSON object per line (default)
    Serve,
    /// Print the declared tool metadata
    Tools,
    /// Call a single tool and print its output
    Call {
        /// Tool name, e.g. get_user_outlook_events
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        arguments: String,

        /// Pretend the current time is this RFC 3339 instant
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let ctx = ToolContext::new(OutlookConfig::load()?);
            serve::run(&ctx).await
        }
        Commands::Tools => {
            let definitions = serde_json::to_string_pretty(&tools::definitions())?;
            println!("{}", definitions);
            Ok(())
        }
        Commands::Call {
            tool,
            arguments,
            now,
        } => {
            let tool = Tool::from_name(&tool).with_context(|| {
                let available: Vec<_> = Tool::ALL.iter().map(|t| t.name()).collect();
                format!("Unknown tool '{}'. Available: {}", tool, available.join(", "))
            })?;

            let arguments: serde_json::Value =
                serde_json::from_str(&arguments).context("Arguments must be a JSON object")?;
            let payload = serde_json::json!({ "arguments": arguments }).to_string();

            let mut ctx = ToolContext::new(OutlookConfig::load()?);
            if let Some(now) = now {
                ctx.clock = Clock::Fixed(now);
            }
            println!("{}", tool.call(&payload, &ctx).await);
            Ok(())
        }
    }
}
