//! Command-line and environment configuration.

use crate::assistant::adapters::openai::OpenAiSettings;
use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(
    name = "smart-todo",
    version,
    about = "Task manager with context-grounded assistant suggestions"
)]
pub struct Cli {
    /// Settings shared by every subcommand.
    #[command(flatten)]
    pub config: ServerConfig,

    /// Action to run; `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the selected action.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }
}

/// Actions the binary can run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Serve the HTTP API.
    #[default]
    Serve,
    /// Apply the database schema and exit.
    Migrate,
    /// Apply the schema, provision the demo user and its sample data, and
    /// exit.
    Seed,
}

/// Process settings, read from flags with environment fallbacks.
#[derive(Clone, Args)]
pub struct ServerConfig {
    /// `PostgreSQL` connection string.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Socket address the HTTP server listens on.
    #[arg(long, env = "SMART_TODO_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Base URL of the OpenAI-compatible completion service.
    #[arg(
        long,
        env = "SMART_TODO_AI_BASE_URL",
        default_value = "https://api.openai.com/v1"
    )]
    pub ai_base_url: String,

    /// API key for the completion service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub ai_api_key: Option<String>,

    /// Model identifier sent with every completion request.
    #[arg(long, env = "SMART_TODO_AI_MODEL", default_value = "gpt-4o")]
    pub ai_model: String,

    /// Completion request timeout in seconds.
    #[arg(long, default_value_t = 60)]
    pub ai_timeout_secs: u64,

    /// Maximum number of pooled database connections.
    #[arg(long, default_value_t = 8)]
    pub pool_size: u32,
}

impl ServerConfig {
    /// Returns the completion client settings.
    #[must_use]
    pub fn openai_settings(&self) -> OpenAiSettings {
        OpenAiSettings {
            base_url: self.ai_base_url.clone(),
            api_key: self.ai_api_key.clone(),
            model: self.ai_model.clone(),
            timeout: Duration::from_secs(self.ai_timeout_secs),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &"<redacted>")
            .field("bind", &self.bind)
            .field("ai_base_url", &self.ai_base_url)
            .field("ai_api_key", &self.ai_api_key.as_ref().map(|_| "<redacted>"))
            .field("ai_model", &self.ai_model)
            .field("ai_timeout_secs", &self.ai_timeout_secs)
            .field("pool_size", &self.pool_size)
            .finish()
    }
}
