//! `smart-todo` entry point.
//!
//! ```text
//! smart-todo [serve|migrate|seed] --database-url <url> [options]
//! ```
//!
//! `serve` is the default action. Every option also reads from the
//! environment; see `smart-todo --help`.

use clap::Parser;
use mockable::DefaultClock;
use smart_todo::api::{self, AppState, Stores};
use smart_todo::assistant::adapters::openai::OpenAiCompletionClient;
use smart_todo::assistant::ports::CompletionError;
use smart_todo::config::{Cli, Command, ServerConfig};
use smart_todo::database::{self, DatabaseError, PgPool};
use smart_todo::seed::{self, SeedError};
use smart_todo::telemetry::{self, TelemetryError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("completion client configuration rejected: {0}")]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    telemetry::init()?;

    let command = cli.command();
    let config = cli.config;
    let pool = database::connect(&config.database_url, config.pool_size)?;

    match command {
        Command::Migrate => database::migrate(&pool).await?,
        Command::Seed => {
            database::migrate(&pool).await?;
            let report = seed::seed_demo(&build_state(&config, &pool)?).await?;
            info!(
                user_id = %report.user.id(),
                email = %report.user.email(),
                "demo user ready"
            );
        }
        Command::Serve => serve(&config, &pool).await?,
    }
    Ok(())
}

fn build_state(config: &ServerConfig, pool: &PgPool) -> Result<AppState, AppError> {
    let completion = OpenAiCompletionClient::new(config.openai_settings())?;
    info!(endpoint = completion.endpoint(), model = %config.ai_model, "completion client ready");
    Ok(AppState::new(
        Stores::postgres(pool),
        Arc::new(completion),
        Arc::new(DefaultClock),
    ))
}

async fn serve(config: &ServerConfig, pool: &PgPool) -> Result<(), AppError> {
    let app = api::router(build_state(config, pool)?);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "smart-todo listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("smart-todo stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
