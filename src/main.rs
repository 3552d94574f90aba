use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use post_directory_bot::bot::Bot;
use post_directory_bot::config::Config;
use post_directory_bot::db::Database;
use post_directory_bot::telegram::BotApi;
use post_directory_bot::web;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    init_tracing()?;

    info!("Starting post-directory-bot");

    // Load and validate configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(chat_id = config.chat_id, "Configuration loaded");

    if let Some(parent) = config.database_path.parent() {
        tokio::fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create database directory: {}", parent.display())
        })?;
    }

    let db = Database::new(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    info!("Database initialized");

    // The pool is released however serving ends
    let result = serve(config, db.clone()).await;
    db.close().await;

    info!("Shutdown complete");

    result
}

async fn serve(config: Config, db: Database) -> Result<()> {
    let api = BotApi::new(&config).context("Failed to initialize Telegram client")?;

    match config.webhook_url.as_deref() {
        Some(url) => api
            .set_webhook(url, config.webhook_secret.as_deref())
            .await
            .context("Failed to register webhook")?,
        None => warn!("WEBHOOK_URL not set; assuming the webhook is registered externally"),
    }

    let me = api.get_me().await.context("Failed to fetch bot account")?;
    info!(username = ?me.username, "Authorized");

    let mut bot = Bot::new(Arc::new(config), Arc::new(db), Arc::new(api));
    if let Some(username) = me.username {
        bot = bot.with_username(username);
    }

    web::serve(bot, shutdown_signal()).await?;

    info!("Shutting down...");
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,post_directory_bot=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        // Pretty-printed logging for development
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
