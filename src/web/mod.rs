mod routes;

pub use routes::SECRET_TOKEN_HEADER;

use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::bot::Bot;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub bot: Bot,
}

/// Build the webhook router.
pub fn create_app(state: AppState) -> Router {
    let webhook_path = state.bot.config().webhook_path.clone();

    Router::new()
        .route(&webhook_path, post(routes::webhook))
        .route("/healthz", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the webhook until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails.
pub async fn serve<F>(bot: Bot, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let config = bot.config();
    let addr: SocketAddr = format!("{}:{}", config.web_host, config.web_port)
        .parse()
        .context("Invalid web server address")?;

    let app = create_app(AppState { bot });

    info!(addr = %addr, "Starting webhook server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind web server")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Web server error")?;

    Ok(())
}
