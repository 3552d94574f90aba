use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use tracing::{error, warn};

use super::AppState;
use crate::telegram::Update;

/// Header Telegram echoes the `secret_token` of `setWebhook` in.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Receive one update from Telegram.
///
/// The secret token is checked before the body is parsed. Handling failures
/// are logged and still acknowledged with 200, otherwise Telegram keeps
/// redelivering the same update.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if let Some(expected) = state.bot.config().webhook_secret.as_deref() {
        let provided = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected) {
            warn!("Rejected webhook call with wrong secret token");
            return StatusCode::UNAUTHORIZED;
        }
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!("Rejected malformed update: {e}");
            return StatusCode::BAD_REQUEST;
        }
    };

    let update_id = update.update_id;
    if let Err(e) = state.bot.handle_update(update).await {
        error!(update_id, "Failed to handle update: {e:#}");
    }

    StatusCode::OK
}

pub async fn health() -> &'static str {
    "ok"
}
