use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::error::TelegramError;
use super::types::{ApiResponse, BotCommand, ChatMember, User};
use super::Transport;
use crate::config::Config;

/// Telegram Bot API client.
#[derive(Clone)]
pub struct BotApi {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl std::fmt::Debug for BotApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotApi")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl BotApi {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_api_url(&config.bot_token, &config.telegram_api_url)
    }

    /// Create a client against an explicit API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_api_url(token: &str, api_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &Value,
    ) -> Result<T, TelegramError> {
        // The URL embeds the token; only the method name is logged and
        // transport errors drop the URL on conversion
        let url = format!("{}/bot{}/{}", self.api_url, self.token, method);
        debug!(method, "Calling Bot API");

        let response = self.http.post(&url).json(params).send().await?;
        let status = response.status();

        // Error responses (400, 403, ...) carry the same JSON envelope
        let body: ApiResponse<T> = response.json().await?;

        match body {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                error_code,
                description,
                ..
            } => Err(TelegramError::from_api(
                error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                description.as_deref().unwrap_or("Unknown error"),
            )),
        }
    }

    /// Point Telegram at this bot's webhook.
    ///
    /// # Errors
    ///
    /// Returns an error if Telegram rejects the webhook.
    pub async fn set_webhook(
        &self,
        url: &str,
        secret_token: Option<&str>,
    ) -> Result<(), TelegramError> {
        let mut params = json!({
            "url": url,
            "allowed_updates": ["message", "edited_message", "channel_post", "edited_channel_post"],
        });
        if let Some(secret) = secret_token {
            params["secret_token"] = json!(secret);
        }

        let _: bool = self.call("setWebhook", &params).await?;
        info!(url = %url, "Webhook registered");
        Ok(())
    }

    /// Fetch the bot's own account.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, e.g. on a revoked token.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &json!({})).await
    }

    /// Look up a user's membership record in a chat.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::UserNotFound`] when Telegram does not know the
    /// user in that chat, or any other API failure.
    pub async fn get_chat_member(
        &self,
        chat_id: i64,
        user_id: i64,
    ) -> Result<ChatMember, TelegramError> {
        self.call(
            "getChatMember",
            &json!({ "chat_id": chat_id, "user_id": user_id }),
        )
        .await
    }
}

#[async_trait]
impl Transport for BotApi {
    async fn forward_message(
        &self,
        chat_id: i64,
        from_chat_id: i64,
        message_id: i64,
    ) -> Result<(), TelegramError> {
        let _: Value = self
            .call(
                "forwardMessage",
                &json!({
                    "chat_id": chat_id,
                    "from_chat_id": from_chat_id,
                    "message_id": message_id,
                }),
            )
            .await?;
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let _: Value = self
            .call("sendMessage", &json!({ "chat_id": chat_id, "text": text }))
            .await?;
        Ok(())
    }

    async fn is_chat_member(&self, chat_id: i64, user_id: i64) -> Result<bool, TelegramError> {
        match self.get_chat_member(chat_id, user_id).await {
            Ok(member) => Ok(member.is_member()),
            Err(TelegramError::UserNotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<(), TelegramError> {
        let _: bool = self
            .call("setMyCommands", &json!({ "commands": commands }))
            .await?;
        Ok(())
    }
}
