//! Telegram Bot API transport.

mod client;
mod error;
pub mod types;

pub use client::BotApi;
pub use error::TelegramError;
pub use types::{BotCommand, Chat, ChatKind, ChatMember, MemberStatus, Message, Update, User};

use async_trait::async_trait;

/// Chat operations the bot needs from Telegram.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Forward `message_id` from `from_chat_id` into `chat_id`.
    ///
    /// Fails with [`TelegramError::MessageNotFound`] if the source message was deleted.
    async fn forward_message(
        &self,
        chat_id: i64,
        from_chat_id: i64,
        message_id: i64,
    ) -> Result<(), TelegramError>;

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError>;

    /// Whether `user_id` currently belongs to `chat_id`.
    async fn is_chat_member(&self, chat_id: i64, user_id: i64) -> Result<bool, TelegramError>;

    async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<(), TelegramError>;
}

/// Public link to a message of a supergroup or channel.
///
/// `-1001627609834`, `21` -> `https://t.me/c/1627609834/21`
#[must_use]
pub fn message_url(chat_id: i64, message_id: i64) -> String {
    let internal_id = -1_000_000_000_000 - chat_id;
    format!("https://t.me/c/{internal_id}/{message_id}")
}
