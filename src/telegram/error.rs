use thiserror::Error;

/// Failure of a Bot API call.
///
/// Telegram reports a vanished message in two shapes depending on how it
/// disappeared; both collapse into [`TelegramError::MessageNotFound`].
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("message not found")]
    MessageNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("Telegram API error: {description} (code {code})")]
    Api { code: i64, description: String },
    #[error("Telegram request failed")]
    Http(#[source] reqwest::Error),
}

impl From<reqwest::Error> for TelegramError {
    /// Request URLs embed the bot token, so they are stripped here.
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.without_url())
    }
}

impl TelegramError {
    /// Classify an `ok: false` Bot API response.
    #[must_use]
    pub fn from_api(code: i64, description: &str) -> Self {
        let lower = description.to_lowercase();

        // Single message removed -> "message to forward not found"
        // History cleared -> "MESSAGE_ID_INVALID"
        if lower.contains("message to forward not found") || lower.contains("message_id_invalid") {
            return Self::MessageNotFound;
        }

        if lower.contains("user not found")
            || lower.contains("member not found")
            || lower.contains("participant_id_invalid")
        {
            return Self::UserNotFound;
        }

        Self::Api {
            code,
            description: description.to_string(),
        }
    }
}
