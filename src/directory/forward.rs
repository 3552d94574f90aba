use anyhow::{Context, Result};
use tracing::{info, warn};

use super::PostDirectory;
use crate::db::Post;
use crate::telegram::{message_url, TelegramError, Transport};

/// Result of re-delivering an indexed post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    Forwarded,
    /// The chat message is gone; its post was removed from the directory.
    Missing { url: String },
}

/// Forward `post` from the designated chat to `to_chat`.
///
/// The Bot API sends no deletion updates, so a deleted message is only
/// noticed here. Such a post is dropped from the directory and reported as
/// [`ForwardOutcome::Missing`].
///
/// # Errors
///
/// Returns an error for any transport failure other than "message not found",
/// or if deleting the stale post fails.
pub async fn forward_post(
    directory: &dyn PostDirectory,
    transport: &dyn Transport,
    source_chat: i64,
    to_chat: i64,
    post: &Post,
) -> Result<ForwardOutcome> {
    match transport
        .forward_message(to_chat, source_chat, post.message_id)
        .await
    {
        Ok(()) => {
            info!(message_id = post.message_id, to_chat, "Forwarded post");
            Ok(ForwardOutcome::Forwarded)
        }
        Err(TelegramError::MessageNotFound) => {
            warn!(
                message_id = post.message_id,
                post_type = %post.post_type,
                "Forwarded message no longer exists, removing post"
            );
            directory
                .delete(post.message_id)
                .await
                .context("Failed to remove stale post")?;
            Ok(ForwardOutcome::Missing {
                url: message_url(source_chat, post.message_id),
            })
        }
        Err(e) => Err(e).context("Failed to forward post"),
    }
}
