use anyhow::Result;
use tracing::debug;

use super::footer::parse_footer;
use super::PostDirectory;
use crate::db::Post;

/// What a chat event did to the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// The post was written (inserted or replaced).
    Indexed(Post),
    /// The message lost its footer and its post was deleted.
    Removed(i64),
    /// Nothing to do: untagged and not indexed.
    Ignored,
}

/// Index a message freshly posted to the designated chat.
///
/// # Errors
///
/// Returns an error if the store write fails.
pub async fn on_message_created(
    directory: &dyn PostDirectory,
    message_id: i64,
    text: &str,
) -> Result<SyncAction> {
    let Some(footer) = parse_footer(text) else {
        return Ok(SyncAction::Ignored);
    };

    let post = Post::from_footer(message_id, footer);
    directory.put(&post).await?;
    debug!(message_id, post_type = %post.post_type, "Indexed new post");

    Ok(SyncAction::Indexed(post))
}

/// Bring the directory in line with an edited message.
///
/// # Errors
///
/// Returns an error if the store lookup, write or delete fails.
pub async fn on_message_edited(
    directory: &dyn PostDirectory,
    message_id: i64,
    text: &str,
) -> Result<SyncAction> {
    if let Some(footer) = parse_footer(text) {
        // Footer added to an existing message, or changed
        let post = Post::from_footer(message_id, footer);
        directory.put(&post).await?;
        debug!(message_id, post_type = %post.post_type, "Re-indexed edited post");
        return Ok(SyncAction::Indexed(post));
    }

    if directory.get(message_id).await?.is_some() {
        directory.delete(message_id).await?;
        debug!(message_id, "Footer removed, deleted post");
        return Ok(SyncAction::Removed(message_id));
    }

    Ok(SyncAction::Ignored)
}
