//! The tag-indexed post directory: footer grammar, synchronization with chat
//! edits, and post selection for queries.

pub mod footer;
pub mod forward;
pub mod select;
pub mod sync;

pub use footer::parse_footer;
pub use forward::{forward_post, ForwardOutcome};
pub use select::{find_by_type, select_future_events};
pub use sync::{on_message_created, on_message_edited, SyncAction};

use anyhow::Result;
use async_trait::async_trait;

use crate::db::Post;

/// How many upcoming events `/future_events` forwards by default.
pub const DEFAULT_FUTURE_EVENTS_CAP: usize = 3;

/// Durable set of posts keyed by message id.
#[async_trait]
pub trait PostDirectory: Send + Sync {
    /// Every stored post, in store order.
    async fn read_all(&self) -> Result<Vec<Post>>;

    async fn get(&self, message_id: i64) -> Result<Option<Post>>;

    /// Insert or replace the post stored under `post.message_id`.
    async fn put(&self, post: &Post) -> Result<()>;

    /// Remove the post for `message_id`; a missing id is a no-op.
    async fn delete(&self, message_id: i64) -> Result<()>;
}
