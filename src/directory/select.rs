use chrono::NaiveDate;

use crate::db::{Post, PostType};

/// First post of the given type, in snapshot order.
///
/// Snapshot order comes from the store and carries no recency meaning, so
/// when several posts share a type the result is whichever was scanned first.
#[must_use]
pub fn find_by_type(posts: &[Post], post_type: PostType) -> Option<&Post> {
    posts.iter().find(|post| post.post_type == post_type)
}

/// Up to `cap` event posts dated `today` or later, earliest first.
#[must_use]
pub fn select_future_events(posts: &[Post], today: NaiveDate, cap: usize) -> Vec<Post> {
    let mut upcoming: Vec<Post> = posts
        .iter()
        .filter(|post| post.post_type == PostType::Event)
        .filter(|post| post.event_date.is_some_and(|date| date >= today))
        .cloned()
        .collect();

    upcoming.sort_by_key(|post| post.event_date);
    upcoming.truncate(cap);
    upcoming
}
