use anyhow::{Context, Result};
use sqlx::SqlitePool;

use super::models::{Post, PostRecord};

// ========== Posts ==========

/// Read every indexed post. Row order is whatever SQLite returns.
pub async fn scan_posts(pool: &SqlitePool) -> Result<Vec<Post>> {
    let records: Vec<PostRecord> =
        sqlx::query_as("SELECT message_id, type, event_date FROM posts")
            .fetch_all(pool)
            .await
            .context("Failed to scan posts")?;

    records
        .into_iter()
        .map(|record| Post::try_from(record).context("Failed to decode stored post"))
        .collect()
}

/// Get a post by its chat message id.
pub async fn get_post(pool: &SqlitePool, message_id: i64) -> Result<Option<Post>> {
    let record: Option<PostRecord> =
        sqlx::query_as("SELECT message_id, type, event_date FROM posts WHERE message_id = ?")
            .bind(message_id)
            .fetch_optional(pool)
            .await
            .context("Failed to fetch post by message id")?;

    record
        .map(|r| Post::try_from(r).context("Failed to decode stored post"))
        .transpose()
}

/// Insert a post, replacing any existing row for the same message id.
pub async fn put_post(pool: &SqlitePool, post: &Post) -> Result<()> {
    let record = PostRecord::from(post);

    sqlx::query(
        r"
        INSERT INTO posts (message_id, type, event_date)
        VALUES (?, ?, ?)
        ON CONFLICT(message_id) DO UPDATE SET
            type = excluded.type,
            event_date = excluded.event_date
        ",
    )
    .bind(record.message_id)
    .bind(&record.post_type)
    .bind(&record.event_date)
    .execute(pool)
    .await
    .context("Failed to put post")?;

    Ok(())
}

/// Delete a post by message id. Deleting a missing id is not an error.
pub async fn delete_post(pool: &SqlitePool, message_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM posts WHERE message_id = ?")
        .bind(message_id)
        .execute(pool)
        .await
        .context("Failed to delete post")?;

    Ok(())
}
