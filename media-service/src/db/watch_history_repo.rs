use crate::models::views::{OwnerSummary, VideoFeedItem, WatchHistoryItem};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Record that the viewer watched a video. Set semantics: a repeat
/// watch leaves the existing row untouched. Returns true if the entry
/// was newly added.
pub async fn record_watch(
    pool: &PgPool,
    user_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO watch_history (user_id, video_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, video_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(video_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a video from every viewer's history (cascade step)
pub async fn delete_for_video(pool: &PgPool, video_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM watch_history WHERE video_id = $1")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Watch-history pipeline: the viewer's watched videos with owner
/// summaries, most recently watched first
pub async fn watch_history(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<WatchHistoryItem>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT w.watched_at,
               v.id, v.title, v.description, v.video_url, v.thumbnail_url,
               v.duration, v.views, v.created_at,
               u.id AS owner_id, u.user_name, u.full_name, u.avatar_url
        FROM watch_history w
        JOIN videos v ON v.id = w.video_id
        JOIN users u ON u.id = v.owner_id
        WHERE w.user_id = $1
        ORDER BY w.watched_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let items = rows
        .iter()
        .map(|r| WatchHistoryItem {
            watched_at: r.get("watched_at"),
            video: VideoFeedItem {
                id: r.get("id"),
                title: r.get("title"),
                description: r.get("description"),
                video_url: r.get("video_url"),
                thumbnail_url: r.get("thumbnail_url"),
                duration: r.get("duration"),
                views: r.get("views"),
                created_at: r.get("created_at"),
                owner: OwnerSummary {
                    id: r.get("owner_id"),
                    user_name: r.get("user_name"),
                    full_name: r.get("full_name"),
                    avatar_url: r.get("avatar_url"),
                },
            },
        })
        .collect();

    Ok(items)
}
