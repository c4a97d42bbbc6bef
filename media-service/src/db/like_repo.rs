use crate::models::views::{OwnerSummary, VideoFeedItem};
use crate::models::LikeTarget;
use sqlx::{PgPool, Row};
use uuid::Uuid;

fn target_column(target: LikeTarget) -> (&'static str, Uuid) {
    match target {
        LikeTarget::Video(id) => ("video_id", id),
        LikeTarget::Comment(id) => ("comment_id", id),
        LikeTarget::Tweet(id) => ("tweet_id", id),
    }
}

/// Check whether the actor already likes the target
pub async fn like_exists(
    pool: &PgPool,
    liked_by: Uuid,
    target: LikeTarget,
) -> Result<bool, sqlx::Error> {
    let (column, target_id) = target_column(target);
    let exists: bool = sqlx::query_scalar(&format!(
        "SELECT EXISTS(SELECT 1 FROM likes WHERE liked_by = $1 AND {column} = $2)"
    ))
    .bind(liked_by)
    .bind(target_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Idempotent like insert; returns true if a new edge was created.
/// The partial unique index absorbs racing duplicates via ON CONFLICT.
pub async fn insert_like(
    pool: &PgPool,
    liked_by: Uuid,
    target: LikeTarget,
) -> Result<bool, sqlx::Error> {
    let (column, target_id) = target_column(target);
    let inserted = sqlx::query_as::<_, (Uuid,)>(&format!(
        r#"
        INSERT INTO likes (liked_by, {column})
        VALUES ($1, $2)
        ON CONFLICT (liked_by, {column}) WHERE {column} IS NOT NULL DO NOTHING
        RETURNING id
        "#
    ))
    .bind(liked_by)
    .bind(target_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

/// Idempotent like delete; returns true if an edge was removed
pub async fn delete_like(
    pool: &PgPool,
    liked_by: Uuid,
    target: LikeTarget,
) -> Result<bool, sqlx::Error> {
    let (column, target_id) = target_column(target);
    let affected = sqlx::query(&format!(
        "DELETE FROM likes WHERE liked_by = $1 AND {column} = $2"
    ))
    .bind(liked_by)
    .bind(target_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Number of likes a target has collected
pub async fn count_likes(pool: &PgPool, target: LikeTarget) -> Result<i64, sqlx::Error> {
    let (column, target_id) = target_column(target);
    let count: i64 =
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM likes WHERE {column} = $1"))
            .bind(target_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Liked-videos pipeline: the viewer's video likes joined to the
/// published videos they point at, newest like first
pub async fn liked_videos(pool: &PgPool, viewer_id: Uuid) -> Result<Vec<VideoFeedItem>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT v.id, v.title, v.description, v.video_url, v.thumbnail_url,
               v.duration, v.views, v.created_at,
               u.id AS owner_id, u.user_name, u.full_name, u.avatar_url
        FROM likes l
        JOIN videos v ON v.id = l.video_id
        JOIN users u ON u.id = v.owner_id
        WHERE l.liked_by = $1 AND v.is_published = TRUE
        ORDER BY l.created_at DESC
        "#,
    )
    .bind(viewer_id)
    .fetch_all(pool)
    .await?;

    let videos = rows
        .iter()
        .map(|r| VideoFeedItem {
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
        })
        .collect();

    Ok(videos)
}

/// Remove every like pointing at a video (cascade step)
pub async fn delete_likes_for_video(pool: &PgPool, video_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE video_id = $1")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Remove likes on every comment under a video (cascade step)
pub async fn delete_likes_for_video_comments(
    pool: &PgPool,
    video_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM likes
        WHERE comment_id IN (SELECT id FROM comments WHERE video_id = $1)
        "#,
    )
    .bind(video_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Remove every like pointing at a comment (cascade step)
pub async fn delete_likes_for_comment(pool: &PgPool, comment_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE comment_id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Remove every like pointing at a tweet (cascade step)
pub async fn delete_likes_for_tweet(pool: &PgPool, tweet_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE tweet_id = $1")
        .bind(tweet_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
