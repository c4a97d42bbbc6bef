use crate::models::views::{CommentView, OwnerSummary};
use crate::models::Comment;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a new comment on a video
pub async fn create_comment(
    pool: &PgPool,
    video_id: Uuid,
    owner_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (content, video_id, owner_id)
        VALUES ($1, $2, $3)
        RETURNING id, content, video_id, owner_id, created_at, updated_at
        "#,
    )
    .bind(content)
    .bind(video_id)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Find a comment by id
pub async fn find_comment_by_id(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, content, video_id, owner_id, created_at, updated_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Update comment content
pub async fn update_comment(
    pool: &PgPool,
    comment_id: Uuid,
    content: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET content = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, content, video_id, owner_id, created_at, updated_at
        "#,
    )
    .bind(comment_id)
    .bind(content)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Delete a comment; returns false when the id did not resolve
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete every comment under a video (cascade step)
pub async fn delete_comments_for_video(pool: &PgPool, video_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE video_id = $1")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Comment-list pipeline: comments for a video with author summary,
/// like count and the viewer's own like flag, newest first
pub async fn video_comments(
    pool: &PgPool,
    video_id: Uuid,
    viewer_id: Option<Uuid>,
) -> Result<Vec<CommentView>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.content, c.created_at, c.updated_at,
               u.id AS owner_id, u.user_name, u.full_name, u.avatar_url,
               (SELECT COUNT(*) FROM likes l WHERE l.comment_id = c.id) AS likes_count,
               EXISTS(SELECT 1 FROM likes l
                      WHERE l.comment_id = c.id AND l.liked_by = $2) AS is_liked
        FROM comments c
        JOIN users u ON u.id = c.owner_id
        WHERE c.video_id = $1
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(video_id)
    .bind(viewer_id)
    .fetch_all(pool)
    .await?;

    let comments = rows
        .iter()
        .map(|r| CommentView {
            id: r.get("id"),
            content: r.get("content"),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
            likes_count: r.get("likes_count"),
            is_liked: r.get("is_liked"),
            owner: OwnerSummary {
                id: r.get("owner_id"),
                user_name: r.get("user_name"),
                full_name: r.get("full_name"),
                avatar_url: r.get("avatar_url"),
            },
        })
        .collect();

    Ok(comments)
}
