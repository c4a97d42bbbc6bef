use crate::models::views::{
    ChannelStats, ChannelSummary, ChannelVideo, OwnerSummary, VideoDetail, VideoFeedItem,
};
use crate::models::{SortBy, SortType, Video};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const VIDEO_COLUMNS: &str = "id, title, description, video_url, video_public_id, \
     thumbnail_url, thumbnail_public_id, duration, views, is_published, owner_id, \
     created_at, updated_at";

/// Create a video row referencing already-confirmed asset locators
#[allow(clippy::too_many_arguments)]
pub async fn create_video(
    pool: &PgPool,
    owner_id: Uuid,
    title: &str,
    description: &str,
    video_url: &str,
    video_public_id: &str,
    thumbnail_url: &str,
    thumbnail_public_id: &str,
    duration: f64,
) -> Result<Video, sqlx::Error> {
    let video = sqlx::query_as::<_, Video>(&format!(
        r#"
        INSERT INTO videos (title, description, video_url, video_public_id,
                            thumbnail_url, thumbnail_public_id, duration, owner_id, is_published)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE)
        RETURNING {VIDEO_COLUMNS}
        "#
    ))
    .bind(title)
    .bind(description)
    .bind(video_url)
    .bind(video_public_id)
    .bind(thumbnail_url)
    .bind(thumbnail_public_id)
    .bind(duration)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(video)
}

/// Find a video by id
pub async fn find_video_by_id(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>, sqlx::Error> {
    let video = sqlx::query_as::<_, Video>(&format!(
        "SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"
    ))
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(video)
}

/// Partial-field update; callers pass only the changed fields
pub async fn update_video_details(
    pool: &PgPool,
    video_id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    thumbnail: Option<(&str, &str)>,
) -> Result<Option<Video>, sqlx::Error> {
    let (thumbnail_url, thumbnail_public_id) = match thumbnail {
        Some((url, public_id)) => (Some(url), Some(public_id)),
        None => (None, None),
    };

    let video = sqlx::query_as::<_, Video>(&format!(
        r#"
        UPDATE videos
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            thumbnail_url = COALESCE($4, thumbnail_url),
            thumbnail_public_id = COALESCE($5, thumbnail_public_id),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {VIDEO_COLUMNS}
        "#
    ))
    .bind(video_id)
    .bind(title)
    .bind(description)
    .bind(thumbnail_url)
    .bind(thumbnail_public_id)
    .fetch_optional(pool)
    .await?;

    Ok(video)
}

/// Flip the published flag
pub async fn set_publish_status(
    pool: &PgPool,
    video_id: Uuid,
    is_published: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE videos
        SET is_published = $2, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(video_id)
    .bind(is_published)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete the video row; returns false when the id did not resolve
pub async fn delete_video(pool: &PgPool, video_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM videos WHERE id = $1")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Bump the monotonically increasing view counter by one
pub async fn increment_views(pool: &PgPool, video_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE videos SET views = views + 1 WHERE id = $1")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Public feed pipeline: optional text match on title/description,
/// optional owner filter, published-only, caller-selected sort, owner
/// summary joined in. Sort column and direction come from validated
/// enums, never from raw caller input.
pub async fn list_feed(
    pool: &PgPool,
    query: Option<&str>,
    owner_id: Option<Uuid>,
    sort_by: SortBy,
    sort_type: SortType,
) -> Result<Vec<VideoFeedItem>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT v.id, v.title, v.description, v.video_url, v.thumbnail_url,
               v.duration, v.views, v.created_at,
               u.id AS owner_id, u.user_name, u.full_name, u.avatar_url
        FROM videos v
        JOIN users u ON u.id = v.owner_id
        WHERE v.is_published = TRUE
          AND ($1::text IS NULL OR v.title ILIKE '%' || $1 || '%'
                                OR v.description ILIKE '%' || $1 || '%')
          AND ($2::uuid IS NULL OR v.owner_id = $2)
        ORDER BY v.{} {}
        "#,
        sort_by.column(),
        sort_type.keyword()
    );

    let rows = sqlx::query(&sql)
        .bind(query)
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

    let items = rows
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

    Ok(items)
}

/// Detail pipeline: like count, viewer is_liked, owner summary with
/// subscriber count and viewer is_subscribed, all derived in one
/// statement. An anonymous viewer binds NULL and both flags come back
/// false.
pub async fn find_video_detail(
    pool: &PgPool,
    video_id: Uuid,
    viewer_id: Option<Uuid>,
) -> Result<Option<VideoDetail>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT v.id, v.title, v.description, v.video_url, v.thumbnail_url,
               v.duration, v.views, v.is_published, v.created_at,
               u.id AS owner_id, u.user_name, u.full_name, u.avatar_url,
               (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id) AS likes_count,
               EXISTS(SELECT 1 FROM likes l
                      WHERE l.video_id = v.id AND l.liked_by = $2) AS is_liked,
               (SELECT COUNT(*) FROM subscriptions s
                WHERE s.channel_id = v.owner_id) AS subscriber_count,
               EXISTS(SELECT 1 FROM subscriptions s
                      WHERE s.channel_id = v.owner_id
                        AND s.subscriber_id = $2) AS is_subscribed
        FROM videos v
        JOIN users u ON u.id = v.owner_id
        WHERE v.id = $1
        "#,
    )
    .bind(video_id)
    .bind(viewer_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| VideoDetail {
        id: r.get("id"),
        title: r.get("title"),
        description: r.get("description"),
        video_url: r.get("video_url"),
        thumbnail_url: r.get("thumbnail_url"),
        duration: r.get("duration"),
        views: r.get("views"),
        is_published: r.get("is_published"),
        created_at: r.get("created_at"),
        likes_count: r.get("likes_count"),
        is_liked: r.get("is_liked"),
        owner: ChannelSummary {
            id: r.get("owner_id"),
            user_name: r.get("user_name"),
            full_name: r.get("full_name"),
            avatar_url: r.get("avatar_url"),
            subscriber_count: r.get("subscriber_count"),
            is_subscribed: r.get("is_subscribed"),
        },
    }))
}

/// Dashboard listing of the channel's own uploads, published or not,
/// with per-video like counts
pub async fn channel_videos(pool: &PgPool, owner_id: Uuid) -> Result<Vec<ChannelVideo>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT v.id, v.title, v.thumbnail_url, v.is_published, v.views, v.created_at,
               (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id) AS likes_count
        FROM videos v
        WHERE v.owner_id = $1
        ORDER BY v.created_at DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    let videos = rows
        .iter()
        .map(|r| ChannelVideo {
            id: r.get("id"),
            title: r.get("title"),
            thumbnail_url: r.get("thumbnail_url"),
            is_published: r.get("is_published"),
            views: r.get("views"),
            likes_count: r.get("likes_count"),
            created_at: r.get("created_at"),
        })
        .collect();

    Ok(videos)
}

/// Dashboard totals: uploads, accumulated views, subscribers, likes
/// received across the channel's videos
pub async fn channel_stats(pool: &PgPool, owner_id: Uuid) -> Result<ChannelStats, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM videos v WHERE v.owner_id = $1) AS total_videos,
            (SELECT COALESCE(SUM(v.views), 0) FROM videos v WHERE v.owner_id = $1) AS total_views,
            (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = $1) AS total_subscribers,
            (SELECT COUNT(*) FROM likes l
             JOIN videos v ON v.id = l.video_id
             WHERE v.owner_id = $1) AS total_likes
        "#,
    )
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(ChannelStats {
        total_videos: row.get("total_videos"),
        total_views: row.get("total_views"),
        total_subscribers: row.get("total_subscribers"),
        total_likes: row.get("total_likes"),
    })
}
