use crate::models::views::{LatestVideo, SubscribedChannelEntry, SubscriberEntry};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Check whether the edge exists
pub async fn is_subscribed(
    pool: &PgPool,
    subscriber_id: Uuid,
    channel_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM subscriptions
            WHERE subscriber_id = $1 AND channel_id = $2
        )
        "#,
    )
    .bind(subscriber_id)
    .bind(channel_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Idempotent edge insert; returns true if a new row was created. A
/// racing duplicate trips the unique pair constraint and is absorbed
/// by ON CONFLICT, reported as "already present".
pub async fn insert_subscription(
    pool: &PgPool,
    subscriber_id: Uuid,
    channel_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let inserted = sqlx::query_as::<_, (Uuid,)>(
        r#"
        INSERT INTO subscriptions (subscriber_id, channel_id)
        VALUES ($1, $2)
        ON CONFLICT (subscriber_id, channel_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(subscriber_id)
    .bind(channel_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

/// Idempotent edge delete; returns true if a row was removed
pub async fn delete_subscription(
    pool: &PgPool,
    subscriber_id: Uuid,
    channel_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM subscriptions
        WHERE subscriber_id = $1 AND channel_id = $2
        "#,
    )
    .bind(subscriber_id)
    .bind(channel_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Number of subscribers a channel has
pub async fn count_channel_subscribers(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE channel_id = $1")
            .bind(channel_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Subscriber-list pipeline: every subscriber of the channel, each
/// carrying its own subscriber count and whether the queried channel
/// subscribes back (the mutual-subscription flag)
pub async fn channel_subscribers(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<Vec<SubscriberEntry>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT u.id, u.user_name, u.full_name, u.avatar_url,
               EXISTS(SELECT 1 FROM subscriptions back
                      WHERE back.subscriber_id = $1
                        AND back.channel_id = u.id) AS subscribed_to_subscriber,
               (SELECT COUNT(*) FROM subscriptions own
                WHERE own.channel_id = u.id) AS subscriber_count
        FROM subscriptions s
        JOIN users u ON u.id = s.subscriber_id
        WHERE s.channel_id = $1
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await?;

    let subscribers = rows
        .iter()
        .map(|r| SubscriberEntry {
            id: r.get("id"),
            user_name: r.get("user_name"),
            full_name: r.get("full_name"),
            avatar_url: r.get("avatar_url"),
            subscribed_to_subscriber: r.get("subscribed_to_subscriber"),
            subscriber_count: r.get("subscriber_count"),
        })
        .collect();

    Ok(subscribers)
}

/// Subscribed-channels pipeline: every channel the subscriber follows,
/// each with its newest upload (publish state ignored, matching the
/// feed the upstream product shows to subscribers)
pub async fn subscribed_channels(
    pool: &PgPool,
    subscriber_id: Uuid,
) -> Result<Vec<SubscribedChannelEntry>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT u.id, u.user_name, u.full_name, u.avatar_url,
               lv.id AS video_id, lv.title, lv.description, lv.video_url,
               lv.thumbnail_url, lv.duration, lv.views, lv.created_at AS video_created_at
        FROM subscriptions s
        JOIN users u ON u.id = s.channel_id
        LEFT JOIN LATERAL (
            SELECT v.id, v.title, v.description, v.video_url, v.thumbnail_url,
                   v.duration, v.views, v.created_at
            FROM videos v
            WHERE v.owner_id = u.id
            ORDER BY v.created_at DESC
            LIMIT 1
        ) lv ON TRUE
        WHERE s.subscriber_id = $1
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(subscriber_id)
    .fetch_all(pool)
    .await?;

    let channels = rows
        .iter()
        .map(|r| {
            let latest_video = r
                .get::<Option<Uuid>, _>("video_id")
                .map(|video_id| LatestVideo {
                    id: video_id,
                    title: r.get("title"),
                    description: r.get("description"),
                    video_url: r.get("video_url"),
                    thumbnail_url: r.get("thumbnail_url"),
                    duration: r.get("duration"),
                    views: r.get("views"),
                    created_at: r.get("video_created_at"),
                });

            SubscribedChannelEntry {
                id: r.get("id"),
                user_name: r.get("user_name"),
                full_name: r.get("full_name"),
                avatar_url: r.get("avatar_url"),
                latest_video,
            }
        })
        .collect();

    Ok(channels)
}
