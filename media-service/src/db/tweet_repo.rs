use crate::models::views::{OwnerSummary, TweetView};
use crate::models::Tweet;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a new tweet
pub async fn create_tweet(
    pool: &PgPool,
    owner_id: Uuid,
    content: &str,
) -> Result<Tweet, sqlx::Error> {
    let tweet = sqlx::query_as::<_, Tweet>(
        r#"
        INSERT INTO tweets (content, owner_id)
        VALUES ($1, $2)
        RETURNING id, content, owner_id, created_at, updated_at
        "#,
    )
    .bind(content)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(tweet)
}

/// Find a tweet by id
pub async fn find_tweet_by_id(pool: &PgPool, tweet_id: Uuid) -> Result<Option<Tweet>, sqlx::Error> {
    let tweet = sqlx::query_as::<_, Tweet>(
        r#"
        SELECT id, content, owner_id, created_at, updated_at
        FROM tweets
        WHERE id = $1
        "#,
    )
    .bind(tweet_id)
    .fetch_optional(pool)
    .await?;

    Ok(tweet)
}

/// Update tweet content
pub async fn update_tweet(
    pool: &PgPool,
    tweet_id: Uuid,
    content: &str,
) -> Result<Option<Tweet>, sqlx::Error> {
    let tweet = sqlx::query_as::<_, Tweet>(
        r#"
        UPDATE tweets
        SET content = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, content, owner_id, created_at, updated_at
        "#,
    )
    .bind(tweet_id)
    .bind(content)
    .fetch_optional(pool)
    .await?;

    Ok(tweet)
}

/// Delete a tweet; returns false when the id did not resolve
pub async fn delete_tweet(pool: &PgPool, tweet_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tweets WHERE id = $1")
        .bind(tweet_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Tweet-list pipeline: a user's tweets with like counts and the
/// viewer's own like flag, newest first
pub async fn user_tweets(
    pool: &PgPool,
    owner_id: Uuid,
    viewer_id: Option<Uuid>,
) -> Result<Vec<TweetView>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT t.id, t.content, t.created_at, t.updated_at,
               u.id AS owner_id, u.user_name, u.full_name, u.avatar_url,
               (SELECT COUNT(*) FROM likes l WHERE l.tweet_id = t.id) AS likes_count,
               EXISTS(SELECT 1 FROM likes l
                      WHERE l.tweet_id = t.id AND l.liked_by = $2) AS is_liked
        FROM tweets t
        JOIN users u ON u.id = t.owner_id
        WHERE t.owner_id = $1
        ORDER BY t.created_at DESC
        "#,
    )
    .bind(owner_id)
    .bind(viewer_id)
    .fetch_all(pool)
    .await?;

    let tweets = rows
        .iter()
        .map(|r| TweetView {
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

    Ok(tweets)
}
