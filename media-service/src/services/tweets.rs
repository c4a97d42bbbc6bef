/// Tweet service - tweet CRUD and the user-tweets pipeline
use crate::db::{like_repo, tweet_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::views::TweetView;
use crate::models::Tweet;
use crate::response::ApiResponse;
use crate::viewer::Viewer;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

#[derive(Clone)]
pub struct TweetService {
    pool: PgPool,
}

impl TweetService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_tweet(&self, viewer: Viewer, content: &str) -> Result<ApiResponse<Tweet>> {
        let owner_id = viewer.require()?;

        if content.trim().is_empty() {
            return Err(AppError::Validation("content is required".to_string()));
        }

        let tweet = tweet_repo::create_tweet(&self.pool, owner_id, content).await?;
        Ok(ApiResponse::created(tweet, "tweet created successfully"))
    }

    /// A user's tweets with like counts and the viewer's like flag
    pub async fn get_user_tweets(
        &self,
        viewer: Viewer,
        user_id: Uuid,
    ) -> Result<ApiResponse<Vec<TweetView>>> {
        if !user_repo::user_exists(&self.pool, user_id).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let tweets = tweet_repo::user_tweets(&self.pool, user_id, viewer.id()).await?;
        Ok(ApiResponse::ok(tweets, "tweets fetched successfully"))
    }

    pub async fn update_tweet(
        &self,
        viewer: Viewer,
        tweet_id: Uuid,
        content: &str,
    ) -> Result<ApiResponse<Tweet>> {
        let viewer_id = viewer.require()?;

        if content.trim().is_empty() {
            return Err(AppError::Validation("content is required".to_string()));
        }

        let existing = tweet_repo::find_tweet_by_id(&self.pool, tweet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("tweet not found".to_string()))?;

        super::ensure_owner(existing.owner_id, viewer_id, "tweet")?;

        let updated = tweet_repo::update_tweet(&self.pool, tweet_id, content)
            .await?
            .ok_or_else(|| AppError::NotFound("tweet not found".to_string()))?;

        Ok(ApiResponse::ok(updated, "tweet updated successfully"))
    }

    /// Delete a tweet and its like edges (dependents first)
    pub async fn delete_tweet(&self, viewer: Viewer, tweet_id: Uuid) -> Result<ApiResponse<()>> {
        let viewer_id = viewer.require()?;

        let existing = tweet_repo::find_tweet_by_id(&self.pool, tweet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("tweet not found".to_string()))?;

        super::ensure_owner(existing.owner_id, viewer_id, "tweet")?;

        if let Err(e) = like_repo::delete_likes_for_tweet(&self.pool, tweet_id).await {
            warn!(tweet_id = %tweet_id, error = %e, "tweet-like cleanup failed");
        }

        if !tweet_repo::delete_tweet(&self.pool, tweet_id).await? {
            return Err(AppError::NotFound("tweet not found".to_string()));
        }

        Ok(ApiResponse::ok((), "tweet deleted successfully"))
    }
}
