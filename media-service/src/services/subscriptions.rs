/// Subscription service - toggle protocol and subscription pipelines
use crate::db::{subscription_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::views::{SubscribedChannelEntry, SubscriberEntry, ToggleState};
use crate::response::ApiResponse;
use crate::viewer::Viewer;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct SubscriptionService {
    pool: PgPool,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flip the subscription edge for (viewer, channel). The reported
    /// state is the opposite of the prior observed state; a racing
    /// duplicate insert is absorbed by the unique constraint and
    /// reported as active.
    pub async fn toggle_subscription(
        &self,
        viewer: Viewer,
        channel_id: Uuid,
    ) -> Result<ApiResponse<ToggleState>> {
        let subscriber_id = viewer.require()?;

        if subscriber_id == channel_id {
            return Err(AppError::Validation(
                "cannot subscribe to your own channel".to_string(),
            ));
        }

        if !user_repo::user_exists(&self.pool, channel_id).await? {
            return Err(AppError::NotFound("channel not found".to_string()));
        }

        if subscription_repo::is_subscribed(&self.pool, subscriber_id, channel_id).await? {
            subscription_repo::delete_subscription(&self.pool, subscriber_id, channel_id).await?;
            return Ok(ApiResponse::ok(
                ToggleState { active: false },
                "unsubscribed successfully",
            ));
        }

        subscription_repo::insert_subscription(&self.pool, subscriber_id, channel_id).await?;
        Ok(ApiResponse::ok(
            ToggleState { active: true },
            "subscribed successfully",
        ))
    }

    /// Subscriber list for a channel, with per-subscriber counts and
    /// the mutual-subscription flag relative to that channel
    pub async fn get_channel_subscribers(
        &self,
        channel_id: Uuid,
    ) -> Result<ApiResponse<Vec<SubscriberEntry>>> {
        if !user_repo::user_exists(&self.pool, channel_id).await? {
            return Err(AppError::NotFound("channel not found".to_string()));
        }

        let subscribers = subscription_repo::channel_subscribers(&self.pool, channel_id).await?;
        Ok(ApiResponse::ok(
            subscribers,
            "subscribers fetched successfully",
        ))
    }

    /// Channels a user subscribes to, each with its latest upload
    pub async fn get_subscribed_channels(
        &self,
        subscriber_id: Uuid,
    ) -> Result<ApiResponse<Vec<SubscribedChannelEntry>>> {
        if !user_repo::user_exists(&self.pool, subscriber_id).await? {
            return Err(AppError::NotFound("subscriber not found".to_string()));
        }

        let channels = subscription_repo::subscribed_channels(&self.pool, subscriber_id).await?;
        Ok(ApiResponse::ok(
            channels,
            "subscribed channels fetched successfully",
        ))
    }
}
