/// Dashboard service - aggregated stats for the viewer's own channel
use crate::db::{video_repo, watch_history_repo};
use crate::error::Result;
use crate::models::views::{ChannelStats, ChannelVideo, WatchHistoryItem};
use crate::response::ApiResponse;
use crate::viewer::Viewer;
use sqlx::PgPool;

#[derive(Clone)]
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Channel totals: uploads, accumulated views, subscribers and
    /// likes received across the channel's videos
    pub async fn get_channel_stats(&self, viewer: Viewer) -> Result<ApiResponse<ChannelStats>> {
        let channel_id = viewer.require()?;
        let stats = video_repo::channel_stats(&self.pool, channel_id).await?;
        Ok(ApiResponse::ok(stats, "channel stats fetched successfully"))
    }

    /// Every upload of the viewer's channel, published or not, with
    /// per-video like counts
    pub async fn get_channel_videos(&self, viewer: Viewer) -> Result<ApiResponse<Vec<ChannelVideo>>> {
        let channel_id = viewer.require()?;
        let videos = video_repo::channel_videos(&self.pool, channel_id).await?;
        Ok(ApiResponse::ok(videos, "channel videos fetched successfully"))
    }

    /// The viewer's watch history, most recently watched first
    pub async fn get_watch_history(
        &self,
        viewer: Viewer,
    ) -> Result<ApiResponse<Vec<WatchHistoryItem>>> {
        let viewer_id = viewer.require()?;
        let history = watch_history_repo::watch_history(&self.pool, viewer_id).await?;
        Ok(ApiResponse::ok(history, "watch history fetched successfully"))
    }
}
