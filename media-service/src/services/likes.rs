/// Like service - toggle protocol over video/comment/tweet targets
use crate::db::{comment_repo, like_repo, tweet_repo, video_repo};
use crate::error::{AppError, Result};
use crate::models::views::{ToggleState, VideoFeedItem};
use crate::models::LikeTarget;
use crate::response::ApiResponse;
use crate::viewer::Viewer;
use sqlx::PgPool;

#[derive(Clone)]
pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flip the like edge for (viewer, target). The target kind is
    /// fixed by the enum; the referenced row must resolve.
    pub async fn toggle_like(
        &self,
        viewer: Viewer,
        target: LikeTarget,
    ) -> Result<ApiResponse<ToggleState>> {
        let liked_by = viewer.require()?;

        self.ensure_target_exists(target).await?;

        if like_repo::like_exists(&self.pool, liked_by, target).await? {
            like_repo::delete_like(&self.pool, liked_by, target).await?;
            return Ok(ApiResponse::ok(
                ToggleState { active: false },
                format!("{} unliked successfully", target.kind()),
            ));
        }

        like_repo::insert_like(&self.pool, liked_by, target).await?;
        Ok(ApiResponse::ok(
            ToggleState { active: true },
            format!("{} liked successfully", target.kind()),
        ))
    }

    /// Videos the viewer has liked, newest like first (published only)
    pub async fn get_liked_videos(&self, viewer: Viewer) -> Result<ApiResponse<Vec<VideoFeedItem>>> {
        let viewer_id = viewer.require()?;
        let videos = like_repo::liked_videos(&self.pool, viewer_id).await?;
        Ok(ApiResponse::ok(videos, "liked videos fetched successfully"))
    }

    async fn ensure_target_exists(&self, target: LikeTarget) -> Result<()> {
        let found = match target {
            LikeTarget::Video(id) => video_repo::find_video_by_id(&self.pool, id).await?.is_some(),
            LikeTarget::Comment(id) => comment_repo::find_comment_by_id(&self.pool, id)
                .await?
                .is_some(),
            LikeTarget::Tweet(id) => tweet_repo::find_tweet_by_id(&self.pool, id).await?.is_some(),
        };

        if found {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("{} not found", target.kind())))
        }
    }
}
