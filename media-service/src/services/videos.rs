/// Video service - feed pipeline, detail pipeline, upload and the
/// compensating delete cascade
use crate::assets::{AssetKind, AssetStore, StoredAsset};
use crate::db::{
    comment_repo, like_repo, playlist_repo, video_repo, watch_history_repo,
};
use crate::error::{AppError, Result};
use crate::models::views::{VideoDetail, VideoFeedItem};
use crate::models::{SortBy, SortType, Video};
use crate::pagination::{Page, PageParams};
use crate::response::ApiResponse;
use crate::viewer::Viewer;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

pub struct VideoService {
    pool: PgPool,
    assets: Arc<dyn AssetStore>,
}

impl VideoService {
    pub fn new(pool: PgPool, assets: Arc<dyn AssetStore>) -> Self {
        Self { pool, assets }
    }

    /// Public feed: optional text search and owner filter over
    /// published videos, caller-selected sort, paginated after the
    /// joins resolve
    pub async fn list_videos(
        &self,
        query: Option<&str>,
        user_id: Option<&str>,
        sort_by: Option<&str>,
        sort_type: Option<&str>,
        pagination: PageParams,
    ) -> Result<ApiResponse<Page<VideoFeedItem>>> {
        let owner_id = match user_id {
            Some(raw) => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| AppError::Validation("invalid userId".to_string()))?,
            ),
            None => None,
        };

        let sort_by = SortBy::parse(sort_by)?;
        let sort_type = SortType::parse(sort_type)?;

        let items =
            video_repo::list_feed(&self.pool, query, owner_id, sort_by, sort_type).await?;
        let page = Page::from_items(items, pagination);

        Ok(ApiResponse::ok(page, "videos fetched successfully"))
    }

    /// Upload flow: both assets are stored and confirmed before the
    /// row referencing them is created, so no entity ever points at an
    /// unconfirmed asset.
    pub async fn publish_video(
        &self,
        viewer: Viewer,
        title: &str,
        description: &str,
        video_path: &Path,
        thumbnail_path: &Path,
    ) -> Result<ApiResponse<Video>> {
        let owner_id = viewer.require()?;

        if title.trim().is_empty() || description.trim().is_empty() {
            return Err(AppError::Validation(
                "title and description are required".to_string(),
            ));
        }

        let video_asset = self
            .assets
            .store(video_path)
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let thumbnail_asset = match self.assets.store(thumbnail_path).await {
            Ok(asset) => asset,
            Err(e) => {
                // The video object is orphaned but no row references it;
                // reclaim it best-effort before failing the request.
                self.delete_asset_logged(&video_asset, AssetKind::Video).await;
                return Err(AppError::Upstream(e.to_string()));
            }
        };

        let video = video_repo::create_video(
            &self.pool,
            owner_id,
            title,
            description,
            &video_asset.url,
            &video_asset.public_id,
            &thumbnail_asset.url,
            &thumbnail_asset.public_id,
            video_asset.duration_seconds,
        )
        .await?;

        Ok(ApiResponse::created(video, "video uploaded successfully"))
    }

    /// Detail pipeline plus its side effects: the view counter bump
    /// and the watch-history append run after the read succeeds, each
    /// independently idempotent-safe. Views count every fetch; watch
    /// history is a set.
    pub async fn get_video_by_id(
        &self,
        viewer: Viewer,
        video_id: Uuid,
    ) -> Result<ApiResponse<VideoDetail>> {
        let detail = video_repo::find_video_detail(&self.pool, video_id, viewer.id())
            .await?
            .ok_or_else(|| AppError::NotFound("video not found".to_string()))?;

        video_repo::increment_views(&self.pool, video_id).await?;

        if let Some(viewer_id) = viewer.id() {
            watch_history_repo::record_watch(&self.pool, viewer_id, video_id).await?;
        }

        Ok(ApiResponse::ok(detail, "video fetched successfully"))
    }

    /// Partial update of title/description/thumbnail. A replaced
    /// thumbnail's old object is reclaimed after the row commits.
    pub async fn update_video(
        &self,
        viewer: Viewer,
        video_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        thumbnail_path: Option<&Path>,
    ) -> Result<ApiResponse<Video>> {
        let viewer_id = viewer.require()?;

        if title.is_none() && description.is_none() && thumbnail_path.is_none() {
            return Err(AppError::Validation(
                "at least one field to update is required".to_string(),
            ));
        }

        let existing = video_repo::find_video_by_id(&self.pool, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("video not found".to_string()))?;

        super::ensure_owner(existing.owner_id, viewer_id, "video")?;

        let new_thumbnail = match thumbnail_path {
            Some(path) => Some(
                self.assets
                    .store(path)
                    .await
                    .map_err(|e| AppError::Upstream(e.to_string()))?,
            ),
            None => None,
        };

        let updated = video_repo::update_video_details(
            &self.pool,
            video_id,
            title,
            description,
            new_thumbnail
                .as_ref()
                .map(|a| (a.url.as_str(), a.public_id.as_str())),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("video not found".to_string()))?;

        if new_thumbnail.is_some() {
            if let Err(e) = self
                .assets
                .delete(&existing.thumbnail_public_id, AssetKind::Image)
                .await
            {
                warn!(video_id = %video_id, error = %e, "failed to reclaim replaced thumbnail");
            }
        }

        Ok(ApiResponse::ok(updated, "video updated successfully"))
    }

    /// Compensating delete cascade: dependents first, then the video
    /// row, then the external assets. Once the row is gone, cleanup
    /// failures are logged and the delete still reports success.
    pub async fn delete_video(&self, viewer: Viewer, video_id: Uuid) -> Result<ApiResponse<()>> {
        let viewer_id = viewer.require()?;

        let video = video_repo::find_video_by_id(&self.pool, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("video not found".to_string()))?;

        super::ensure_owner(video.owner_id, viewer_id, "video")?;

        if let Err(e) = like_repo::delete_likes_for_video_comments(&self.pool, video_id).await {
            warn!(video_id = %video_id, error = %e, "comment-like cleanup failed");
        }
        if let Err(e) = comment_repo::delete_comments_for_video(&self.pool, video_id).await {
            warn!(video_id = %video_id, error = %e, "comment cleanup failed");
        }
        if let Err(e) = like_repo::delete_likes_for_video(&self.pool, video_id).await {
            warn!(video_id = %video_id, error = %e, "like cleanup failed");
        }
        if let Err(e) = playlist_repo::remove_video_everywhere(&self.pool, video_id).await {
            warn!(video_id = %video_id, error = %e, "playlist membership cleanup failed");
        }
        if let Err(e) = watch_history_repo::delete_for_video(&self.pool, video_id).await {
            warn!(video_id = %video_id, error = %e, "watch history cleanup failed");
        }

        if !video_repo::delete_video(&self.pool, video_id).await? {
            return Err(AppError::NotFound("video not found".to_string()));
        }

        if let Err(e) = self
            .assets
            .delete(&video.video_public_id, AssetKind::Video)
            .await
        {
            warn!(video_id = %video_id, error = %e, "video asset cleanup failed");
        }
        if let Err(e) = self
            .assets
            .delete(&video.thumbnail_public_id, AssetKind::Image)
            .await
        {
            warn!(video_id = %video_id, error = %e, "thumbnail asset cleanup failed");
        }

        Ok(ApiResponse::ok((), "video deleted successfully"))
    }

    /// Flip the published flag, owner only
    pub async fn toggle_publish_status(
        &self,
        viewer: Viewer,
        video_id: Uuid,
    ) -> Result<ApiResponse<Video>> {
        let viewer_id = viewer.require()?;

        let video = video_repo::find_video_by_id(&self.pool, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("video not found".to_string()))?;

        super::ensure_owner(video.owner_id, viewer_id, "video")?;

        video_repo::set_publish_status(&self.pool, video_id, !video.is_published).await?;

        let updated = video_repo::find_video_by_id(&self.pool, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("video not found".to_string()))?;

        Ok(ApiResponse::ok(
            updated,
            "publish status toggled successfully",
        ))
    }

    async fn delete_asset_logged(&self, asset: &StoredAsset, kind: AssetKind) {
        if let Err(e) = self.assets.delete(&asset.public_id, kind).await {
            warn!(public_id = %asset.public_id, error = %e, "orphaned asset cleanup failed");
        }
    }
}
