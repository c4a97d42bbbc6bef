/// Comment service - comment CRUD and the comment-list pipeline
use crate::db::{comment_repo, like_repo, video_repo};
use crate::error::{AppError, Result};
use crate::models::views::CommentView;
use crate::models::Comment;
use crate::pagination::{Page, PageParams};
use crate::response::ApiResponse;
use crate::viewer::Viewer;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Comments under a video with author summary and like
    /// derivations, paginated over the aggregated list
    pub async fn get_video_comments(
        &self,
        viewer: Viewer,
        video_id: Uuid,
        pagination: PageParams,
    ) -> Result<ApiResponse<Page<CommentView>>> {
        if video_repo::find_video_by_id(&self.pool, video_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("video not found".to_string()));
        }

        let comments = comment_repo::video_comments(&self.pool, video_id, viewer.id()).await?;
        let page = Page::from_items(comments, pagination);

        Ok(ApiResponse::ok(page, "comments fetched successfully"))
    }

    pub async fn add_comment(
        &self,
        viewer: Viewer,
        video_id: Uuid,
        content: &str,
    ) -> Result<ApiResponse<Comment>> {
        let owner_id = viewer.require()?;

        if content.trim().is_empty() {
            return Err(AppError::Validation("content is required".to_string()));
        }

        if video_repo::find_video_by_id(&self.pool, video_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("video not found".to_string()));
        }

        let comment = comment_repo::create_comment(&self.pool, video_id, owner_id, content).await?;
        Ok(ApiResponse::created(comment, "comment added successfully"))
    }

    pub async fn update_comment(
        &self,
        viewer: Viewer,
        comment_id: Uuid,
        content: &str,
    ) -> Result<ApiResponse<Comment>> {
        let viewer_id = viewer.require()?;

        if content.trim().is_empty() {
            return Err(AppError::Validation("content is required".to_string()));
        }

        let existing = comment_repo::find_comment_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

        super::ensure_owner(existing.owner_id, viewer_id, "comment")?;

        let updated = comment_repo::update_comment(&self.pool, comment_id, content)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

        Ok(ApiResponse::ok(updated, "comment updated successfully"))
    }

    /// Delete a comment and its like edges (dependents first)
    pub async fn delete_comment(
        &self,
        viewer: Viewer,
        comment_id: Uuid,
    ) -> Result<ApiResponse<()>> {
        let viewer_id = viewer.require()?;

        let existing = comment_repo::find_comment_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

        super::ensure_owner(existing.owner_id, viewer_id, "comment")?;

        if let Err(e) = like_repo::delete_likes_for_comment(&self.pool, comment_id).await {
            warn!(comment_id = %comment_id, error = %e, "comment-like cleanup failed");
        }

        if !comment_repo::delete_comment(&self.pool, comment_id).await? {
            return Err(AppError::NotFound("comment not found".to_string()));
        }

        Ok(ApiResponse::ok((), "comment deleted successfully"))
    }
}
