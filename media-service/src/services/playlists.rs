/// Playlist service - metadata CRUD, set-semantics membership and the
/// playlist pipelines
use crate::db::{playlist_repo, user_repo, video_repo};
use crate::error::{AppError, Result};
use crate::models::views::{PlaylistSummary, PlaylistView};
use crate::models::Playlist;
use crate::response::ApiResponse;
use crate::viewer::Viewer;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct PlaylistService {
    pool: PgPool,
}

impl PlaylistService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_playlist(
        &self,
        viewer: Viewer,
        name: &str,
        description: &str,
    ) -> Result<ApiResponse<Playlist>> {
        let owner_id = viewer.require()?;

        if name.trim().is_empty() || description.trim().is_empty() {
            return Err(AppError::Validation(
                "name and description are both required".to_string(),
            ));
        }

        let playlist = playlist_repo::create_playlist(&self.pool, owner_id, name, description).await?;
        Ok(ApiResponse::created(
            playlist,
            "playlist created successfully",
        ))
    }

    pub async fn update_playlist(
        &self,
        viewer: Viewer,
        playlist_id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<ApiResponse<Playlist>> {
        let viewer_id = viewer.require()?;

        if name.trim().is_empty() || description.trim().is_empty() {
            return Err(AppError::Validation(
                "name and description are both required".to_string(),
            ));
        }

        let existing = playlist_repo::find_playlist_by_id(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| AppError::NotFound("playlist not found".to_string()))?;

        super::ensure_owner(existing.owner_id, viewer_id, "playlist")?;

        let updated = playlist_repo::update_playlist(&self.pool, playlist_id, name, description)
            .await?
            .ok_or_else(|| AppError::NotFound("playlist not found".to_string()))?;

        Ok(ApiResponse::ok(updated, "playlist updated successfully"))
    }

    pub async fn delete_playlist(
        &self,
        viewer: Viewer,
        playlist_id: Uuid,
    ) -> Result<ApiResponse<()>> {
        let viewer_id = viewer.require()?;

        let existing = playlist_repo::find_playlist_by_id(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| AppError::NotFound("playlist not found".to_string()))?;

        super::ensure_owner(existing.owner_id, viewer_id, "playlist")?;

        playlist_repo::delete_playlist(&self.pool, playlist_id).await?;
        Ok(ApiResponse::ok((), "playlist deleted successfully"))
    }

    /// Set-semantics add: adding an already-present video is a no-op
    /// that still reports success
    pub async fn add_video_to_playlist(
        &self,
        viewer: Viewer,
        playlist_id: Uuid,
        video_id: Uuid,
    ) -> Result<ApiResponse<()>> {
        let viewer_id = viewer.require()?;

        let (playlist, video) = self.resolve_pair(playlist_id, video_id).await?;
        super::ensure_owner(playlist.owner_id, viewer_id, "playlist")?;
        super::ensure_owner(video.owner_id, viewer_id, "video")?;

        playlist_repo::add_video(&self.pool, playlist_id, video_id).await?;
        Ok(ApiResponse::ok((), "video added to playlist successfully"))
    }

    /// Set-semantics remove: removing an absent video is a no-op
    pub async fn remove_video_from_playlist(
        &self,
        viewer: Viewer,
        playlist_id: Uuid,
        video_id: Uuid,
    ) -> Result<ApiResponse<()>> {
        let viewer_id = viewer.require()?;

        let (playlist, video) = self.resolve_pair(playlist_id, video_id).await?;
        super::ensure_owner(playlist.owner_id, viewer_id, "playlist")?;
        super::ensure_owner(video.owner_id, viewer_id, "video")?;

        playlist_repo::remove_video(&self.pool, playlist_id, video_id).await?;
        Ok(ApiResponse::ok(
            (),
            "video removed from playlist successfully",
        ))
    }

    /// Playlist contents with published member videos and totals
    pub async fn get_playlist_by_id(&self, playlist_id: Uuid) -> Result<ApiResponse<PlaylistView>> {
        let view = playlist_repo::playlist_view(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| AppError::NotFound("playlist not found".to_string()))?;

        Ok(ApiResponse::ok(view, "playlist fetched successfully"))
    }

    /// A user's playlists with derived totals, no video detail
    pub async fn get_user_playlists(
        &self,
        user_id: Uuid,
    ) -> Result<ApiResponse<Vec<PlaylistSummary>>> {
        if !user_repo::user_exists(&self.pool, user_id).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let playlists = playlist_repo::user_playlists(&self.pool, user_id).await?;
        Ok(ApiResponse::ok(
            playlists,
            "user playlists fetched successfully",
        ))
    }

    async fn resolve_pair(
        &self,
        playlist_id: Uuid,
        video_id: Uuid,
    ) -> Result<(Playlist, crate::models::Video)> {
        let playlist = playlist_repo::find_playlist_by_id(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| AppError::NotFound("playlist not found".to_string()))?;

        let video = video_repo::find_video_by_id(&self.pool, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("video not found".to_string()))?;

        Ok((playlist, video))
    }
}
