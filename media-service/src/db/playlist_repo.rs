use crate::models::views::{OwnerSummary, PlaylistSummary, PlaylistVideo, PlaylistView};
use crate::models::Playlist;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a playlist (metadata only)
pub async fn create_playlist(
    pool: &PgPool,
    owner_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Playlist, sqlx::Error> {
    let playlist = sqlx::query_as::<_, Playlist>(
        r#"
        INSERT INTO playlists (name, description, owner_id)
        VALUES ($1, $2, $3)
        RETURNING id, name, description, owner_id, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(playlist)
}

/// Find a playlist by id
pub async fn find_playlist_by_id(
    pool: &PgPool,
    playlist_id: Uuid,
) -> Result<Option<Playlist>, sqlx::Error> {
    let playlist = sqlx::query_as::<_, Playlist>(
        r#"
        SELECT id, name, description, owner_id, created_at, updated_at
        FROM playlists
        WHERE id = $1
        "#,
    )
    .bind(playlist_id)
    .fetch_optional(pool)
    .await?;

    Ok(playlist)
}

/// Update playlist metadata
pub async fn update_playlist(
    pool: &PgPool,
    playlist_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Option<Playlist>, sqlx::Error> {
    let playlist = sqlx::query_as::<_, Playlist>(
        r#"
        UPDATE playlists
        SET name = $2, description = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, description, owner_id, created_at, updated_at
        "#,
    )
    .bind(playlist_id)
    .bind(name)
    .bind(description)
    .fetch_optional(pool)
    .await?;

    Ok(playlist)
}

/// Delete a playlist and its membership rows
pub async fn delete_playlist(pool: &PgPool, playlist_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = $1")
        .bind(playlist_id)
        .execute(pool)
        .await?;

    let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
        .bind(playlist_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Set-semantics membership add; adding an existing member is a no-op.
/// Returns true if the video was newly added.
pub async fn add_video(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO playlist_videos (playlist_id, video_id)
        VALUES ($1, $2)
        ON CONFLICT (playlist_id, video_id) DO NOTHING
        "#,
    )
    .bind(playlist_id)
    .bind(video_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Membership remove; removing an absent member is a no-op. Returns
/// true if a row was removed.
pub async fn remove_video(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM playlist_videos
        WHERE playlist_id = $1 AND video_id = $2
        "#,
    )
    .bind(playlist_id)
    .bind(video_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Number of playlists a video is a member of
pub async fn count_memberships(pool: &PgPool, video_id: Uuid) -> Result<i64, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM playlist_videos WHERE video_id = $1")
            .bind(video_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Remove a video from every playlist referencing it (cascade step:
/// no orphaned playable reference survives a video delete)
pub async fn remove_video_everywhere(pool: &PgPool, video_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM playlist_videos WHERE video_id = $1")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Playlist-contents pipeline: the playlist, its owner summary, its
/// published member videos and totals derived over those videos
pub async fn playlist_view(
    pool: &PgPool,
    playlist_id: Uuid,
) -> Result<Option<PlaylistView>, sqlx::Error> {
    let header = sqlx::query(
        r#"
        SELECT p.id, p.name, p.description, p.created_at, p.updated_at,
               u.id AS owner_id, u.user_name, u.full_name, u.avatar_url
        FROM playlists p
        JOIN users u ON u.id = p.owner_id
        WHERE p.id = $1
        "#,
    )
    .bind(playlist_id)
    .fetch_optional(pool)
    .await?;

    let Some(header) = header else {
        return Ok(None);
    };

    let video_rows = sqlx::query(
        r#"
        SELECT v.id, v.title, v.description, v.video_url, v.thumbnail_url,
               v.duration, v.views, v.created_at
        FROM playlist_videos pv
        JOIN videos v ON v.id = pv.video_id
        WHERE pv.playlist_id = $1 AND v.is_published = TRUE
        ORDER BY pv.added_at ASC
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    let videos: Vec<PlaylistVideo> = video_rows
        .iter()
        .map(|r| PlaylistVideo {
            id: r.get("id"),
            title: r.get("title"),
            description: r.get("description"),
            video_url: r.get("video_url"),
            thumbnail_url: r.get("thumbnail_url"),
            duration: r.get("duration"),
            views: r.get("views"),
            created_at: r.get("created_at"),
        })
        .collect();

    let total_videos = videos.len() as i64;
    let total_views = videos.iter().map(|v| v.views).sum();

    Ok(Some(PlaylistView {
        id: header.get("id"),
        name: header.get("name"),
        description: header.get("description"),
        created_at: header.get("created_at"),
        updated_at: header.get("updated_at"),
        total_videos,
        total_views,
        owner: OwnerSummary {
            id: header.get("owner_id"),
            user_name: header.get("user_name"),
            full_name: header.get("full_name"),
            avatar_url: header.get("avatar_url"),
        },
        videos,
    }))
}

/// Playlist-summary pipeline: a user's playlists with totals derived
/// over ALL member videos, no per-video detail
pub async fn user_playlists(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<PlaylistSummary>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.name, p.description, p.updated_at,
               COUNT(v.id) AS total_videos,
               COALESCE(SUM(v.views), 0) AS total_views
        FROM playlists p
        LEFT JOIN playlist_videos pv ON pv.playlist_id = p.id
        LEFT JOIN videos v ON v.id = pv.video_id
        WHERE p.owner_id = $1
        GROUP BY p.id, p.name, p.description, p.updated_at
        ORDER BY p.updated_at DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    let playlists = rows
        .iter()
        .map(|r| PlaylistSummary {
            id: r.get("id"),
            name: r.get("name"),
            description: r.get("description"),
            total_videos: r.get("total_videos"),
            total_views: r.get("total_views"),
            updated_at: r.get("updated_at"),
        })
        .collect();

    Ok(playlists)
}
