/// Denormalized, viewer-relative view documents
///
/// These are the outputs of the aggregation pipelines. None of the
/// derived fields here (counts, totals, is_liked, is_subscribed) are
/// persisted; they are recomputed from the edge tables on every query,
/// so the same stored data yields different documents per viewer.
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Owner summary attached to feed items and comments
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub user_name: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

/// One entry of the public video feed
#[derive(Debug, Clone, Serialize)]
pub struct VideoFeedItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: f64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub owner: OwnerSummary,
}

/// Channel summary on the video detail document, including the
/// viewer-relative subscription flag
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummary {
    pub id: Uuid,
    pub user_name: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub subscriber_count: i64,
    pub is_subscribed: bool,
}

/// Full video detail document
#[derive(Debug, Clone, Serialize)]
pub struct VideoDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub likes_count: i64,
    pub is_liked: bool,
    pub owner: ChannelSummary,
}

/// One subscriber of a channel, with the mutual-subscription flag
/// relative to the queried channel
#[derive(Debug, Clone, Serialize)]
pub struct SubscriberEntry {
    pub id: Uuid,
    pub user_name: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    /// Whether the queried channel subscribes back to this subscriber
    pub subscribed_to_subscriber: bool,
    pub subscriber_count: i64,
}

/// Latest upload shown next to a subscribed channel
#[derive(Debug, Clone, Serialize)]
pub struct LatestVideo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: f64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

/// One channel the subscriber follows
#[derive(Debug, Clone, Serialize)]
pub struct SubscribedChannelEntry {
    pub id: Uuid,
    pub user_name: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub latest_video: Option<LatestVideo>,
}

/// Summarized video inside a playlist detail document
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistVideo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: f64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

/// Playlist contents: published member videos plus derived totals
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_videos: i64,
    pub total_views: i64,
    pub owner: OwnerSummary,
    pub videos: Vec<PlaylistVideo>,
}

/// Playlist summary for the per-user listing (no video detail)
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub total_videos: i64,
    pub total_views: i64,
    pub updated_at: DateTime<Utc>,
}

/// Comment with its author and like derivations
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes_count: i64,
    pub is_liked: bool,
    pub owner: OwnerSummary,
}

/// Tweet with its like derivations
#[derive(Debug, Clone, Serialize)]
pub struct TweetView {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes_count: i64,
    pub is_liked: bool,
    pub owner: OwnerSummary,
}

/// Aggregated dashboard totals for a channel
#[derive(Debug, Clone, Serialize)]
pub struct ChannelStats {
    pub total_videos: i64,
    pub total_views: i64,
    pub total_subscribers: i64,
    pub total_likes: i64,
}

/// Dashboard row for one of the channel's own videos (published or not)
#[derive(Debug, Clone, Serialize)]
pub struct ChannelVideo {
    pub id: Uuid,
    pub title: String,
    pub thumbnail_url: String,
    pub is_published: bool,
    pub views: i64,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
}

/// One watch-history entry for the viewer
#[derive(Debug, Clone, Serialize)]
pub struct WatchHistoryItem {
    pub video: VideoFeedItem,
    pub watched_at: DateTime<Utc>,
}

/// Toggle outcome reported to the caller: the new state of the edge
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToggleState {
    pub active: bool,
}
