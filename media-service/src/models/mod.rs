/// Entity structs for the relationship graph
///
/// Owner/actor references are weak references by identifier: lookups
/// only, never cascading ownership. Derived fields (counts, flags) are
/// never stored on these rows; see `views` for the computed documents.
pub mod views;

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - channel identity referenced across the graph
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub user_name: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Video entity - uploaded media with its asset locators
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub video_public_id: String,
    pub thumbnail_url: String,
    pub thumbnail_public_id: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subscription edge - subscriber follows a channel
///
/// At most one row per (subscriber_id, channel_id); enforced by a
/// unique constraint in storage as the backstop for racing toggles.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub channel_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Like edge - a user liking exactly one of video/comment/tweet
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub liked_by: Uuid,
    pub video_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub tweet_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Comment entity - comment on a video
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub video_id: Uuid,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tweet entity - short text post by a channel
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tweet {
    pub id: Uuid,
    pub content: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Playlist entity - metadata only; membership lives in its own table
/// with set semantics
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Target of a like: exactly one of video, comment or tweet by
/// construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeTarget {
    Video(Uuid),
    Comment(Uuid),
    Tweet(Uuid),
}

impl LikeTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "video",
            LikeTarget::Comment(_) => "comment",
            LikeTarget::Tweet(_) => "tweet",
        }
    }
}

/// Recognized sort fields for the video feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    CreatedAt,
    Views,
    Duration,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortType {
    Asc,
    #[default]
    Desc,
}

impl SortBy {
    /// Parse a caller-supplied sort field. Unrecognized values are
    /// rejected rather than silently passed through.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None => Ok(Self::CreatedAt),
            Some("createdAt") | Some("created_at") => Ok(Self::CreatedAt),
            Some("views") => Ok(Self::Views),
            Some("duration") => Ok(Self::Duration),
            Some(other) => Err(AppError::Validation(format!(
                "unrecognized sortBy value: {other}"
            ))),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortBy::CreatedAt => "created_at",
            SortBy::Views => "views",
            SortBy::Duration => "duration",
        }
    }
}

impl SortType {
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None => Ok(Self::Desc),
            Some("asc") => Ok(Self::Asc),
            Some("desc") => Ok(Self::Desc),
            Some(other) => Err(AppError::Validation(format!(
                "unrecognized sortType value: {other}"
            ))),
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortType::Asc => "ASC",
            SortType::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_params_default_to_newest_first() {
        assert_eq!(SortBy::parse(None).unwrap(), SortBy::CreatedAt);
        assert_eq!(SortType::parse(None).unwrap(), SortType::Desc);
    }

    #[test]
    fn unrecognized_sort_values_are_rejected() {
        assert!(SortBy::parse(Some("owner_id")).is_err());
        assert!(SortType::parse(Some("upwards")).is_err());
    }

    #[test]
    fn recognized_sort_values_map_to_columns() {
        assert_eq!(SortBy::parse(Some("views")).unwrap().column(), "views");
        assert_eq!(SortType::parse(Some("asc")).unwrap().keyword(), "ASC");
    }
}
