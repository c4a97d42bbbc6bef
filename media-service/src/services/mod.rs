/// Business logic layer
///
/// One service per domain area; each holds the shared pool handle and
/// exposes the engine operations as named async methods returning the
/// success envelope. Mutations run the ownership guard before any
/// store write.
pub mod comments;
pub mod dashboard;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod videos;

pub use comments::CommentService;
pub use dashboard::DashboardService;
pub use likes::LikeService;
pub use playlists::PlaylistService;
pub use subscriptions::SubscriptionService;
pub use tweets::TweetService;
pub use videos::VideoService;

use crate::error::{AppError, Result};
use uuid::Uuid;

/// Ownership guard: value equality on the identifier. Denial is
/// Forbidden, distinct from NotFound, so callers can tell "doesn't
/// exist" from "exists but not yours".
pub(crate) fn ensure_owner(owner_id: Uuid, viewer_id: Uuid, entity: &str) -> Result<()> {
    if owner_id == viewer_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "only the owner can modify this {entity}"
        )))
    }
}
