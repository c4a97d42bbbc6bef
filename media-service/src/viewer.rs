/// Resolved viewer identity
///
/// Authentication happens upstream; by the time a request reaches the
/// engine it has been resolved to either a user id or anonymous.
/// Viewer-relative derivations (is_liked, is_subscribed) default to
/// false for anonymous viewers rather than failing.
use crate::error::{AppError, Result};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewer(Option<Uuid>);

impl Viewer {
    pub fn authenticated(user_id: Uuid) -> Self {
        Self(Some(user_id))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn id(&self) -> Option<Uuid> {
        self.0
    }

    /// Id of the viewer, or Forbidden for operations that need an actor
    pub fn require(&self) -> Result<Uuid> {
        self.0
            .ok_or_else(|| AppError::Forbidden("authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_viewer_has_no_id_and_fails_require() {
        let viewer = Viewer::anonymous();
        assert_eq!(viewer.id(), None);
        assert!(viewer.require().is_err());
    }

    #[test]
    fn authenticated_viewer_passes_require() {
        let id = Uuid::new_v4();
        let viewer = Viewer::authenticated(id);
        assert_eq!(viewer.require().unwrap(), id);
    }
}
