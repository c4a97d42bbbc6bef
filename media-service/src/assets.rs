/// Opaque asset store collaborator
///
/// Binary storage and transcoding live outside this service. The
/// engine only sees the confirmed locator returned by a successful
/// store call; entities referencing an asset are created strictly
/// after that confirmation.
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetStoreError {
    #[error("asset upload failed: {0}")]
    Upload(String),

    #[error("asset deletion failed: {0}")]
    Delete(String),
}

/// Which kind of object a public id refers to; deletion is routed
/// differently per kind by the backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Video,
    Image,
}

/// Confirmation value returned by a successful store call
#[derive(Debug, Clone)]
pub struct StoredAsset {
    pub url: String,
    pub public_id: String,
    pub duration_seconds: f64,
}

#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload a local file, returning its locator only on confirmed
    /// success
    async fn store(&self, local_path: &Path) -> Result<StoredAsset, AssetStoreError>;

    /// Delete a previously stored object
    async fn delete(&self, public_id: &str, kind: AssetKind) -> Result<(), AssetStoreError>;
}
