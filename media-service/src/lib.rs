/// Media Service Library
///
/// Relationship aggregation and feed composition engine for the
/// Vidstream media-sharing backend: videos, subscriptions, likes,
/// comments, tweets and playlists over PostgreSQL.
///
/// # Modules
///
/// - `models`: Entity structs and denormalized view documents
/// - `db`: Database access layer, repositories and connection pooling
/// - `services`: Business logic layer (toggle protocol, pipelines, CRUD)
/// - `pagination`: Page/limit windowing over aggregated result sets
/// - `assets`: Opaque asset store collaborator seam
/// - `viewer`: Resolved viewer identity attached to each request
/// - `response`: Success envelope returned by every operation
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod assets;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod response;
pub mod services;
pub mod viewer;

pub use config::Config;
pub use error::{AppError, Result};
