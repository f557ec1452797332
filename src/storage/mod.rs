//! Flat on-disk store for request/response artifacts.

pub mod artifact;
pub mod retention;

pub use artifact::{ArtifactId, ArtifactKind, ArtifactStore, StoredArtifact, UPLOADS_ROUTE};
pub use retention::RetentionPolicy;
