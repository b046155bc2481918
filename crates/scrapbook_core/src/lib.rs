//! Core domain logic for the scrapbook.
//! This crate is the single source of truth for business invariants.
//!
//! Two independent components live here: the scrapbook store (collections,
//! theme, persistence, export/import) and the audio-reactive particle feed.
//! The host UI renders whatever they hold; neither calls back into it.

pub mod db;
pub mod feed;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use feed::particle::{Particle, ParticleColor, ParticleId};
pub use feed::ParticleFeed;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::id::IdGenerator;
pub use model::item::{
    ImageFile, ItemId, Note, Photo, Theme, TimelineEntry, DEFAULT_PHOTO_CAPTION,
    DEFAULT_TIMELINE_DESC,
};
pub use model::snapshot::{Snapshot, EXPORT_FILE_NAME};
pub use repo::snapshot_repo::{
    EntryKey, MemorySnapshotRepository, RepoError, RepoResult, SnapshotRepository,
    SqliteSnapshotRepository,
};
pub use store::scrapbook::{Collection, ImportReport, ScrapbookStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
