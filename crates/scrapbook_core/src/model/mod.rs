//! Domain model for the scrapbook collections.
//!
//! # Responsibility
//! - Define the canonical records for notes, photos and timeline entries.
//! - Define the serializable snapshot shape shared by persistence and
//!   file export/import.
//!
//! # Invariants
//! - Every item carries an `ItemId` that is unique within its collection.
//! - Records are self-contained: a `Photo` embeds its image content as a
//!   data URI and never references an external file.

pub mod id;
pub mod item;
pub mod snapshot;
