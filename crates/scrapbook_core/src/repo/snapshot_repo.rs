//! Snapshot entry repository contracts and implementations.
//!
//! # Responsibility
//! - Provide a stable read/write API over the four persisted entries.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Entry values are opaque strings to this layer; interpretation (JSON
//!   arrays vs. bare theme name) belongs to the store.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for snapshot entry storage.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// The four independently addressable persisted state slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Notes,
    Photos,
    Timeline,
    Theme,
}

impl EntryKey {
    pub const ALL: [EntryKey; 4] = [Self::Notes, Self::Photos, Self::Timeline, Self::Theme];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Photos => "photos",
            Self::Timeline => "timeline",
            Self::Theme => "theme",
        }
    }
}

/// Storage contract for persisted snapshot entries.
///
/// The store takes this as an injected dependency, so tests and hosts
/// without durable storage can substitute [`MemorySnapshotRepository`].
pub trait SnapshotRepository {
    /// Reads one entry. `None` means the entry was never written.
    fn read_entry(&self, key: EntryKey) -> RepoResult<Option<String>>;

    /// Writes one entry, replacing any previous value.
    fn write_entry(&self, key: EntryKey, value: &str) -> RepoResult<()>;
}

impl<R: SnapshotRepository + ?Sized> SnapshotRepository for &R {
    fn read_entry(&self, key: EntryKey) -> RepoResult<Option<String>> {
        (**self).read_entry(key)
    }

    fn write_entry(&self, key: EntryKey, value: &str) -> RepoResult<()> {
        (**self).write_entry(key, value)
    }
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a connection opened through [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`], which guarantees the schema exists.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn read_entry(&self, key: EntryKey) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM snapshot_entries WHERE key = ?1;",
                [key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_entry(&self, key: EntryKey, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO snapshot_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key.as_str(), value],
        )?;
        Ok(())
    }
}

/// In-memory snapshot repository.
///
/// Used as the persistence double in tests and by hosts that opt out of
/// durable storage. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemorySnapshotRepository {
    entries: RefCell<HashMap<&'static str, String>>,
}

impl MemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds an entry, e.g. to simulate corrupt persisted state.
    pub fn seed(&self, key: EntryKey, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.as_str(), value.into());
    }
}

impl SnapshotRepository for MemorySnapshotRepository {
    fn read_entry(&self, key: EntryKey) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key.as_str()).cloned())
    }

    fn write_entry(&self, key: EntryKey, value: &str) -> RepoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.as_str(), value.to_string());
        Ok(())
    }
}
