//! The scrapbook store: collections, theme, persistence and portability.
//!
//! # Responsibility
//! - Own the three ordered collections and the theme setting.
//! - Mirror every successful mutation to the persistence layer before the
//!   operation returns.
//! - Serialize/deserialize the whole state as a portable snapshot.
//!
//! # Invariants
//! - Item ids are unique within their collection at all times, including
//!   across hydration and import boundaries.
//! - After any successful mutating operation, persisted and in-memory state
//!   are identical until the next mutation begins.
//! - Validation failures and missing edit/delete targets are silent no-ops,
//!   never errors.

use crate::model::id::IdGenerator;
use crate::model::item::{
    is_valid_date, text_or_default, ImageFile, ItemId, Note, Photo, Theme, TimelineEntry,
    DEFAULT_PHOTO_CAPTION, DEFAULT_TIMELINE_DESC,
};
use crate::model::snapshot::Snapshot;
use crate::repo::snapshot_repo::{EntryKey, RepoError, SnapshotRepository};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for persistence and import/export operations.
#[derive(Debug)]
pub enum StoreError {
    Repo(RepoError),
    Serialize(serde_json::Error),
    /// The import byte stream is not parseable as JSON at all. State is
    /// left untouched when this is returned.
    UnreadableImport(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "snapshot serialization failed: {err}"),
            Self::UnreadableImport(err) => write!(f, "import file is not valid JSON: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Serialize(err) | Self::UnreadableImport(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Addresses one of the three ordered collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Notes,
    Photos,
    Timeline,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Photos => "photos",
            Self::Timeline => "timeline",
        }
    }
}

/// Which state slices an import replaced.
///
/// A slice stays `false` when its field was absent or malformed in the
/// import file; the live data for that slice is then unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub notes: bool,
    pub photos: bool,
    pub timeline: bool,
    pub theme: bool,
}

impl ImportReport {
    pub fn any_applied(self) -> bool {
        self.notes || self.photos || self.timeline || self.theme
    }
}

/// The scrapbook store.
///
/// Generic over the repository so tests and storage-less hosts can inject
/// [`crate::repo::snapshot_repo::MemorySnapshotRepository`].
pub struct ScrapbookStore<R: SnapshotRepository> {
    repo: R,
    ids: IdGenerator,
    notes: Vec<Note>,
    photos: Vec<Photo>,
    timeline: Vec<TimelineEntry>,
    theme: Theme,
}

impl<R: SnapshotRepository> ScrapbookStore<R> {
    /// Creates an empty store over the given repository without touching
    /// persisted state. Most callers want [`ScrapbookStore::open`].
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            ids: IdGenerator::new(),
            notes: Vec::new(),
            photos: Vec::new(),
            timeline: Vec::new(),
            theme: Theme::default(),
        }
    }

    /// Creates a store and hydrates it from the persistence layer.
    pub fn open(repo: R) -> StoreResult<Self> {
        let mut store = Self::new(repo);
        store.load_persisted()?;
        Ok(store)
    }

    /// Hydrates all four state slices from the persistence layer.
    ///
    /// Missing or corrupt entries fall back to an empty collection or the
    /// default theme; corruption is logged, never propagated.
    pub fn load_persisted(&mut self) -> StoreResult<()> {
        self.notes = self.read_collection(EntryKey::Notes)?;
        self.photos = self.read_collection(EntryKey::Photos)?;
        self.timeline = self.read_collection(EntryKey::Timeline)?;
        self.theme = match self.repo.read_entry(EntryKey::Theme)? {
            Some(name) => Theme::parse(&name).unwrap_or_else(|| {
                warn!("event=hydrate module=store status=recovered entry=theme value={name}");
                Theme::default()
            }),
            None => Theme::default(),
        };

        self.observe_all_ids();
        info!(
            "event=hydrate module=store status=ok notes={} photos={} timeline={} theme={}",
            self.notes.len(),
            self.photos.len(),
            self.timeline.len(),
            self.theme.as_str()
        );
        Ok(())
    }

    /// Writes the full current state to the persistence layer.
    ///
    /// Called internally after every successful mutation; exposed so hosts
    /// can force a flush (e.g. before teardown).
    pub fn persist(&self) -> StoreResult<()> {
        self.write_collection(EntryKey::Notes, &self.notes)?;
        self.write_collection(EntryKey::Photos, &self.photos)?;
        self.write_collection(EntryKey::Timeline, &self.timeline)?;
        self.repo.write_entry(EntryKey::Theme, self.theme.as_str())?;
        Ok(())
    }

    /// Adds a note from submitted text.
    ///
    /// Returns `Ok(None)` without side effects when the trimmed text is
    /// empty; otherwise prepends the note and returns its id.
    pub fn add_note(&mut self, text: &str) -> StoreResult<Option<ItemId>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("event=add_note module=store status=rejected reason=empty_text");
            return Ok(None);
        }

        let id = self.ids.next_id();
        self.notes.insert(
            0,
            Note {
                id,
                text: trimmed.to_string(),
            },
        );
        self.persist()?;
        Ok(Some(id))
    }

    /// Adds one photo from already-read image bytes.
    ///
    /// An absent or empty caption defaults to `"No caption"`.
    pub fn add_photo(&mut self, image: &ImageFile, caption: Option<&str>) -> StoreResult<ItemId> {
        let id = self.ids.next_id();
        let caption = text_or_default(caption, DEFAULT_PHOTO_CAPTION);
        self.photos.insert(0, Photo::from_image(id, image, caption));
        self.persist()?;
        Ok(id)
    }

    /// Adds a batch of photos, one per input file.
    ///
    /// Each file is appended (and persisted) independently, mirroring the
    /// per-file completion model of the host's async reads: the host feeds
    /// files here in completion order, and a file it failed to read simply
    /// never arrives. Collection order is completion order, not the order
    /// the user selected the files in.
    pub fn add_photos(
        &mut self,
        files: impl IntoIterator<Item = ImageFile>,
        caption: Option<&str>,
    ) -> StoreResult<Vec<ItemId>> {
        let mut added = Vec::new();
        for file in files {
            added.push(self.add_photo(&file, caption)?);
        }
        Ok(added)
    }

    /// Adds a timeline entry.
    ///
    /// Returns `Ok(None)` without side effects unless the date is a
    /// well-formed `YYYY-MM-DD` string and the trimmed title is non-empty.
    /// An absent or empty description defaults to `"No description"`.
    pub fn add_timeline_entry(
        &mut self,
        date: &str,
        title: &str,
        desc: Option<&str>,
    ) -> StoreResult<Option<ItemId>> {
        let date = date.trim();
        let title = title.trim();
        if title.is_empty() || !is_valid_date(date) {
            debug!("event=add_timeline module=store status=rejected reason=validation");
            return Ok(None);
        }

        let id = self.ids.next_id();
        self.timeline.insert(
            0,
            TimelineEntry {
                id,
                date: date.to_string(),
                title: title.to_string(),
                desc: text_or_default(desc, DEFAULT_TIMELINE_DESC),
            },
        );
        self.persist()?;
        Ok(Some(id))
    }

    /// Replaces a note's text. Returns `Ok(false)` when the id is absent.
    pub fn edit_note(&mut self, id: ItemId, new_text: &str) -> StoreResult<bool> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return Ok(false);
        };
        note.text = new_text.to_string();
        self.persist()?;
        Ok(true)
    }

    /// Replaces a photo's caption. Returns `Ok(false)` when the id is absent.
    pub fn edit_photo_caption(&mut self, id: ItemId, new_caption: &str) -> StoreResult<bool> {
        let Some(photo) = self.photos.iter_mut().find(|photo| photo.id == id) else {
            return Ok(false);
        };
        photo.caption = new_caption.to_string();
        self.persist()?;
        Ok(true)
    }

    /// Replaces a timeline entry's title and description together.
    ///
    /// Partial edits resubmit the unchanged field. Returns `Ok(false)` when
    /// the id is absent.
    pub fn edit_timeline_entry(
        &mut self,
        id: ItemId,
        new_title: &str,
        new_desc: &str,
    ) -> StoreResult<bool> {
        let Some(entry) = self.timeline.iter_mut().find(|entry| entry.id == id) else {
            return Ok(false);
        };
        entry.title = new_title.to_string();
        entry.desc = new_desc.to_string();
        self.persist()?;
        Ok(true)
    }

    /// Removes an item from the addressed collection.
    ///
    /// Returns `Ok(false)` when the id is absent.
    pub fn delete_item(&mut self, collection: Collection, id: ItemId) -> StoreResult<bool> {
        let removed = match collection {
            Collection::Notes => remove_by_id(&mut self.notes, id, |note| note.id),
            Collection::Photos => remove_by_id(&mut self.photos, id, |photo| photo.id),
            Collection::Timeline => remove_by_id(&mut self.timeline, id, |entry| entry.id),
        };
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Replaces a collection's order wholesale.
    ///
    /// `new_order` must be a permutation of the collection's current id set.
    /// Anything else (missing ids, unknown ids, duplicates) is rejected as a
    /// no-op with a warning, returning `Ok(false)`.
    pub fn reorder(&mut self, collection: Collection, new_order: &[ItemId]) -> StoreResult<bool> {
        let applied = match collection {
            Collection::Notes => apply_order(&mut self.notes, new_order, |note| note.id),
            Collection::Photos => apply_order(&mut self.photos, new_order, |photo| photo.id),
            Collection::Timeline => apply_order(&mut self.timeline, new_order, |entry| entry.id),
        };
        if applied {
            self.persist()?;
        } else {
            warn!(
                "event=reorder module=store status=rejected collection={} reason=not_a_permutation",
                collection.as_str()
            );
        }
        Ok(applied)
    }

    /// Replaces the current theme.
    pub fn set_theme(&mut self, theme: Theme) -> StoreResult<()> {
        self.theme = theme;
        self.persist()
    }

    /// Serializes the full current state as portable JSON bytes.
    ///
    /// The result is self-contained (photo content inline) and is what an
    /// export download named [`crate::model::snapshot::EXPORT_FILE_NAME`]
    /// should carry.
    pub fn export_snapshot(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(&self.snapshot()).map_err(StoreError::Serialize)
    }

    /// Imports a snapshot file, replacing each state slice whose field is
    /// present and well-formed.
    ///
    /// Absent or malformed fields leave the corresponding live slice
    /// unchanged (partial import). A byte stream that is not JSON at all
    /// returns [`StoreError::UnreadableImport`] with no state change.
    pub fn import_snapshot(&mut self, bytes: &[u8]) -> StoreResult<ImportReport> {
        let data: serde_json::Value =
            serde_json::from_slice(bytes).map_err(StoreError::UnreadableImport)?;

        let mut report = ImportReport::default();
        if let Some(notes) = import_field(&data, "notes") {
            self.notes = notes;
            report.notes = true;
        }
        if let Some(photos) = import_field(&data, "photos") {
            self.photos = photos;
            report.photos = true;
        }
        if let Some(timeline) = import_field(&data, "timeline") {
            self.timeline = timeline;
            report.timeline = true;
        }
        if let Some(theme) = import_field(&data, "theme") {
            self.theme = theme;
            report.theme = true;
        }

        if report.any_applied() {
            self.observe_all_ids();
            self.persist()?;
        }
        info!(
            "event=import module=store status=ok notes={} photos={} timeline={} theme={}",
            report.notes, report.photos, report.timeline, report.theme
        );
        Ok(report)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns a copy of the complete current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            notes: self.notes.clone(),
            photos: self.photos.clone(),
            timeline: self.timeline.clone(),
            theme: self.theme,
        }
    }

    fn read_collection<T: DeserializeOwned>(&self, key: EntryKey) -> StoreResult<Vec<T>> {
        let Some(raw) = self.repo.read_entry(key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                warn!(
                    "event=hydrate module=store status=recovered entry={} error={err}",
                    key.as_str()
                );
                Ok(Vec::new())
            }
        }
    }

    fn write_collection<T: Serialize>(&self, key: EntryKey, items: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string(items).map_err(StoreError::Serialize)?;
        self.repo.write_entry(key, &raw)?;
        Ok(())
    }

    /// Advances the id generator past every id currently held, so fresh
    /// allocations cannot collide with hydrated or imported items.
    fn observe_all_ids(&mut self) {
        for note in &self.notes {
            self.ids.observe(note.id);
        }
        for photo in &self.photos {
            self.ids.observe(photo.id);
        }
        for entry in &self.timeline {
            self.ids.observe(entry.id);
        }
    }
}

fn import_field<T: DeserializeOwned>(data: &serde_json::Value, field: &str) -> Option<T> {
    let value = data.get(field)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!("event=import module=store status=skipped field={field} error={err}");
            None
        }
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: ItemId, id_of: impl Fn(&T) -> ItemId) -> bool {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    items.len() != before
}

fn apply_order<T>(items: &mut Vec<T>, new_order: &[ItemId], id_of: impl Fn(&T) -> ItemId) -> bool {
    if new_order.len() != items.len() {
        return false;
    }
    let requested: HashSet<ItemId> = new_order.iter().copied().collect();
    if requested.len() != new_order.len() {
        return false;
    }
    if items.iter().any(|item| !requested.contains(&id_of(item))) {
        return false;
    }

    let mut by_id: HashMap<ItemId, T> = items.drain(..).map(|item| (id_of(&item), item)).collect();
    items.extend(new_order.iter().filter_map(|id| by_id.remove(id)));
    debug_assert!(by_id.is_empty());
    true
}
