//! Scrapbook item records and field validation helpers.
//!
//! # Responsibility
//! - Define the three collection records and the theme setting.
//! - Keep defaulting rules (`"No caption"`, `"No description"`) in one place.
//!
//! # Invariants
//! - `Photo::src` is always a complete `data:` URI.
//! - `TimelineEntry::date` is a `YYYY-MM-DD` calendar string on creation;
//!   hydrated data is taken as-is.

use base64ct::{Base64, Encoding};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Stable integer identifier for every scrapbook item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = i64;

/// Caption applied when a photo is added without one.
pub const DEFAULT_PHOTO_CAPTION: &str = "No caption";

/// Description applied when a timeline entry is added without one.
pub const DEFAULT_TIMELINE_DESC: &str = "No description";

/// Fallback media type when the host cannot name one for an image.
pub const FALLBACK_IMAGE_MIME: &str = "application/octet-stream";

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("date regex is valid"));

/// Free-form text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: ItemId,
    pub text: String,
}

/// Self-contained photo record.
///
/// The image content lives inline in `src` so a persisted or exported photo
/// never depends on the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: ItemId,
    /// Complete `data:<mime>;base64,<payload>` URI.
    pub src: String,
    pub caption: String,
}

/// Dated milestone on the journey timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: ItemId,
    /// `YYYY-MM-DD` calendar date string.
    pub date: String,
    pub title: String,
    pub desc: String,
}

/// Visual theme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Romantic,
    Light,
    Dark,
}

impl Theme {
    /// Stable lowercase name used for the persisted `theme` entry.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Romantic => "romantic",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a persisted theme name. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "romantic" => Some(Self::Romantic),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Raw image bytes handed over by the host's file-reading layer.
///
/// Reading the file (picker, drag-drop, async decode) is host territory;
/// the store only ever sees bytes that were read successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Media type reported by the host, e.g. `image/png`. May be empty.
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }
}

impl Photo {
    /// Builds a photo by embedding the image bytes as a base64 data URI.
    pub fn from_image(id: ItemId, image: &ImageFile, caption: impl Into<String>) -> Self {
        let mime = if image.mime.trim().is_empty() {
            FALLBACK_IMAGE_MIME
        } else {
            image.mime.trim()
        };
        let payload = Base64::encode_string(&image.bytes);
        Self {
            id,
            src: format!("data:{mime};base64,{payload}"),
            caption: caption.into(),
        }
    }
}

/// Checks that a date string has the `YYYY-MM-DD` shape with a plausible
/// month and day.
///
/// Calendar-exact validation (leap years, 30-day months) is intentionally
/// not performed; the host's date input already constrains that.
pub fn is_valid_date(value: &str) -> bool {
    let Some(captures) = DATE_SHAPE.captures(value) else {
        return false;
    };
    let month: u32 = captures[2].parse().unwrap_or(0);
    let day: u32 = captures[3].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Applies `value || default` semantics for optional text fields: an absent
/// or empty value falls back to the default.
pub fn text_or_default(value: Option<&str>, default: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => default.to_string(),
    }
}
