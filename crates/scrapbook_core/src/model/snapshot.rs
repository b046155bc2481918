//! Snapshot record: the complete serializable scrapbook state.
//!
//! One shape serves both the local persistence layer and the export file,
//! so anything that survives a reload also survives an export/import
//! round-trip.

use crate::model::item::{Note, Photo, Theme, TimelineEntry};
use serde::{Deserialize, Serialize};

/// Conventional file name for an exported snapshot.
pub const EXPORT_FILE_NAME: &str = "love-scrapbook.json";

/// Complete scrapbook state: three ordered collections plus the theme.
///
/// Fields default independently on deserialization, which is what allows a
/// hand-trimmed import file to carry only a subset of the state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::Snapshot;
    use crate::model::item::{Note, Theme};

    #[test]
    fn snapshot_serializes_with_expected_field_names() {
        let snapshot = Snapshot {
            notes: vec![Note {
                id: 42,
                text: "hello".to_string(),
            }],
            ..Snapshot::default()
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["notes"][0]["id"], 42);
        assert_eq!(json["notes"][0]["text"], "hello");
        assert_eq!(json["theme"], "romantic");
        assert!(json["photos"].as_array().unwrap().is_empty());
        assert!(json["timeline"].as_array().unwrap().is_empty());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(snapshot.theme, Theme::Dark);
        assert!(snapshot.notes.is_empty());
        assert!(snapshot.photos.is_empty());
        assert!(snapshot.timeline.is_empty());
    }
}
