//! Stamp collection persistence.
//!
//! The whole collection is one serialized JSON document under a fixed storage
//! key, rewritten after every mutation so the at-rest state always mirrors the
//! in-memory state. A missing document is an empty collection; an unparseable
//! one is recovered as empty with a logged warning, never a fatal error.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::constants::STORAGE_KEY;

/// A generated stamp. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stamp {
    /// Unique identifier assigned at creation.
    pub id: String,
    /// The user-supplied theme, trimmed.
    pub theme: String,
    /// Self-contained data URI; renders without any external fetch.
    pub image_url: String,
    /// Creation time in epoch milliseconds; also defines display order.
    pub timestamp: i64,
}

impl Stamp {
    /// Creates a stamp for a freshly generated image.
    pub fn new(theme: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            theme: theme.into(),
            image_url: image_url.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Download filename derived from the theme: lowercased, whitespace
    /// collapsed to hyphens, `.png` suffix.
    pub fn download_filename(&self) -> String {
        let lowered = self.theme.to_lowercase();
        let slug = lowered.split_whitespace().collect::<Vec<_>>().join("-");
        format!("uae-stamp-{slug}.png")
    }

    /// Creation date shown on stamp cards.
    pub fn created_label(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
            .map(|when| when.format("%-d %b %Y").to_string())
            .unwrap_or_default()
    }
}

/// Ordered, persisted collection of stamps, newest first.
#[derive(Debug)]
pub struct CollectionStore {
    path: PathBuf,
    stamps: Vec<Stamp>,
}

impl CollectionStore {
    /// Opens the collection under `data_dir`, creating the directory if
    /// needed and loading whatever document is already there.
    pub fn open(data_dir: &Path) -> Result<Self, io::Error> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(format!("{STORAGE_KEY}.json"));
        let stamps = load_document(&path);
        Ok(Self { path, stamps })
    }

    /// The stamps, newest first.
    pub fn stamps(&self) -> &[Stamp] {
        &self.stamps
    }

    /// Looks a stamp up by identifier.
    pub fn get(&self, id: &str) -> Option<&Stamp> {
        self.stamps.iter().find(|stamp| stamp.id == id)
    }

    /// Number of stamps in the collection.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Prepends a stamp, then persists.
    pub fn add(&mut self, stamp: Stamp) -> Result<(), io::Error> {
        self.stamps.insert(0, stamp);
        self.save()
    }

    /// Removes the stamp with the matching identifier if present (no-op
    /// otherwise), then persists.
    pub fn delete(&mut self, id: &str) -> Result<(), io::Error> {
        self.stamps.retain(|stamp| stamp.id != id);
        self.save()
    }

    /// Clears the collection entirely, then persists.
    pub fn reset(&mut self) -> Result<(), io::Error> {
        self.stamps.clear();
        self.save()
    }

    fn save(&self) -> Result<(), io::Error> {
        let document = serde_json::to_vec(&self.stamps).map_err(io::Error::other)?;
        fs::write(&self.path, document)
    }
}

fn load_document(path: &Path) -> Vec<Stamp> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("No stamp collection at {}, starting empty", path.display());
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "Failed to read stamp collection at {}: {err}, starting empty",
                path.display()
            );
            return Vec::new();
        }
    };
    match serde_json::from_slice(&raw) {
        Ok(stamps) => stamps,
        Err(err) => {
            warn!(
                "Failed to parse stamp collection at {}: {err}, starting empty",
                path.display()
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store(dir: &tempfile::TempDir) -> CollectionStore {
        CollectionStore::open(dir.path()).expect("open store")
    }

    #[test]
    fn missing_document_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_document_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(format!("{STORAGE_KEY}.json"));
        fs::write(&path, "not-json").expect("write corrupt document");

        let store = open_store(&dir);
        assert!(store.is_empty());
    }

    #[test]
    fn save_load_round_trip_preserves_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = open_store(&dir);
        store
            .add(Stamp::new("Golden Camel", "data:image/png;base64,QQ=="))
            .expect("add first");
        store
            .add(Stamp::new("Dhow Boat", "data:image/png;base64,Qg=="))
            .expect("add second");
        let saved = store.stamps().to_vec();

        let reloaded = open_store(&dir);
        assert_eq!(reloaded.stamps(), saved.as_slice());
        // Newest first.
        assert_eq!(reloaded.stamps()[0].theme, "Dhow Boat");
    }

    #[test]
    fn delete_removes_only_the_matching_stamp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = open_store(&dir);
        for theme in ["one", "two", "three"] {
            store
                .add(Stamp::new(theme, "data:image/png;base64,QQ=="))
                .expect("add stamp");
        }
        let middle_id = store.stamps()[1].id.clone();

        store.delete(&middle_id).expect("delete middle");

        assert_eq!(store.len(), 2);
        assert_eq!(store.stamps()[0].theme, "three");
        assert_eq!(store.stamps()[1].theme, "one");
    }

    #[test]
    fn delete_of_unknown_id_is_a_noop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = open_store(&dir);
        store
            .add(Stamp::new("one", "data:image/png;base64,QQ=="))
            .expect("add stamp");

        store.delete("no-such-id").expect("delete unknown");

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reset_empties_collection_and_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = open_store(&dir);
        store
            .add(Stamp::new("one", "data:image/png;base64,QQ=="))
            .expect("add stamp");

        store.reset().expect("reset");

        assert!(store.is_empty());
        assert!(open_store(&dir).is_empty());
    }

    #[test]
    fn stamp_ids_are_unique() {
        let a = Stamp::new("one", "data:image/png;base64,QQ==");
        let b = Stamp::new("one", "data:image/png;base64,QQ==");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn download_filename_slugs_the_theme() {
        let stamp = Stamp::new("Golden  Camel Rider", "data:image/png;base64,QQ==");
        assert_eq!(stamp.download_filename(), "uae-stamp-golden-camel-rider.png");
    }
}
