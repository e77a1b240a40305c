//! Shared data structures for catalog state
//!
//! These structs represent the data model that flows between
//! the catalog builder and whatever renders the selectable lists.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Id used by sentinel entries that stand in for "nothing to choose".
pub const NONE_ID: &str = "NONE";

/// Which of the three preview collections a catalog belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Gobo,
    Hdri,
    Reflector,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [CatalogKind::Gobo, CatalogKind::Hdri, CatalogKind::Reflector];

    /// Short name, also used as the thumbnail cache sub-directory
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogKind::Gobo => "gobo",
            CatalogKind::Hdri => "hdri",
            CatalogKind::Reflector => "reflector",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A thumbnail acquired from the host for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThumbnailHandle {
    /// Opaque numeric id handed out by the host
    pub id: u64,
    /// Where the host keeps the thumbnail pixels, if it keeps them on disk
    pub path: Option<PathBuf>,
}

/// What the UI should draw next to an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ThumbnailRef {
    /// No picture at all (sentinel entries)
    None,
    /// A thumbnail loaded from the entry's own file
    Handle(ThumbnailHandle),
    /// A generic icon name understood by the host
    Icon(String),
}

/// Represents a single selectable item in a catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Unique within its catalog; this is what a selection yields
    pub id: String,
    /// Display name (file stem for scanned entries)
    pub label: String,
    /// Tooltip text (original file name for scanned entries)
    pub description: String,
    pub thumbnail: ThumbnailRef,
    /// Dense 0-based display position
    pub sort_index: usize,
}

impl CatalogEntry {
    pub fn sentinel(label: &str, description: &str) -> Self {
        CatalogEntry {
            id: NONE_ID.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            thumbnail: ThumbnailRef::None,
            sort_index: 0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == NONE_ID
    }
}

/// Where the entries of a catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Built from files found on disk
    Scanned,
    /// Nothing usable on disk; static fallback entries
    Fallback,
    /// Not refreshed yet; placeholder entries
    Placeholder,
}

/// Ordered, never-empty list of entries for one collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    kind: CatalogKind,
    source: CatalogSource,
    built_at: DateTime<Utc>,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Wrap scanned entries, renumbering `sort_index` densely.
    ///
    /// Returns `None` for an empty list so callers fall back explicitly.
    pub fn scanned(kind: CatalogKind, entries: Vec<CatalogEntry>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        Some(Catalog {
            kind,
            source: CatalogSource::Scanned,
            built_at: Utc::now(),
            entries: renumber(entries),
        })
    }

    /// Fallback entries must be non-empty; an empty list becomes one bare sentinel.
    pub fn fallback(kind: CatalogKind, entries: Vec<CatalogEntry>) -> Self {
        Self::with_source(kind, CatalogSource::Fallback, entries)
    }

    pub fn placeholder(kind: CatalogKind, entries: Vec<CatalogEntry>) -> Self {
        Self::with_source(kind, CatalogSource::Placeholder, entries)
    }

    fn with_source(kind: CatalogKind, source: CatalogSource, entries: Vec<CatalogEntry>) -> Self {
        let entries = if entries.is_empty() {
            vec![CatalogEntry::sentinel("None", "")]
        } else {
            renumber(entries)
        };
        Catalog {
            kind,
            source,
            built_at: Utc::now(),
            entries,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.id.as_str()).collect()
    }
}

fn renumber(mut entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.sort_index = index;
    }
    entries
}
