use crate::state::data::{CatalogEntry, CatalogKind, ThumbnailRef};

/// Image formats offered as gobo and reflector thumbnails
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "tga"];

/// Panorama formats offered in the HDRI catalog
pub const HDRI_EXTENSIONS: &[&str] = &["hdr", "exr", "jpg", "jpeg", "png", "webp"];

/// Generic host icon shown for an HDRI whose preview could not be loaded
pub const HDRI_PLACEHOLDER_ICON: &str = "WORLD_DATA";

/// How an entry id is derived from its file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// `softbox.png` -> `softbox`
    Stem,
    /// `studio.hdr` -> `studio.hdr`, so `studio.exr` stays distinct
    FileName,
}

/// What happens to a file whose thumbnail fails to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailurePolicy {
    Drop,
    /// Keep the entry, showing this generic icon instead
    Placeholder(&'static str),
}

/// Everything that differs between the three catalogs
#[derive(Debug, Clone, Copy)]
pub struct CatalogPolicy {
    pub kind: CatalogKind,
    pub extensions: &'static [&'static str],
    pub id_policy: IdPolicy,
    pub on_load_failure: LoadFailurePolicy,
    /// Entries shown when a scan yields nothing
    pub fallback: fn() -> Vec<CatalogEntry>,
}

impl CatalogPolicy {
    pub fn for_kind(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Gobo => CatalogPolicy {
                kind,
                extensions: IMAGE_EXTENSIONS,
                id_policy: IdPolicy::Stem,
                on_load_failure: LoadFailurePolicy::Drop,
                fallback: gobo_fallback,
            },
            CatalogKind::Hdri => CatalogPolicy {
                kind,
                extensions: HDRI_EXTENSIONS,
                id_policy: IdPolicy::FileName,
                on_load_failure: LoadFailurePolicy::Placeholder(HDRI_PLACEHOLDER_ICON),
                fallback: hdri_fallback,
            },
            CatalogKind::Reflector => CatalogPolicy {
                kind,
                extensions: IMAGE_EXTENSIONS,
                id_policy: IdPolicy::Stem,
                on_load_failure: LoadFailurePolicy::Drop,
                fallback: reflector_defaults,
            },
        }
    }

    /// Case-insensitive extension check
    pub fn accepts(&self, file_name: &str) -> bool {
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                let ext = ext.to_lowercase();
                self.extensions.contains(&ext.as_str())
            }
            _ => false,
        }
    }

    pub fn entry_id(&self, file_name: &str) -> String {
        match self.id_policy {
            IdPolicy::Stem => file_stem(file_name).to_string(),
            IdPolicy::FileName => file_name.to_string(),
        }
    }
}

/// Everything before the last dot
pub fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

pub fn gobo_fallback() -> Vec<CatalogEntry> {
    vec![CatalogEntry::sentinel("No Textures", "Add textures")]
}

pub fn hdri_fallback() -> Vec<CatalogEntry> {
    vec![CatalogEntry::sentinel(
        "No HDRIs",
        "Add HDRIs to textures/hdri folder",
    )]
}

/// The static reflector menu used whenever no reflector icons exist
pub fn reflector_defaults() -> Vec<CatalogEntry> {
    [
        ("SILVER", "Silver", "Silver reflector", "PLAY_REVERSE"),
        ("GOLD", "Gold", "Gold reflector", "PLAY"),
        ("WHITE", "White", "White reflector", "SHADING_BBOX"),
        ("BLACK", "Black", "Black flag", "SHADING_BBOX"),
    ]
    .into_iter()
    .enumerate()
    .map(|(sort_index, (id, label, description, icon))| CatalogEntry {
        id: id.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        thumbnail: ThumbnailRef::Icon(icon.to_string()),
        sort_index,
    })
    .collect()
}
