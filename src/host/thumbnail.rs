use crate::state::data::{CatalogKind, ThumbnailHandle};
use image::{imageops::FilterType, DynamicImage, ImageFormat, ImageReader};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default edge length of generated thumbnails (square bound)
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 128;

/// Why a single file could not be turned into a thumbnail.
/// Recoverable: the catalog builder skips or degrades the entry.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to prepare thumbnail cache {path}: {source}")]
    CacheDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to save thumbnail {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{0}")]
    Rejected(String),
}

/// Disk-backed thumbnail store, one sub-directory per collection.
///
/// Each loaded key gets a numeric handle; handles stay valid until the
/// owning collection is released.
#[derive(Debug)]
pub struct ThumbnailCache {
    cache_dir: PathBuf,
    size: u32,
    next_id: u64,
    loaded: HashMap<CatalogKind, HashMap<String, ThumbnailHandle>>,
}

impl ThumbnailCache {
    pub fn new(cache_dir: impl Into<PathBuf>, size: u32) -> Self {
        ThumbnailCache {
            cache_dir: cache_dir.into(),
            size,
            // 0 is reserved for "no thumbnail"
            next_id: 1,
            loaded: HashMap::new(),
        }
    }

    /// Directory holding one collection's thumbnails
    pub fn collection_dir(&self, collection: CatalogKind) -> PathBuf {
        self.cache_dir.join(collection.as_str())
    }

    /// Get the thumbnail path for a key (doesn't generate, just returns the expected path)
    pub fn thumbnail_path(&self, collection: CatalogKind, key: &str) -> PathBuf {
        self.collection_dir(collection).join(format!("{key}.png"))
    }

    pub fn get(&self, collection: CatalogKind, key: &str) -> Option<&ThumbnailHandle> {
        self.loaded.get(&collection)?.get(key)
    }

    pub fn loaded_count(&self, collection: CatalogKind) -> usize {
        self.loaded.get(&collection).map_or(0, HashMap::len)
    }

    /// Decode `source`, shrink it to fit the cache size and store it as PNG.
    ///
    /// Loading a key that is already held returns the existing handle.
    pub fn load(
        &mut self,
        collection: CatalogKind,
        key: &str,
        source: &Path,
    ) -> Result<ThumbnailHandle, LoadError> {
        if let Some(handle) = self.get(collection, key) {
            return Ok(handle.clone());
        }

        // Sniff the content; the extension only decides catalog membership
        let img = ImageReader::open(source)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|err| LoadError::Read {
                path: source.to_path_buf(),
                source: err,
            })?
            .decode()
            .map_err(|err| LoadError::Decode {
                path: source.to_path_buf(),
                source: err,
            })?;

        // Resize to thumbnail size; HDR/EXR sources are tone-clamped to 8 bit
        let thumbnail = img.resize(self.size, self.size, FilterType::Lanczos3);
        let thumbnail = DynamicImage::ImageRgba8(thumbnail.to_rgba8());

        let dir = self.collection_dir(collection);
        fs::create_dir_all(&dir).map_err(|err| LoadError::CacheDir {
            path: dir.clone(),
            source: err,
        })?;

        let thumbnail_path = self.thumbnail_path(collection, key);
        thumbnail
            .save_with_format(&thumbnail_path, ImageFormat::Png)
            .map_err(|err| LoadError::Save {
                path: thumbnail_path.clone(),
                source: err,
            })?;

        let handle = ThumbnailHandle {
            id: self.next_id,
            path: Some(thumbnail_path),
        };
        self.next_id += 1;

        log::debug!("Generated thumbnail {} for {}", handle.id, source.display());
        self.loaded
            .entry(collection)
            .or_default()
            .insert(key.to_string(), handle.clone());
        Ok(handle)
    }

    /// Drop every handle of one collection. Cached files stay on disk and
    /// are overwritten by the next load.
    pub fn release(&mut self, collection: CatalogKind) {
        if let Some(handles) = self.loaded.remove(&collection) {
            log::debug!("Released {} {} thumbnails", handles.len(), collection);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_test_png(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([200, 100, 50]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_load_shrinks_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("wide.png");
        write_test_png(&source, 256, 64);

        let mut cache = ThumbnailCache::new(dir.path().join("cache"), 32);
        let handle = cache.load(CatalogKind::Gobo, "wide", &source).unwrap();

        let path = handle.path.clone().unwrap();
        assert_eq!(path, dir.path().join("cache").join("gobo").join("wide.png"));
        let thumb = image::open(&path).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (32, 8));

        // Same key again is a cache hit with the same handle
        let again = cache.load(CatalogKind::Gobo, "wide", &source).unwrap();
        assert_eq!(again, handle);
        assert_eq!(cache.loaded_count(CatalogKind::Gobo), 1);
    }

    #[test]
    fn test_handles_are_unique_across_collections() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("card.png");
        write_test_png(&source, 16, 16);

        let mut cache = ThumbnailCache::new(dir.path().join("cache"), 32);
        let gobo = cache.load(CatalogKind::Gobo, "card", &source).unwrap();
        let reflector = cache.load(CatalogKind::Reflector, "card", &source).unwrap();
        assert_ne!(gobo.id, reflector.id);
    }

    #[test]
    fn test_garbage_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.png");
        std::fs::write(&source, b"definitely not a png").unwrap();

        let mut cache = ThumbnailCache::new(dir.path().join("cache"), 32);
        let result = cache.load(CatalogKind::Gobo, "broken", &source);
        assert!(matches!(result, Err(LoadError::Decode { .. })));
        assert_eq!(cache.loaded_count(CatalogKind::Gobo), 0);
    }

    #[test]
    fn test_release_forgets_one_collection() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("card.png");
        write_test_png(&source, 16, 16);

        let mut cache = ThumbnailCache::new(dir.path().join("cache"), 32);
        cache.load(CatalogKind::Gobo, "card", &source).unwrap();
        cache.load(CatalogKind::Hdri, "card.png", &source).unwrap();

        cache.release(CatalogKind::Gobo);
        assert!(cache.get(CatalogKind::Gobo, "card").is_none());
        assert!(cache.get(CatalogKind::Hdri, "card.png").is_some());
    }
}
