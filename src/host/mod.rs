//! Host capability interface
//!
//! The catalog builder and the texture synthesizer never touch the
//! filesystem or an image decoder directly; they go through `AssetHost`.
//! `FsHost` is the real implementation, tests substitute their own.

pub mod thumbnail;

use crate::state::data::{CatalogKind, ThumbnailHandle};
use crate::texture::RasterImage;
use image::{buffer::ConvertBuffer, ImageBuffer, ImageFormat, Rgba};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use thumbnail::{LoadError, ThumbnailCache};

/// Misconfiguration-class failures: surfaced to the caller, never defaulted
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("failed to list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to inspect {path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a directory")]
    NotADirectory { path: PathBuf },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("raster of {width}x{height} does not match its pixel buffer")]
    BadRaster { width: u32, height: u32 },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub trait AssetHost {
    /// File names directly inside `dir`, or `None` if `dir` does not exist
    fn list_directory(&self, dir: &Path) -> Result<Option<Vec<String>>, HostError>;

    fn ensure_directory(&mut self, dir: &Path) -> Result<(), HostError>;

    /// Persist `image` losslessly at `path`
    fn write_image(&mut self, image: &RasterImage, path: &Path) -> Result<(), HostError>;

    fn load_thumbnail(
        &mut self,
        collection: CatalogKind,
        key: &str,
        path: &Path,
    ) -> Result<ThumbnailHandle, LoadError>;

    /// Forget every thumbnail acquired for `collection`
    fn release_thumbnails(&mut self, collection: CatalogKind);
}

/// `AssetHost` backed by the local filesystem and the `image` crate
#[derive(Debug)]
pub struct FsHost {
    thumbnails: ThumbnailCache,
}

impl FsHost {
    pub fn new(thumbnail_cache_dir: impl Into<PathBuf>, thumbnail_size: u32) -> Self {
        FsHost {
            thumbnails: ThumbnailCache::new(thumbnail_cache_dir, thumbnail_size),
        }
    }

    pub fn thumbnails(&self) -> &ThumbnailCache {
        &self.thumbnails
    }
}

impl AssetHost for FsHost {
    fn list_directory(&self, dir: &Path) -> Result<Option<Vec<String>>, HostError> {
        match std::fs::metadata(dir) {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(HostError::Inspect {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            Ok(meta) if !meta.is_dir() => {
                return Err(HostError::NotADirectory {
                    path: dir.to_path_buf(),
                })
            }
            Ok(_) => {}
        }

        let mut names = Vec::new();
        // Links are not followed here: a dangling link is still a name, and
        // its load fails on its own later
        let walker = WalkDir::new(dir).min_depth(1).max_depth(1);
        for entry in walker {
            let entry = entry.map_err(|source| HostError::List {
                path: dir.to_path_buf(),
                source,
            })?;

            // Only files (not directories, nor links to them)
            let file_type = entry.file_type();
            if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().to_string());
        }

        Ok(Some(names))
    }

    fn ensure_directory(&mut self, dir: &Path) -> Result<(), HostError> {
        std::fs::create_dir_all(dir).map_err(|source| HostError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn write_image(&mut self, image: &RasterImage, path: &Path) -> Result<(), HostError> {
        let buffer: ImageBuffer<Rgba<f32>, _> =
            ImageBuffer::from_raw(image.width(), image.height(), image.to_rgba_samples()).ok_or(
                HostError::BadRaster {
                    width: image.width(),
                    height: image.height(),
                },
            )?;

        let buffer: ImageBuffer<Rgba<u8>, _> = buffer.convert();

        buffer
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| HostError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }

    fn load_thumbnail(
        &mut self,
        collection: CatalogKind,
        key: &str,
        path: &Path,
    ) -> Result<ThumbnailHandle, LoadError> {
        self.thumbnails.load(collection, key, path)
    }

    fn release_thumbnails(&mut self, collection: CatalogKind) {
        self.thumbnails.release(collection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_missing_directory_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let host = FsHost::new(dir.path().join("cache"), 64);
        assert!(host.list_directory(&dir.path().join("nope")).unwrap().is_none());
    }

    #[test]
    fn test_list_file_in_place_of_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hdri");
        std::fs::write(&file, b"x").unwrap();

        let host = FsHost::new(dir.path().join("cache"), 64);
        let result = host.list_directory(&file);
        assert!(matches!(result, Err(HostError::NotADirectory { .. })));
    }

    #[test]
    fn test_list_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();
        std::fs::write(dir.path().join("nested.png").join("deep.png"), b"x").unwrap();

        let host = FsHost::new(dir.path().join("cache"), 64);
        let names = host.list_directory(dir.path()).unwrap().unwrap();
        assert_eq!(names, vec!["a.png".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_keeps_dangling_links_and_skips_linked_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.png"), dir.path().join("b.png")).unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("linked.png")).unwrap();

        let host = FsHost::new(dir.path().join("cache"), 64);
        let mut names = host.list_directory(dir.path()).unwrap().unwrap();
        names.sort();
        assert_eq!(names, vec!["a.png".to_string(), "b.png".to_string()]);
    }

    #[test]
    fn test_write_image_round_trips_through_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = FsHost::new(dir.path().join("cache"), 64);
        let raster = RasterImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                [1.0, 1.0, 1.0, 1.0]
            } else {
                [0.0, 0.0, 0.0, 1.0]
            }
        });

        let path = dir.path().join("out.png");
        host.write_image(&raster, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 4));
        assert_eq!(decoded.get_pixel(0, 3).0, [255, 255, 255, 255]);
        assert_eq!(decoded.get_pixel(3, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_write_image_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = FsHost::new(dir.path().join("cache"), 64);
        let raster = RasterImage::from_fn(2, 2, |_, _| [1.0; 4]);
        let result = host.write_image(&raster, &dir.path().join("missing").join("out.png"));
        assert!(matches!(result, Err(HostError::Encode { .. })));
    }
}
