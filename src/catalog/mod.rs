//! Preview catalog construction
//!
//! A catalog is rebuilt wholesale from one directory:
//! 1. Missing directory -> fallback entries
//! 2. Non-recursive listing filtered by extension (case-insensitive)
//! 3. Case-insensitive sort
//! 4. One thumbnail load per file; failures are dropped or degraded
//! 5. Nothing left -> fallback entries

pub mod policy;

use crate::host::{AssetHost, HostError};
use crate::state::data::{Catalog, CatalogEntry, CatalogKind, ThumbnailRef};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub use policy::{CatalogPolicy, IdPolicy, LoadFailurePolicy};

/// Fatal scan failures. Missing directories and unreadable images are not errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to scan {kind} directory {path}: {source}")]
    Scan {
        kind: CatalogKind,
        path: PathBuf,
        #[source]
        source: HostError,
    },
}

/// Scan `directory` and build a catalog following `policy`.
pub fn build_catalog(
    host: &mut impl AssetHost,
    directory: &Path,
    policy: &CatalogPolicy,
) -> Result<Catalog, CatalogError> {
    let kind = policy.kind;

    let Some(names) = host
        .list_directory(directory)
        .map_err(|source| CatalogError::Scan {
            kind,
            path: directory.to_path_buf(),
            source,
        })?
    else {
        log::info!("{} directory {} not found", kind, directory.display());
        return Ok(Catalog::fallback(kind, (policy.fallback)()));
    };

    let mut files: Vec<String> = names
        .into_iter()
        .filter(|name| policy.accepts(name))
        .collect();
    files.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));

    log::info!("Found {} {} files in {}", files.len(), kind, directory.display());

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(files.len());

    for file_name in files {
        let id = policy.entry_id(&file_name);
        if seen.contains(&id) {
            log::warn!(
                "Skipping {} '{}': id '{}' already taken by an earlier file",
                kind,
                file_name,
                id
            );
            continue;
        }

        let path = directory.join(&file_name);
        let thumbnail = match host.load_thumbnail(kind, &id, &path) {
            Ok(handle) => ThumbnailRef::Handle(handle),
            Err(err) => match policy.on_load_failure {
                LoadFailurePolicy::Drop => {
                    log::warn!("Failed to load {} '{}': {}", kind, file_name, err);
                    continue;
                }
                LoadFailurePolicy::Placeholder(icon) => {
                    log::warn!(
                        "Failed to load {} '{}', using placeholder icon: {}",
                        kind,
                        file_name,
                        err
                    );
                    ThumbnailRef::Icon(icon.to_string())
                }
            },
        };

        // Claimed only once an entry exists, so a dropped file frees its id
        seen.insert(id.clone());
        entries.push(CatalogEntry {
            id,
            label: policy::file_stem(&file_name).to_string(),
            description: file_name,
            thumbnail,
            // Renumbered densely by Catalog::scanned
            sort_index: entries.len(),
        });
    }

    match Catalog::scanned(kind, entries) {
        Some(catalog) => {
            log::info!("Loaded {} {} previews", catalog.len(), kind);
            Ok(catalog)
        }
        None => {
            log::info!("No usable {} files, using fallback entries", kind);
            Ok(Catalog::fallback(kind, (policy.fallback)()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::LoadError;
    use crate::state::data::{CatalogSource, ThumbnailHandle, NONE_ID};
    use crate::texture::RasterImage;

    /// In-memory host: a fixed listing and a set of files that refuse to load
    #[derive(Default)]
    struct FakeHost {
        files: Option<Vec<&'static str>>,
        broken: Vec<&'static str>,
        unlistable: bool,
        next_id: u64,
    }

    impl AssetHost for FakeHost {
        fn list_directory(&self, dir: &Path) -> Result<Option<Vec<String>>, HostError> {
            if self.unlistable {
                return Err(HostError::NotADirectory {
                    path: dir.to_path_buf(),
                });
            }
            Ok(self
                .files
                .as_ref()
                .map(|files| files.iter().map(|f| f.to_string()).collect()))
        }

        fn ensure_directory(&mut self, _dir: &Path) -> Result<(), HostError> {
            Ok(())
        }

        fn write_image(&mut self, _image: &RasterImage, _path: &Path) -> Result<(), HostError> {
            Ok(())
        }

        fn load_thumbnail(
            &mut self,
            _collection: CatalogKind,
            _key: &str,
            path: &Path,
        ) -> Result<ThumbnailHandle, LoadError> {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            if self.broken.contains(&name.as_str()) {
                return Err(LoadError::Rejected(format!("cannot read {name}")));
            }
            self.next_id += 1;
            Ok(ThumbnailHandle {
                id: self.next_id,
                path: None,
            })
        }

        fn release_thumbnails(&mut self, _collection: CatalogKind) {}
    }

    fn host(files: &[&'static str]) -> FakeHost {
        FakeHost {
            files: Some(files.to_vec()),
            ..Default::default()
        }
    }

    fn build(host: &mut FakeHost, kind: CatalogKind) -> Catalog {
        build_catalog(host, Path::new("/assets"), &CatalogPolicy::for_kind(kind)).unwrap()
    }

    #[test]
    fn test_case_insensitive_order_and_stem_ids() {
        let mut host = host(&["b.png", "A.PNG", "c.jpg"]);
        let catalog = build(&mut host, CatalogKind::Gobo);

        let rows: Vec<(&str, &str, usize)> = catalog
            .entries()
            .iter()
            .map(|e| (e.id.as_str(), e.description.as_str(), e.sort_index))
            .collect();
        assert_eq!(rows, vec![("A", "A.PNG", 0), ("b", "b.png", 1), ("c", "c.jpg", 2)]);
        assert_eq!(catalog.source(), CatalogSource::Scanned);
    }

    #[test]
    fn test_extension_filter() {
        let mut gobo_host = host(&["foo.txt", "bar.png"]);
        assert_eq!(build(&mut gobo_host, CatalogKind::Gobo).ids(), vec!["bar"]);

        let mut hdri_host = host(&["foo.HDR"]);
        assert_eq!(build(&mut hdri_host, CatalogKind::Hdri).ids(), vec!["foo.HDR"]);
    }

    #[test]
    fn test_hdri_ids_keep_extension() {
        let mut host = host(&["studio.hdr", "studio.exr"]);
        let catalog = build(&mut host, CatalogKind::Hdri);
        assert_eq!(catalog.ids(), vec!["studio.exr", "studio.hdr"]);
        assert!(catalog.entries().iter().all(|e| e.label == "studio"));
    }

    #[test]
    fn test_stem_collision_keeps_first() {
        let mut host = host(&["window.png", "window.jpg"]);
        let catalog = build(&mut host, CatalogKind::Gobo);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].description, "window.jpg");
    }

    #[test]
    fn test_stem_collision_falls_through_to_loadable_sibling() {
        let mut host = host(&["window.png", "window.jpg"]);
        host.broken = vec!["window.jpg"];
        let catalog = build(&mut host, CatalogKind::Gobo);
        assert_eq!(catalog.ids(), vec!["window"]);
        assert_eq!(catalog.entries()[0].description, "window.png");
        assert_eq!(catalog.source(), CatalogSource::Scanned);
    }

    #[test]
    fn test_unlistable_directory_is_a_scan_error() {
        let mut host = FakeHost {
            unlistable: true,
            ..Default::default()
        };
        let result = build_catalog(
            &mut host,
            Path::new("/assets"),
            &CatalogPolicy::for_kind(CatalogKind::Hdri),
        );
        assert!(matches!(
            result,
            Err(CatalogError::Scan {
                kind: CatalogKind::Hdri,
                source: HostError::NotADirectory { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_failed_gobo_is_dropped_and_indices_dense() {
        let mut host = host(&["a.png", "b.png", "c.png"]);
        host.broken = vec!["b.png"];
        let catalog = build(&mut host, CatalogKind::Gobo);

        assert_eq!(catalog.ids(), vec!["a", "c"]);
        let indices: Vec<usize> = catalog.entries().iter().map(|e| e.sort_index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_failed_hdri_degrades_to_placeholder() {
        let mut host = host(&["dusk.exr", "noon.hdr"]);
        host.broken = vec!["dusk.exr"];
        let catalog = build(&mut host, CatalogKind::Hdri);

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.entries()[0].thumbnail,
            ThumbnailRef::Icon(policy::HDRI_PLACEHOLDER_ICON.to_string())
        );
        assert!(matches!(catalog.entries()[1].thumbnail, ThumbnailRef::Handle(_)));
    }

    #[test]
    fn test_missing_directory_fallbacks() {
        for kind in [CatalogKind::Gobo, CatalogKind::Hdri] {
            let mut host = FakeHost::default();
            let catalog = build(&mut host, kind);
            assert_eq!(catalog.ids(), vec![NONE_ID]);
            assert_eq!(catalog.source(), CatalogSource::Fallback);
        }

        let mut host = FakeHost::default();
        let catalog = build(&mut host, CatalogKind::Reflector);
        assert_eq!(catalog.ids(), vec!["SILVER", "GOLD", "WHITE", "BLACK"]);
    }

    #[test]
    fn test_all_failed_reflectors_fall_back_to_menu() {
        let mut host = host(&["chrome.png"]);
        host.broken = vec!["chrome.png"];
        let catalog = build(&mut host, CatalogKind::Reflector);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.source(), CatalogSource::Fallback);
    }

    #[test]
    fn test_rebuild_is_stable() {
        let mut host = host(&["Zebra.png", "apple.png", "Mango.webp"]);
        let first = build(&mut host, CatalogKind::Gobo);
        let second = build(&mut host, CatalogKind::Gobo);

        let shape = |c: &Catalog| -> Vec<(String, String, usize)> {
            c.entries()
                .iter()
                .map(|e| (e.id.clone(), e.label.clone(), e.sort_index))
                .collect()
        };
        assert_eq!(shape(&first), shape(&second));
        assert_eq!(first.ids(), vec!["apple", "Mango", "Zebra"]);
    }
}
