use super::data::{Catalog, CatalogEntry, CatalogKind};
use crate::catalog::policy::reflector_defaults;
use crate::catalog::{build_catalog, CatalogError, CatalogPolicy};
use crate::host::{AssetHost, HostError};
use crate::layout::AssetLayout;
use crate::texture::{ensure_default_textures, SynthError};
use std::borrow::Cow;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Synth(#[from] SynthError),
    #[error("failed to create {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: HostError,
    },
}

/// Holds the installed catalog of each collection.
///
/// Starts empty; every refresh replaces a catalog wholesale so readers
/// only ever see a complete one.
#[derive(Debug, Default)]
pub struct CatalogStore {
    gobo: Option<Catalog>,
    hdri: Option<Catalog>,
    reflector: Option<Catalog>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, kind: CatalogKind) -> &mut Option<Catalog> {
        match kind {
            CatalogKind::Gobo => &mut self.gobo,
            CatalogKind::Hdri => &mut self.hdri,
            CatalogKind::Reflector => &mut self.reflector,
        }
    }

    fn slot(&self, kind: CatalogKind) -> Option<&Catalog> {
        match kind {
            CatalogKind::Gobo => self.gobo.as_ref(),
            CatalogKind::Hdri => self.hdri.as_ref(),
            CatalogKind::Reflector => self.reflector.as_ref(),
        }
    }

    pub fn is_loaded(&self, kind: CatalogKind) -> bool {
        self.slot(kind).is_some()
    }

    /// The installed catalog, or a placeholder if `kind` was never refreshed
    pub fn catalog(&self, kind: CatalogKind) -> Cow<'_, Catalog> {
        match self.slot(kind) {
            Some(catalog) => Cow::Borrowed(catalog),
            None => Cow::Owned(Catalog::placeholder(kind, placeholder_entries(kind))),
        }
    }

    /// Rescan one collection and install the result.
    ///
    /// Gobo refresh generates the default textures first if their icon
    /// directory is missing; HDRI and reflector refresh create their
    /// directory so users know where to drop files. A failed scan leaves
    /// the collection unloaded.
    pub fn refresh(
        &mut self,
        host: &mut impl AssetHost,
        layout: &AssetLayout,
        kind: CatalogKind,
    ) -> Result<&Catalog, StoreError> {
        let directory = match kind {
            CatalogKind::Gobo => {
                ensure_default_textures(host, layout)?;
                layout.gobo_icons_dir()
            }
            CatalogKind::Hdri => layout.hdri_dir(),
            CatalogKind::Reflector => layout.reflector_icons_dir(),
        };

        if kind != CatalogKind::Gobo {
            host.ensure_directory(&directory)
                .map_err(|source| StoreError::Directory {
                    path: directory.clone(),
                    source,
                })?;
        }

        host.release_thumbnails(kind);
        let catalog = match build_catalog(host, &directory, &CatalogPolicy::for_kind(kind)) {
            Ok(catalog) => catalog,
            Err(err) => {
                // Its handles are gone, so the old catalog cannot stay installed
                *self.slot_mut(kind) = None;
                return Err(err.into());
            }
        };

        // Previous catalog is dropped here, in one assignment
        Ok(self.slot_mut(kind).insert(catalog))
    }

    /// Refresh gobo, HDRI and reflector catalogs in that order
    pub fn refresh_all(
        &mut self,
        host: &mut impl AssetHost,
        layout: &AssetLayout,
    ) -> Result<(), StoreError> {
        for kind in CatalogKind::ALL {
            self.refresh(host, layout, kind)?;
        }
        Ok(())
    }

    /// Drop every catalog and release the host thumbnails behind them
    pub fn clear(&mut self, host: &mut impl AssetHost) {
        for kind in CatalogKind::ALL {
            if self.slot_mut(kind).take().is_some() {
                host.release_thumbnails(kind);
            }
        }
    }
}

/// Shown before the first refresh of a collection
fn placeholder_entries(kind: CatalogKind) -> Vec<CatalogEntry> {
    match kind {
        CatalogKind::Gobo => vec![CatalogEntry::sentinel("Loading...", "Loading textures")],
        CatalogKind::Hdri => vec![CatalogEntry::sentinel(
            "No HDRIs",
            "Add HDRIs to textures/hdri",
        )],
        CatalogKind::Reflector => reflector_defaults(),
    }
}
