//! On-disk layout of the asset root
//!
//! ```text
//! <root>/textures/gobos/             full-resolution gobo textures
//! <root>/textures/icons/gobos/       gobo thumbnails (scanned for the gobo catalog)
//! <root>/textures/icons/reflectors/  reflector thumbnails
//! <root>/textures/hdri/              HDRI panoramas
//! ```

use crate::state::data::NONE_ID;
use std::path::{Path, PathBuf};

/// Extensions probed, in order, when looking up a gobo texture by id
const GOBO_TEXTURE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "exr"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    root: PathBuf,
}

impl AssetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AssetLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn textures_dir(&self) -> PathBuf {
        self.root.join("textures")
    }

    pub fn gobo_textures_dir(&self) -> PathBuf {
        self.textures_dir().join("gobos")
    }

    pub fn gobo_icons_dir(&self) -> PathBuf {
        self.textures_dir().join("icons").join("gobos")
    }

    pub fn reflector_icons_dir(&self) -> PathBuf {
        self.textures_dir().join("icons").join("reflectors")
    }

    pub fn hdri_dir(&self) -> PathBuf {
        self.textures_dir().join("hdri")
    }

    /// Find the full-resolution texture behind a gobo catalog id.
    ///
    /// The catalog is built from thumbnails, so the texture may use a
    /// different extension than the icon it was selected from.
    pub fn resolve_gobo_texture(&self, id: &str) -> Option<PathBuf> {
        if id == NONE_ID || id.is_empty() {
            return None;
        }

        let dir = self.gobo_textures_dir();
        GOBO_TEXTURE_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{id}.{ext}")))
            .find(|candidate| candidate.is_file())
    }
}
