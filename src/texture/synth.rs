//! Default gobo texture generation
//!
//! Fills each of the five fixed patterns into a fresh raster and writes it
//! twice: once as the catalog thumbnail, once as the full-resolution
//! texture the lighting operators load.

use super::pattern::{PatternSpec, Rgba, DEFAULT_PATTERNS, PATTERN_SIZE};
use crate::host::{AssetHost, HostError};
use crate::layout::AssetLayout;
use std::path::PathBuf;

/// A width x height grid of RGBA float pixels, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl RasterImage {
    /// Evaluate `pixel_fn` for every (x, y), rows outermost
    pub fn from_fn(width: u32, height: u32, mut pixel_fn: impl FnMut(u32, u32) -> Rgba) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(pixel_fn(x, y));
            }
        }
        RasterImage {
            width,
            height,
            pixels,
        }
    }

    pub fn from_pattern(spec: &PatternSpec) -> Self {
        Self::from_fn(PATTERN_SIZE, PATTERN_SIZE, |x, y| spec.pixel(x, y))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Channel-interleaved samples, clamped to [0, 1]
    pub fn to_rgba_samples(&self) -> Vec<f32> {
        self.pixels
            .iter()
            .flat_map(|pixel| pixel.iter().map(|channel| channel.clamp(0.0, 1.0)))
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("failed to prepare texture directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: HostError,
    },
    #[error("failed to write default texture '{name}' to {path}: {source}")]
    Write {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: HostError,
    },
}

/// Generate and persist every default pattern.
///
/// Creates the gobo texture, gobo icon and HDRI directories first. Any
/// failed write aborts the run. Returns the number of patterns written.
pub fn synthesize_defaults(
    host: &mut impl AssetHost,
    layout: &AssetLayout,
) -> Result<usize, SynthError> {
    let texture_dir = layout.gobo_textures_dir();
    let icon_dir = layout.gobo_icons_dir();

    for dir in [&texture_dir, &icon_dir, &layout.hdri_dir()] {
        host.ensure_directory(dir)
            .map_err(|source| SynthError::Directory {
                path: dir.clone(),
                source,
            })?;
    }

    for spec in DEFAULT_PATTERNS.iter() {
        let image = RasterImage::from_pattern(spec);
        let file_name = format!("{}.png", spec.name);

        for path in [icon_dir.join(&file_name), texture_dir.join(&file_name)] {
            host.write_image(&image, &path)
                .map_err(|source| SynthError::Write {
                    name: spec.name,
                    path: path.clone(),
                    source,
                })?;
        }
        log::debug!("Wrote default gobo '{}'", spec.name);
    }

    log::info!(
        "Generated {} default gobo textures under {}",
        DEFAULT_PATTERNS.len(),
        layout.root().display()
    );
    Ok(DEFAULT_PATTERNS.len())
}

/// Run [`synthesize_defaults`] unless the gobo icon directory already exists.
///
/// Returns 0 when nothing had to be generated.
pub fn ensure_default_textures(
    host: &mut impl AssetHost,
    layout: &AssetLayout,
) -> Result<usize, SynthError> {
    let icon_dir = layout.gobo_icons_dir();
    let existing = host
        .list_directory(&icon_dir)
        .map_err(|source| SynthError::Directory {
            path: icon_dir.clone(),
            source,
        })?;
    if existing.is_some() {
        return Ok(0);
    }
    log::info!("Gobo icon directory missing, creating default textures");
    synthesize_defaults(host, layout)
}
