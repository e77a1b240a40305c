//! Procedural texture module
//!
//! This module handles:
//! - The fixed set of default gobo patterns and their pixel rules
//! - Rasterising them and writing thumbnail + texture copies

pub mod pattern;
pub mod synth;

pub use pattern::{PatternKind, PatternSpec, DEFAULT_PATTERNS, PATTERN_SIZE};
pub use synth::{ensure_default_textures, synthesize_defaults, RasterImage, SynthError};
