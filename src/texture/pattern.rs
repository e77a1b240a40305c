//! Analytic pixel rules for the default gobo patterns

use serde::Serialize;

/// Edge length of every default pattern, in pixels
pub const PATTERN_SIZE: u32 = 128;

/// RGBA colour with float channels in [0, 1]
pub type Rgba = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Softbox,
    Grid,
    Circle,
    Dots,
    Stripes,
}

/// One of the five fixed default patterns
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatternSpec {
    pub name: &'static str,
    pub kind: PatternKind,
    pub base_color: Rgba,
}

pub const DEFAULT_PATTERNS: [PatternSpec; 5] = [
    PatternSpec {
        name: "softbox",
        kind: PatternKind::Softbox,
        base_color: [1.0, 1.0, 1.0, 1.0],
    },
    PatternSpec {
        name: "grid",
        kind: PatternKind::Grid,
        base_color: [0.7, 0.7, 0.7, 1.0],
    },
    PatternSpec {
        name: "circle",
        kind: PatternKind::Circle,
        base_color: [0.9, 0.8, 0.6, 1.0],
    },
    PatternSpec {
        name: "dots",
        kind: PatternKind::Dots,
        base_color: [0.8, 0.9, 1.0, 1.0],
    },
    PatternSpec {
        name: "stripes",
        kind: PatternKind::Stripes,
        base_color: [1.0, 0.9, 0.8, 1.0],
    },
];

impl PatternSpec {
    pub fn by_name(name: &str) -> Option<&'static PatternSpec> {
        DEFAULT_PATTERNS.iter().find(|spec| spec.name == name)
    }

    /// Colour of pixel (x, y) on a `PATTERN_SIZE` square
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let color = self.base_color;
        match self.kind {
            PatternKind::Softbox => {
                let intensity = (1.0 - radial_distance(x, y)).max(0.0);
                scaled(color, intensity)
            }
            PatternKind::Grid => {
                if x % 16 < 2 || y % 16 < 2 {
                    color
                } else {
                    scaled(color, 0.3)
                }
            }
            PatternKind::Circle => {
                if radial_distance(x, y) < 0.4 {
                    color
                } else {
                    scaled(color, 0.4)
                }
            }
            PatternKind::Dots => {
                if x % 32 < 8 && y % 32 < 8 {
                    color
                } else {
                    scaled(color, 0.5)
                }
            }
            PatternKind::Stripes => {
                if (x / 16) % 2 == 0 {
                    color
                } else {
                    scaled(color, 0.6)
                }
            }
        }
    }
}

/// Distance from the pattern centre, 1.0 at the middle of each edge
fn radial_distance(x: u32, y: u32) -> f32 {
    let half = (PATTERN_SIZE / 2) as f32;
    let dx = (x as f32 - half) / half;
    let dy = (y as f32 - half) / half;
    (dx * dx + dy * dy).sqrt()
}

/// Scale RGB, alpha stays opaque
fn scaled(color: Rgba, factor: f32) -> Rgba {
    [color[0] * factor, color[1] * factor, color[2] * factor, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str) -> &'static PatternSpec {
        PatternSpec::by_name(name).unwrap()
    }

    #[test]
    fn test_softbox_peaks_at_center() {
        assert_eq!(spec("softbox").pixel(64, 64), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(spec("softbox").pixel(0, 0), [0.0, 0.0, 0.0, 1.0]);
        // Half way to the edge is half intensity
        assert_eq!(spec("softbox").pixel(96, 64), [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_grid_lines_every_16px() {
        let grid = spec("grid");
        assert_eq!(grid.pixel(0, 7), grid.base_color);
        assert_eq!(grid.pixel(17, 40), grid.base_color);
        assert_eq!(grid.pixel(5, 5), [0.7 * 0.3, 0.7 * 0.3, 0.7 * 0.3, 1.0]);
    }

    #[test]
    fn test_circle_radius() {
        let circle = spec("circle");
        assert_eq!(circle.pixel(64, 64), circle.base_color);
        assert_eq!(circle.pixel(64 + 25, 64), circle.base_color);
        assert_eq!(circle.pixel(64 + 26, 64), [0.9 * 0.4, 0.8 * 0.4, 0.6 * 0.4, 1.0]);
    }

    #[test]
    fn test_dots_and_stripes() {
        let dots = spec("dots");
        assert_eq!(dots.pixel(33, 39), dots.base_color);
        assert_eq!(dots.pixel(40, 0), [0.8 * 0.5, 0.9 * 0.5, 1.0 * 0.5, 1.0]);

        let stripes = spec("stripes");
        assert_eq!(stripes.pixel(15, 99), stripes.base_color);
        assert_eq!(stripes.pixel(16, 99), [1.0 * 0.6, 0.9 * 0.6, 0.8 * 0.6, 1.0]);
        assert_eq!(stripes.pixel(32, 0), stripes.base_color);
    }
}
