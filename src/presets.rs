//! Studio preset tables
//!
//! Pure data consumed by whatever applies materials and render settings:
//! - Reflector surface values keyed by reflector catalog id
//! - Render quality presets (sampling + light paths)
//! - Output resolution presets
//! - The three-point area light rig

use serde::Serialize;

/// Principled surface values for a reflector card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceProperties {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReflectorMaterial {
    Silver,
    Gold,
    White,
    Black,
}

impl ReflectorMaterial {
    pub const ALL: [ReflectorMaterial; 4] = [
        ReflectorMaterial::Silver,
        ReflectorMaterial::Gold,
        ReflectorMaterial::White,
        ReflectorMaterial::Black,
    ];

    /// Map a reflector catalog id to a material; unknown ids get Silver
    pub fn from_id(id: &str) -> Self {
        match id.to_uppercase().as_str() {
            "GOLD" => ReflectorMaterial::Gold,
            "WHITE" => ReflectorMaterial::White,
            "BLACK" => ReflectorMaterial::Black,
            _ => ReflectorMaterial::Silver,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ReflectorMaterial::Silver => "SILVER",
            ReflectorMaterial::Gold => "GOLD",
            ReflectorMaterial::White => "WHITE",
            ReflectorMaterial::Black => "BLACK",
        }
    }

    /// Name of the shared material the host creates for this reflector
    pub fn material_name(self) -> String {
        format!("Reflector_{}", self.id())
    }

    pub fn surface(self) -> SurfaceProperties {
        match self {
            ReflectorMaterial::Silver => SurfaceProperties {
                base_color: [0.8, 0.8, 0.8, 1.0],
                metallic: 1.0,
                roughness: 0.1,
            },
            ReflectorMaterial::Gold => SurfaceProperties {
                base_color: [1.0, 0.766, 0.336, 1.0],
                metallic: 1.0,
                roughness: 0.1,
            },
            ReflectorMaterial::White => SurfaceProperties {
                base_color: [1.0, 1.0, 1.0, 1.0],
                metallic: 0.0,
                roughness: 0.5,
            },
            // Black flag: absorbs, no sheen
            ReflectorMaterial::Black => SurfaceProperties {
                base_color: [0.0, 0.0, 0.0, 1.0],
                metallic: 0.0,
                roughness: 1.0,
            },
        }
    }
}

/// Surface used for a reflector built from a user image (posters etc.)
pub const CUSTOM_REFLECTOR_SURFACE: SurfaceProperties = SurfaceProperties {
    base_color: [1.0, 1.0, 1.0, 1.0],
    metallic: 0.0,
    roughness: 1.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum RenderQuality {
    Draft,
    Medium,
    High,
    Ultra,
}

/// Path-tracer settings applied by a quality preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderSettings {
    pub samples: u32,
    pub use_denoising: bool,
    pub max_bounces: u32,
    pub diffuse_bounces: u32,
    pub glossy_bounces: u32,
    pub transmission_bounces: u32,
    pub volume_bounces: u32,
    pub resolution_percentage: u32,
    /// Fast GI approximation bounces (on/off stays with the user)
    pub ao_bounces: u32,
}

impl RenderQuality {
    pub const ALL: [RenderQuality; 4] = [
        RenderQuality::Draft,
        RenderQuality::Medium,
        RenderQuality::High,
        RenderQuality::Ultra,
    ];

    pub fn settings(self) -> RenderSettings {
        let (samples, bounces, volume_bounces, resolution_percentage, ao_bounces) = match self {
            RenderQuality::Draft => (32, 4, 0, 50, 1),
            RenderQuality::Medium => (500, 8, 2, 100, 2),
            RenderQuality::High => (600, 12, 4, 100, 3),
            RenderQuality::Ultra => (1024, 32, 12, 100, 4),
        };

        RenderSettings {
            samples,
            use_denoising: true,
            max_bounces: bounces,
            diffuse_bounces: bounces,
            glossy_bounces: bounces,
            transmission_bounces: bounces,
            volume_bounces,
            resolution_percentage,
            ao_bounces,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolutionPreset {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const RESOLUTION_PRESETS: [ResolutionPreset; 4] = [
    ResolutionPreset {
        label: "4K Ultra",
        width: 3840,
        height: 2160,
    },
    ResolutionPreset {
        label: "1080p HD",
        width: 1920,
        height: 1080,
    },
    ResolutionPreset {
        label: "Portrait",
        width: 1080,
        height: 1920,
    },
    ResolutionPreset {
        label: "Square",
        width: 1080,
        height: 1080,
    },
];

/// One area light of the product rig, placed relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RigLight {
    pub name: &'static str,
    /// Offset from the target origin; -Y is in front of the subject
    pub offset: [f32; 3],
    /// Watts
    pub energy: f32,
    pub size: f32,
}

impl RigLight {
    pub fn position(&self, target: [f32; 3]) -> [f32; 3] {
        [
            target[0] + self.offset[0],
            target[1] + self.offset[1],
            target[2] + self.offset[2],
        ]
    }
}

/// Collection every rig light is moved into
pub const RIG_COLLECTION: &str = "Lights";

/// Key in front, fill off to the side, rim behind. Each light tracks the
/// target with its -Z axis, Y up.
pub const THREE_POINT_RIG: [RigLight; 3] = [
    RigLight {
        name: "Key_Light",
        offset: [0.0, -3.0, 1.0],
        energy: 75.0,
        size: 3.0,
    },
    RigLight {
        name: "Fill_Light",
        offset: [2.0, -1.0, 2.0],
        energy: 150.0,
        size: 3.0,
    },
    RigLight {
        name: "Rim_Light",
        offset: [0.0, 3.0, 1.0],
        energy: 300.0,
        size: 3.0,
    },
];
