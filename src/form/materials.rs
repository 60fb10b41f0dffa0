use crate::form::faces::FaceId;
use crate::form::section::VisualMode;

/// Named appearances. Selected per mode, never blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Translucent tinted glass, worn by the structural body.
    Glass,
    Iridescent,
    MatteDark,
    Accent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub base_color_rgba: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive_rgb: [f32; 3],
    pub emissive_intensity: f32,
}

pub const GLASS: Appearance = Appearance {
    base_color_rgba: [1.0, 1.0, 0.0, 0.45],
    metallic: 0.0,
    roughness: 0.0,
    emissive_rgb: [1.0, 1.0, 0.0],
    emissive_intensity: 0.5,
};

pub const IRIDESCENT: Appearance = Appearance {
    base_color_rgba: [0.0, 1.0, 1.0, 1.0],
    metallic: 1.0,
    roughness: 0.1,
    emissive_rgb: [0.0, 0.27, 1.0],
    emissive_intensity: 0.5,
};

pub const MATTE_DARK: Appearance = Appearance {
    base_color_rgba: [0.1, 0.1, 0.11, 1.0],
    metallic: 0.8,
    roughness: 0.7,
    emissive_rgb: [0.0, 0.0, 0.0],
    emissive_intensity: 0.0,
};

pub const ACCENT: Appearance = Appearance {
    base_color_rgba: [1.0, 0.0, 1.0, 1.0],
    metallic: 0.5,
    roughness: 0.3,
    emissive_rgb: [1.0, 0.0, 0.6],
    emissive_intensity: 0.4,
};

impl MaterialKind {
    /// Shift wins, then deconstruction; every other mode keeps the iridescent finish.
    pub fn for_mode(mode: VisualMode) -> Self {
        match mode {
            VisualMode::Shift => MaterialKind::MatteDark,
            VisualMode::Decon => MaterialKind::Accent,
            VisualMode::Idle | VisualMode::Design | VisualMode::Street => MaterialKind::Iridescent,
        }
    }

    pub fn appearance(self) -> &'static Appearance {
        match self {
            MaterialKind::Glass => &GLASS,
            MaterialKind::Iridescent => &IRIDESCENT,
            MaterialKind::MatteDark => &MATTE_DARK,
            MaterialKind::Accent => &ACCENT,
        }
    }
}

/// Thin edge overlay drawn over every face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireframeStyle {
    pub color_rgb: [f32; 3],
    pub opacity: f32,
}

const WIRE_WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const WIRE_BLACK: [f32; 3] = [0.0, 0.0, 0.0];
const WIRE_MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];
const WIRE_IDLE_OPACITY: f32 = 0.5;

pub fn wireframe_style(mode: VisualMode, hovered: bool) -> WireframeStyle {
    if hovered {
        return WireframeStyle {
            color_rgb: WIRE_WHITE,
            opacity: 1.0,
        };
    }
    let color_rgb = match mode {
        VisualMode::Decon => WIRE_BLACK,
        VisualMode::Street => WIRE_MAGENTA,
        _ => WIRE_WHITE,
    };
    let opacity = if mode.is_shift() {
        1.0
    } else {
        WIRE_IDLE_OPACITY
    };
    WireframeStyle { color_rgb, opacity }
}

/// Street mode decorates every fourth face with a tag marker.
pub fn has_tag_marker(face: FaceId, mode: VisualMode) -> bool {
    mode.is_street() && face.0 % 4 == 0
}
