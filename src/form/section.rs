//! Thematic sections and the visual mode derived from them.

use crate::scene::SceneTuning;

/// One of the four selectable thematic sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    StructuralShift,
    Deconstruction,
    DesignColor,
    GraffitiStyle,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::StructuralShift,
        Section::Deconstruction,
        Section::DesignColor,
        Section::GraffitiStyle,
    ];

    /// Navigation code (`01`..`04`).
    pub fn code(self) -> &'static str {
        match self {
            Section::StructuralShift => "01",
            Section::Deconstruction => "02",
            Section::DesignColor => "03",
            Section::GraffitiStyle => "04",
        }
    }

    /// Unknown codes resolve to no section.
    #[cfg(test)]
    pub fn from_code(code: &str) -> Option<Self> {
        let section = Self::ALL.into_iter().find(|s| s.code() == code);
        if section.is_none() {
            log::debug!("Unknown section code {:?}; treating as none", code);
        }
        section
    }

    pub fn menu_item(self) -> &'static MenuItem {
        match self {
            Section::StructuralShift => &MENU_ITEMS[0],
            Section::Deconstruction => &MENU_ITEMS[1],
            Section::DesignColor => &MENU_ITEMS[2],
            Section::GraffitiStyle => &MENU_ITEMS[3],
        }
    }
}

#[derive(Debug)]
pub struct MenuItem {
    pub section: Section,
    pub label: &'static str,
    pub description: &'static str,
}

pub const MENU_ITEMS: [MenuItem; 4] = [
    MenuItem {
        section: Section::StructuralShift,
        label: "STRUCTURAL SHIFT",
        description: "Reconfiguring vertex coordinates. Transitioning from Icosahedron to Dodecahedron architecture.",
    },
    MenuItem {
        section: Section::Deconstruction,
        label: "DECONSTRUCTION",
        description: "Core disassembly protocol. Decoupling polygon faces to visualize internal logic flow.",
    },
    MenuItem {
        section: Section::DesignColor,
        label: "DESIGN & COLOR",
        description: "Material update. Iridescent metallic shift complete. Focus optimized for charcoal spectrum.",
    },
    MenuItem {
        section: Section::GraffitiStyle,
        label: "GRAFFITI & STYLE",
        description: "Heuristic override. Digital tagging applied to central core. High-energy rotation enabled.",
    },
];

/// Mutually exclusive visual mode. Exactly one variant holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualMode {
    #[default]
    Idle,
    Shift,
    Decon,
    Design,
    Street,
}

impl VisualMode {
    pub fn from_section(section: Option<Section>) -> Self {
        match section {
            None => VisualMode::Idle,
            Some(Section::StructuralShift) => VisualMode::Shift,
            Some(Section::Deconstruction) => VisualMode::Decon,
            Some(Section::DesignColor) => VisualMode::Design,
            Some(Section::GraffitiStyle) => VisualMode::Street,
        }
    }

    pub fn is_shift(self) -> bool {
        self == VisualMode::Shift
    }

    pub fn is_decon(self) -> bool {
        self == VisualMode::Decon
    }

    pub fn is_design(self) -> bool {
        self == VisualMode::Design
    }

    pub fn is_street(self) -> bool {
        self == VisualMode::Street
    }
}

/// Everything the transition engine derives its targets from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisualState {
    pub mode: VisualMode,
    pub exploded: bool,
}

impl VisualState {
    pub fn new(section: Option<Section>, exploded: bool) -> Self {
        Self {
            mode: VisualMode::from_section(section),
            exploded,
        }
    }

    /// Deconstruction outranks a manual explode.
    pub fn explosion_multiplier(&self, tuning: &SceneTuning) -> f32 {
        if self.mode.is_decon() {
            tuning.decon_multiplier
        } else if self.exploded {
            tuning.explode_multiplier
        } else {
            1.0
        }
    }

    pub fn structural_scale(&self, tuning: &SceneTuning) -> f32 {
        if self.mode.is_shift() {
            tuning.structural_scale
        } else {
            0.0
        }
    }

    pub fn structural_yaw(&self) -> f32 {
        if self.mode.is_shift() {
            std::f32::consts::PI
        } else {
            0.0
        }
    }

    /// Shift hides the panels entirely; design emphasises them. Explode has no say.
    pub fn icosahedron_scale(&self, tuning: &SceneTuning) -> f32 {
        match self.mode {
            VisualMode::Shift => 0.0,
            VisualMode::Design => tuning.design_scale,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_sections() -> Vec<Option<Section>> {
        std::iter::once(None)
            .chain(Section::ALL.into_iter().map(Some))
            .collect()
    }

    #[test]
    fn mode_flags_are_mutually_exclusive() {
        for section in all_sections() {
            let mode = VisualMode::from_section(section);
            let flags = [mode.is_shift(), mode.is_decon(), mode.is_design(), mode.is_street()];
            let count = flags.iter().filter(|flag| **flag).count();
            assert_eq!(count, usize::from(section.is_some()), "{:?}", section);
        }
    }

    #[test]
    fn deconstruction_outranks_explode() {
        let tuning = SceneTuning::default();
        for section in all_sections() {
            for exploded in [false, true] {
                let state = VisualState::new(section, exploded);
                let expected = if section == Some(Section::Deconstruction) {
                    2.8
                } else if exploded {
                    2.2
                } else {
                    1.0
                };
                assert_eq!(state.explosion_multiplier(&tuning), expected);
            }
        }
    }

    #[test]
    fn design_emphasis_survives_explode() {
        let tuning = SceneTuning::default();
        let design = VisualState::new(Some(Section::DesignColor), true);
        assert_eq!(design.icosahedron_scale(&tuning), 1.1);
        let shift = VisualState::new(Some(Section::StructuralShift), true);
        assert_eq!(shift.icosahedron_scale(&tuning), 0.0);
        assert_eq!(shift.structural_scale(&tuning), 1.3);
        let idle = VisualState::new(None, true);
        assert_eq!(idle.icosahedron_scale(&tuning), 1.0);
        assert_eq!(idle.structural_scale(&tuning), 0.0);
    }

    #[test]
    fn codes_resolve_and_unknown_falls_back_to_none() {
        for section in Section::ALL {
            assert_eq!(Section::from_code(section.code()), Some(section));
            assert_eq!(section.menu_item().section, section);
        }
        assert_eq!(Section::from_code("07"), None);
        assert_eq!(VisualMode::from_section(Section::from_code("")), VisualMode::Idle);
    }
}
