use crate::form::tween::{Ease, Tween, TweenManager};
use crate::form::{CoreHandler, CoreInputs, Section, SelectedDetail};
use crate::scene::SceneTuning;
use glam::Vec3;

/// Everything the shell owns. The core reads it through [`CoreInputs`] and
/// writes back through its [`CoreHandler`] impl.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShellState {
    pub exploded: bool,
    pub hovered_part: Option<String>,
    /// Set while the user drags the orbit camera.
    pub rotating: bool,
    pub active_section: Option<Section>,
    pub menu_open: bool,
    pub selected_detail: Option<SelectedDetail>,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapsing also leaves whatever section was active.
    pub fn toggle_explode(&mut self) {
        if self.exploded {
            self.exploded = false;
            self.active_section = None;
        } else {
            self.exploded = true;
        }
        log::debug!(
            "Explode toggled: exploded={} section={:?}",
            self.exploded,
            self.active_section
        );
    }

    /// Deconstruction implies the exploded flag; every other choice clears it.
    pub fn select_section(&mut self, section: Option<Section>) {
        self.active_section = section;
        self.exploded = section == Some(Section::Deconstruction);
        log::info!(
            "Section: {}",
            section.map(|s| s.menu_item().label).unwrap_or("none")
        );
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn core_inputs(&self) -> CoreInputs {
        CoreInputs {
            exploded: self.exploded,
            active_section: self.active_section,
            hovered_part: self.hovered_part.clone(),
        }
    }
}

impl CoreHandler for ShellState {
    fn on_hover(&mut self, part: Option<String>) {
        self.hovered_part = part;
    }

    fn on_detail_select(&mut self, detail: Option<SelectedDetail>) {
        self.selected_detail = detail;
    }

    fn on_click(&mut self) {
        self.toggle_explode();
    }
}

/// Viewport clear color, eased toward the active section's color.
pub struct ThemeBackground {
    color: Vec3,
    target: Vec3,
    tweens: TweenManager<()>,
}

fn rgb(bytes: [u8; 3]) -> Vec3 {
    Vec3::new(bytes[0] as f32, bytes[1] as f32, bytes[2] as f32) / 255.0
}

pub fn background_for(section: Option<Section>, tuning: &SceneTuning) -> Vec3 {
    match section {
        Some(Section::DesignColor) => rgb(tuning.background_design),
        Some(Section::GraffitiStyle) => rgb(tuning.background_street),
        _ => rgb(tuning.background_default),
    }
}

impl ThemeBackground {
    pub fn new(tuning: &SceneTuning) -> Self {
        let color = background_for(None, tuning);
        Self {
            color,
            target: color,
            tweens: TweenManager::new(),
        }
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn color32(&self) -> egui::Color32 {
        let c = (self.color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
        egui::Color32::from_rgb(c.x as u8, c.y as u8, c.z as u8)
    }

    pub fn set_section(&mut self, section: Option<Section>, tuning: &SceneTuning) {
        let target = background_for(section, tuning);
        if target.abs_diff_eq(self.target, 1e-6) {
            return;
        }
        self.target = target;
        self.tweens.start(
            (),
            Tween::new(self.color, target, tuning.background_duration, Ease::Power2InOut),
        );
    }

    pub fn advance(&mut self, dt: f32) {
        let color = &mut self.color;
        self.tweens.advance(dt, |_, value| {
            *color = value;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FaceId;

    #[test]
    fn collapsing_clears_the_section() {
        let mut shell = ShellState::new();
        shell.select_section(Some(Section::DesignColor));
        shell.toggle_explode();
        assert!(shell.exploded);
        assert_eq!(shell.active_section, Some(Section::DesignColor));
        shell.toggle_explode();
        assert!(!shell.exploded);
        assert_eq!(shell.active_section, None);
    }

    #[test]
    fn deconstruction_sets_exploded() {
        let mut shell = ShellState::new();
        shell.select_section(Some(Section::Deconstruction));
        assert!(shell.exploded);
        shell.select_section(Some(Section::StructuralShift));
        assert!(!shell.exploded);
    }

    #[test]
    fn handler_writes_back_into_shell() {
        let mut shell = ShellState::new();
        shell.on_hover(Some(FaceId(3).to_string()));
        assert_eq!(shell.core_inputs().hovered_part.as_deref(), Some("face_3"));
        shell.on_click();
        assert!(shell.exploded);
        shell.on_hover(None);
        assert_eq!(shell.core_inputs().hovered_part, None);
    }

    #[test]
    fn background_eases_to_section_color() {
        let tuning = SceneTuning::default();
        let mut theme = ThemeBackground::new(&tuning);
        assert_eq!(theme.color32(), egui::Color32::from_rgb(0x00, 0x66, 0xff));
        theme.set_section(Some(Section::DesignColor), &tuning);
        theme.advance(0.5);
        assert_ne!(theme.color32(), egui::Color32::from_rgb(0x12, 0x12, 0x12));
        theme.advance(0.6);
        assert_eq!(theme.color32(), egui::Color32::from_rgb(0x12, 0x12, 0x12));
    }

    #[test]
    fn sections_without_a_color_keep_the_default() {
        let tuning = SceneTuning::default();
        assert_eq!(
            background_for(Some(Section::StructuralShift), &tuning),
            background_for(None, &tuning)
        );
    }
}
