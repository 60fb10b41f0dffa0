use crate::form::Section;
use egui::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    SelectSection(Option<Section>),
    ToggleExplode,
    ToggleMenu,
    CloseMenu,
    None,
}

/// Keyboard shortcuts for the shell.
#[derive(Default, Debug, Clone, Copy)]
pub struct InputState;

impl InputState {
    pub fn handle_key(&mut self, key: Key, pressed: bool) -> InputAction {
        if !pressed {
            return InputAction::None;
        }
        match key {
            Key::Num1 => InputAction::SelectSection(Some(Section::StructuralShift)),
            Key::Num2 => InputAction::SelectSection(Some(Section::Deconstruction)),
            Key::Num3 => InputAction::SelectSection(Some(Section::DesignColor)),
            Key::Num4 => InputAction::SelectSection(Some(Section::GraffitiStyle)),
            Key::Num0 => InputAction::SelectSection(None),
            Key::Space => InputAction::ToggleExplode,
            Key::M => InputAction::ToggleMenu,
            Key::Escape => InputAction::CloseMenu,
            _ => InputAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_select_sections() {
        let mut input = InputState::default();
        assert_eq!(
            input.handle_key(Key::Num2, true),
            InputAction::SelectSection(Some(Section::Deconstruction))
        );
        assert_eq!(input.handle_key(Key::Num0, true), InputAction::SelectSection(None));
    }

    #[test]
    fn releases_and_unbound_keys_do_nothing() {
        let mut input = InputState::default();
        assert_eq!(input.handle_key(Key::Space, false), InputAction::None);
        assert_eq!(input.handle_key(Key::Q, true), InputAction::None);
        assert_eq!(input.handle_key(Key::Escape, true), InputAction::CloseMenu);
    }
}
