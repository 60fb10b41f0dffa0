//! HUD around the viewport: header, status banner, footer with the section
//! navigation and the fullscreen menu. Drawing is driven by [`OverlayModel`],
//! a plain description of what the HUD shows for a given shell state.

use crate::form::section::MENU_ITEMS;
use crate::form::Section;
use egui::{Align2, Color32, Context, Id, Margin, Order, RichText};

pub const DEFAULT_DESCRIPTION: &str = "A generative 3D thought form mapped through geometric complexity. Interact with the core to observe structural and material transitions.";
pub const MENU_LINKS: [&str; 4] = ["Core_Logic", "Memory_Bank", "Heuristic_V02", "System_Sync"];
pub const MENU_FOOTER: &str = "Designed for the Art of Thinking // 2025";

const CYAN: Color32 = Color32::from_rgb(0x22, 0xd3, 0xee);
const ORANGE: Color32 = Color32::from_rgb(0xfb, 0x92, 0x3c);
const PINK: Color32 = Color32::from_rgb(0xec, 0x48, 0x99);
const GOLD: Color32 = Color32::from_rgb(0xff, 0xd7, 0x00);
const GREEN: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80);
const MENU_BACKDROP: Color32 = Color32::from_rgb(0x0a, 0x0a, 0x0a);

/// Something the user asked for through the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ToggleExplode,
    SelectSection(Section),
    ToggleMenu,
    CloseMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerStyle {
    pub fill: Color32,
    pub text: Color32,
}

/// What the HUD shows for one shell state.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayModel {
    pub active_section: Option<Section>,
    pub exploded: bool,
    pub menu_open: bool,
}

impl OverlayModel {
    pub fn new(active_section: Option<Section>, exploded: bool, menu_open: bool) -> Self {
        Self {
            active_section,
            exploded,
            menu_open,
        }
    }

    fn is_street(&self) -> bool {
        self.active_section == Some(Section::GraffitiStyle)
    }

    fn is_decon(&self) -> bool {
        self.active_section == Some(Section::Deconstruction)
    }

    pub fn accent(&self) -> Color32 {
        match self.active_section {
            Some(Section::StructuralShift) => CYAN,
            Some(Section::Deconstruction) => Color32::BLACK,
            Some(Section::DesignColor) | None => ORANGE,
            Some(Section::GraffitiStyle) => PINK,
        }
    }

    /// Text color over the viewport. Dark while the backdrop is bright.
    pub fn foreground(&self) -> Color32 {
        if self.is_decon() {
            Color32::BLACK
        } else {
            Color32::WHITE
        }
    }

    pub fn subtitle(&self) -> &'static str {
        if self.is_street() {
            "DECRYPTION_IN_PROGRESS"
        } else {
            "Core_V4.2 // Paris Edition"
        }
    }

    /// The centered status banner, shown once a section is active or the
    /// core is exploded.
    pub fn banner(&self) -> Option<&'static str> {
        if self.active_section.is_none() && !self.exploded {
            return None;
        }
        if self.is_street() {
            return Some("SYSTEM ONLINE");
        }
        Some(
            self.active_section
                .map(|section| section.menu_item().label)
                .unwrap_or("REASSEMBLED"),
        )
    }

    pub fn banner_style(&self) -> BannerStyle {
        match self.active_section {
            Some(Section::GraffitiStyle) => BannerStyle {
                fill: PINK,
                text: Color32::WHITE,
            },
            Some(Section::Deconstruction) => BannerStyle {
                fill: Color32::BLACK,
                text: GOLD,
            },
            _ => BannerStyle {
                fill: ORANGE,
                text: Color32::BLACK,
            },
        }
    }

    pub fn node_label(&self) -> String {
        match self.active_section {
            Some(section) => format!("Node_v{}", section.code()),
            None => "Awaiting_Input".to_string(),
        }
    }

    pub fn status_color(&self) -> Color32 {
        if self.active_section.is_some() {
            GREEN
        } else {
            ORANGE
        }
    }

    pub fn description(&self) -> &'static str {
        self.active_section
            .map(|section| section.menu_item().description)
            .unwrap_or(DEFAULT_DESCRIPTION)
    }

    pub fn explode_label(&self) -> &'static str {
        if self.exploded {
            "Collapse Core"
        } else {
            "Explode View"
        }
    }

    pub fn explode_style(&self) -> BannerStyle {
        if self.exploded {
            BannerStyle {
                fill: PINK,
                text: Color32::WHITE,
            }
        } else if self.is_decon() {
            BannerStyle {
                fill: Color32::BLACK,
                text: GOLD,
            }
        } else {
            BannerStyle {
                fill: Color32::WHITE,
                text: Color32::BLACK,
            }
        }
    }

    pub fn nav_color(&self, section: Section) -> Color32 {
        if self.active_section == Some(section) {
            self.accent()
        } else {
            self.foreground().gamma_multiply(0.6)
        }
    }
}

/// Draws the HUD and returns what the user clicked this frame.
pub fn draw(ctx: &Context, model: &OverlayModel) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let foreground = model.foreground();

    egui::Area::new(Id::new("hud_header"))
        .anchor(Align2::LEFT_TOP, [32.0, 32.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new("THOUGHT")
                    .size(56.0)
                    .strong()
                    .italics()
                    .color(foreground),
            );
            ui.label(
                RichText::new("FORM")
                    .size(56.0)
                    .strong()
                    .italics()
                    .color(model.accent()),
            );
            ui.label(
                RichText::new(model.subtitle())
                    .size(11.0)
                    .strong()
                    .color(foreground.gamma_multiply(0.6)),
            );
        });

    egui::Area::new(Id::new("hud_menu_toggle"))
        .anchor(Align2::RIGHT_TOP, [-32.0, 32.0])
        .show(ctx, |ui| {
            let label = if model.menu_open { "CLOSE" } else { "MENU" };
            let button = egui::Button::new(RichText::new(label).strong().color(foreground))
                .frame(false);
            if ui.add(button).clicked() {
                actions.push(UiAction::ToggleMenu);
            }
        });

    if let Some(text) = model.banner() {
        let style = model.banner_style();
        egui::Area::new(Id::new("hud_banner"))
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(style.fill)
                    .inner_margin(Margin::symmetric(40, 20))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(text.to_uppercase())
                                .size(40.0)
                                .strong()
                                .italics()
                                .color(style.text),
                        );
                    });
            });
    }

    egui::Area::new(Id::new("hud_footer"))
        .anchor(Align2::LEFT_BOTTOM, [32.0, -32.0])
        .show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.horizontal(|ui| {
                let (dot, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter()
                    .circle_filled(dot.center(), 6.0, model.status_color());
                ui.label(
                    RichText::new(model.node_label())
                        .size(18.0)
                        .strong()
                        .color(model.accent()),
                );
            });
            ui.label(
                RichText::new(model.description())
                    .size(13.0)
                    .color(foreground.gamma_multiply(0.8)),
            );
            ui.add_space(8.0);
            let style = model.explode_style();
            let button = egui::Button::new(
                RichText::new(model.explode_label().to_uppercase())
                    .strong()
                    .color(style.text),
            )
            .fill(style.fill);
            if ui.add(button).clicked() {
                actions.push(UiAction::ToggleExplode);
            }
        });

    egui::Area::new(Id::new("hud_nav"))
        .anchor(Align2::RIGHT_BOTTOM, [-32.0, -32.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for item in &MENU_ITEMS {
                    let text = format!("SYS_{}\n{}", item.section.code(), item.label.to_uppercase());
                    let button = egui::Button::new(
                        RichText::new(text)
                            .strong()
                            .italics()
                            .color(model.nav_color(item.section)),
                    )
                    .frame(false);
                    if ui.add(button).clicked() {
                        actions.push(UiAction::SelectSection(item.section));
                    }
                }
            });
        });

    if model.menu_open {
        draw_menu(ctx, &mut actions);
    }

    actions
}

fn draw_menu(ctx: &Context, actions: &mut Vec<UiAction>) {
    let screen = ctx.screen_rect();
    egui::Area::new(Id::new("hud_fullscreen_menu"))
        .order(Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            ui.painter().rect_filled(screen, 0.0, MENU_BACKDROP);
            ui.set_min_size(screen.size());
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                let close = egui::Button::new(
                    RichText::new("Close [Esc]").size(22.0).strong().color(Color32::WHITE),
                )
                .frame(false);
                if ui.add(close).clicked() {
                    actions.push(UiAction::CloseMenu);
                }
                ui.add_space(screen.height() * 0.15);
                for link in MENU_LINKS {
                    let entry = egui::Button::new(
                        RichText::new(link.to_uppercase())
                            .size(64.0)
                            .strong()
                            .italics()
                            .color(Color32::WHITE),
                    )
                    .frame(false);
                    if ui.add(entry).clicked() {
                        actions.push(UiAction::CloseMenu);
                    }
                }
                ui.add_space(48.0);
                ui.label(
                    RichText::new(MENU_FOOTER.to_uppercase())
                        .size(10.0)
                        .color(Color32::WHITE.gamma_multiply(0.3)),
                );
            });
        });
}
