//! Screen-space layers painted with egui around the core: the hover detail
//! label and the street-mode graffiti tags.

use crate::form::tween::{Ease, Tween, TweenManager};
use crate::form::SelectedDetail;
use crate::render::camera::OrbitCamera;
use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2};
use glam::Vec2 as GVec2;
use rand::Rng;

const LABEL_OFFSET: Vec2 = Vec2::new(14.0, -14.0);
const LABEL_PADDING: Vec2 = Vec2::new(8.0, 6.0);
const LABEL_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 200);
const LABEL_ACCENT: Color32 = Color32::from_rgb(0x22, 0xd3, 0xee);

/// Paints the detail label pinned to its world-space anchor. Returns the
/// label's screen rect, or `None` when the anchor is off camera.
pub fn paint_detail_label(
    painter: &Painter,
    rect: Rect,
    camera: &OrbitCamera,
    detail: &SelectedDetail,
) -> Option<Rect> {
    let size = GVec2::new(rect.width(), rect.height());
    let projected = camera.project(detail.anchor_point, size)?;
    let anchor = rect.min + Vec2::new(projected.pos.x, projected.pos.y);

    let title = painter.layout_no_wrap(
        detail.title.to_uppercase(),
        FontId::monospace(10.0),
        LABEL_ACCENT,
    );
    let value = painter.layout_no_wrap(detail.value.clone(), FontId::proportional(18.0), Color32::WHITE);
    let body = Vec2::new(
        title.size().x.max(value.size().x),
        title.size().y + 2.0 + value.size().y,
    );
    let origin = anchor + LABEL_OFFSET - Vec2::new(0.0, body.y + LABEL_PADDING.y * 2.0);
    let frame = Rect::from_min_size(origin, body + LABEL_PADDING * 2.0);

    painter.line_segment([anchor, frame.left_bottom()], Stroke::new(1.0, LABEL_ACCENT));
    painter.circle_filled(anchor, 3.0, LABEL_ACCENT);
    painter.rect_filled(frame, 2.0, LABEL_FILL);
    painter.rect_stroke(frame, 2.0, Stroke::new(1.0, LABEL_ACCENT), StrokeKind::Inside);
    let text_origin = frame.min + LABEL_PADDING;
    let value_origin = text_origin + Vec2::new(0.0, title.size().y + 2.0);
    painter.galley(text_origin, title, LABEL_ACCENT);
    painter.galley(value_origin, value, Color32::WHITE);
    Some(frame)
}

// ========================================================================
// Graffiti layer
// ========================================================================

struct GraffitiTag {
    text: &'static str,
    /// Baseline start as a fraction of the layer.
    anchor: [f32; 2],
    /// Font size in a 1000-unit square.
    size: f32,
    angle_deg: f32,
    color: Color32,
}

const TAGS: [GraffitiTag; 3] = [
    GraffitiTag {
        text: "THINK",
        anchor: [0.10, 0.30],
        size: 180.0,
        angle_deg: 0.0,
        color: Color32::from_rgb(0x22, 0xd3, 0xee),
    },
    GraffitiTag {
        text: "FORM",
        anchor: [0.60, 0.70],
        size: 120.0,
        angle_deg: -15.0,
        color: Color32::from_rgb(0xec, 0x48, 0x99),
    },
    GraffitiTag {
        text: "CORE_2025",
        anchor: [0.40, 0.85],
        size: 150.0,
        angle_deg: 0.0,
        color: Color32::from_rgb(0xfa, 0xcc, 0x15),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum GraffitiChannel {
    Layer,
    Reveal(usize),
}

const LAYER_DURATION: f32 = 0.5;
const REVEAL_DURATION: f32 = 1.5;
const REVEAL_MAX_DELAY: f32 = 0.5;
const REVEAL_START_SCALE: f32 = 0.7;

/// Background tags that fade in with a staggered reveal while street mode is
/// active and fade out as a whole when it ends.
pub struct GraffitiLayer {
    active: bool,
    opacity: f32,
    reveal: [f32; 3],
    tweens: TweenManager<GraffitiChannel>,
}

impl GraffitiLayer {
    pub fn new() -> Self {
        Self {
            active: false,
            opacity: 0.0,
            reveal: [0.0; 3],
            tweens: TweenManager::new(),
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_active<R: Rng + ?Sized>(&mut self, active: bool, rng: &mut R) {
        if active == self.active {
            return;
        }
        self.active = active;
        log::debug!("Graffiti layer {}", if active { "on" } else { "off" });
        if active {
            self.tweens.start(
                GraffitiChannel::Layer,
                Tween::scalar(self.opacity, 1.0, LAYER_DURATION, Ease::Power2Out),
            );
            for index in 0..TAGS.len() {
                self.reveal[index] = 0.0;
                let delay = rng.random_range(0.0..REVEAL_MAX_DELAY);
                self.tweens.cancel(GraffitiChannel::Reveal(index));
                self.tweens.start(
                    GraffitiChannel::Reveal(index),
                    Tween::scalar(0.0, 1.0, REVEAL_DURATION, Ease::ExpoOut).with_delay(delay),
                );
            }
        } else {
            self.tweens.start(
                GraffitiChannel::Layer,
                Tween::scalar(self.opacity, 0.0, LAYER_DURATION, Ease::Power2In),
            );
        }
    }

    pub fn advance(&mut self, dt: f32) {
        let Self {
            opacity,
            reveal,
            tweens,
            ..
        } = self;
        tweens.advance(dt, |channel, value| {
            match channel {
                GraffitiChannel::Layer => *opacity = value.x,
                GraffitiChannel::Reveal(index) => match reveal.get_mut(index) {
                    Some(slot) => *slot = value.x,
                    None => return false,
                },
            }
            true
        });
    }

    pub fn paint(&self, painter: &Painter, rect: Rect) {
        if self.opacity <= 0.0 {
            return;
        }
        // Tag layout is authored in a 1000-unit square covering the layer.
        let unit = rect.width().max(rect.height()) / 1000.0;
        for (tag, reveal) in TAGS.iter().zip(self.reveal) {
            let alpha = self.opacity * reveal;
            if alpha <= 0.0 {
                continue;
            }
            let scale = REVEAL_START_SCALE + (1.0 - REVEAL_START_SCALE) * reveal;
            let color = tag.color.gamma_multiply(alpha);
            let galley = painter.layout_no_wrap(
                tag.text.to_string(),
                FontId::proportional(tag.size * unit * scale),
                color,
            );
            let baseline = Pos2::new(
                rect.min.x + rect.width() * tag.anchor[0],
                rect.min.y + rect.height() * tag.anchor[1],
            );
            let pos = Align2::LEFT_BOTTOM
                .anchor_size(baseline, galley.size())
                .min;
            painter.add(
                TextShape::new(pos, galley, color).with_angle(tag.angle_deg.to_radians()),
            );
        }
    }
}

impl Default for GraffitiLayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(layer: &mut GraffitiLayer, seconds: f32) {
        let steps = (seconds * 60.0).ceil() as usize;
        for _ in 0..steps {
            layer.advance(1.0 / 60.0);
        }
    }

    #[test]
    fn fades_in_and_reveals_every_tag() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut layer = GraffitiLayer::new();
        layer.set_active(true, &mut rng);
        run(&mut layer, 0.25);
        assert!(layer.opacity() > 0.0 && layer.opacity() < 1.0);
        run(&mut layer, 2.5);
        assert_eq!(layer.opacity(), 1.0);
        assert!(layer.reveal.iter().all(|r| *r == 1.0));
    }

    #[test]
    fn fades_out_without_resetting_reveal() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut layer = GraffitiLayer::new();
        layer.set_active(true, &mut rng);
        run(&mut layer, 3.0);
        layer.set_active(false, &mut rng);
        run(&mut layer, 1.0);
        assert_eq!(layer.opacity(), 0.0);
        assert!(!layer.is_active());
        assert!(layer.reveal.iter().all(|r| *r == 1.0));
    }

    #[test]
    fn repeated_activation_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut layer = GraffitiLayer::new();
        layer.set_active(true, &mut rng);
        run(&mut layer, 0.5);
        let reveal = layer.reveal;
        layer.set_active(true, &mut rng);
        assert_eq!(layer.reveal, reveal);
    }
}
