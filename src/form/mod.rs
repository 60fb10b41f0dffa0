//! The polyhedral core: face panels, the section transition engine, continuous
//! motion and hover inspection, all driven from one per-frame tick.
//!
//! ## Flow
//!
//! The shell calls [`CoreForm::sync`] with its current state whenever it may
//! have changed (calling it every frame is fine: an unchanged state is a
//! no-op). A changed `(section, exploded)` pair resolves a new [`VisualState`]
//! and retargets the tweens for every affected node. [`CoreForm::frame`] then
//! steps the tweens and runs the motion driver on top of them. Pointer events
//! on faces go through the `pointer_*` methods and report back through a
//! [`CoreHandler`].

pub mod faces;
pub mod inspector;
pub mod materials;
pub mod motion;
pub mod section;
pub mod tween;

pub use faces::{FaceArena, FaceId, GeometryError, FACE_COUNT};
pub use inspector::{HoverState, SelectedDetail};
pub use materials::{MaterialKind, WireframeStyle};
pub use motion::FrameInput;
pub use section::{Section, VisualMode, VisualState};

use crate::scene::{euler_quat, NodeId, NodeTransform, Property, SceneTuning};
use faces::{decompose, dodecahedron_triangles, icosahedron_soup};
use glam::{Mat4, Quat, Vec3};
use inspector::Inspector;
use motion::MotionDriver;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use tween::{Ease, Tween, TweenKey, TweenManager};

/// Below this group scale nothing is drawn or picked.
const MIN_VISIBLE_SCALE: f32 = 1e-4;

/// Shell state consumed by the core.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreInputs {
    pub exploded: bool,
    pub active_section: Option<Section>,
    /// `face_<n>` or an opaque tag from a sibling component.
    pub hovered_part: Option<String>,
}

/// Outputs, invoked synchronously from the pointer handlers.
pub trait CoreHandler {
    fn on_hover(&mut self, part: Option<String>);
    fn on_detail_select(&mut self, detail: Option<SelectedDetail>);
    fn on_click(&mut self);
}

/// Group nodes above the faces.
#[derive(Debug, Clone, Default)]
pub struct CoreNodes {
    pub float: NodeTransform,
    pub core: NodeTransform,
    pub icosahedron: NodeTransform,
    pub structural: NodeTransform,
}

impl CoreNodes {
    pub fn get(&self, id: NodeId) -> Option<&NodeTransform> {
        match id {
            NodeId::Float => Some(&self.float),
            NodeId::Core => Some(&self.core),
            NodeId::Icosahedron => Some(&self.icosahedron),
            NodeId::Structural => Some(&self.structural),
            NodeId::Face(_) => None,
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeTransform> {
        match id {
            NodeId::Float => Some(&mut self.float),
            NodeId::Core => Some(&mut self.core),
            NodeId::Icosahedron => Some(&mut self.icosahedron),
            NodeId::Structural => Some(&mut self.structural),
            NodeId::Face(_) => None,
        }
    }
}

/// One face ready to draw, in world space.
#[derive(Debug, Clone)]
pub struct FaceSnapshot {
    pub id: FaceId,
    pub world: [Vec3; 3],
    pub material: MaterialKind,
    pub wireframe: WireframeStyle,
    pub tagged: bool,
}

#[derive(Debug, Clone)]
pub struct CoreSnapshot {
    pub mode: VisualMode,
    pub faces: Vec<FaceSnapshot>,
    pub structural: Vec<[Vec3; 3]>,
    pub structural_material: MaterialKind,
}

pub struct CoreForm {
    tuning: SceneTuning,
    faces: Option<FaceArena>,
    structural_mesh: Vec<[Vec3; 3]>,
    nodes: CoreNodes,
    tweens: TweenManager,
    motion: MotionDriver,
    inspector: Inspector,
    applied: Option<VisualState>,
    hover_active: bool,
    drift_weight: f32,
    rng: StdRng,
}

impl CoreForm {
    pub fn new(tuning: SceneTuning) -> Self {
        let rng = StdRng::from_rng(&mut rand::rng());
        let soup = icosahedron_soup(tuning.face_radius);
        Self::from_soup(tuning, &soup, rng)
    }

    pub fn with_seed(tuning: SceneTuning, seed: u64) -> Self {
        let soup = icosahedron_soup(tuning.face_radius);
        Self::from_soup(tuning, &soup, StdRng::seed_from_u64(seed))
    }

    /// Builds the core from an arbitrary triangle soup. A soup that does not
    /// decompose leaves the core with no faces; it still animates its groups.
    pub fn from_soup(tuning: SceneTuning, soup: &[Vec3], mut rng: StdRng) -> Self {
        let faces = match decompose(soup, &mut rng) {
            Ok(arena) => {
                log::info!("Core geometry built: {} faces", arena.len());
                Some(arena)
            }
            Err(err) => {
                log::error!("Face decomposition failed: {}; rendering no faces", err);
                None
            }
        };

        let mut nodes = CoreNodes::default();
        nodes.core.scale = Vec3::ZERO;
        nodes.structural.scale = Vec3::ZERO;

        let mut tweens = TweenManager::new();
        tweens.start(
            (NodeId::Core, Property::Scale),
            Tween::scalar(
                0.0,
                1.0,
                tuning.entrance_duration,
                Ease::ElasticOut {
                    amplitude: 1.0,
                    period: 0.5,
                },
            ),
        );

        Self {
            structural_mesh: dodecahedron_triangles(tuning.face_radius),
            tuning,
            faces,
            nodes,
            tweens,
            motion: MotionDriver::new(),
            inspector: Inspector::new(),
            applied: None,
            hover_active: false,
            drift_weight: 0.0,
            rng,
        }
    }

    pub fn tuning(&self) -> &SceneTuning {
        &self.tuning
    }

    pub fn faces(&self) -> Option<&FaceArena> {
        self.faces.as_ref()
    }

    pub fn nodes(&self) -> &CoreNodes {
        &self.nodes
    }

    pub fn visual_state(&self) -> VisualState {
        self.applied.unwrap_or_default()
    }

    pub fn mode(&self) -> VisualMode {
        self.visual_state().mode
    }

    pub fn material(&self) -> MaterialKind {
        MaterialKind::for_mode(self.mode())
    }

    pub fn hover_state(&self) -> HoverState {
        self.inspector.state()
    }

    pub fn detail(&self) -> Option<&SelectedDetail> {
        self.inspector.detail()
    }

    pub fn drift_weight(&self) -> f32 {
        self.drift_weight
    }

    pub fn tween_target(&self, node: NodeId, property: Property) -> Option<Vec3> {
        self.tweens.target((node, property))
    }

    /// Applies the shell's state. Unchanged state leaves every tween alone.
    pub fn sync(&mut self, inputs: &CoreInputs) {
        let state = VisualState::new(inputs.active_section, inputs.exploded);
        if self.applied != Some(state) {
            self.apply_transition(state);
        }

        let hovering = inputs.hovered_part.is_some();
        if hovering != self.hover_active {
            self.hover_active = hovering;
            let scale = if hovering { self.tuning.hover_scale } else { 1.0 };
            self.retarget(
                (NodeId::Core, Property::Scale),
                Vec3::splat(scale),
                self.tuning.hover_duration,
                Ease::Power1Out,
            );
        }
    }

    fn apply_transition(&mut self, state: VisualState) {
        let previous = self.applied.replace(state);
        log::debug!("Core transition {:?} -> {:?}", previous, state);
        let tuning = self.tuning.clone();
        let mode = state.mode;

        self.retarget(
            (NodeId::Structural, Property::Scale),
            Vec3::splat(state.structural_scale(&tuning)),
            tuning.structural_duration,
            Ease::ExpoOut,
        );
        self.retarget(
            (NodeId::Structural, Property::Rotation),
            Vec3::new(0.0, state.structural_yaw(), 0.0),
            tuning.structural_duration,
            Ease::Power1Out,
        );
        self.retarget(
            (NodeId::Icosahedron, Property::Scale),
            Vec3::splat(state.icosahedron_scale(&tuning)),
            tuning.group_duration,
            Ease::Power2Out,
        );
        self.retarget(
            (NodeId::Core, Property::DriftWeight),
            Vec3::splat(if mode.is_decon() { 1.0 } else { 0.0 }),
            tuning.face_duration,
            Ease::Power1Out,
        );

        let multiplier = state.explosion_multiplier(&tuning);
        let targets: Vec<(FaceId, Vec3, f32)> = match &self.faces {
            Some(faces) => faces
                .iter()
                .map(|(id, face)| (id, face.centroid() * multiplier, face.spin))
                .collect(),
            None => Vec::new(),
        };
        for (id, position, spin) in targets {
            let node = NodeId::Face(id.0);
            let rotation = if mode.is_decon() {
                Vec3::new(
                    self.rng.random_range(0.0..TAU),
                    self.rng.random_range(0.0..TAU),
                    self.rng.random_range(0.0..TAU),
                )
            } else {
                Vec3::ZERO
            };
            self.retarget((node, Property::Position), position, tuning.face_duration, Ease::ExpoOut);
            self.retarget((node, Property::Rotation), rotation, tuning.face_duration, Ease::Power2Out);
            if mode.is_decon() {
                self.tweens.cancel((node, Property::Spin));
            } else if spin != 0.0 {
                // Unwind along the shorter arc.
                if let Some(face) = self.faces.as_mut().and_then(|faces| faces.get_mut(id)) {
                    face.spin = motion::wrap_angle(spin);
                }
                self.retarget((node, Property::Spin), Vec3::ZERO, tuning.face_duration, Ease::Power2Out);
            }
        }
    }

    /// Cancels whatever runs on `key` and tweens from the current value to `target`.
    fn retarget(&mut self, key: TweenKey, target: Vec3, duration: f32, ease: Ease) {
        let Some(current) = read_property(&self.nodes, self.faces.as_ref(), self.drift_weight, key)
        else {
            log::trace!("No node for {:?}; skipping tween", key);
            return;
        };
        self.tweens.start(key, Tween::new(current, target, duration, ease));
    }

    /// Steps tweens, then layers continuous motion on top.
    pub fn frame(&mut self, frame: &FrameInput) {
        let mode = self.mode();
        let Self {
            tuning,
            faces,
            nodes,
            tweens,
            motion,
            drift_weight,
            ..
        } = self;
        tweens.advance(frame.dt, |key, value| {
            write_property(nodes, faces.as_mut(), drift_weight, key, value)
        });
        motion.step(frame, mode, *drift_weight, tuning, nodes, faces.as_mut());
    }

    pub fn pointer_enter(&mut self, face: FaceId, point: Vec3, handler: &mut dyn CoreHandler) {
        if self.faces.as_ref().and_then(|faces| faces.get(face)).is_none() {
            log::trace!("Pointer enter on unknown {}", face);
            return;
        }
        let mode = self.mode();
        let detail = self
            .inspector
            .pointer_enter(face, point, mode, &mut self.rng)
            .clone();
        log::debug!("Hover {} -> {}: {}", face, detail.title, detail.value);
        handler.on_hover(Some(face.to_string()));
        handler.on_detail_select(Some(detail));
    }

    pub fn pointer_leave(&mut self, face: FaceId, handler: &mut dyn CoreHandler) {
        self.inspector.pointer_leave();
        log::debug!("Hover left {}", face);
        handler.on_hover(None);
        handler.on_detail_select(None);
    }

    /// Pointer landed on empty canvas space.
    pub fn pointer_miss(&mut self, handler: &mut dyn CoreHandler) {
        if self.inspector.pointer_leave() {
            handler.on_hover(None);
            handler.on_detail_select(None);
        }
    }

    /// A click that hit the core's geometry. The caller must not also treat
    /// it as a miss.
    pub fn click(&mut self, handler: &mut dyn CoreHandler) {
        log::debug!("Click on core in {:?}", self.mode());
        handler.on_click();
    }

    pub fn snapshot(&self) -> CoreSnapshot {
        let mode = self.mode();
        let material = MaterialKind::for_mode(mode);
        let core = self.nodes.float.matrix() * self.nodes.core.matrix();
        let hovered = self.inspector.hovered();

        let mut faces = Vec::new();
        if let Some(arena) = &self.faces {
            if self.nodes.icosahedron.scale.max_element() > MIN_VISIBLE_SCALE {
                let group = core * self.nodes.icosahedron.matrix();
                for (id, face) in arena.iter() {
                    let world = group * face_matrix(face);
                    faces.push(FaceSnapshot {
                        id,
                        world: face.local().map(|v| world.transform_point3(v)),
                        material,
                        wireframe: materials::wireframe_style(mode, hovered == Some(id)),
                        tagged: materials::has_tag_marker(id, mode),
                    });
                }
            }
        }

        let structural = if self.nodes.structural.scale.max_element() > MIN_VISIBLE_SCALE {
            let world = core * self.nodes.structural.matrix();
            self.structural_mesh
                .iter()
                .map(|tri| tri.map(|v| world.transform_point3(v)))
                .collect()
        } else {
            Vec::new()
        };

        CoreSnapshot {
            mode,
            faces,
            structural,
            structural_material: MaterialKind::Glass,
        }
    }
}

fn face_matrix(face: &faces::Face) -> Mat4 {
    let rotation = euler_quat(face.transform.rotation)
        * Quat::from_axis_angle(face.spin_axis(), face.spin);
    Mat4::from_scale_rotation_translation(
        face.transform.scale,
        rotation,
        face.transform.position + face.drift,
    )
}

fn read_property(
    nodes: &CoreNodes,
    faces: Option<&FaceArena>,
    drift_weight: f32,
    (node, property): TweenKey,
) -> Option<Vec3> {
    if let NodeId::Face(index) = node {
        let face = faces?.get(FaceId(index))?;
        return match property {
            Property::Position => Some(face.transform.position),
            Property::Rotation => Some(face.transform.rotation),
            Property::Scale => Some(face.transform.scale),
            Property::Spin => Some(Vec3::splat(face.spin)),
            Property::DriftWeight => None,
        };
    }
    if node == NodeId::Core && property == Property::DriftWeight {
        return Some(Vec3::splat(drift_weight));
    }
    let transform = nodes.get(node)?;
    match property {
        Property::Position => Some(transform.position),
        Property::Rotation => Some(transform.rotation),
        Property::Scale => Some(transform.scale),
        Property::Spin | Property::DriftWeight => None,
    }
}

fn write_property(
    nodes: &mut CoreNodes,
    faces: Option<&mut FaceArena>,
    drift_weight: &mut f32,
    (node, property): TweenKey,
    value: Vec3,
) -> bool {
    if let NodeId::Face(index) = node {
        let Some(face) = faces.and_then(|faces| faces.get_mut(FaceId(index))) else {
            return false;
        };
        match property {
            Property::Position => face.transform.position = value,
            Property::Rotation => face.transform.rotation = value,
            Property::Scale => face.transform.scale = value,
            Property::Spin => face.spin = value.x,
            Property::DriftWeight => return false,
        }
        return true;
    }
    if node == NodeId::Core && property == Property::DriftWeight {
        *drift_weight = value.x;
        return true;
    }
    let Some(transform) = nodes.get_mut(node) else {
        return false;
    };
    match property {
        Property::Position => transform.position = value,
        Property::Rotation => transform.rotation = value,
        Property::Scale => transform.scale = value,
        Property::Spin | Property::DriftWeight => return false,
    }
    true
}
