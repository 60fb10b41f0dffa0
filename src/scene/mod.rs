pub mod serialization;

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Addressable transform nodes of the core scene graph.
///
/// Hierarchy, outermost first: `Float` → `Core` → (`Icosahedron` → `Face(i)`, `Structural`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// Outer wrapping group: vertical bob and slow yaw.
    Float,
    /// Main group: mouse parallax, street spin, hover scale, entrance scale.
    Core,
    /// Container of the twenty face panels.
    Icosahedron,
    /// Companion dodecahedron shown in structural-shift mode.
    Structural,
    Face(usize),
}

/// Animatable property of a node. Scalar properties ride in the `x` lane of a `Vec3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Position,
    Rotation,
    Scale,
    /// Accumulated angle about a face's spin axis.
    Spin,
    /// Weight applied to the deconstruction drift jitter.
    DriftWeight,
}

/// Editable transform of one node. Rotation is Euler XYZ in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl NodeTransform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        compose_transform(self.position, self.rotation, self.scale)
    }
}

pub fn euler_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

pub fn compose_transform(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, euler_quat(rotation), position)
}

/// Every tunable constant of the core, loadable from JSON.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneTuning {
    pub face_radius: f32,
    pub decon_multiplier: f32,
    pub explode_multiplier: f32,
    pub face_duration: f32,
    pub structural_scale: f32,
    pub structural_duration: f32,
    pub design_scale: f32,
    pub group_duration: f32,
    pub hover_scale: f32,
    pub hover_duration: f32,
    pub entrance_duration: f32,
    pub parallax_gain: f32,
    /// Lerp factor per 60 Hz frame.
    pub parallax_smoothing: f32,
    pub street_spin_speed: [f32; 2],
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub idle_yaw_speed: f32,
    pub street_yaw_speed: f32,
    pub drift_amplitude: f32,
    pub drift_speed: f32,
    pub face_spin_speed: f32,
    pub camera_distance: f32,
    pub camera_fov_deg: f32,
    pub background_default: [u8; 3],
    pub background_design: [u8; 3],
    pub background_street: [u8; 3],
    pub background_duration: f32,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            face_radius: 2.0,
            decon_multiplier: 2.8,
            explode_multiplier: 2.2,
            face_duration: 1.2,
            structural_scale: 1.3,
            structural_duration: 0.8,
            design_scale: 1.1,
            group_duration: 0.8,
            hover_scale: 1.08,
            hover_duration: 0.5,
            entrance_duration: 1.5,
            parallax_gain: 0.2,
            parallax_smoothing: 0.1,
            street_spin_speed: [1.2, 2.4],
            bob_amplitude: 0.15,
            bob_frequency: 0.5,
            idle_yaw_speed: 0.3,
            street_yaw_speed: 3.3,
            drift_amplitude: 0.08,
            drift_speed: 1.4,
            face_spin_speed: 0.9,
            camera_distance: 8.0,
            camera_fov_deg: 45.0,
            background_default: [0x00, 0x66, 0xFF],
            background_design: [0x12, 0x12, 0x12],
            background_street: [0x00, 0x44, 0xCC],
            background_duration: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_composes_to_identity() {
        let matrix = NodeTransform::default().matrix();
        assert!(matrix.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn compose_applies_scale_then_rotation_then_translation() {
        let matrix = compose_transform(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            Vec3::splat(2.0),
        );
        let point = matrix.transform_point3(Vec3::X);
        // X scaled to 2, yawed a quarter turn onto -Z, then offset.
        assert!(point.abs_diff_eq(Vec3::new(1.0, 2.0, 1.0), 1e-5));
    }

    #[test]
    fn partial_tuning_json_fills_defaults() {
        let tuning: SceneTuning =
            serde_json::from_str(r#"{ "decon_multiplier": 3.5 }"#).unwrap();
        assert_eq!(tuning.decon_multiplier, 3.5);
        assert_eq!(tuning.explode_multiplier, 2.2);
        assert_eq!(tuning.structural_scale, 1.3);
    }
}
