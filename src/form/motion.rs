//! Continuous per-frame motion, layered over whatever the tweens have set.

use crate::form::faces::FaceArena;
use crate::form::section::VisualMode;
use crate::form::CoreNodes;
use crate::scene::SceneTuning;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Host clock and pointer for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub dt: f32,
    pub elapsed: f32,
    /// Pointer in normalized device coordinates, each axis in [-1, 1].
    pub pointer: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct MotionDriver {
    parallax: Vec2,
    street_spin: Vec2,
    float_yaw: f32,
}

/// Converts a per-60Hz-frame lerp factor into one for `dt`.
pub fn smoothing_factor(per_frame: f32, dt: f32) -> f32 {
    let per_frame = per_frame.clamp(0.0, 1.0);
    1.0 - (1.0 - per_frame).powf(dt.max(0.0) * 60.0)
}

/// Maps an angle onto its equivalent in (-π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

impl MotionDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(
        &mut self,
        frame: &FrameInput,
        mode: VisualMode,
        drift_weight: f32,
        tuning: &SceneTuning,
        nodes: &mut CoreNodes,
        faces: Option<&mut FaceArena>,
    ) {
        let pointer = frame.pointer.clamp(Vec2::splat(-1.0), Vec2::ONE);
        let target = Vec2::new(-pointer.y, pointer.x) * tuning.parallax_gain;
        let k = smoothing_factor(tuning.parallax_smoothing, frame.dt);
        self.parallax += (target - self.parallax) * k;

        if mode.is_street() {
            let [sx, sy] = tuning.street_spin_speed;
            self.street_spin += Vec2::new(sx, sy) * frame.dt;
            self.street_spin.x = self.street_spin.x.rem_euclid(TAU);
            self.street_spin.y = self.street_spin.y.rem_euclid(TAU);
        } else if self.street_spin != Vec2::ZERO {
            let spin = Vec2::new(wrap_angle(self.street_spin.x), wrap_angle(self.street_spin.y));
            self.street_spin = spin - spin * k;
            if self.street_spin.abs_diff_eq(Vec2::ZERO, 1e-5) {
                self.street_spin = Vec2::ZERO;
            }
        }
        nodes.core.rotation = Vec3::new(
            self.parallax.x + self.street_spin.x,
            self.parallax.y + self.street_spin.y,
            0.0,
        );

        let yaw_speed = if mode.is_street() {
            tuning.street_yaw_speed
        } else {
            tuning.idle_yaw_speed
        };
        self.float_yaw = (self.float_yaw + yaw_speed * frame.dt).rem_euclid(TAU);
        nodes.float.position.y = (frame.elapsed * tuning.bob_frequency).sin() * tuning.bob_amplitude;
        nodes.float.rotation.y = self.float_yaw;

        let Some(faces) = faces else {
            return;
        };
        let t = frame.elapsed * tuning.drift_speed;
        for (id, face) in faces.iter_mut() {
            let phase = id.0 as f32;
            face.drift = Vec3::new(
                (t + phase).sin(),
                (t * 0.9 + phase * 1.3).cos(),
                (t * 1.1 + phase * 0.7).sin(),
            ) * (tuning.drift_amplitude * drift_weight);
            if mode.is_decon() {
                face.spin = (face.spin + tuning.face_spin_speed * frame.dt).rem_euclid(TAU);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::faces::{decompose, icosahedron_soup};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frame(dt: f32, elapsed: f32, pointer: Vec2) -> FrameInput {
        FrameInput {
            dt,
            elapsed,
            pointer,
        }
    }

    #[test]
    fn smoothing_matches_per_frame_factor_at_sixty_hz() {
        assert!((smoothing_factor(0.1, 1.0 / 60.0) - 0.1).abs() < 1e-5);
        assert_eq!(smoothing_factor(0.1, 0.0), 0.0);
        assert!(smoothing_factor(0.1, 1.0) > 0.99);
    }

    #[test]
    fn parallax_converges_on_pointer_target() {
        let tuning = SceneTuning::default();
        let mut driver = MotionDriver::new();
        let mut nodes = CoreNodes::default();
        for i in 0..600 {
            let input = frame(1.0 / 60.0, i as f32 / 60.0, Vec2::new(1.0, -1.0));
            driver.step(&input, VisualMode::Idle, 0.0, &tuning, &mut nodes, None);
        }
        assert!((nodes.core.rotation.x - 0.2).abs() < 1e-3);
        assert!((nodes.core.rotation.y - 0.2).abs() < 1e-3);
    }

    #[test]
    fn street_spin_settles_after_leaving_street() {
        let tuning = SceneTuning::default();
        let mut driver = MotionDriver::new();
        let mut nodes = CoreNodes::default();
        let mut elapsed = 0.0;
        for _ in 0..37 {
            elapsed += 1.0 / 60.0;
            let input = frame(1.0 / 60.0, elapsed, Vec2::ZERO);
            driver.step(&input, VisualMode::Street, 0.0, &tuning, &mut nodes, None);
        }
        assert!(nodes.core.rotation.length() > 0.1);

        for _ in 0..1200 {
            elapsed += 1.0 / 60.0;
            let input = frame(1.0 / 60.0, elapsed, Vec2::ZERO);
            driver.step(&input, VisualMode::Idle, 0.0, &tuning, &mut nodes, None);
        }
        assert!(
            nodes.core.rotation.abs_diff_eq(Vec3::ZERO, 1e-3),
            "core rotation after leaving street: {:?}",
            nodes.core.rotation
        );
    }

    #[test]
    fn street_spin_unwinds_the_short_way() {
        let tuning = SceneTuning::default();
        let mut driver = MotionDriver {
            street_spin: Vec2::new(6.0, 0.5),
            ..MotionDriver::default()
        };
        let mut nodes = CoreNodes::default();
        driver.step(&frame(1.0 / 60.0, 0.0, Vec2::ZERO), VisualMode::Idle, 0.0, &tuning, &mut nodes, None);
        let x = nodes.core.rotation.x;
        assert!(x < 0.0 && x > 6.0 - TAU, "x = {}", x);
    }

    #[test]
    fn wrap_angle_picks_nearest_equivalent() {
        assert!((wrap_angle(6.0) - (6.0 - TAU)).abs() < 1e-5);
        assert!((wrap_angle(-4.0) - (TAU - 4.0)).abs() < 1e-5);
        assert!((wrap_angle(PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
        assert_eq!(wrap_angle(0.5), 0.5);
    }

    #[test]
    fn bob_stays_within_amplitude_and_yaw_advances() {
        let tuning = SceneTuning::default();
        let mut driver = MotionDriver::new();
        let mut nodes = CoreNodes::default();
        for i in 0..240 {
            let input = frame(1.0 / 60.0, i as f32 / 60.0, Vec2::ZERO);
            driver.step(&input, VisualMode::Idle, 0.0, &tuning, &mut nodes, None);
            assert!(nodes.float.position.y.abs() <= 0.15 + 1e-6);
        }
        assert!((nodes.float.rotation.y - 4.0 * tuning.idle_yaw_speed).abs() < 1e-3);
    }

    #[test]
    fn street_spins_faster_than_idle() {
        let tuning = SceneTuning::default();
        let mut idle = MotionDriver::new();
        let mut street = MotionDriver::new();
        let mut idle_nodes = CoreNodes::default();
        let mut street_nodes = CoreNodes::default();
        let input = frame(0.1, 0.1, Vec2::ZERO);
        idle.step(&input, VisualMode::Idle, 0.0, &tuning, &mut idle_nodes, None);
        street.step(&input, VisualMode::Street, 0.0, &tuning, &mut street_nodes, None);
        assert!(street_nodes.float.rotation.y > idle_nodes.float.rotation.y * 5.0);
        assert_eq!(idle_nodes.core.rotation, Vec3::ZERO);
        assert!(street_nodes.core.rotation.x > 0.0 && street_nodes.core.rotation.y > 0.0);
    }

    #[test]
    fn deconstruction_drifts_and_spins_faces() {
        let tuning = SceneTuning::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut faces = decompose(&icosahedron_soup(2.0), &mut rng).unwrap();
        let mut driver = MotionDriver::new();
        let mut nodes = CoreNodes::default();
        let input = frame(0.5, 3.0, Vec2::ZERO);
        driver.step(&input, VisualMode::Decon, 1.0, &tuning, &mut nodes, Some(&mut faces));
        for (_, face) in faces.iter() {
            assert!(face.spin > 0.0);
            assert!(face.drift.length() <= tuning.drift_amplitude * 3.0_f32.sqrt() + 1e-5);
            assert_eq!(face.transform.position, face.centroid());
        }
        let drifts: Vec<Vec3> = faces.iter().map(|(_, face)| face.drift).collect();
        assert_ne!(drifts[0], drifts[1]);
    }

    #[test]
    fn faces_rest_outside_deconstruction() {
        let tuning = SceneTuning::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut faces = decompose(&icosahedron_soup(2.0), &mut rng).unwrap();
        let mut driver = MotionDriver::new();
        let mut nodes = CoreNodes::default();
        let input = frame(0.5, 3.0, Vec2::ZERO);
        driver.step(&input, VisualMode::Design, 0.0, &tuning, &mut nodes, Some(&mut faces));
        for (_, face) in faces.iter() {
            assert_eq!(face.spin, 0.0);
            assert_eq!(face.drift, Vec3::ZERO);
        }
    }
}
