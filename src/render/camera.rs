use crate::render::pick::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::PI;

pub const MIN_POLAR: f32 = PI / 3.0;
pub const MAX_POLAR: f32 = PI / 1.5;

const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

/// Orbit camera looking at the origin. Rotation only: no pan, no zoom.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub fov_y: f32,
}

/// A point projected into a viewport of a given size, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub pos: Vec2,
    /// Distance from the eye along the view axis.
    pub depth: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, fov_deg: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            distance: distance.max(NEAR * 2.0),
            azimuth: 0.0,
            polar: PI / 2.0,
            fov_y: fov_deg.clamp(1.0, 170.0).to_radians(),
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az) * self.distance
    }

    pub fn orbit(&mut self, azimuth_delta: f32, polar_delta: f32) {
        self.azimuth = wrap_angle(self.azimuth + azimuth_delta);
        self.polar = (self.polar + polar_delta).clamp(MIN_POLAR, MAX_POLAR);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-3), NEAR, FAR)
    }

    pub fn view_projection(&self, size: Vec2) -> Mat4 {
        self.projection(size.x / size.y.max(1.0)) * self.view()
    }

    /// Projects a world point. `None` when it sits behind the near plane.
    pub fn project(&self, world: Vec3, size: Vec2) -> Option<ScreenPoint> {
        let clip = self.view_projection(size) * world.extend(1.0);
        if clip.w <= NEAR * 0.5 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(ScreenPoint {
            pos: Vec2::new((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y),
            depth: clip.w,
        })
    }

    /// World-space ray through a viewport pixel.
    pub fn ray(&self, screen: Vec2, size: Vec2) -> Ray {
        let ndc = pointer_ndc(screen, size);
        let inverse = self.view_projection(size).inverse();
        let near = unproject(inverse, ndc.extend(0.0));
        let far = unproject(inverse, ndc.extend(1.0));
        Ray::new(near, far - near)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(8.0, 45.0)
    }
}

/// Viewport pixel to normalized device coordinates, y up.
pub fn pointer_ndc(screen: Vec2, size: Vec2) -> Vec2 {
    let size = size.max(Vec2::ONE);
    Vec2::new(screen.x / size.x * 2.0 - 1.0, 1.0 - screen.y / size.y * 2.0)
}

fn unproject(inverse: Mat4, ndc: Vec3) -> Vec3 {
    let world: Vec4 = inverse * ndc.extend(1.0);
    world.truncate() / world.w
}

fn wrap_angle(angle: f32) -> f32 {
    if angle.is_finite() {
        (angle + PI).rem_euclid(PI * 2.0) - PI
    } else {
        0.0
    }
}
