//! CPU pick pass
//!
//! Casts the pointer ray against the triangles of the latest
//! [`CoreSnapshot`]. Faces resolve to their [`FaceId`]; the structural body
//! only counts as "something on the core" for clicks.

use crate::form::{CoreSnapshot, FaceId};
use glam::Vec3;

// ========================================================================
// Ray
// ========================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

// ========================================================================
// PickHit
// ========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickTarget {
    Face(FaceId),
    Structural,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub target: PickTarget,
    /// World-space intersection point.
    pub point: Vec3,
    pub distance: f32,
}

impl PickHit {
    pub fn face(&self) -> Option<FaceId> {
        match self.target {
            PickTarget::Face(id) => Some(id),
            PickTarget::Structural => None,
        }
    }
}

// ========================================================================
// intersection
// ========================================================================

/// Möller–Trumbore, double sided. Returns the hit distance along the ray.
pub fn intersect_triangle(ray: &Ray, tri: &[Vec3; 3]) -> Option<f32> {
    const EPSILON: f32 = 1e-7;
    let edge1 = tri[1] - tri[0];
    let edge2 = tri[2] - tri[0];
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}

/// Nearest hit among faces and structural triangles.
pub fn pick(ray: &Ray, snapshot: &CoreSnapshot) -> Option<PickHit> {
    let faces = snapshot
        .faces
        .iter()
        .map(|face| (PickTarget::Face(face.id), &face.world));
    let structural = snapshot
        .structural
        .iter()
        .map(|tri| (PickTarget::Structural, tri));

    faces
        .chain(structural)
        .filter_map(|(target, tri)| {
            intersect_triangle(ray, tri).map(|distance| PickHit {
                target,
                point: ray.at(distance),
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
