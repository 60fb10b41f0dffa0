//! Software rendering of a [`CoreSnapshot`] into an egui painter.
//!
//! Triangles are projected on the CPU, flat shaded from their material's
//! [`Appearance`] and painted back to front. Each triangle's wireframe edges
//! are painted right after its fill so nearer faces cover them.

pub mod camera;
pub mod egui_overlay;
pub mod pick;

pub use camera::OrbitCamera;
pub use egui_overlay::GraffitiLayer;

use crate::form::materials::{Appearance, MaterialKind, WireframeStyle};
use crate::form::CoreSnapshot;
use egui::{Color32, Mesh, Painter, Pos2, Rect, Shape, Stroke};
use glam::{Vec2, Vec3};

const LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
const AMBIENT: f32 = 0.5;
const IRIDESCENT_SHEEN: [f32; 3] = [0.6, 0.2, 1.0];
const TAG_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 0.8];
const TAG_SHRINK: f32 = 0.5;
const STRUCTURAL_WIREFRAME: WireframeStyle = WireframeStyle {
    color_rgb: [1.0, 1.0, 1.0],
    opacity: 1.0,
};
const WIRE_WIDTH: f32 = 1.0;

struct DrawTriangle {
    points: [Pos2; 3],
    depth: f32,
    fill: Color32,
    outline: Stroke,
    marker: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintStats {
    pub triangles: usize,
    pub culled: usize,
}

/// Paints the core into `rect`. Returns what was drawn.
pub fn paint_core(
    painter: &Painter,
    rect: Rect,
    camera: &OrbitCamera,
    snapshot: &CoreSnapshot,
) -> PaintStats {
    let size = Vec2::new(rect.width(), rect.height());
    let eye = camera.eye();
    let mut stats = PaintStats::default();
    let mut draws = Vec::with_capacity(snapshot.faces.len() + snapshot.structural.len());

    let faces = snapshot.faces.iter().map(|face| {
        (&face.world, face.material, face.wireframe, face.tagged)
    });
    let structural = snapshot.structural.iter().map(|tri| {
        (tri, snapshot.structural_material, STRUCTURAL_WIREFRAME, false)
    });

    for (world, material, wireframe, marker) in faces.chain(structural) {
        let Some((points, depth)) = project_triangle(camera, world, size, rect.min) else {
            stats.culled += 1;
            continue;
        };
        let centroid = (world[0] + world[1] + world[2]) / 3.0;
        let normal = (world[1] - world[0]).cross(world[2] - world[0]).normalize_or_zero();
        let to_eye = (eye - centroid).normalize_or_zero();
        let sheen = material == MaterialKind::Iridescent;
        draws.push(DrawTriangle {
            points,
            depth,
            fill: shade(material.appearance(), normal, to_eye, sheen),
            outline: wire_stroke(wireframe),
            marker,
        });
    }

    draws.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    for draw in &draws {
        paint_triangle(painter, draw);
    }
    stats.triangles = draws.len();
    stats
}

fn project_triangle(
    camera: &OrbitCamera,
    world: &[Vec3; 3],
    size: Vec2,
    origin: Pos2,
) -> Option<([Pos2; 3], f32)> {
    let mut points = [Pos2::ZERO; 3];
    let mut depth = 0.0;
    for (point, vertex) in points.iter_mut().zip(world) {
        let projected = camera.project(*vertex, size)?;
        *point = origin + egui::vec2(projected.pos.x, projected.pos.y);
        depth += projected.depth;
    }
    Some((points, depth / 3.0))
}

/// Lambert plus a Blinn highlight. Back faces are lit from their far side,
/// so double sided surfaces darken instead of vanishing.
fn shade(appearance: &Appearance, normal: Vec3, to_eye: Vec3, sheen: bool) -> Color32 {
    let normal = if normal.dot(to_eye) < 0.0 { -normal } else { normal };
    let light = LIGHT_POSITION.normalize();
    let lambert = normal.dot(light).max(0.0);

    let [r, g, b, a] = appearance.base_color_rgba;
    let mut base = Vec3::new(r, g, b);
    if sheen {
        let fresnel = (1.0 - normal.dot(to_eye).clamp(0.0, 1.0)).powi(2);
        base = base.lerp(Vec3::from(IRIDESCENT_SHEEN), fresnel);
    }

    let diffuse = base * (AMBIENT + (1.0 - AMBIENT) * lambert) * (1.0 - appearance.metallic * 0.4);
    let half = (light + to_eye).normalize_or_zero();
    let shininess = 8.0 + 88.0 * (1.0 - appearance.roughness);
    let highlight = normal.dot(half).max(0.0).powf(shininess);
    let specular_tint = Vec3::ONE.lerp(base, appearance.metallic);
    let specular = specular_tint * highlight * (0.04 + 0.96 * appearance.metallic);
    let emissive = Vec3::from(appearance.emissive_rgb) * appearance.emissive_intensity * 0.5;

    rgba(diffuse + specular + emissive, a)
}

fn rgba(rgb: Vec3, alpha: f32) -> Color32 {
    let rgb = rgb.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    Color32::from_rgba_unmultiplied(
        rgb.x.round() as u8,
        rgb.y.round() as u8,
        rgb.z.round() as u8,
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

fn wire_stroke(style: WireframeStyle) -> Stroke {
    Stroke::new(WIRE_WIDTH, rgba(Vec3::from(style.color_rgb), style.opacity))
}

fn paint_triangle(painter: &Painter, draw: &DrawTriangle) {
    painter.add(Shape::mesh(triangle_mesh(draw.points, draw.fill)));
    let [a, b, c] = draw.points;
    for edge in [[a, b], [b, c], [c, a]] {
        painter.line_segment(edge, draw.outline);
    }
    if draw.marker {
        let center = Pos2::new(
            (a.x + b.x + c.x) / 3.0,
            (a.y + b.y + c.y) / 3.0,
        );
        let marker = draw.points.map(|p| center + (p - center) * TAG_SHRINK);
        let [r, g, b, alpha] = TAG_COLOR;
        painter.add(Shape::mesh(triangle_mesh(marker, rgba(Vec3::new(r, g, b), alpha))));
    }
}

fn triangle_mesh(points: [Pos2; 3], color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    for point in points {
        mesh.colored_vertex(point, color);
    }
    mesh.add_triangle(0, 1, 2);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::materials::{GLASS, MATTE_DARK};

    #[test]
    fn lit_side_is_brighter_than_shadow_side() {
        let light = LIGHT_POSITION.normalize();
        let lit = shade(&MATTE_DARK, light, light, false);
        let dark = shade(&MATTE_DARK, -light, -light, false);
        assert!(lit.r() > dark.r());
    }

    #[test]
    fn glass_keeps_its_alpha() {
        let color = shade(&GLASS, Vec3::Z, Vec3::Z, false);
        assert_eq!(color.a(), (0.45_f32 * 255.0).round() as u8);
    }

    #[test]
    fn back_faces_shade_like_front_faces() {
        let front = shade(&MATTE_DARK, Vec3::Z, Vec3::Z, false);
        let back = shade(&MATTE_DARK, Vec3::NEG_Z, Vec3::Z, false);
        assert_eq!(front, back);
    }

    #[test]
    fn triangle_behind_camera_is_not_projected() {
        let camera = OrbitCamera::default();
        let size = Vec2::new(640.0, 480.0);
        let behind = [
            Vec3::new(0.0, 0.0, 12.0),
            Vec3::new(1.0, 0.0, 12.0),
            Vec3::new(0.0, 1.0, 12.0),
        ];
        assert!(project_triangle(&camera, &behind, size, Pos2::ZERO).is_none());
        let front = behind.map(|v| v - Vec3::Z * 12.0);
        let (points, depth) = project_triangle(&camera, &front, size, Pos2::ZERO).unwrap();
        assert!((points[0].x - 320.0).abs() < 1e-3);
        assert!(depth > 7.0 && depth < 9.0);
    }
}
