//! Face decomposition of the base icosahedron.
//!
//! The base solid arrives as a non-indexed triangle soup (positions grouped in
//! triples). Each triple becomes one [`Face`]: vertices re-expressed relative
//! to the face centroid so the panel can be moved and spun about its own
//! centre, plus a random spin axis used while the core is deconstructed.

use crate::scene::NodeTransform;
use glam::Vec3;
use rand::Rng;
use std::fmt;

pub const FACE_COUNT: usize = 20;

const ICOSAHEDRON_INDICES: [[usize; 3]; FACE_COUNT] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("vertex soup of {0} positions is not a whole number of triangles")]
    NotTriangles(usize),
    #[error("expected {expected} faces, found {found}")]
    FaceCount { expected: usize, found: usize },
    #[error("face {0} is degenerate")]
    Degenerate(usize),
}

/// Index of a face panel. Displays as the `face_<n>` hover tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

impl FaceId {
    /// Parses a `face_<n>` hover tag. Anything else is an opaque tag.
    #[cfg(test)]
    pub fn parse(part: &str) -> Option<Self> {
        let index: usize = part.strip_prefix("face_")?.parse().ok()?;
        (index < FACE_COUNT).then_some(Self(index))
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "face_{}", self.0)
    }
}

/// One triangular panel of the decomposed solid.
#[derive(Debug, Clone)]
pub struct Face {
    local: [Vec3; 3],
    centroid: Vec3,
    spin_axis: Vec3,
    /// Current transform relative to the icosahedron group.
    pub transform: NodeTransform,
    /// Accumulated angle about `spin_axis`.
    pub spin: f32,
    /// Deconstruction jitter added on top of `transform.position`.
    pub drift: Vec3,
}

impl Face {
    pub fn local(&self) -> &[Vec3; 3] {
        &self.local
    }

    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    pub fn spin_axis(&self) -> Vec3 {
        self.spin_axis
    }

    /// Outward normal in the face's local frame.
    #[cfg(test)]
    pub fn local_normal(&self) -> Vec3 {
        let [a, b, c] = self.local;
        (b - a).cross(c - a).normalize_or_zero()
    }
}

/// Fixed arena of the twenty faces, indexed by [`FaceId`]. Never resized.
#[derive(Debug, Clone)]
pub struct FaceArena {
    faces: Box<[Face; FACE_COUNT]>,
}

impl FaceArena {
    pub fn get(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.0)
    }

    pub fn get_mut(&mut self, id: FaceId) -> Option<&mut Face> {
        self.faces.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter().enumerate().map(|(i, face)| (FaceId(i), face))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (FaceId, &mut Face)> {
        self.faces
            .iter_mut()
            .enumerate()
            .map(|(i, face)| (FaceId(i), face))
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }
}

fn icosahedron_vertices(radius: f32) -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(|v| v.normalize() * radius)
}

/// Non-indexed positions of an icosahedron with circumradius `radius`.
pub fn icosahedron_soup(radius: f32) -> Vec<Vec3> {
    let vertices = icosahedron_vertices(radius);
    ICOSAHEDRON_INDICES
        .iter()
        .flat_map(|tri| tri.map(|i| vertices[i]))
        .collect()
}

/// Splits a triangle soup into exactly [`FACE_COUNT`] faces.
pub fn decompose<R: Rng + ?Sized>(
    positions: &[Vec3],
    rng: &mut R,
) -> Result<FaceArena, GeometryError> {
    if positions.len() % 3 != 0 {
        return Err(GeometryError::NotTriangles(positions.len()));
    }
    let found = positions.len() / 3;
    if found != FACE_COUNT {
        return Err(GeometryError::FaceCount {
            expected: FACE_COUNT,
            found,
        });
    }

    let mut faces = Vec::with_capacity(FACE_COUNT);
    for (index, tri) in positions.chunks_exact(3).enumerate() {
        let (a, mut b, mut c) = (tri[0], tri[1], tri[2]);
        let centroid = (a + b + c) / 3.0;
        let cross = (b - a).cross(c - a);
        if cross.length() < 1e-6 || centroid.length() < 1e-6 {
            return Err(GeometryError::Degenerate(index));
        }
        // Keep every panel wound counter-clockwise when seen from outside.
        if cross.dot(centroid) < 0.0 {
            std::mem::swap(&mut b, &mut c);
        }
        faces.push(Face {
            local: [a - centroid, b - centroid, c - centroid],
            centroid,
            spin_axis: random_unit_axis(rng),
            transform: NodeTransform::at(centroid),
            spin: 0.0,
            drift: Vec3::ZERO,
        });
    }

    let faces: Box<[Face; FACE_COUNT]> = faces
        .into_boxed_slice()
        .try_into()
        .map_err(|rest: Box<[Face]>| GeometryError::FaceCount {
            expected: FACE_COUNT,
            found: rest.len(),
        })?;
    Ok(FaceArena { faces })
}

fn random_unit_axis<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let length_sq = candidate.length_squared();
        if length_sq > 1e-4 && length_sq <= 1.0 {
            return candidate / length_sq.sqrt();
        }
    }
}

/// Triangles of the dodecahedron dual to the base icosahedron, at circumradius `radius`.
///
/// Each icosahedron vertex becomes a pentagon through the centroids of its five
/// surrounding faces, ordered around the vertex and fanned into three triangles.
pub fn dodecahedron_triangles(radius: f32) -> Vec<[Vec3; 3]> {
    let vertices = icosahedron_vertices(1.0);
    let corners: Vec<Vec3> = ICOSAHEDRON_INDICES
        .iter()
        .map(|tri| {
            let centroid = (vertices[tri[0]] + vertices[tri[1]] + vertices[tri[2]]) / 3.0;
            centroid.normalize() * radius
        })
        .collect();

    let mut triangles = Vec::with_capacity(36);
    for (vertex_index, vertex) in vertices.iter().enumerate() {
        let normal = vertex.normalize();
        let mut ring: Vec<Vec3> = ICOSAHEDRON_INDICES
            .iter()
            .zip(&corners)
            .filter(|(tri, _)| tri.contains(&vertex_index))
            .map(|(_, corner)| *corner)
            .collect();
        let Some(first) = ring.first().copied() else {
            continue;
        };
        let u = (first - normal * first.dot(normal)).normalize_or_zero();
        let w = normal.cross(u);
        ring.sort_by(|a, b| {
            let angle_a = a.dot(w).atan2(a.dot(u));
            let angle_b = b.dot(w).atan2(b.dot(u));
            angle_a.total_cmp(&angle_b)
        });
        for i in 1..ring.len().saturating_sub(1) {
            triangles.push([ring[0], ring[i], ring[i + 1]]);
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arena() -> FaceArena {
        let mut rng = StdRng::seed_from_u64(7);
        decompose(&icosahedron_soup(2.0), &mut rng).unwrap()
    }

    #[test]
    fn decomposition_yields_twenty_faces() {
        let arena = arena();
        assert_eq!(arena.len(), FACE_COUNT);
        for (_, face) in arena.iter() {
            assert!(face.centroid().length() > 1.0);
            assert!((face.spin_axis().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn local_vertices_are_centred_on_the_centroid() {
        for (_, face) in arena().iter() {
            let sum: Vec3 = face.local().iter().copied().sum();
            assert!(sum.length() < 1e-5);
            assert_eq!(face.transform.position, face.centroid());
        }
    }

    #[test]
    fn centroids_are_deterministic_across_runs() {
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = decompose(&icosahedron_soup(2.0), &mut rng_a).unwrap();
        let b = decompose(&icosahedron_soup(2.0), &mut rng_b).unwrap();
        for ((_, fa), (_, fb)) in a.iter().zip(b.iter()) {
            assert_eq!(fa.centroid(), fb.centroid());
        }
    }

    #[test]
    fn normals_point_outward() {
        for (_, face) in arena().iter() {
            assert!(face.local_normal().dot(face.centroid()) > 0.0);
        }
    }

    #[test]
    fn rejects_partial_triangles() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut soup = icosahedron_soup(2.0);
        soup.pop();
        assert_eq!(
            decompose(&soup, &mut rng).unwrap_err(),
            GeometryError::NotTriangles(59)
        );
    }

    #[test]
    fn rejects_empty_and_wrong_face_counts() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            decompose(&[], &mut rng).unwrap_err(),
            GeometryError::FaceCount {
                expected: FACE_COUNT,
                found: 0
            }
        );
        let soup = icosahedron_soup(2.0);
        assert!(matches!(
            decompose(&soup[..30], &mut rng),
            Err(GeometryError::FaceCount { found: 10, .. })
        ));
    }

    #[test]
    fn rejects_degenerate_face() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut soup = icosahedron_soup(2.0);
        soup[4] = soup[3];
        assert_eq!(
            decompose(&soup, &mut rng).unwrap_err(),
            GeometryError::Degenerate(1)
        );
    }

    #[test]
    fn face_tags_round_trip_through_parse() {
        assert_eq!(FaceId(5).to_string(), "face_5");
        assert_eq!(FaceId::parse("face_5"), Some(FaceId(5)));
        assert_eq!(FaceId::parse("face_20"), None);
        assert_eq!(FaceId::parse("wheel_1"), None);
    }

    #[test]
    fn dodecahedron_has_twelve_pentagons_on_the_sphere() {
        let triangles = dodecahedron_triangles(2.0);
        assert_eq!(triangles.len(), 36);
        for tri in &triangles {
            for corner in tri {
                assert!((corner.length() - 2.0).abs() < 1e-4);
            }
            let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
            assert!(normal.dot(tri[0]) > 0.0);
        }
    }
}
