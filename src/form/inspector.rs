use crate::form::faces::FaceId;
use crate::form::section::VisualMode;
use glam::Vec3;
use rand::Rng;

/// A geometry fact shown in a transient label at the point under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedDetail {
    pub title: String,
    pub value: String,
    pub anchor_point: Vec3,
}

pub const FACT_TITLES: [&str; 6] = [
    "Vertices",
    "Edges",
    "Faces",
    "Euler Characteristic",
    "Symmetry Group",
    "Golden Ratio",
];

/// The fixed fact table. Vertex and face counts swap with the structural shift.
pub fn fact_table(mode: VisualMode) -> [(&'static str, &'static str); 6] {
    let (vertices, faces) = if mode.is_shift() {
        ("12", "20")
    } else {
        ("20", "12")
    };
    [
        (FACT_TITLES[0], vertices),
        (FACT_TITLES[1], "30"),
        (FACT_TITLES[2], faces),
        (FACT_TITLES[3], "V - E + F = 2"),
        (FACT_TITLES[4], "Ih (order 120)"),
        (FACT_TITLES[5], "\u{3c6} \u{2248} 1.618"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverState {
    Idle,
    Hovering(FaceId),
}

/// Single-hover tracker. The last pointer-enter wins.
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    hovered: Option<FaceId>,
    detail: Option<SelectedDetail>,
}

impl Inspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HoverState {
        match self.hovered {
            Some(face) => HoverState::Hovering(face),
            None => HoverState::Idle,
        }
    }

    pub fn hovered(&self) -> Option<FaceId> {
        self.hovered
    }

    pub fn detail(&self) -> Option<&SelectedDetail> {
        self.detail.as_ref()
    }

    pub fn pointer_enter<R: Rng + ?Sized>(
        &mut self,
        face: FaceId,
        point: Vec3,
        mode: VisualMode,
        rng: &mut R,
    ) -> &SelectedDetail {
        let table = fact_table(mode);
        let (title, value) = table[rng.random_range(0..table.len())];
        self.hovered = Some(face);
        self.detail.insert(SelectedDetail {
            title: title.to_string(),
            value: value.to_string(),
            anchor_point: point,
        })
    }

    /// Clears hover and detail. Returns whether anything was hovered.
    pub fn pointer_leave(&mut self) -> bool {
        self.detail = None;
        self.hovered.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn enter_samples_a_fact_and_records_anchor() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut inspector = Inspector::new();
        let point = Vec3::new(0.5, 1.0, 1.5);
        let detail = inspector
            .pointer_enter(FaceId(5), point, VisualMode::Idle, &mut rng)
            .clone();
        assert!(FACT_TITLES.contains(&detail.title.as_str()));
        assert_eq!(detail.anchor_point, point);
        assert_eq!(inspector.state(), HoverState::Hovering(FaceId(5)));
    }

    #[test]
    fn leave_always_clears() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut inspector = Inspector::new();
        inspector.pointer_enter(FaceId(1), Vec3::ONE, VisualMode::Idle, &mut rng);
        assert!(inspector.pointer_leave());
        assert_eq!(inspector.state(), HoverState::Idle);
        assert!(inspector.detail().is_none());
        assert!(!inspector.pointer_leave());
    }

    #[test]
    fn last_enter_wins() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut inspector = Inspector::new();
        for face in [2, 7, 3] {
            inspector.pointer_enter(FaceId(face), Vec3::ONE, VisualMode::Idle, &mut rng);
        }
        assert_eq!(inspector.hovered(), Some(FaceId(3)));
    }

    #[test]
    fn counts_follow_structural_shift() {
        let lookup = |mode: VisualMode, title: &str| {
            fact_table(mode)
                .into_iter()
                .find(|(t, _)| *t == title)
                .map(|(_, v)| v)
        };
        assert_eq!(lookup(VisualMode::Shift, "Vertices"), Some("12"));
        assert_eq!(lookup(VisualMode::Shift, "Faces"), Some("20"));
        assert_eq!(lookup(VisualMode::Idle, "Vertices"), Some("20"));
        assert_eq!(lookup(VisualMode::Idle, "Faces"), Some("12"));
    }
}
