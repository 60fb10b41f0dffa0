use std::time::{Duration, Instant};

/// Longest step handed to the animation, in seconds.
pub const MAX_FRAME_DT: f32 = 0.1;

pub struct FrameTiming {
    start: Option<Instant>,
    last_frame_time: Option<Instant>,
    last_fps_time: Option<Instant>,
    frame_count: u32,
    pub frame_dt: f32,
    pub elapsed: f32,
    paint_ms: f32,
    base_title: String,
}

impl FrameTiming {
    pub fn new(base_title: String) -> Self {
        Self {
            start: None,
            last_frame_time: None,
            last_fps_time: None,
            frame_count: 0,
            frame_dt: 1.0 / 60.0,
            elapsed: 0.0,
            paint_ms: 0.0,
            base_title,
        }
    }

    pub fn set_paint_ms(&mut self, paint_ms: f32) {
        self.paint_ms = paint_ms;
    }

    /// Advances the clock. Returns a fresh window title twice a second.
    pub fn update(&mut self, now: Instant) -> Option<String> {
        let start = *self.start.get_or_insert(now);
        let dt_duration = if let Some(last) = self.last_frame_time {
            now.saturating_duration_since(last)
        } else {
            Duration::from_millis(16)
        };
        self.last_frame_time = Some(now);
        self.frame_dt = dt_duration.as_secs_f32().clamp(0.0, MAX_FRAME_DT);
        self.elapsed = now.saturating_duration_since(start).as_secs_f32();

        self.frame_count = self.frame_count.saturating_add(1);
        let last_fps_time = *self.last_fps_time.get_or_insert(now);
        let window = now.saturating_duration_since(last_fps_time);
        if window.as_secs_f32() < 0.5 {
            return None;
        }
        let fps = self.frame_count as f32 / window.as_secs_f32();
        self.frame_count = 0;
        self.last_fps_time = Some(now);
        Some(format!(
            "{} - {:.1} fps (paint {:.2} ms)",
            self.base_title, fps, self.paint_ms
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_assumes_sixty_hz() {
        let mut timing = FrameTiming::new("Test".to_string());
        assert!(timing.update(Instant::now()).is_none());
        assert!((timing.frame_dt - 0.016).abs() < 1e-6);
        assert_eq!(timing.elapsed, 0.0);
    }

    #[test]
    fn long_stalls_are_clamped() {
        let mut timing = FrameTiming::new("Test".to_string());
        let t0 = Instant::now();
        timing.update(t0);
        timing.update(t0 + Duration::from_secs(3));
        assert_eq!(timing.frame_dt, MAX_FRAME_DT);
        assert!((timing.elapsed - 3.0).abs() < 1e-4);
    }

    #[test]
    fn title_refreshes_every_half_second() {
        let mut timing = FrameTiming::new("Core".to_string());
        let t0 = Instant::now();
        let mut titles = Vec::new();
        for frame in 0..=60 {
            if let Some(title) = timing.update(t0 + Duration::from_millis(frame * 20)) {
                titles.push(title);
            }
        }
        assert_eq!(titles.len(), 2);
        assert!(titles[0].starts_with("Core - 5"));
    }
}
