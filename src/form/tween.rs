//! Eased tweens and a small manager that keeps at most one tween per key.
//!
//! Starting a tween on a key that already has one replaces it (cancel and
//! retarget), with the caller supplying the node's current value as the new
//! start so motion stays continuous. Re-issuing the exact target of a running
//! tween is a no-op.

use crate::scene::{NodeId, Property};
use glam::Vec3;
use std::collections::HashMap;
use std::f32::consts::TAU;
use std::hash::Hash;

pub type TweenKey = (NodeId, Property);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    /// Quadratic deceleration.
    Power1Out,
    /// Cubic deceleration.
    Power2Out,
    Power2In,
    Power2InOut,
    Power4InOut,
    /// Exponential deceleration.
    ExpoOut,
    ElasticOut { amplitude: f32, period: f32 },
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2In => t.powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::Power4InOut => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Ease::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Ease::ElasticOut { amplitude, period } => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                let amplitude = amplitude.max(1.0);
                let shift = period / TAU * (1.0 / amplitude).asin();
                amplitude * 2.0_f32.powf(-10.0 * t) * ((t - shift) * TAU / period).sin() + 1.0
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: Vec3,
    to: Vec3,
    duration: f32,
    delay: f32,
    elapsed: f32,
    ease: Ease,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            delay: 0.0,
            elapsed: 0.0,
            ease,
        }
    }

    pub fn scalar(from: f32, to: f32, duration: f32, ease: Ease) -> Self {
        Self::new(Vec3::splat(from), Vec3::splat(to), duration, ease)
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }

    pub fn value(&self) -> Vec3 {
        let running = self.elapsed - self.delay;
        if running <= 0.0 {
            return self.from;
        }
        if self.duration <= f32::EPSILON || running >= self.duration {
            return self.to;
        }
        self.from.lerp(self.to, self.ease.apply(running / self.duration))
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed - self.delay >= self.duration
    }
}

/// One running tween per key.
#[derive(Debug, Clone)]
pub struct TweenManager<K = TweenKey> {
    tweens: HashMap<K, Tween>,
}

impl<K> Default for TweenManager<K> {
    fn default() -> Self {
        Self {
            tweens: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> TweenManager<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `tween` on `key`, replacing any tween already there.
    ///
    /// Returns `false` and leaves the running tween untouched when it already
    /// heads to the same target.
    pub fn start(&mut self, key: K, tween: Tween) -> bool {
        if let Some(existing) = self.tweens.get(&key) {
            if existing.target().abs_diff_eq(tween.target(), 1e-6) {
                return false;
            }
        }
        self.tweens.insert(key, tween);
        true
    }

    pub fn cancel(&mut self, key: K) -> bool {
        self.tweens.remove(&key).is_some()
    }

    pub fn target(&self, key: K) -> Option<Vec3> {
        self.tweens.get(&key).map(Tween::target)
    }

    #[cfg(test)]
    pub fn is_active(&self, key: K) -> bool {
        self.tweens.contains_key(&key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Steps every tween by `dt` and hands the new value to `apply`.
    ///
    /// `apply` returns `false` when the key's node does not exist; that tween
    /// is dropped and the others carry on. Finished tweens are removed after
    /// their final value is written.
    pub fn advance<F>(&mut self, dt: f32, mut apply: F)
    where
        F: FnMut(K, Vec3) -> bool,
    {
        self.tweens.retain(|key, tween| {
            tween.advance(dt);
            if !apply(*key, tween.value()) {
                log::trace!("Dropping tween for missing node {:?}", key);
                return false;
            }
            !tween.is_finished()
        });
    }
}
