//! The blade trail: a bounded, gated history of recent blade points.
//!
//! Gating keeps the trail honest: a near-stationary hand adds nothing
//! (speed gate) and a slow drag cannot pile up near-duplicate points
//! (spacing gate). While the hand idles the trail drains one point per
//! check after a short fade delay, shrinking gracefully toward empty.

use std::collections::VecDeque;

use crate::entities::{ScreenPoint, TrailPoint};

pub const MAX_POINTS: usize = 10;

/// Minimum reported hand speed for a point to register.
pub const MIN_SPEED: f32 = 3.0;

/// Minimum pixel distance from the previous stored point.
pub const MIN_DISTANCE: f32 = 10.0;

/// Idle time before the trail starts draining.
pub const FADE_MS: u64 = 500;

pub struct BladeTrail {
    points: VecDeque<TrailPoint>,
    /// When the most recent point was stored.
    fade_start_ms: Option<u64>,
}

impl BladeTrail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(MAX_POINTS + 1),
            fade_start_ms: None,
        }
    }

    /// Offer this frame's blade position. Appends only past both
    /// gates; otherwise may evict the oldest point if the trail has
    /// been idle longer than the fade delay.
    pub fn add_point(&mut self, pos: ScreenPoint, speed: f32, now_ms: u64) {
        if speed > MIN_SPEED {
            let spaced = match self.points.back() {
                Some(last) => distance(last.pos, pos) > MIN_DISTANCE,
                None => true,
            };
            if spaced {
                self.points.push_back(TrailPoint { pos, added_ms: now_ms });
                self.fade_start_ms = Some(now_ms);
                if self.points.len() > MAX_POINTS {
                    self.points.pop_front();
                }
            }
        } else if let Some(start) = self.fade_start_ms {
            // One eviction per check, so an idle trail drains over
            // several frames rather than vanishing at once.
            if now_ms.saturating_sub(start) > FADE_MS {
                self.points.pop_front();
            }
        }
    }

    /// Drop everything, fade timer included. Used when the hand track
    /// is lost outright, so a stale segment cannot linger.
    pub fn clear(&mut self) {
        self.points.clear();
        self.fade_start_ms = None;
    }

    /// The active slice segment: the two most recent points, oldest
    /// first. `None` until the trail has at least two points.
    pub fn segment(&self) -> Option<(TrailPoint, TrailPoint)> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        Some((self.points[n - 2], self.points[n - 1]))
    }

    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> + '_ {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for BladeTrail {
    fn default() -> Self {
        Self::new()
    }
}

fn distance(a: ScreenPoint, b: ScreenPoint) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}
