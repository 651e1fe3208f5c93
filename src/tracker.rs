//! Hand-position smoothing, velocity estimation and loss prediction.
//!
//! Raw palm centers jitter at detection resolution, so the tracker
//! keeps a short history and reports a recency-weighted average. When
//! the pose source loses the hand it extrapolates along the smoothed
//! velocity for a few frames before giving up, which hides one-frame
//! detection dropouts without freezing or snapping the cursor.

use std::collections::VecDeque;

use crate::entities::{NormPoint, TrackState, Velocity};
use crate::pose::{palm_center, Landmarks};

/// Raw palm-center samples kept for smoothing.
pub const HISTORY_CAP: usize = 8;

/// Smoothing kicks in once this many samples exist; below it the raw
/// point is reported directly.
const MIN_SMOOTH_SAMPLES: usize = 3;

/// Consecutive undetected frames tolerated before the track is dropped.
pub const MAX_LOST_FRAMES: u32 = 5;

/// Exponential-smoothing factor for the velocity estimate.
const SMOOTH_FACTOR: f32 = 0.5;

/// Displacement gain: the cursor covers more screen than the hand does
/// camera, so a small physical motion still reads as a swipe.
const MOVEMENT_GAIN: f32 = 1.5;

/// Geometric velocity decay per predicted frame.
const PREDICTION_DECAY: f32 = 0.8;

/// Normalized units/frame → the display-scale speed the trail gates on.
const SPEED_SCALE: f32 = 1000.0;

/// What the tracker reports each frame.
#[derive(Clone, Copy, Debug)]
pub struct HandSample {
    pub position: Option<NormPoint>,
    /// Magnitude of the smoothed velocity at display scale. Zero on
    /// the first-ever detection and on every predicted frame.
    pub speed: f32,
    pub velocity: Velocity,
    pub state: TrackState,
}

pub struct HandTracker {
    history: VecDeque<NormPoint>,
    prev: Option<NormPoint>,
    velocity: Velocity,
    lost_frames: u32,
}

impl HandTracker {
    pub fn new() -> Self {
        Self {
            history: VecDeque::with_capacity(HISTORY_CAP),
            prev: None,
            velocity: Velocity::default(),
            lost_frames: 0,
        }
    }

    /// Advance one frame with the pose source's result for that frame.
    pub fn update(&mut self, landmarks: Option<&Landmarks>) -> HandSample {
        match landmarks {
            Some(lm) => self.on_detection(palm_center(lm)),
            None => self.on_loss(),
        }
    }

    fn on_detection(&mut self, raw: NormPoint) -> HandSample {
        self.lost_frames = 0;

        self.history.push_back(raw);
        if self.history.len() > HISTORY_CAP {
            self.history.pop_front();
        }

        let current = if self.history.len() >= MIN_SMOOTH_SAMPLES {
            self.weighted_average()
        } else {
            raw
        };

        let speed = match self.prev {
            Some(prev) => {
                let dx = (current.x - prev.x) * MOVEMENT_GAIN;
                let dy = (current.y - prev.y) * MOVEMENT_GAIN;
                self.velocity.x = self.velocity.x * (1.0 - SMOOTH_FACTOR) + dx * SMOOTH_FACTOR;
                self.velocity.y = self.velocity.y * (1.0 - SMOOTH_FACTOR) + dy * SMOOTH_FACTOR;
                self.velocity.magnitude() * SPEED_SCALE
            }
            // First frame ever: no displacement to measure yet.
            None => 0.0,
        };

        self.prev = Some(current);
        HandSample {
            position: Some(current),
            speed,
            velocity: self.velocity,
            state: TrackState::Tracking,
        }
    }

    /// Recency-weighted average over the whole history: oldest sample
    /// weight 1, newest weight 3, linear ramp between, normalized.
    fn weighted_average(&self) -> NormPoint {
        let n = self.history.len();
        // Callers guarantee n >= MIN_SMOOTH_SAMPLES, so n - 1 > 0.
        let step = 2.0 / (n as f32 - 1.0);
        let mut sum_w = 0.0;
        let mut x = 0.0;
        let mut y = 0.0;
        for (i, p) in self.history.iter().enumerate() {
            let w = 1.0 + step * i as f32;
            sum_w += w;
            x += p.x * w;
            y += p.y * w;
        }
        NormPoint {
            x: x / sum_w,
            y: y / sum_w,
        }
    }

    fn on_loss(&mut self) -> HandSample {
        if let Some(prev) = self.prev {
            if self.lost_frames < MAX_LOST_FRAMES {
                self.lost_frames += 1;
                // Decay first, then extrapolate: the k-th predicted
                // position is prev + v·0.8^k, easing back toward the
                // last confirmed point instead of overshooting.
                self.velocity.x *= PREDICTION_DECAY;
                self.velocity.y *= PREDICTION_DECAY;
                let predicted = NormPoint {
                    x: prev.x + self.velocity.x,
                    y: prev.y + self.velocity.y,
                };
                return HandSample {
                    position: Some(predicted),
                    speed: 0.0,
                    velocity: self.velocity,
                    state: TrackState::Predicting,
                };
            }
        }

        // Grace period exhausted (or never tracking): drop everything
        // so the next detection starts a fresh track.
        self.history.clear();
        self.prev = None;
        self.velocity = Velocity::default();
        HandSample {
            position: None,
            speed: 0.0,
            velocity: self.velocity,
            state: TrackState::Lost,
        }
    }
}

impl Default for HandTracker {
    fn default() -> Self {
        Self::new()
    }
}
