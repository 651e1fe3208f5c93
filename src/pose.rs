//! The pose-extraction boundary.
//!
//! The real deployment feeds downscaled camera frames to an ML
//! hand-landmark model and gets back 21 normalized points per detected
//! hand (or nothing). Everything downstream only needs that contract,
//! captured here as the `PoseSource` trait. The terminal build ships
//! `MousePose`, which lets the mouse cursor play the palm.

use crossterm::event::{MouseEvent, MouseEventKind};

use crate::entities::NormPoint;

pub const LANDMARK_COUNT: usize = 21;

/// Wrist plus the four finger-base knuckles. Averaging these gives a
/// palm-center estimate far less jittery than any fingertip.
pub const PALM_LANDMARKS: [usize; 5] = [0, 5, 9, 13, 17];

/// Frames are downscaled to this resolution before detection so the
/// per-frame cost stays bounded regardless of camera resolution.
pub const DETECT_WIDTH: u32 = 320;
pub const DETECT_HEIGHT: u32 = 240;

/// One hand's worth of landmark coordinates, normalized to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct Landmarks {
    pub points: [NormPoint; LANDMARK_COUNT],
}

impl Landmarks {
    /// All landmarks collapsed onto a single point. Synthetic sources
    /// have no finger articulation to report.
    pub fn at(pos: NormPoint) -> Self {
        Self {
            points: [pos; LANDMARK_COUNT],
        }
    }
}

/// Unweighted average of the palm landmarks.
pub fn palm_center(landmarks: &Landmarks) -> NormPoint {
    let mut x = 0.0;
    let mut y = 0.0;
    for &i in PALM_LANDMARKS.iter() {
        x += landmarks.points[i].x;
        y += landmarks.points[i].y;
    }
    let n = PALM_LANDMARKS.len() as f32;
    NormPoint { x: x / n, y: y / n }
}

/// One detection attempt per frame: zero or one hand. A call may take
/// tens of milliseconds against a real model; the frame loop absorbs
/// that as latency, never as an error.
pub trait PoseSource {
    fn sample(&mut self) -> Option<Landmarks>;
}

/// Stand-in source for terminals without a camera: the mouse cursor is
/// the palm. Coordinates are quantized to the detection grid so the
/// tracker sees the same step noise a downscaled frame would produce.
pub struct MousePose {
    cursor: Option<(u16, u16)>,
    cols: u16,
    rows: u16,
}

impl MousePose {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cursor: None,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    pub fn set_grid(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    /// Feed one terminal mouse event. Only position-carrying events
    /// move the palm; scroll events are ignored.
    pub fn on_event(&mut self, ev: &MouseEvent) {
        match ev.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                self.cursor = Some((ev.column, ev.row));
            }
            _ => {}
        }
    }
}

impl PoseSource for MousePose {
    fn sample(&mut self) -> Option<Landmarks> {
        let (col, row) = self.cursor?;
        let x = quantize((col as f32 + 0.5) / self.cols as f32, DETECT_WIDTH);
        let y = quantize((row as f32 + 0.5) / self.rows as f32, DETECT_HEIGHT);
        Some(Landmarks::at(NormPoint { x, y }))
    }
}

fn quantize(v: f32, steps: u32) -> f32 {
    (v * steps as f32).round() / steps as f32
}
