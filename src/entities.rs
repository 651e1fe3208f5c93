//! All game entity types, pure data, no logic.

/// Hand position in camera space, both axes in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormPoint {
    pub x: f32,
    pub y: f32,
}

/// Position on the virtual pixel surface the game logic runs in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

/// Smoothed hand velocity in normalized-space units per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Where the reported hand position comes from this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackState {
    /// Fresh detection from the pose source.
    Tracking,
    /// Short-horizon extrapolation while the hand is briefly undetected.
    Predicting,
    /// No position available.
    Lost,
}

/// One entry of the blade trail: where the blade was and when.
#[derive(Clone, Copy, Debug)]
pub struct TrailPoint {
    pub pos: ScreenPoint,
    pub added_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FruitKind {
    Apple,
    Orange,
    Banana,
    Watermelon,
    Pear,
}

/// A single juice droplet emitted when a fruit is cut. Owned by the
/// fruit that spawned it; removed once `timer` reaches zero.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining lifetime in frames.
    pub timer: u32,
    /// Fading opacity, 255 down to 0.
    pub alpha: f32,
    pub size: f32,
}

/// One fruit. Objects are reused: a fruit that falls off screen is
/// re-spawned in place rather than destroyed. A fruit is either live
/// (unsliced, falling) or sliced (split/particle animation), never both.
#[derive(Clone, Debug)]
pub struct Fruit {
    pub kind: FruitKind,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Degrees; advances by `rotation_speed` every frame while live.
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Per-instance spin rates of the two halves after a slice.
    pub left_spin: f32,
    pub right_spin: f32,
    pub sliced: bool,
    /// When the slice happened, milliseconds on the game clock.
    pub sliced_ms: u64,
    /// Direction of the cut in degrees, drives the split animation.
    pub slice_angle: f32,
    pub particles: Vec<Particle>,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameStateInfo {
    pub fruits: Vec<Fruit>,
    /// Monotonically non-decreasing.
    pub score: u32,
    pub combo: u32,
    /// Timestamp of the most recent slice, for the combo window.
    pub last_hit_ms: u64,
    pub frame: u64,
    /// Virtual surface size in pixels.
    pub width: f32,
    pub height: f32,
    /// Surface size relative to the 1024×768 base resolution; the hit
    /// radius scales with the smaller of the two.
    pub scale_x: f32,
    pub scale_y: f32,
}
