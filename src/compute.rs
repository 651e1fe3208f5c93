//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameStateInfo` (and, where needed, an RNG handle and a millisecond
//! timestamp) and returns a brand-new `GameStateInfo`. Side effects
//! are limited to the injected RNG; the timestamp comes from the
//! caller's monotonic clock, never from a rendering library.

use rand::Rng;

use crate::entities::{
    Fruit, FruitKind, GameStateInfo, NormPoint, Particle, ScreenPoint, TrailPoint,
};

// ── Tuning constants ─────────────────────────────────────────────────────────

/// Reference resolution the pixel constants below were tuned at.
pub const BASE_WIDTH: f32 = 1024.0;
pub const BASE_HEIGHT: f32 = 768.0;

/// Population control: top up while fewer than this many live fruits.
pub const MIN_LIVE_FRUITS: usize = 3;
/// Hard cap on tracked fruits, live plus still-animating sliced ones.
pub const MAX_FRUITS: usize = 8;
/// Fruits thrown up at game start.
const INITIAL_FRUITS: usize = 5;

/// A slice segment shorter than this registers no hits: a resting
/// blade never cuts, even when overlapping a fruit.
pub const MIN_SLICE_LENGTH: f32 = 15.0;
/// Hit radius at base resolution, scaled by min(scale_x, scale_y).
pub const HIT_RADIUS: f32 = 35.0;
pub const SCORE_PER_SLICE: u32 = 10;
/// A hit within this window of the previous one grows the combo.
pub const COMBO_WINDOW_MS: u64 = 1000;

/// Duration of the split-halves animation after a slice.
pub const SLICE_ANIM_MS: u64 = 1000;
/// How far the halves separate over the full animation, and how far
/// they drift down.
const SPLIT_SEPARATION: f32 = 60.0;
const SPLIT_DROP: f32 = 100.0;

const GRAVITY: f32 = 0.4;
const SPAWN_INSET: f32 = 100.0;
/// Fruits enter and leave this many pixels below the bottom edge.
const SPAWN_BELOW: f32 = 50.0;
/// Cosmetic horizontal wobble while airborne.
const WOBBLE_AMPLITUDE: f32 = 1.0;
const WOBBLE_FREQ: f32 = 0.015;

pub const PARTICLE_COUNT: usize = 25;
pub const PARTICLE_LIFETIME: u32 = 60;
const PARTICLE_GRAVITY: f32 = 0.3;
const PARTICLE_ALPHA_FADE: f32 = 4.0;
/// Particles spray in a ±45° cone perpendicular to the cut.
const PARTICLE_SPREAD: f32 = 45.0;

/// Cursor-orientation smoothing factor.
const ANGLE_SMOOTH_FACTOR: f32 = 0.2;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a virtual surface of the given
/// pixel size.
pub fn init_state(width: f32, height: f32, rng: &mut impl Rng) -> GameStateInfo {
    let fruits = (0..INITIAL_FRUITS)
        .map(|_| spawn_fruit(rng, width, height))
        .collect();
    GameStateInfo {
        fruits,
        score: 0,
        combo: 0,
        last_hit_ms: 0,
        frame: 0,
        width,
        height,
        scale_x: width / BASE_WIDTH,
        scale_y: height / BASE_HEIGHT,
    }
}

/// A freshly-thrown fruit: random kind, below the bottom edge, upward
/// velocity against gravity for a parabolic arc.
pub fn spawn_fruit(rng: &mut impl Rng, width: f32, height: f32) -> Fruit {
    let kind = match rng.gen_range(0..5) {
        0 => FruitKind::Apple,
        1 => FruitKind::Orange,
        2 => FruitKind::Banana,
        3 => FruitKind::Watermelon,
        _ => FruitKind::Pear,
    };
    // Keep the launch column inside the margins; on very narrow
    // surfaces fall back to the full width.
    let inset = SPAWN_INSET.min(width / 4.0);
    Fruit {
        kind,
        x: rng.gen_range(inset..width - inset),
        y: height + SPAWN_BELOW,
        vx: rng.gen_range(-4.0..4.0),
        vy: rng.gen_range(-32.0..-28.0),
        rotation: 0.0,
        rotation_speed: rng.gen_range(-8.0..8.0),
        left_spin: rng.gen_range(-12.0..-8.0),
        right_spin: rng.gen_range(8.0..12.0),
        sliced: false,
        sliced_ms: 0,
        slice_angle: 0.0,
        particles: Vec::new(),
    }
}

// ── Coordinate remap ─────────────────────────────────────────────────────────

/// Camera space → screen space. The usable camera range is expanded by
/// 25% around an offset of 0.1 so the player reaches the screen edges
/// without leaving the camera's comfortable center, then clamped.
pub fn to_screen(p: NormPoint, width: f32, height: f32) -> ScreenPoint {
    let x = ((p.x - 0.1) * 1.25).clamp(0.0, 1.0);
    let y = ((p.y - 0.1) * 1.25).clamp(0.0, 1.0);
    ScreenPoint {
        x: x * width,
        y: y * height,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ───────────────────────────

/// Advance fruit physics, particle aging and population control by one
/// frame. All randomness comes through `rng` so callers control
/// determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameStateInfo, rng: &mut impl Rng, now_ms: u64) -> GameStateInfo {
    let frame = state.frame + 1;
    let wobble = (now_ms as f32 * WOBBLE_FREQ).sin() * WOBBLE_AMPLITUDE;

    // ── 1. Fruit physics / particle aging ────────────────────────────────────
    let mut fruits: Vec<Fruit> = state
        .fruits
        .iter()
        .map(|f| {
            let mut f = f.clone();
            if !f.sliced {
                f.x += f.vx + wobble;
                f.y += f.vy;
                f.vy += GRAVITY;
                f.rotation += f.rotation_speed;
                // Missed: reuse the object as a fresh throw.
                if f.y > state.height + SPAWN_BELOW {
                    f = spawn_fruit(rng, state.width, state.height);
                }
            } else {
                for p in f.particles.iter_mut() {
                    p.x += p.vx;
                    p.y += p.vy;
                    p.vy += PARTICLE_GRAVITY;
                    p.timer = p.timer.saturating_sub(1);
                    p.alpha = (p.alpha - PARTICLE_ALPHA_FADE).max(0.0);
                }
                f.particles.retain(|p| p.timer > 0);
            }
            f
        })
        .collect();

    // ── 2. Population control ────────────────────────────────────────────────
    let live = fruits.iter().filter(|f| !f.sliced).count();
    if live < MIN_LIVE_FRUITS {
        fruits.push(spawn_fruit(rng, state.width, state.height));
        if fruits.len() > MAX_FRUITS {
            fruits.remove(0);
        }
    }

    GameStateInfo {
        fruits,
        frame,
        ..state.clone()
    }
}

// ── Collision / scoring ──────────────────────────────────────────────────────

/// Test the active slice segment against every live fruit and apply
/// hits. Returns the new state and how many fruits were cut this
/// frame (so the caller can trigger the one-shot slice sound).
pub fn check_collisions(
    state: &GameStateInfo,
    segment: Option<(TrailPoint, TrailPoint)>,
    now_ms: u64,
    rng: &mut impl Rng,
) -> (GameStateInfo, u32) {
    let (p1, p2) = match segment {
        Some(s) => s,
        None => return (state.clone(), 0),
    };

    let dx = p2.pos.x - p1.pos.x;
    let dy = p2.pos.y - p1.pos.y;
    let blade_len = (dx * dx + dy * dy).sqrt();
    if blade_len < MIN_SLICE_LENGTH {
        return (state.clone(), 0);
    }

    let slice_angle = dy.atan2(dx).to_degrees();
    let hit_radius = HIT_RADIUS * state.scale_x.min(state.scale_y);

    let mut fruits = state.fruits.clone();
    let mut score = state.score;
    let mut combo = state.combo;
    let mut last_hit_ms = state.last_hit_ms;
    let mut hits = 0;

    for fruit in fruits.iter_mut() {
        if fruit.sliced {
            continue;
        }
        // Perpendicular distance to the infinite line through p1..p2,
        // deliberately unclamped to the segment: a fruit sitting on
        // the line's extension can still be cut by a fast swipe.
        let dist = (dy * fruit.x - dx * fruit.y + p2.pos.x * p1.pos.y - p2.pos.y * p1.pos.x)
            .abs()
            / blade_len;
        if dist < hit_radius {
            fruit.sliced = true;
            fruit.sliced_ms = now_ms;
            fruit.slice_angle = slice_angle;
            fruit.particles = burst_particles(rng, fruit.x, fruit.y, slice_angle);

            // Each hit scores and updates the combo independently, in
            // iteration order; later hits in the same frame see the
            // combo the earlier ones left behind.
            let in_window = now_ms.saturating_sub(last_hit_ms) < COMBO_WINDOW_MS;
            if !in_window {
                combo = 0;
            }
            score += SCORE_PER_SLICE * (combo + 1);
            if in_window {
                combo += 1;
            }
            last_hit_ms = now_ms;
            hits += 1;
        }
    }

    (
        GameStateInfo {
            fruits,
            score,
            combo,
            last_hit_ms,
            ..state.clone()
        },
        hits,
    )
}

/// Juice burst at the cut point: particles spray in a cone around the
/// direction perpendicular to the slice.
pub fn burst_particles(rng: &mut impl Rng, x: f32, y: f32, slice_angle: f32) -> Vec<Particle> {
    let perpendicular = slice_angle + 90.0;
    (0..PARTICLE_COUNT)
        .map(|_| {
            let angle =
                (perpendicular + rng.gen_range(-PARTICLE_SPREAD..PARTICLE_SPREAD)).to_radians();
            let speed = rng.gen_range(10.0..20.0);
            Particle {
                x,
                y,
                vx: speed * angle.cos(),
                vy: speed * angle.sin(),
                timer: PARTICLE_LIFETIME,
                alpha: 255.0,
                size: rng.gen_range(2.0..6.0),
            }
        })
        .collect()
}

// ── Slice animation ──────────────────────────────────────────────────────────

/// Fraction of the split animation elapsed, or `None` once the window
/// has passed (or the fruit is still whole).
pub fn slice_progress(fruit: &Fruit, now_ms: u64) -> Option<f32> {
    if !fruit.sliced {
        return None;
    }
    let elapsed = now_ms.saturating_sub(fruit.sliced_ms);
    if elapsed >= SLICE_ANIM_MS {
        return None;
    }
    Some(elapsed as f32 / SLICE_ANIM_MS as f32)
}

/// Centers of the two separating halves during the split animation.
/// They part along the slice direction while drifting down together.
pub fn split_offsets(fruit: &Fruit, now_ms: u64) -> Option<(ScreenPoint, ScreenPoint)> {
    let progress = slice_progress(fruit, now_ms)?;
    let separation = progress * SPLIT_SEPARATION;
    let drop = progress * SPLIT_DROP;
    let dir = fruit.slice_angle.to_radians();
    let (sin, cos) = dir.sin_cos();
    Some((
        ScreenPoint {
            x: fruit.x - cos * separation,
            y: fruit.y - sin * separation + drop,
        },
        ScreenPoint {
            x: fruit.x + cos * separation,
            y: fruit.y + sin * separation + drop,
        },
    ))
}

// ── Cursor orientation ───────────────────────────────────────────────────────

/// Blade-cursor target orientation for the active segment, degrees.
/// Screen y grows downward, so dy is negated to get the conventional
/// counterclockwise angle the cursor glyph is picked from.
pub fn cursor_target_angle(p1: ScreenPoint, p2: ScreenPoint) -> f32 {
    (p1.y - p2.y).atan2(p2.x - p1.x).to_degrees()
}

/// Ease `current` toward `target` along the shortest arc, both in
/// degrees. Keeps the blade cursor from spinning the long way round
/// when the swipe direction flips.
pub fn smooth_angle(current: f32, target: f32) -> f32 {
    let diff = (target - current + 180.0).rem_euclid(360.0) - 180.0;
    (current + diff * ANGLE_SMOOTH_FACTOR).rem_euclid(360.0)
}
