//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of
//! the game state. No game logic is performed; this module only
//! translates state into terminal commands. Game logic runs on a
//! virtual pixel surface; this module owns the pixel→cell mapping.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use fruit_slash::compute;
use fruit_slash::entities::{Fruit, FruitKind, GameStateInfo, ScreenPoint, TrackState};
use fruit_slash::tracker::HandSample;
use fruit_slash::trail::BladeTrail;

/// Assumed pixel footprint of one terminal cell. Cells are roughly
/// twice as tall as wide, so the virtual surface stays square-ish.
pub const CELL_WIDTH: f32 = 8.0;
pub const CELL_HEIGHT: f32 = 16.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_COMBO: Color = Color::Yellow;
const C_TRAIL_NEW: Color = Color::Cyan;
const C_TRAIL_OLD: Color = Color::DarkBlue;
const C_CURSOR: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_STATE_TRACKING: Color = Color::Green;
const C_STATE_PREDICTING: Color = Color::Yellow;
const C_STATE_LOST: Color = Color::Red;
const C_PARTICLE_FADED: Color = Color::DarkGrey;

fn fruit_color(kind: FruitKind) -> Color {
    match kind {
        FruitKind::Apple => Color::Red,
        FruitKind::Orange => Color::DarkYellow,
        FruitKind::Banana => Color::Yellow,
        FruitKind::Watermelon => Color::Magenta,
        FruitKind::Pear => Color::Green,
    }
}

// ── Pixel → cell mapping ──────────────────────────────────────────────────────

/// Virtual pixel surface backing a terminal of the given cell size.
pub fn virtual_size(cols: u16, rows: u16) -> (f32, f32) {
    (cols as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT)
}

fn cell_of(x: f32, y: f32) -> (i32, i32) {
    ((x / CELL_WIDTH) as i32, (y / CELL_HEIGHT) as i32)
}

/// Print one glyph if the cell is on screen; off-screen cells are
/// silently skipped (fruits spend part of their arc below the bottom).
fn put<W: Write>(out: &mut W, cols: u16, rows: u16, cx: i32, cy: i32, ch: char) -> std::io::Result<()> {
    if cx < 0 || cy < 0 || cx >= cols as i32 || cy >= rows as i32 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(cx as u16, cy as u16))?;
    out.queue(Print(ch))?;
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameStateInfo,
    trail: &BladeTrail,
    hand: &HandSample,
    blade_pos: Option<ScreenPoint>,
    blade_angle: f32,
    now_ms: u64,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cols = (state.width / CELL_WIDTH) as u16;
    let rows = (state.height / CELL_HEIGHT) as u16;

    for fruit in &state.fruits {
        draw_fruit(out, cols, rows, fruit, now_ms)?;
    }
    draw_trail(out, cols, rows, trail)?;
    draw_blade(out, cols, rows, blade_pos, blade_angle)?;
    draw_hud(out, cols, rows, state, hand)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Fruits ────────────────────────────────────────────────────────────────────

fn draw_fruit<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    fruit: &Fruit,
    now_ms: u64,
) -> std::io::Result<()> {
    let color = fruit_color(fruit.kind);

    if !fruit.sliced {
        out.queue(style::SetForegroundColor(color))?;
        let (cx, cy) = cell_of(fruit.x, fruit.y);
        put(out, cols, rows, cx, cy, '●')?;
        return Ok(());
    }

    // Juice particles, brightest while fresh
    for p in &fruit.particles {
        out.queue(style::SetForegroundColor(if p.alpha > 128.0 {
            color
        } else {
            C_PARTICLE_FADED
        }))?;
        let (cx, cy) = cell_of(p.x, p.y);
        put(out, cols, rows, cx, cy, if p.size > 4.0 { '•' } else { '·' })?;
    }

    // Separating halves, each spinning at its own rate
    if let Some((left, right)) = compute::split_offsets(fruit, now_ms) {
        let progress = compute::slice_progress(fruit, now_ms).unwrap_or(0.0);
        out.queue(style::SetForegroundColor(color))?;
        let left_angle = fruit.rotation + progress * 360.0 * fruit.left_spin;
        let right_angle = fruit.rotation + progress * 360.0 * fruit.right_spin;
        let (lx, ly) = cell_of(left.x, left.y);
        let (rx, ry) = cell_of(right.x, right.y);
        put(out, cols, rows, lx, ly, spin_glyph(left_angle))?;
        put(out, cols, rows, rx, ry, spin_glyph(right_angle))?;
    }
    Ok(())
}

/// Crude glyph rotation: pick a stroke matching the angle's quadrant.
/// Angles are conventional (counterclockwise from east, y up), so a
/// down-right swipe's negative angle lands on '╲'.
fn spin_glyph(angle_deg: f32) -> char {
    const GLYPHS: [char; 4] = ['─', '╱', '│', '╲'];
    GLYPHS[(((angle_deg + 22.5).rem_euclid(180.0)) / 45.0) as usize % 4]
}

// ── Blade trail & cursor ──────────────────────────────────────────────────────

fn draw_trail<W: Write>(out: &mut W, cols: u16, rows: u16, trail: &BladeTrail) -> std::io::Result<()> {
    let cells: Vec<(i32, i32)> = trail.points().map(|t| cell_of(t.pos.x, t.pos.y)).collect();
    let n = cells.len();
    for (i, pair) in cells.windows(2).enumerate() {
        // Newest segment pops, older ones recede
        let color = if i + 2 >= n { C_TRAIL_NEW } else { C_TRAIL_OLD };
        out.queue(style::SetForegroundColor(color))?;
        draw_line(out, cols, rows, pair[0], pair[1], '∙')?;
    }
    Ok(())
}

/// Interpolated cell walk between two points.
fn draw_line<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    from: (i32, i32),
    to: (i32, i32),
    ch: char,
) -> std::io::Result<()> {
    let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs()).max(1);
    for s in 0..=steps {
        let t = s as f32 / steps as f32;
        let cx = from.0 + ((to.0 - from.0) as f32 * t).round() as i32;
        let cy = from.1 + ((to.1 - from.1) as f32 * t).round() as i32;
        put(out, cols, rows, cx, cy, ch)?;
    }
    Ok(())
}

fn draw_blade<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    blade_pos: Option<ScreenPoint>,
    blade_angle: f32,
) -> std::io::Result<()> {
    if let Some(pos) = blade_pos {
        out.queue(style::SetForegroundColor(C_CURSOR))?;
        let (cx, cy) = cell_of(pos.x, pos.y);
        put(out, cols, rows, cx, cy, spin_glyph(blade_angle))?;
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    state: &GameStateInfo,
    hand: &HandSample,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", state.score)))?;

    if state.combo > 1 {
        let text = format!("Combo x{}!", state.combo);
        out.queue(cursor::MoveTo(
            (cols / 2).saturating_sub(text.chars().count() as u16 / 2),
            0,
        ))?;
        out.queue(style::SetForegroundColor(C_COMBO))?;
        out.queue(Print(text))?;
    }

    // Tracker status panel, bottom-left
    let (label, color) = match hand.state {
        TrackState::Tracking => ("TRACKING", C_STATE_TRACKING),
        TrackState::Predicting => ("PREDICTING", C_STATE_PREDICTING),
        TrackState::Lost => ("NO HAND", C_STATE_LOST),
    };
    let row = rows.saturating_sub(1);
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(label))?;
    if hand.state == TrackState::Tracking {
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("  speed {:>5.1}", hand.speed)))?;
    }

    let hint = "Mouse : swing blade   ESC : menu   Q : quit";
    out.queue(cursor::MoveTo(
        cols.saturating_sub(hint.chars().count() as u16 + 1),
        row,
    ))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
