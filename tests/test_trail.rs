use fruit_slash::entities::ScreenPoint;
use fruit_slash::trail::{BladeTrail, FADE_MS, MAX_POINTS, MIN_SPEED};

fn pt(x: f32, y: f32) -> ScreenPoint {
    ScreenPoint { x, y }
}

// ── capacity ──────────────────────────────────────────────────────────────────

#[test]
fn trail_never_exceeds_capacity() {
    let mut trail = BladeTrail::new();
    for i in 0..30u64 {
        trail.add_point(pt(i as f32 * 20.0, 100.0), 10.0, i * 16);
        assert!(trail.len() <= MAX_POINTS);
    }
    assert_eq!(trail.len(), MAX_POINTS);
}

#[test]
fn overflow_evicts_oldest_first() {
    let mut trail = BladeTrail::new();
    for i in 0..12u64 {
        trail.add_point(pt(i as f32 * 20.0, 0.0), 10.0, i * 16);
    }
    // Points 0 and 1 were evicted; the oldest survivor is x = 40
    let first = trail.points().next().unwrap();
    assert_eq!(first.pos.x, 40.0);
}

// ── gating ────────────────────────────────────────────────────────────────────

#[test]
fn slow_hand_adds_nothing() {
    let mut trail = BladeTrail::new();
    trail.add_point(pt(100.0, 100.0), MIN_SPEED, 0); // threshold is strict
    assert!(trail.is_empty());
    trail.add_point(pt(100.0, 100.0), MIN_SPEED + 0.1, 16);
    assert_eq!(trail.len(), 1);
}

#[test]
fn near_duplicate_points_collapse_to_one() {
    let mut trail = BladeTrail::new();
    trail.add_point(pt(100.0, 100.0), 10.0, 0);
    // Everything within 10 px of the stored point is rejected even at
    // full speed
    for i in 1..20u64 {
        trail.add_point(pt(105.0, 100.0), 10.0, i * 16);
        trail.add_point(pt(97.0, 103.0), 10.0, i * 16 + 8);
    }
    assert_eq!(trail.len(), 1);
}

#[test]
fn spacing_threshold_is_strict() {
    let mut trail = BladeTrail::new();
    trail.add_point(pt(100.0, 100.0), 10.0, 0);
    trail.add_point(pt(110.0, 100.0), 10.0, 16); // exactly 10 px → rejected
    assert_eq!(trail.len(), 1);
    trail.add_point(pt(110.5, 100.0), 10.0, 32);
    assert_eq!(trail.len(), 2);
}

// ── idle fade ─────────────────────────────────────────────────────────────────

#[test]
fn idle_trail_drains_one_point_per_check_after_fade_delay() {
    let mut trail = BladeTrail::new();
    trail.add_point(pt(0.0, 0.0), 10.0, 0);
    trail.add_point(pt(20.0, 0.0), 10.0, 16);
    trail.add_point(pt(40.0, 0.0), 10.0, 32);
    assert_eq!(trail.len(), 3);

    // Still within the fade window of the last insertion (t = 32)
    trail.add_point(pt(40.0, 0.0), 0.0, 500);
    assert_eq!(trail.len(), 3);

    // Past the window: one eviction per check
    trail.add_point(pt(40.0, 0.0), 0.0, 32 + FADE_MS + 1);
    assert_eq!(trail.len(), 2);
    trail.add_point(pt(40.0, 0.0), 0.0, 32 + FADE_MS + 20);
    assert_eq!(trail.len(), 1);
    trail.add_point(pt(40.0, 0.0), 0.0, 32 + FADE_MS + 40);
    assert!(trail.is_empty());

    // Draining an empty trail is a no-op, not a panic
    trail.add_point(pt(40.0, 0.0), 0.0, 32 + FADE_MS + 60);
    assert!(trail.is_empty());
}

#[test]
fn slow_frames_before_any_point_do_nothing() {
    let mut trail = BladeTrail::new();
    trail.add_point(pt(5.0, 5.0), 0.0, 10_000);
    assert!(trail.is_empty());
}

#[test]
fn clear_drops_all_points_at_once() {
    let mut trail = BladeTrail::new();
    for i in 0..5u64 {
        trail.add_point(pt(i as f32 * 20.0, 0.0), 10.0, i * 16);
    }
    assert_eq!(trail.len(), 5);

    trail.clear();
    assert!(trail.is_empty());
    assert!(trail.segment().is_none());

    // The fade timer is gone too: a slow frame long after the clear
    // finds nothing to drain and nothing resurrected
    trail.add_point(pt(0.0, 0.0), 0.0, 10_000);
    assert!(trail.is_empty());
}

// ── segment ───────────────────────────────────────────────────────────────────

#[test]
fn segment_requires_two_points() {
    let mut trail = BladeTrail::new();
    assert!(trail.segment().is_none());
    trail.add_point(pt(0.0, 0.0), 10.0, 0);
    assert!(trail.segment().is_none());
    trail.add_point(pt(20.0, 0.0), 10.0, 16);
    let (a, b) = trail.segment().unwrap();
    assert_eq!(a.pos.x, 0.0);
    assert_eq!(b.pos.x, 20.0);
}

#[test]
fn segment_tracks_the_two_newest_points() {
    let mut trail = BladeTrail::new();
    for i in 0..5u64 {
        trail.add_point(pt(i as f32 * 20.0, 0.0), 10.0, i * 16);
    }
    let (a, b) = trail.segment().unwrap();
    assert_eq!(a.pos.x, 60.0);
    assert_eq!(b.pos.x, 80.0);
}
