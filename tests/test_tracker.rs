use fruit_slash::entities::{NormPoint, TrackState};
use fruit_slash::pose::{palm_center, Landmarks, LANDMARK_COUNT, PALM_LANDMARKS};
use fruit_slash::tracker::HandTracker;

fn lm(x: f32, y: f32) -> Landmarks {
    Landmarks::at(NormPoint { x, y })
}

// ── palm center ───────────────────────────────────────────────────────────────

#[test]
fn palm_center_averages_wrist_and_knuckles() {
    // Palm landmarks get distinct values, everything else is junk the
    // average must ignore
    let mut points = [NormPoint { x: 0.9, y: 0.9 }; LANDMARK_COUNT];
    points[0] = NormPoint { x: 0.1, y: 0.2 };
    points[5] = NormPoint { x: 0.2, y: 0.3 };
    points[9] = NormPoint { x: 0.3, y: 0.4 };
    points[13] = NormPoint { x: 0.4, y: 0.5 };
    points[17] = NormPoint { x: 0.5, y: 0.6 };
    let c = palm_center(&Landmarks { points });
    assert!((c.x - 0.3).abs() < 1e-6);
    assert!((c.y - 0.4).abs() < 1e-6);
}

#[test]
fn palm_landmark_indices_are_wrist_plus_finger_bases() {
    assert_eq!(PALM_LANDMARKS, [0, 5, 9, 13, 17]);
}

// ── first frame & short history ───────────────────────────────────────────────

#[test]
fn first_frame_reports_raw_point_and_zero_speed() {
    let mut t = HandTracker::new();
    let s = t.update(Some(&lm(0.5, 0.5)));
    assert_eq!(s.state, TrackState::Tracking);
    assert_eq!(s.speed, 0.0);
    let p = s.position.unwrap();
    assert!((p.x - 0.5).abs() < 1e-6);
    assert!((p.y - 0.5).abs() < 1e-6);
}

#[test]
fn two_samples_still_report_raw_point() {
    let mut t = HandTracker::new();
    t.update(Some(&lm(0.0, 0.2)));
    let s = t.update(Some(&lm(0.3, 0.2)));
    // Below the 3-sample threshold smoothing must not kick in
    assert!((s.position.unwrap().x - 0.3).abs() < 1e-6);
}

#[test]
fn three_samples_report_weighted_average() {
    let mut t = HandTracker::new();
    t.update(Some(&lm(0.0, 0.2)));
    t.update(Some(&lm(0.3, 0.2)));
    let s = t.update(Some(&lm(0.6, 0.2)));
    // Weights 1, 2, 3 over [0.0, 0.3, 0.6] → (0.0 + 0.6 + 1.8) / 6 = 0.4
    let p = s.position.unwrap();
    assert!((p.x - 0.4).abs() < 1e-5);
    assert!((p.y - 0.2).abs() < 1e-5);
}

// ── velocity smoothing ────────────────────────────────────────────────────────

#[test]
fn constant_displacement_converges_to_gained_velocity() {
    let mut t = HandTracker::new();
    let delta = 0.005;
    let mut s = t.update(Some(&lm(0.1, 0.5)));
    for i in 1..60 {
        s = t.update(Some(&lm(0.1 + delta * i as f32, 0.5)));
    }
    // Velocity converges to gain × delta = 1.5 × 0.005 = 0.0075
    assert!((s.velocity.x - 0.0075).abs() < 1e-4, "vx = {}", s.velocity.x);
    assert!(s.velocity.y.abs() < 1e-6);
    // Reported speed is the magnitude at display scale (×1000)
    assert!((s.speed - 7.5).abs() < 0.1, "speed = {}", s.speed);
}

// ── prediction & loss ─────────────────────────────────────────────────────────

#[test]
fn prediction_decays_geometrically_then_track_drops() {
    let mut t = HandTracker::new();
    let mut last = t.update(Some(&lm(0.2, 0.5)));
    for i in 1..20 {
        last = t.update(Some(&lm(0.2 + 0.01 * i as f32, 0.5)));
    }
    let prev = last.position.unwrap();
    let mut expected_vx = last.velocity.x;
    assert!(expected_vx > 0.0);

    // Five grace frames: position follows prev + v·0.8^k
    for k in 1..=5 {
        let s = t.update(None);
        expected_vx *= 0.8;
        assert_eq!(s.state, TrackState::Predicting, "frame {}", k);
        assert_eq!(s.speed, 0.0);
        let p = s.position.unwrap();
        assert!((p.x - (prev.x + expected_vx)).abs() < 1e-5, "frame {}", k);
        assert!((p.y - prev.y).abs() < 1e-5);
    }

    // Sixth consecutive loss: no position, velocity zeroed
    let s = t.update(None);
    assert_eq!(s.state, TrackState::Lost);
    assert!(s.position.is_none());
    assert_eq!(s.velocity.x, 0.0);
    assert_eq!(s.velocity.y, 0.0);
}

#[test]
fn redetection_after_loss_starts_a_fresh_track() {
    let mut t = HandTracker::new();
    for i in 0..10 {
        t.update(Some(&lm(0.2 + 0.01 * i as f32, 0.5)));
    }
    for _ in 0..6 {
        t.update(None);
    }
    // History and previous point were cleared, so this is frame one again
    let s = t.update(Some(&lm(0.9, 0.1)));
    assert_eq!(s.state, TrackState::Tracking);
    assert_eq!(s.speed, 0.0);
    let p = s.position.unwrap();
    assert!((p.x - 0.9).abs() < 1e-6);
}

#[test]
fn loss_without_prior_track_reports_lost_immediately() {
    let mut t = HandTracker::new();
    let s = t.update(None);
    assert_eq!(s.state, TrackState::Lost);
    assert!(s.position.is_none());
    assert_eq!(s.speed, 0.0);
}
