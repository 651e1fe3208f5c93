use fruit_slash::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(FruitKind::Apple, FruitKind::Apple);
    assert_ne!(FruitKind::Apple, FruitKind::Watermelon);
    assert_eq!(TrackState::Tracking, TrackState::Tracking);
    assert_ne!(TrackState::Tracking, TrackState::Lost);

    // Clone must produce an equal value
    let kind = FruitKind::Pear;
    assert_eq!(kind.clone(), FruitKind::Pear);
}

#[test]
fn velocity_magnitude_is_euclidean() {
    let v = Velocity { x: 3.0, y: 4.0 };
    assert_eq!(v.magnitude(), 5.0);
    assert_eq!(Velocity::default().magnitude(), 0.0);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameStateInfo {
        fruits: Vec::new(),
        score: 0,
        combo: 0,
        last_hit_ms: 0,
        frame: 0,
        width: 1024.0,
        height: 768.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.score = 999;
    cloned.combo = 4;
    cloned.fruits.push(Fruit {
        kind: FruitKind::Banana,
        x: 1.0,
        y: 2.0,
        vx: 0.0,
        vy: 0.0,
        rotation: 0.0,
        rotation_speed: 0.0,
        left_spin: -10.0,
        right_spin: 10.0,
        sliced: false,
        sliced_ms: 0,
        slice_angle: 0.0,
        particles: Vec::new(),
    });

    assert_eq!(original.score, 0);
    assert_eq!(original.combo, 0);
    assert!(original.fruits.is_empty());
}
