use super::*;

#[test]
fn direction_alternates_unless_overridden() {
    assert_eq!(Direction::resolve(None, 0), Direction::Left);
    assert_eq!(Direction::resolve(None, 1), Direction::Right);
    assert_eq!(Direction::resolve(None, 4), Direction::Left);
    assert_eq!(Direction::resolve(Some(" RIGHT "), 0), Direction::Right);
    assert_eq!(Direction::resolve(Some("left"), 3), Direction::Left);
    assert_eq!(Direction::resolve(Some("up"), 3), Direction::Right);
}

#[test]
fn duration_has_a_floor_and_grows_with_width() {
    assert_eq!(loop_duration_secs(300, 40.0, 6.0), 7.5);
    assert_eq!(loop_duration_secs(100, 40.0, 6.0), 6.0);
    assert_eq!(loop_duration_secs(0, 40.0, 6.0), 6.0);

    let mut last = 0.0;
    for w in (0..2000).step_by(37) {
        let d = loop_duration_secs(w, 40.0, 6.0);
        assert!(d >= 6.0);
        assert!(d >= last);
        last = d;
    }
}

#[test]
fn duration_saturates_instead_of_dropping_to_the_floor() {
    let narrow = loop_duration_secs(1, 1e-306, 6.0);
    let wide = loop_duration_secs(300, 1e-306, 6.0);
    assert!(narrow > 6.0);
    assert!(wide >= narrow);
    assert_eq!(wide, f64::MAX);
    assert!(wide.is_finite());

    let mut last = 0.0;
    for w in [0, 1, 2, 50, 179, 180, 300, 5000] {
        let d = loop_duration_secs(w, 1e-306, 6.0);
        assert!(d >= last, "w={w}");
        last = d;
    }
}

#[test]
fn offsets_follow_direction() {
    let left = AnimationDescriptor::new(Direction::Left, 300, 40.0, 6.0);
    assert_eq!((left.from_x(), left.to_x()), (0, -300));
    let right = AnimationDescriptor::new(Direction::Right, 300, 40.0, 6.0);
    assert_eq!((right.from_x(), right.to_x()), (-300, 0));
}

#[test]
fn speed_prefers_row_then_page_then_fallback() {
    assert_eq!(resolve_speed(Some("80"), Some("20"), 40.0), 80.0);
    assert_eq!(resolve_speed(None, Some(" 20px"), 40.0), 20.0);
    assert_eq!(resolve_speed(Some("fast"), None, 40.0), 40.0);
    assert_eq!(resolve_speed(Some("0"), Some("-5"), 40.0), 40.0);
}

#[test]
fn fallback_width_halves_the_track_and_floors_at_one() {
    assert_eq!(fallback_width(120, Some(999.0)), 120);
    assert_eq!(fallback_width(0, Some(601.0)), 301);
    assert_eq!(fallback_width(0, None), 1);
    assert_eq!(fallback_width(0, Some(0.0)), 1);
}
