use super::*;

#[test]
fn viewport_rejects_zero_size() {
    assert!(Viewport::new(0, 10).is_err());
    assert!(Viewport::new(10, 0).is_err());
    assert!(Viewport::new(10, 10).is_ok());
}

#[test]
fn viewport_rect_tracks_scroll() {
    let mut vp = Viewport::new(100, 50).unwrap();
    vp.scroll_y = 200.0;
    let r = vp.rect();
    assert_eq!(r.y0, 200.0);
    assert_eq!(r.y1, 250.0);
    assert_eq!(r.width(), 100.0);
}

#[test]
fn rotation_swaps_axes() {
    let vp = Viewport::new(800, 600).unwrap().rotated();
    assert_eq!((vp.width, vp.height), (600, 800));
}

#[test]
fn round_px_clamps_garbage() {
    assert_eq!(round_px(299.6), 300);
    assert_eq!(round_px(-3.0), 0);
    assert_eq!(round_px(f64::NAN), 0);
}

#[test]
fn time_arithmetic_saturates() {
    let t = TimeMs(10);
    assert_eq!(t.saturating_add(5), TimeMs(15));
    assert_eq!(TimeMs(3).since(TimeMs(10)), 0);
    assert_eq!(TimeMs(1500).as_secs_f64(), 1.5);
}
