use super::*;
use crate::dom::node::Document;

fn snapshot_with(entries: &[(NodeId, Rect)]) -> LayoutSnapshot {
    LayoutSnapshot {
        rects: entries.iter().copied().collect(),
    }
}

#[test]
fn ratio_is_visible_share_of_target() {
    let root = Rect::new(0.0, 0.0, 100.0, 100.0);
    let (vis, ratio) = intersection_state(Rect::new(50.0, 0.0, 150.0, 10.0), root, 0.01);
    assert!(vis);
    assert!((ratio - 0.5).abs() < 1e-9);

    let (vis, ratio) = intersection_state(Rect::new(0.0, 200.0, 100.0, 210.0), root, 0.01);
    assert!(!vis);
    assert_eq!(ratio, 0.0);

    // a sliver below threshold
    let (vis, _) = intersection_state(Rect::new(0.0, 99.5, 100.0, 199.5), root, 0.01);
    assert!(!vis);
}

#[test]
fn first_report_always_then_only_transitions() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let root = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut reg = ObserverRegistry::default();
    let obs = reg.create(0.01);
    assert!(reg.observe(obs, a));

    let inside = snapshot_with(&[(a, Rect::new(0.0, 0.0, 100.0, 20.0))]);
    let first = reg.collect(&inside, root, TimeMs(0));
    assert_eq!(first.len(), 1);
    assert!(first[0].1[0].is_intersecting);

    assert!(reg.collect(&inside, root, TimeMs(16)).is_empty());

    let outside = snapshot_with(&[(a, Rect::new(0.0, 500.0, 100.0, 520.0))]);
    let flipped = reg.collect(&outside, root, TimeMs(32));
    assert_eq!(flipped[0].1[0].target, a);
    assert!(!flipped[0].1[0].is_intersecting);
    assert_eq!(flipped[0].1[0].time, TimeMs(32));
}

#[test]
fn missing_box_reports_not_intersecting() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let mut reg = ObserverRegistry::default();
    let obs = reg.create(0.0);
    reg.observe(obs, a);
    let out = reg.collect(&LayoutSnapshot::default(), Rect::new(0.0, 0.0, 10.0, 10.0), TimeMs(0));
    assert!(!out[0].1[0].is_intersecting);
}

#[test]
fn disconnect_drops_observer_and_targets() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let mut reg = ObserverRegistry::default();
    let obs = reg.create(0.01);
    reg.observe(obs, a);
    assert_eq!(reg.observed_count(obs), 1);
    assert!(reg.unobserve(obs, a));
    assert_eq!(reg.observed_count(obs), 0);
    assert!(reg.disconnect(obs));
    assert!(!reg.disconnect(obs));
    assert!(!reg.observe(obs, a));
    assert_eq!(reg.active_count(), 0);
}
