use super::*;

#[test]
fn timers_pop_in_deadline_then_creation_order() {
    let mut q = TimerQueue::default();
    let late = q.set_timeout(TimeMs(0), 100);
    let a = q.set_timeout(TimeMs(0), 50);
    let b = q.set_timeout(TimeMs(0), 50);
    assert_eq!(q.next_deadline(), Some(TimeMs(50)));
    assert_eq!(q.pop_due(TimeMs(49)), None);
    assert_eq!(q.pop_due(TimeMs(50)), Some(a));
    assert_eq!(q.pop_due(TimeMs(50)), Some(b));
    assert_eq!(q.pop_due(TimeMs(200)), Some(late));
    assert!(q.is_empty());
}

#[test]
fn cleared_timers_never_fire() {
    let mut q = TimerQueue::default();
    let a = q.set_timeout(TimeMs(0), 10);
    assert!(q.clear_timeout(a));
    assert!(!q.clear_timeout(a));
    assert_eq!(q.pop_due(TimeMs(100)), None);
}

#[test]
fn debouncer_keeps_only_latest_run() {
    let mut page = Page::new(
        crate::dom::node::Document::new(),
        crate::foundation::core::Viewport::default(),
    );
    let mut d = Debouncer::new(150);
    d.schedule(&mut page);
    d.schedule(&mut page);
    d.schedule(&mut page);
    assert_eq!(page.pending_timer_count(), 1);
    assert!(d.is_pending());

    d.cancel(&mut page);
    assert_eq!(page.pending_timer_count(), 0);
    assert!(!d.take_fired(TimerId(1)));
}
