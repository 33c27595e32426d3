use super::*;
use crate::dom::node::Document;
use crate::foundation::core::Viewport;
use crate::page::host::PageClient;
use crate::ticker::descriptor::{AnimationDescriptor, Direction};

#[test]
fn wrap_keeps_offsets_within_one_copy() {
    assert_eq!(wrap_offset(0.0, 300.0), 0.0);
    assert_eq!(wrap_offset(-150.0, 300.0), -150.0);
    assert_eq!(wrap_offset(-300.0, 300.0), 0.0);
    assert_eq!(wrap_offset(-450.0, 300.0), -150.0);
    assert_eq!(wrap_offset(50.0, 300.0), -250.0);
    assert_eq!(wrap_offset(10.0, 0.0), 0.0);
}

#[test]
fn transform_text_is_stable() {
    assert_eq!(translate3d(-12.5), "translate3d(-12.5px, 0px, 0px)");
    assert_eq!(translate3d(-0.0001), "translate3d(0px, 0px, 0px)");
    assert_eq!(translate3d(-100.0), "translate3d(-100px, 0px, 0px)");
}

#[derive(Debug, Default)]
struct Driver(TweenBackend);

impl PageClient for Driver {
    fn on_frame(&mut self, page: &mut Page, sub: FrameSubscription, tick: FrameTick) -> TickerResult<()> {
        self.0.on_frame(page, sub, tick)
    }
}

fn setup(direction: Direction) -> (Page, NodeId, Driver) {
    let mut doc = Document::new();
    let track = doc.create_element("div");
    let body = doc.body();
    doc.append_child(body, track).unwrap();
    let mut page = Page::new(doc, Viewport::default()).with_frame_interval(10).unwrap();
    let mut driver = Driver::default();
    let row = RowAnimation {
        index: 0,
        track,
        descriptor: AnimationDescriptor::new(direction, 300, 40.0, 6.0),
    };
    driver.0.install(&mut page, &row, &mut String::new()).unwrap();
    (page, track, driver)
}

#[test]
fn left_tween_moves_toward_negative_width() {
    let (mut page, track, mut driver) = setup(Direction::Left);
    assert_eq!(page.frame_subscription_count(), 1);
    assert_eq!(page.current_translate_x(track), Some(0.0));
    page.run_for(3750, &mut driver).unwrap();
    let x = page.current_translate_x(track).unwrap();
    assert!((x + 150.0).abs() < 1e-6, "{x}");
    // a full loop later it is back at the same place
    page.run_for(7500, &mut driver).unwrap();
    let x = page.current_translate_x(track).unwrap();
    assert!((x + 150.0).abs() < 1e-6, "{x}");
}

#[test]
fn right_tween_moves_toward_zero() {
    let (mut page, track, mut driver) = setup(Direction::Right);
    page.run_for(1250, &mut driver).unwrap();
    // -300 + 50
    let x = page.current_translate_x(track).unwrap();
    assert!((x + 250.0).abs() < 1e-6, "{x}");
}

#[test]
fn paused_tracks_hold_their_position() {
    let (mut page, track, mut driver) = setup(Direction::Left);
    page.run_for(1000, &mut driver).unwrap();
    page.document_mut()
        .set_style_property(track, "animation-play-state", "paused")
        .unwrap();
    page.run_for(5000, &mut driver).unwrap();
    assert_eq!(driver.0.elapsed_ms(track), Some(1000.0));
    page.document_mut()
        .remove_style_property(track, "animation-play-state")
        .unwrap();
    page.run_for(500, &mut driver).unwrap();
    assert_eq!(driver.0.elapsed_ms(track), Some(1500.0));
}

#[test]
fn teardown_releases_the_frame_subscription() {
    let (mut page, track, mut driver) = setup(Direction::Left);
    driver.0.teardown(&mut page).unwrap();
    assert_eq!(page.frame_subscription_count(), 0);
    assert_eq!(driver.0.active_count(), 0);
    assert_eq!(page.document().inline_style(track).unwrap().get("transform"), None);
}
