use super::*;
use crate::dom::node::Document;
use crate::foundation::core::Viewport;
use crate::ticker::descriptor::{AnimationDescriptor, Direction};

fn page_with_track() -> (Page, NodeId) {
    let mut doc = Document::new();
    let track = doc.create_element("div");
    let body = doc.body();
    doc.append_child(body, track).unwrap();
    (Page::new(doc, Viewport::default()), track)
}

#[test]
fn rule_text_has_the_expected_shape() {
    let rule = keyframes_rule("ticker_move_1", -300, 0);
    assert_eq!(
        rule,
        "\n@keyframes ticker_move_1 {\n  0%   { transform: translate3d(-300px, 0, 0); }\n  100% { transform: translate3d(0px, 0, 0); }\n}\n"
    );
}

#[test]
fn install_sets_inline_animation_and_appends_rule() {
    let (mut page, track) = page_with_track();
    let mut backend = KeyframesBackend::new("ticker_move_");
    let mut rules = String::new();
    let row = RowAnimation {
        index: 0,
        track,
        descriptor: AnimationDescriptor::new(Direction::Left, 300, 40.0, 6.0),
    };
    page.document_mut()
        .set_style_property(track, "animation-play-state", "paused")
        .unwrap();
    backend.install(&mut page, &row, &mut rules).unwrap();

    assert!(rules.contains("@keyframes ticker_move_0"));
    let style = page.document().inline_style(track).unwrap();
    assert_eq!(style.get("animation-name"), Some("ticker_move_0"));
    assert_eq!(style.get("animation-duration"), Some("7.5s"));
    assert_eq!(style.get("animation-timing-function"), Some("linear"));
    assert_eq!(style.get("animation-iteration-count"), Some("infinite"));
    assert_eq!(style.get("will-change"), Some("transform"));
    assert_eq!(style.get("animation-play-state"), None);
    assert_eq!(backend.active_count(), 1);
}

#[test]
fn whole_seconds_render_without_a_fraction() {
    let (mut page, track) = page_with_track();
    let mut backend = KeyframesBackend::new("ticker_move_");
    let row = RowAnimation {
        index: 3,
        track,
        descriptor: AnimationDescriptor::new(Direction::Right, 100, 40.0, 6.0),
    };
    let mut rules = String::new();
    backend.install(&mut page, &row, &mut rules).unwrap();
    let style = page.document().inline_style(track).unwrap();
    assert_eq!(style.get("animation-duration"), Some("6s"));
    assert!(rules.contains("translate3d(-100px, 0, 0)"));
}

#[test]
fn stop_and_teardown_clear_inline_animation() {
    let (mut page, track) = page_with_track();
    let mut backend = KeyframesBackend::new("k");
    let row = RowAnimation {
        index: 0,
        track,
        descriptor: AnimationDescriptor::new(Direction::Left, 50, 40.0, 6.0),
    };
    backend.install(&mut page, &row, &mut String::new()).unwrap();
    backend.teardown(&mut page).unwrap();
    let style = page.document().inline_style(track).unwrap();
    assert_eq!(style.get("animation-name"), None);
    assert_eq!(backend.active_count(), 0);
    // a second stop is a no-op
    backend.stop(&mut page, track).unwrap();
}

#[test]
fn page_timeline_plays_generated_rules() {
    let (mut page, track) = page_with_track();
    let mut backend = KeyframesBackend::new("ticker_move_");
    let mut rules = String::new();
    let row = RowAnimation {
        index: 0,
        track,
        descriptor: AnimationDescriptor::new(Direction::Left, 300, 40.0, 6.0),
    };
    backend.install(&mut page, &row, &mut rules).unwrap();
    let doc = page.document_mut();
    let style = doc.create_element("style");
    let head = doc.head();
    doc.append_child(head, style).unwrap();
    doc.set_text_content(style, &rules).unwrap();

    page.run_for(3750, &mut ()).unwrap();
    let x = page.current_translate_x(track).unwrap();
    assert!((x + 150.0).abs() < 1e-6, "{x}");
}
