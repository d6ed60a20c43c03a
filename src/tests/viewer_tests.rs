//! Modal viewer: open/close lifecycle and input routing.

use super::*;
use crate::viewer::{TouchPoint, ViewerInput, ViewerKey};

fn zoom_in_wheel() -> Message {
    Message::ViewerInput(ViewerInput::Wheel {
        delta_x: 0.0,
        delta_y: -120.0,
        shift: false,
    })
}

#[test]
fn test_viewer_needs_a_result() {
    let mut app = test_app();
    app.update(Message::OpenViewer);
    assert!(!app.is_viewer_open());
}

#[test]
fn test_keys_ignored_while_closed() {
    let mut app = finished_app();
    app.update(Message::ViewerKey(ViewerKey::ZoomIn));
    app.update(zoom_in_wheel());
    assert_eq!(app.view().viewer.transform, "scale(1) translateY(0px)");
}

#[test]
fn test_reset_key_restores_identity() {
    let mut app = finished_app();
    app.update(Message::OpenViewer);
    for _ in 0..22 {
        app.update(Message::ViewerKey(ViewerKey::ZoomIn));
    }
    for _ in 0..7 {
        app.update(Message::ViewerKey(ViewerKey::PanUp));
    }
    assert!(app.view().viewer.transform.ends_with("translateY(-140px)"));

    app.update(Message::ViewerKey(ViewerKey::Reset));
    let view = app.view();
    assert_eq!(view.viewer.transform, "scale(1) translateY(0px)");
    assert_eq!(view.viewer.transition, "transform 0.1s ease-out");
}

#[test]
fn test_open_and_close_reset_transform() {
    let mut app = finished_app();
    app.update(Message::OpenViewer);
    app.update(zoom_in_wheel());
    app.update(Message::ViewerKey(ViewerKey::PanDown));
    assert_ne!(app.view().viewer.transform, "scale(1) translateY(0px)");

    app.update(Message::CloseViewer);
    let view = app.view();
    assert!(!view.modal_open);
    assert_eq!(view.viewer.transform, "scale(1) translateY(0px)");

    app.update(Message::OpenViewer);
    assert!(app.view().modal_open);
    assert_eq!(app.view().viewer.transform, "scale(1) translateY(0px)");
}

#[test]
fn test_escape_closes_viewer() {
    let mut app = finished_app();
    app.update(Message::OpenViewer);
    app.update(Message::ViewerKey(ViewerKey::PanDown));
    app.update(Message::ViewerKey(ViewerKey::Close));
    assert!(!app.is_viewer_open());
    assert_eq!(app.view().viewer.transform, "scale(1) translateY(0px)");
}

#[test]
fn test_touch_pan_through_app() {
    let mut app = finished_app();
    app.update(Message::OpenViewer);
    app.update(Message::ViewerInput(ViewerInput::TouchStart(vec![
        TouchPoint::new(0.0, 0.0),
    ])));
    app.update(Message::ViewerInput(ViewerInput::TouchMove(vec![
        TouchPoint::new(0.0, -100.0),
    ])));
    assert_eq!(app.view().viewer.transform, "scale(1) translateY(-10px)");
}
