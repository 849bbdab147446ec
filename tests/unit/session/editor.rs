use super::*;
use crate::{
    foundation::core::{Frame, Vec2},
    session::{notify::UPLOAD_REQUIRED_MESSAGE, slider::ZoomBounds},
};

const RED: [u8; 4] = [255, 0, 0, 255];

fn solid(width: u32, height: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage::from_premul(width, height, px.repeat((width * height) as usize)).unwrap()
}

fn editor(side: u32) -> Editor {
    let c = Compositor::new(Frame::square(side)).unwrap();
    Editor::new(c, ZoomSlider::new(ZoomBounds::default()).unwrap()).unwrap()
}

#[test]
fn fresh_session_has_nothing_loaded() {
    let e = editor(8);
    assert_eq!(e.state(), RenderState::default());
    assert_eq!(e.render_count(), 0);
    assert_eq!(e.cursor(), Cursor::Grab);
    assert!(e.preview().data().iter().all(|&b| b == 0));
}

#[test]
fn loading_subject_renders_once_and_centers() {
    let mut e = editor(8);
    assert_eq!(e.subject_decoded(solid(2, 2, RED)).unwrap(), Outcome::Rendered);
    assert_eq!(e.render_count(), 1);
    assert!(e.state().subject_loaded);
    assert_eq!(e.preview().pixel(3, 3), Some(RED));
    assert_eq!(e.preview().pixel(4, 4), Some(RED));
    assert_eq!(e.preview().pixel(2, 2), Some([0, 0, 0, 0]));
}

#[test]
fn pointer_down_without_subject_starts_no_drag() {
    let mut e = editor(8);
    assert_eq!(e.pointer_down(Point::new(1.0, 1.0)), Outcome::Ignored);
    assert!(!e.is_dragging());
    assert_eq!(e.pointer_move(Point::new(5.0, 5.0)).unwrap(), Outcome::Ignored);
    assert_eq!(e.render_count(), 0);
    assert_eq!(e.state().offset, Vec2::ZERO);
}

#[test]
fn drag_accumulates_deltas_until_released() {
    let mut e = editor(8);
    e.subject_decoded(solid(2, 2, RED)).unwrap();

    e.pointer_down(Point::new(10.0, 10.0));
    assert_eq!(e.cursor(), Cursor::Grabbing);
    assert_eq!(e.pointer_move(Point::new(11.0, 10.0)).unwrap(), Outcome::Rendered);
    assert_eq!(e.pointer_move(Point::new(12.0, 9.0)).unwrap(), Outcome::Rendered);
    assert_eq!(e.state().offset, Vec2::new(2.0, -1.0));
    assert_eq!(e.render_count(), 3);
    assert_eq!(e.preview().pixel(5, 2), Some(RED));

    e.pointer_up();
    assert_eq!(e.cursor(), Cursor::Grab);
    assert_eq!(e.pointer_move(Point::new(40.0, 40.0)).unwrap(), Outcome::Ignored);
    assert_eq!(e.state().offset, Vec2::new(2.0, -1.0));

    e.pointer_down(Point::new(0.0, 0.0));
    e.pointer_leave();
    assert!(!e.is_dragging());
    assert_eq!(e.render_count(), 3);
}

#[test]
fn zoom_goes_through_the_slider() {
    let mut e = editor(8);
    e.subject_decoded(solid(2, 2, RED)).unwrap();
    assert_eq!(e.zoom_input(2.0).unwrap(), Outcome::Rendered);
    assert_eq!(e.state().zoom, 2.0);
    assert_eq!(e.slider().value(), 2.0);

    e.zoom_input(99.0).unwrap();
    assert_eq!(e.state().zoom, 3.0);
}

#[test]
fn new_upload_discards_drag_and_zoom() {
    let mut e = editor(8);
    e.subject_decoded(solid(2, 2, RED)).unwrap();
    e.zoom_input(2.5).unwrap();
    e.pointer_down(Point::new(0.0, 0.0));
    e.pointer_move(Point::new(3.0, 4.0)).unwrap();

    e.subject_decoded(solid(4, 4, RED)).unwrap();
    assert_eq!(e.state().zoom, 1.0);
    assert_eq!(e.state().offset, Vec2::ZERO);
    assert_eq!(e.slider().value(), 1.0);
    assert!(!e.is_dragging());
    assert_eq!(e.subject().unwrap().width, 4);
}

#[test]
fn download_without_subject_notifies() {
    let mut e = editor(8);
    let out = e.download().unwrap();
    let Outcome::Notified(n) = out else {
        panic!("expected a notification, got {out:?}");
    };
    assert_eq!(n.message, UPLOAD_REQUIRED_MESSAGE);
    assert_eq!(e.notifications().len(), 1);
    assert_eq!(e.render_count(), 0);

    assert!(e.dismiss_notification().is_some());
    assert!(e.notifications().is_empty());
}

#[test]
fn download_with_subject_returns_named_png() {
    let mut e = editor(8).with_export_file_name("mine.png");
    e.subject_decoded(solid(2, 2, RED)).unwrap();
    let out = e.download().unwrap();
    let Outcome::Downloaded(d) = out else {
        panic!("expected a download, got {out:?}");
    };
    assert_eq!(d.file_name, "mine.png");
    let img = image::load_from_memory(&d.png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (8, 8));
    assert_eq!(img.get_pixel(3, 3).0, RED);
    assert!(e.notifications().is_empty());
}

#[test]
fn undecodable_upload_leaves_state_alone() {
    let mut e = editor(8);
    e.subject_decoded(solid(2, 2, RED)).unwrap();
    e.zoom_input(2.0).unwrap();
    let before = e.state();

    assert!(e.load_subject_bytes(b"nope").is_err());
    assert_eq!(e.state(), before);
    assert_eq!(e.render_count(), 2);
}

#[test]
fn overlay_load_sets_flag_and_renders() {
    let mut e = editor(4);
    assert_eq!(
        e.overlay_decoded(solid(1, 1, [0, 0, 255, 255])).unwrap(),
        Outcome::Rendered
    );
    assert!(e.state().overlay_loaded);
    assert_eq!(e.preview().pixel(0, 0), Some([0, 0, 255, 255]));
}

#[test]
fn from_config_without_overlay_file_still_works() {
    let mut cfg = PhotoFrameConfig::default();
    cfg.frame = Frame::square(16);
    cfg.overlay = Some("target/no-such-dir/logo.png".into());
    let e = Editor::from_config(&cfg).unwrap();
    assert!(!e.state().overlay_loaded);
    assert_eq!(e.compositor().frame(), Frame::square(16));
}
