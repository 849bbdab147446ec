use super::*;
use crate::foundation::core::Frame;

fn solid(width: u32, height: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage::from_premul(width, height, px.repeat((width * height) as usize)).unwrap()
}

#[test]
fn export_without_subject_is_missing_subject() {
    let c = Compositor::new(Frame::square(8)).unwrap();
    let overlay = solid(1, 1, [0, 0, 0, 255]);
    let state = RenderState::default().with_overlay_loaded();

    let err = export_png(&c, &state, None, Some(&overlay)).unwrap_err();
    assert!(err.is_missing_subject());

    // flag set but no pixels is treated the same way
    let err = export_png(&c, &state.with_subject_loaded(), None, None).unwrap_err();
    assert!(err.is_missing_subject());
}

#[test]
fn export_is_frame_sized_png_with_straight_alpha() {
    let c = Compositor::new(Frame::square(8)).unwrap();
    let subject = solid(4, 4, [255, 0, 0, 255]);
    let state = RenderState::default().with_subject_loaded();

    let bytes = export_png(&c, &state, Some(&subject), None).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");

    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (8, 8));
    assert_eq!(img.get_pixel(4, 4).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn encode_unpremultiplies() {
    let mut s = Surface::new(1, 1).unwrap();
    s.clear(crate::foundation::core::Rgba8Premul::from_straight_rgba(
        200, 100, 0, 128,
    ));
    let bytes = encode_png(&s).unwrap();
    let px = image::load_from_memory(&bytes).unwrap().to_rgba8().get_pixel(0, 0).0;
    assert_eq!(px[3], 128);
    assert!(px[0].abs_diff(200) <= 1);
    assert!(px[1].abs_diff(100) <= 1);
}
