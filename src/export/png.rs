use std::io::Cursor;

use crate::{
    assets::decode::PreparedImage,
    foundation::core::RenderState,
    foundation::error::{FrameError, FrameResult},
    render::{compositor::Compositor, surface::Surface},
};

/// File name used for downloads unless configured otherwise.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "framed_image.png";

/// Render the final composite at the frame size and encode it as PNG.
///
/// Fails with [`FrameError::MissingSubject`] when no subject is loaded; that is
/// the only precondition checked.
#[tracing::instrument(level = "debug", skip(compositor, subject, overlay))]
pub fn export_png(
    compositor: &Compositor,
    state: &RenderState,
    subject: Option<&PreparedImage>,
    overlay: Option<&PreparedImage>,
) -> FrameResult<Vec<u8>> {
    if !state.subject_loaded || subject.is_none() {
        return Err(FrameError::MissingSubject);
    }

    let mut surface = compositor.new_surface()?;
    compositor.render(&mut surface, state, subject, overlay)?;
    let bytes = encode_png(&surface)?;

    tracing::info!(
        width = surface.width(),
        height = surface.height(),
        bytes = bytes.len(),
        "exported png"
    );
    Ok(bytes)
}

/// Encode a surface as straight-alpha RGBA8 PNG.
pub fn encode_png(surface: &Surface) -> FrameResult<Vec<u8>> {
    let img =
        image::RgbaImage::from_raw(surface.width(), surface.height(), surface.to_straight_rgba8())
            .ok_or_else(|| FrameError::encode("surface byte length mismatch"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| FrameError::encode(format!("write png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
