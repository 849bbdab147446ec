use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    foundation::error::{FrameError, FrameResult},
    render::resample::ImageView,
};

/// Raster image decoded into premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap an already-premultiplied buffer, checking its length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> FrameResult<Self> {
        check_len(width, height, rgba8_premul.len())?;
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Borrow the pixels as an `image` buffer.
    ///
    /// The fields are public, so the length is checked again here rather than
    /// trusted.
    pub fn view(&self) -> FrameResult<ImageView<'_>> {
        check_len(self.width, self.height, self.rgba8_premul.len())?;
        ImageView::from_raw(self.width, self.height, self.rgba8_premul.as_slice())
            .ok_or_else(|| FrameError::validation("prepared image byte length mismatch"))
    }
}

fn check_len(width: u32, height: u32, len: usize) -> FrameResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| FrameError::validation("image buffer size overflow"))?;
    if len != expected {
        return Err(FrameError::validation(format!(
            "image byte length {len} does not match {width}x{height}x4"
        )));
    }
    Ok(())
}

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> FrameResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FrameError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Read and decode an image file.
pub fn decode_image_file(path: &Path) -> FrameResult<PreparedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Load the decorative overlay; any failure degrades to "no overlay".
pub fn load_overlay(path: &Path) -> Option<PreparedImage> {
    match decode_image_file(path) {
        Ok(img) => {
            tracing::debug!(
                path = %path.display(),
                width = img.width,
                height = img.height,
                "overlay loaded"
            );
            Some(img)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "overlay not loaded; rendering without it");
            None
        }
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
