use image::{
    ImageBuffer, Rgba, RgbaImage,
    imageops::{self, FilterType},
};

/// Borrowed premultiplied RGBA8 pixels, as handed to `imageops`.
pub type ImageView<'a> = ImageBuffer<Rgba<u8>, &'a [u8]>;

/// How an image is resampled when drawn at a size other than its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    Nearest,
    /// Triangle filter: area-averaged when shrinking, bilinear when enlarging.
    #[default]
    Bilinear,
}

impl Sampling {
    pub fn filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
        }
    }
}

/// A block of target pixels inside a scaled image of `scaled` size.
///
/// `x`/`y` are offsets into the scaled image and may be far larger than the
/// window itself when the image is enlarged a lot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Window {
    pub scaled: (u64, u64),
    pub x: u64,
    pub y: u64,
    pub width: u32,
    pub height: u32,
}

/// Resample `src` to `window.scaled` and return just the pixels under `window`.
///
/// Shrinking runs `imageops::resize` over the whole source so every source
/// pixel contributes. Enlarging interpolates only the window, which keeps the
/// allocation bounded by the window size.
pub(crate) fn resample_window(
    src: &ImageView<'_>,
    window: Window,
    sampling: Sampling,
) -> RgbaImage {
    let (w, h) = src.dimensions();
    let (tw, th) = window.scaled;

    if tw <= u64::from(w) && th <= u64::from(h) {
        let scaled = imageops::resize(src, tw as u32, th as u32, sampling.filter());
        return imageops::crop_imm(
            &scaled,
            window.x as u32,
            window.y as u32,
            window.width,
            window.height,
        )
        .to_image();
    }

    let sx = f64::from(w) / tw as f64;
    let sy = f64::from(h) / th as f64;
    RgbaImage::from_fn(window.width, window.height, |x, y| {
        let u = source_coord(window.x + u64::from(x), sx, w);
        let v = source_coord(window.y + u64::from(y), sy, h);
        let px = match sampling {
            Sampling::Nearest => imageops::interpolate_nearest(src, u, v),
            Sampling::Bilinear => imageops::interpolate_bilinear(src, u, v),
        };
        px.unwrap_or(Rgba([0, 0, 0, 0]))
    })
}

// Center of target pixel `i` in source pixel-index space, clamped to the edge pixels.
fn source_coord(i: u64, scale: f64, len: u32) -> f32 {
    let max = f64::from(len.saturating_sub(1));
    ((i as f64 + 0.5) * scale - 0.5).clamp(0.0, max) as f32
}

#[cfg(test)]
#[path = "../../tests/unit/render/resample.rs"]
mod tests;
