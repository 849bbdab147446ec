use crate::{
    foundation::core::{Frame, Rgba8Premul},
    foundation::error::{FrameError, FrameResult},
    render::blend::{PremulRgba8, unpremultiply},
};

/// In-memory drawing target: row-major premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> FrameResult<Self> {
        if width == 0 || height == 0 {
            return Err(FrameError::validation("surface width and height must be > 0"));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| FrameError::validation("surface buffer size overflow"))?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    pub fn for_frame(frame: Frame) -> FrameResult<Self> {
        Self::new(frame.width, frame.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn matches(&self, frame: Frame) -> bool {
        self.width == frame.width && self.height == frame.height
    }

    /// Raw premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        let px = &self.data[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn clear(&mut self, color: Rgba8Premul) {
        let rgba = color.to_array();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Straight-alpha copy of the pixels, ready for encoding.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremultiply([px[0], px[1], px[2], px[3]]));
        }
        out
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = self.index(0, y);
        let end = start + (self.width as usize) * 4;
        &mut self.data[start..end]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
