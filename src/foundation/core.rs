use crate::foundation::error::{FrameError, FrameResult};

pub use kurbo::{Point, Rect, Vec2};

/// Side length of the default square frame, in pixels.
pub const DEFAULT_FRAME_SIDE: u32 = 400;

/// Zoom factor a freshly loaded subject starts at.
pub const RESET_ZOOM: f64 = 1.0;

/// Fixed output region shared by the live preview and the exported PNG.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
}

impl Default for Frame {
    fn default() -> Self {
        Self::square(DEFAULT_FRAME_SIDE)
    }
}

impl Frame {
    pub fn new(width: u32, height: u32) -> FrameResult<Self> {
        let frame = Self { width, height };
        frame.validate()?;
        Ok(frame)
    }

    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    pub fn validate(self) -> FrameResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::validation("frame width and height must be > 0"));
        }
        Ok(())
    }

    /// The whole frame as a rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Everything besides the two images that decides what one render looks like.
///
/// Values are immutable; event handlers derive a new state instead of editing
/// the current one in place.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderState {
    pub subject_loaded: bool,
    pub overlay_loaded: bool,
    /// Displacement of the subject from its centered position.
    pub offset: Vec2,
    pub zoom: f64,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            subject_loaded: false,
            overlay_loaded: false,
            offset: Vec2::ZERO,
            zoom: RESET_ZOOM,
        }
    }
}

impl RenderState {
    /// State after a new subject finished decoding: centered, unzoomed.
    pub fn with_subject_loaded(self) -> Self {
        Self {
            subject_loaded: true,
            offset: Vec2::ZERO,
            zoom: RESET_ZOOM,
            ..self
        }
    }

    pub fn with_overlay_loaded(self) -> Self {
        Self {
            overlay_loaded: true,
            ..self
        }
    }

    /// Zoom is taken as-is; bounding it is the input control's job.
    pub fn with_zoom(self, zoom: f64) -> Self {
        Self { zoom, ..self }
    }

    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            offset: self.offset + delta,
            ..self
        }
    }

    /// Destination rectangle of a subject with the given natural size.
    ///
    /// The scaled image is centered in `frame` and then shifted by `offset`.
    /// A non-positive zoom yields a rectangle with non-positive extent.
    pub fn subject_rect(self, natural_width: u32, natural_height: u32, frame: Frame) -> Rect {
        let scaled_w = f64::from(natural_width) * self.zoom;
        let scaled_h = f64::from(natural_height) * self.zoom;
        let x0 = self.offset.x + (f64::from(frame.width) - scaled_w) / 2.0;
        let y0 = self.offset.y + (f64::from(frame.height) - scaled_h) / 2.0;
        Rect::new(x0, y0, x0 + scaled_w, y0 + scaled_h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
