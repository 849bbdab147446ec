use crate::{
    assets::decode::PreparedImage,
    foundation::core::{Frame, Rect, RenderState, Rgba8Premul},
    foundation::error::{FrameError, FrameResult},
    render::{
        blend::over,
        resample::{Sampling, Window, resample_window},
        surface::Surface,
    },
};

/// Draws the subject, then the overlay, into a frame-sized surface.
///
/// Holds only fixed settings; every render is a pure function of its inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Compositor {
    frame: Frame,
    sampling: Sampling,
    background: Rgba8Premul,
}

impl Compositor {
    pub fn new(frame: Frame) -> FrameResult<Self> {
        frame.validate()?;
        Ok(Self {
            frame,
            sampling: Sampling::default(),
            background: Rgba8Premul::transparent(),
        })
    }

    pub fn with_sampling(self, sampling: Sampling) -> Self {
        Self { sampling, ..self }
    }

    pub fn with_background(self, background: Rgba8Premul) -> Self {
        Self { background, ..self }
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// A blank surface with the frame's dimensions.
    pub fn new_surface(&self) -> FrameResult<Surface> {
        Surface::for_frame(self.frame)
    }

    /// Clear `surface`, draw the subject (if loaded) and the overlay (if loaded) on top.
    ///
    /// Zoom and offset are used exactly as given. A non-positive or non-finite
    /// zoom simply leaves the subject out.
    #[tracing::instrument(level = "trace", skip(self, surface, subject, overlay))]
    pub fn render(
        &self,
        surface: &mut Surface,
        state: &RenderState,
        subject: Option<&PreparedImage>,
        overlay: Option<&PreparedImage>,
    ) -> FrameResult<()> {
        if !surface.matches(self.frame) {
            return Err(FrameError::validation(format!(
                "surface is {}x{} but frame is {}x{}",
                surface.width(),
                surface.height(),
                self.frame.width,
                self.frame.height
            )));
        }

        surface.clear(self.background);

        if state.subject_loaded
            && let Some(img) = subject
        {
            let dest = state.subject_rect(img.width, img.height, self.frame);
            draw_image(surface, img, dest, self.sampling)?;
        }

        if state.overlay_loaded
            && let Some(img) = overlay
        {
            draw_image(surface, img, self.frame.rect(), self.sampling)?;
        }

        Ok(())
    }
}

/// Scale `image` into `dest` and blend it source-over onto `surface`.
///
/// A pixel is covered when its center lies in the half-open `dest`; anything
/// outside the surface is dropped. Fails only when the image's byte length
/// does not match its dimensions.
pub fn draw_image(
    surface: &mut Surface,
    image: &PreparedImage,
    dest: Rect,
    sampling: Sampling,
) -> FrameResult<()> {
    let src = image.view()?;
    if image.is_empty() {
        return Ok(());
    }
    let dw = dest.width();
    let dh = dest.height();
    let drawable = dw > 0.0
        && dh > 0.0
        && dw.is_finite()
        && dh.is_finite()
        && dest.x0.is_finite()
        && dest.y0.is_finite();
    if !drawable {
        return Ok(());
    }

    let (x_start, x_end) = covered_span(dest.x0, dest.x1);
    let (y_start, y_end) = covered_span(dest.y0, dest.y1);
    let vx0 = x_start.max(0);
    let vx1 = x_end.min(i64::from(surface.width()));
    let vy0 = y_start.max(0);
    let vy1 = y_end.min(i64::from(surface.height()));
    if vx0 >= vx1 || vy0 >= vy1 {
        return Ok(());
    }

    let window = Window {
        scaled: (
            x_end.saturating_sub(x_start) as u64,
            y_end.saturating_sub(y_start) as u64,
        ),
        x: vx0.saturating_sub(x_start) as u64,
        y: vy0.saturating_sub(y_start) as u64,
        width: (vx1 - vx0) as u32,
        height: (vy1 - vy0) as u32,
    };
    let layer = resample_window(&src, window, sampling);

    for (dy, src_row) in layer.rows().enumerate() {
        let row = surface.row_mut(vy0 as u32 + dy as u32);
        for (dx, px) in src_row.enumerate() {
            let i = (vx0 as usize + dx) * 4;
            let dst = [row[i], row[i + 1], row[i + 2], row[i + 3]];
            row[i..i + 4].copy_from_slice(&over(dst, px.0));
        }
    }
    Ok(())
}

// Pixel indices whose centers fall in [lo, hi), in unclipped surface coordinates.
fn covered_span(lo: f64, hi: f64) -> (i64, i64) {
    ((lo - 0.5).ceil() as i64, (hi - 0.5).ceil() as i64)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
