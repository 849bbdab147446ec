use crate::foundation::{
    core::RESET_ZOOM,
    error::{FrameError, FrameResult},
};

/// Bounds of the zoom range input.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 3.0,
            step: 0.01,
        }
    }
}

impl ZoomBounds {
    pub fn validate(&self) -> FrameResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err(FrameError::validation("zoom bounds must be finite"));
        }
        if self.min <= 0.0 {
            return Err(FrameError::validation("zoom.min must be > 0"));
        }
        if self.step <= 0.0 {
            return Err(FrameError::validation("zoom.step must be > 0"));
        }
        if !(self.min <= RESET_ZOOM && RESET_ZOOM <= self.max) {
            return Err(FrameError::validation(
                "zoom range must include 1.0 (min <= 1 <= max)",
            ));
        }
        Ok(())
    }
}

/// Range input for the zoom factor.
///
/// The compositor never bounds zoom itself; this control is where raw input is
/// clamped to `[min, max]` and snapped to `step`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomSlider {
    bounds: ZoomBounds,
    value: f64,
}

impl ZoomSlider {
    pub fn new(bounds: ZoomBounds) -> FrameResult<Self> {
        bounds.validate()?;
        Ok(Self {
            bounds,
            value: RESET_ZOOM,
        })
    }

    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Move the slider to `raw` and return the resulting value.
    ///
    /// Non-finite input leaves the slider where it is.
    pub fn set(&mut self, raw: f64) -> f64 {
        if raw.is_finite() {
            self.value = self.snap(raw);
        }
        self.value
    }

    pub fn reset(&mut self) {
        self.value = RESET_ZOOM;
    }

    fn snap(&self, raw: f64) -> f64 {
        let ZoomBounds { min, max, step } = self.bounds;
        let clamped = raw.clamp(min, max);
        let steps = ((clamped - min) / step).round();
        let snapped = (min + steps * step).clamp(min, max);
        // drop float noise such as 1.5000000000000002
        (snapped * 1e9).round() / 1e9
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/slider.rs"]
mod tests;
