use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use crate::{
    config::logging::LoggingConfig,
    export::png::DEFAULT_EXPORT_FILE_NAME,
    foundation::core::{Frame, Rgba8Premul},
    foundation::error::{FrameError, FrameResult},
    render::{compositor::Compositor, resample::Sampling},
    session::slider::{ZoomBounds, ZoomSlider},
};

/// Overlay path used when no config file says otherwise.
pub const DEFAULT_OVERLAY_PATH: &str = "logo.png";

/// User-facing configuration, read from JSON.
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhotoFrameConfig {
    /// Preview and export size.
    pub frame: Frame,
    /// Decorative overlay drawn over the whole frame. `null` disables it.
    pub overlay: Option<PathBuf>,
    /// Name given to the exported file.
    pub export_file_name: String,
    pub zoom: ZoomBounds,
    pub sampling: Sampling,
    /// Straight-alpha RGBA the frame is cleared to before drawing.
    pub background: [u8; 4],
    pub logging: LoggingConfig,
}

impl Default for PhotoFrameConfig {
    fn default() -> Self {
        Self {
            frame: Frame::default(),
            overlay: Some(PathBuf::from(DEFAULT_OVERLAY_PATH)),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            zoom: ZoomBounds::default(),
            sampling: Sampling::default(),
            background: [0, 0, 0, 0],
            logging: LoggingConfig::default(),
        }
    }
}

impl PhotoFrameConfig {
    /// Load, resolve relative paths against the file's directory, and validate.
    pub fn from_path(path: impl AsRef<Path>) -> FrameResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FrameError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        if let Some(dir) = path.parent() {
            cfg.resolve_paths(dir);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse config JSON without touching the filesystem. Paths stay as written.
    pub fn from_reader(r: impl Read) -> FrameResult<Self> {
        serde_json::from_reader(r).map_err(|e| FrameError::serde(format!("parse config JSON: {e}")))
    }

    pub fn validate(&self) -> FrameResult<()> {
        self.frame.validate()?;
        self.zoom.validate()?;
        let name = self.export_file_name.trim();
        if name.is_empty() || !name.to_ascii_lowercase().ends_with(".png") {
            return Err(FrameError::validation(
                "export_file_name must be a non-empty .png file name",
            ));
        }
        if name.contains(['/', '\\']) {
            return Err(FrameError::validation(
                "export_file_name must not contain path separators",
            ));
        }
        Ok(())
    }

    /// Make a relative overlay path relative to `base` instead of the working directory.
    pub fn resolve_paths(&mut self, base: &Path) {
        if let Some(overlay) = &self.overlay
            && overlay.is_relative()
        {
            self.overlay = Some(base.join(overlay));
        }
    }

    pub fn compositor(&self) -> FrameResult<Compositor> {
        let [r, g, b, a] = self.background;
        Ok(Compositor::new(self.frame)?
            .with_sampling(self.sampling)
            .with_background(Rgba8Premul::from_straight_rgba(r, g, b, a)))
    }

    pub fn slider(&self) -> FrameResult<ZoomSlider> {
        ZoomSlider::new(self.zoom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
