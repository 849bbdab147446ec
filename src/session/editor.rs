use crate::{
    assets::decode::{PreparedImage, decode_image, load_overlay},
    config::settings::PhotoFrameConfig,
    export::png::{DEFAULT_EXPORT_FILE_NAME, export_png},
    foundation::core::{Point, RenderState},
    foundation::error::{FrameError, FrameResult},
    render::{compositor::Compositor, surface::Surface},
    session::{
        notify::{Notification, Notifications},
        slider::ZoomSlider,
    },
};

/// A finished export, ready to be saved under `file_name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub png: Vec<u8>,
}

/// What handling one event did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// State changed and the preview was redrawn once.
    Rendered,
    /// The event was ignored or changed nothing visible; no render happened.
    Ignored,
    Downloaded(Download),
    Notified(Notification),
}

/// Pointer cursor hint for the preview area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Drag {
    Idle,
    Active { last: Point },
}

/// Event-driven editing session around one [`Compositor`].
///
/// Every handler runs to completion and redraws the preview at most once.
/// Images arrive already decoded, so a "loaded" flag is never set before
/// its pixels exist.
pub struct Editor {
    compositor: Compositor,
    state: RenderState,
    subject: Option<PreparedImage>,
    overlay: Option<PreparedImage>,
    slider: ZoomSlider,
    drag: Drag,
    notifications: Notifications,
    preview: Surface,
    export_file_name: String,
    render_count: u64,
}

impl Editor {
    /// Session with an empty preview. Nothing is rendered until the first load.
    pub fn new(compositor: Compositor, slider: ZoomSlider) -> FrameResult<Self> {
        let preview = compositor.new_surface()?;
        Ok(Self {
            compositor,
            state: RenderState::default(),
            subject: None,
            overlay: None,
            slider,
            drag: Drag::Idle,
            notifications: Notifications::default(),
            preview,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            render_count: 0,
        })
    }

    pub fn with_export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = name.into();
        self
    }

    /// Build a session from config and try to load its overlay.
    ///
    /// A missing or broken overlay file is not an error: the session just
    /// runs without one.
    pub fn from_config(cfg: &PhotoFrameConfig) -> FrameResult<Self> {
        cfg.validate()?;
        let mut editor = Self::new(cfg.compositor()?, cfg.slider()?)?
            .with_export_file_name(cfg.export_file_name.clone());
        if let Some(path) = &cfg.overlay
            && let Some(img) = load_overlay(path)
        {
            editor.overlay_decoded(img)?;
        }
        Ok(editor)
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn preview(&self) -> &Surface {
        &self.preview
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn slider(&self) -> &ZoomSlider {
        &self.slider
    }

    pub fn subject(&self) -> Option<&PreparedImage> {
        self.subject.as_ref()
    }

    pub fn cursor(&self) -> Cursor {
        match self.drag {
            Drag::Idle => Cursor::Grab,
            Drag::Active { .. } => Cursor::Grabbing,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, Drag::Active { .. })
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        self.notifications.dismiss()
    }

    /// Number of preview renders so far.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// A new subject finished decoding: replace the old one and recenter.
    #[tracing::instrument(level = "debug", skip_all, fields(width = image.width, height = image.height))]
    pub fn subject_decoded(&mut self, image: PreparedImage) -> FrameResult<Outcome> {
        self.subject = Some(image);
        self.slider.reset();
        self.drag = Drag::Idle;
        self.apply(self.state.with_subject_loaded())
    }

    /// Decode then load. A decode failure leaves the session untouched.
    pub fn load_subject_bytes(&mut self, bytes: &[u8]) -> FrameResult<Outcome> {
        let image = decode_image(bytes)?;
        self.subject_decoded(image)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(width = image.width, height = image.height))]
    pub fn overlay_decoded(&mut self, image: PreparedImage) -> FrameResult<Outcome> {
        self.overlay = Some(image);
        self.apply(self.state.with_overlay_loaded())
    }

    /// Slider moved. The slider bounds the raw value; the result is used as zoom.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn zoom_input(&mut self, raw: f64) -> FrameResult<Outcome> {
        let zoom = self.slider.set(raw);
        self.apply(self.state.with_zoom(zoom))
    }

    /// Start dragging at `at`. Ignored until a subject is loaded.
    pub fn pointer_down(&mut self, at: Point) -> Outcome {
        if !self.state.subject_loaded {
            return Outcome::Ignored;
        }
        self.drag = Drag::Active { last: at };
        Outcome::Ignored
    }

    /// Pointer moved; while dragging, shift the subject by the movement.
    pub fn pointer_move(&mut self, at: Point) -> FrameResult<Outcome> {
        let Drag::Active { last } = self.drag else {
            return Ok(Outcome::Ignored);
        };
        if !self.state.subject_loaded {
            return Ok(Outcome::Ignored);
        }
        self.drag = Drag::Active { last: at };
        self.apply(self.state.translated(at - last))
    }

    pub fn pointer_up(&mut self) -> Outcome {
        self.drag = Drag::Idle;
        Outcome::Ignored
    }

    pub fn pointer_leave(&mut self) -> Outcome {
        self.drag = Drag::Idle;
        Outcome::Ignored
    }

    /// Export the current composite, or ask the user to upload first.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn download(&mut self) -> FrameResult<Outcome> {
        match export_png(
            &self.compositor,
            &self.state,
            self.subject.as_ref(),
            self.overlay.as_ref(),
        ) {
            Ok(png) => Ok(Outcome::Downloaded(Download {
                file_name: self.export_file_name.clone(),
                png,
            })),
            Err(FrameError::MissingSubject) => {
                let n = Notification::upload_required();
                tracing::debug!(message = %n.message, "download refused");
                self.notifications.push(n.clone());
                Ok(Outcome::Notified(n))
            }
            Err(e) => Err(e),
        }
    }

    fn apply(&mut self, next: RenderState) -> FrameResult<Outcome> {
        tracing::debug!(
            zoom = next.zoom,
            offset_x = next.offset.x,
            offset_y = next.offset.y,
            subject = next.subject_loaded,
            overlay = next.overlay_loaded,
            "state"
        );
        self.state = next;
        self.compositor.render(
            &mut self.preview,
            &self.state,
            self.subject.as_ref(),
            self.overlay.as_ref(),
        )?;
        self.render_count += 1;
        Ok(Outcome::Rendered)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
