//! photoframe puts a photo into a fixed square frame under a decorative overlay.
//!
//! The user pans and zooms the photo (the *subject*), a transparent logo (the
//! *overlay*) is stretched over the whole frame, and the result is exported as
//! one PNG.
//!
//! # Pieces
//!
//! - [`Compositor`]: a pure `RenderState + images -> pixels` function drawing into
//!   an explicit [`Surface`]. Subject first, overlay second, source-over only.
//! - [`export_png`]: the same render at the frame size, encoded as PNG.
//! - [`Editor`]: the event-driven session (load, zoom, drag, download) that
//!   derives a new [`RenderState`] per event and redraws the preview at most once.
//! - [`PhotoFrameConfig`]: JSON configuration for frame size, overlay path,
//!   slider bounds, sampling and logging.
//!
//! Pixels are premultiplied RGBA8 internally and straight RGBA8 in exported PNGs.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod export;
mod foundation;
mod render;
mod session;

pub use assets::decode::{PreparedImage, decode_image, decode_image_file, load_overlay};
pub use config::logging::{LoggingConfig, init_logging};
pub use config::settings::{DEFAULT_OVERLAY_PATH, PhotoFrameConfig};
pub use export::png::{DEFAULT_EXPORT_FILE_NAME, encode_png, export_png};
pub use foundation::core::{
    DEFAULT_FRAME_SIDE, Frame, Point, RESET_ZOOM, Rect, RenderState, Rgba8Premul, Vec2,
};
pub use foundation::error::{FrameError, FrameResult};
pub use render::blend::{PremulRgba8, over, unpremultiply};
pub use render::compositor::{Compositor, draw_image};
pub use render::resample::Sampling;
pub use render::surface::Surface;
pub use session::editor::{Cursor, Download, Editor, Outcome};
pub use session::notify::{Notification, NotificationKind, Notifications, UPLOAD_REQUIRED_MESSAGE};
pub use session::script::{ReplayReport, Script, Step, replay};
pub use session::slider::{ZoomBounds, ZoomSlider};
