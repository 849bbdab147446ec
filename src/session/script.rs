use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    foundation::core::Point,
    foundation::error::{FrameError, FrameResult},
    session::{
        editor::{Download, Editor, Outcome},
        notify::Notification,
    },
};

/// One recorded user interaction.
///
/// In JSON: `{"load": "photo.jpg"}`, `{"zoom": 1.5}`, `{"down": [x, y]}`,
/// `{"move": [x, y]}`, or one of `"up"`, `"leave"`, `"download"`, `"dismiss"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Load(PathBuf),
    Zoom(f64),
    Down([f64; 2]),
    Move([f64; 2]),
    Up,
    Leave,
    Download,
    Dismiss,
}

/// A sequence of interactions to replay against an [`Editor`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_path(path: impl AsRef<Path>) -> FrameResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FrameError::validation(format!("open script JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_reader(r: impl Read) -> FrameResult<Self> {
        serde_json::from_reader(r).map_err(|e| FrameError::serde(format!("parse script JSON: {e}")))
    }
}

/// What a replay produced.
#[derive(Clone, Debug, Default)]
pub struct ReplayReport {
    pub downloads: Vec<Download>,
    /// Every notification raised, including ones later dismissed.
    pub notifications: Vec<Notification>,
    /// Preview renders triggered by the replayed steps.
    pub renders: u64,
}

/// Feed `script` to `editor` step by step. Relative `load` paths resolve against `base_dir`.
#[tracing::instrument(level = "debug", skip(editor, script), fields(steps = script.steps.len()))]
pub fn replay(editor: &mut Editor, script: &Script, base_dir: &Path) -> FrameResult<ReplayReport> {
    let mut report = ReplayReport::default();
    let start = editor.render_count();

    for (i, step) in script.steps.iter().enumerate() {
        let outcome = match step {
            Step::Load(path) => {
                let path = base_dir.join(path);
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("step {i}: read '{}'", path.display()))?;
                editor.load_subject_bytes(&bytes)?
            }
            Step::Zoom(z) => editor.zoom_input(*z)?,
            Step::Down([x, y]) => editor.pointer_down(Point::new(*x, *y)),
            Step::Move([x, y]) => editor.pointer_move(Point::new(*x, *y))?,
            Step::Up => editor.pointer_up(),
            Step::Leave => editor.pointer_leave(),
            Step::Download => editor.download()?,
            Step::Dismiss => {
                editor.dismiss_notification();
                Outcome::Ignored
            }
        };
        let kind = match outcome {
            Outcome::Downloaded(d) => {
                report.downloads.push(d);
                "downloaded"
            }
            Outcome::Notified(n) => {
                report.notifications.push(n);
                "notified"
            }
            Outcome::Rendered => "rendered",
            Outcome::Ignored => "ignored",
        };
        tracing::trace!(step = i, outcome = kind, "replayed");
    }

    report.renders = editor.render_count() - start;
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/session/script.rs"]
mod tests;
