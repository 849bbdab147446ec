use std::collections::VecDeque;

/// Text shown when a download is attempted before any photo was loaded.
pub const UPLOAD_REQUIRED_MESSAGE: &str = "Please upload an image first!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    UploadRequired,
}

/// A transient message for the user.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn upload_required() -> Self {
        Self {
            kind: NotificationKind::UploadRequired,
            message: UPLOAD_REQUIRED_MESSAGE.to_string(),
        }
    }
}

/// Messages currently on screen, oldest first. Each stays until dismissed.
#[derive(Clone, Debug, Default)]
pub struct Notifications {
    shown: VecDeque<Notification>,
}

impl Notifications {
    pub fn push(&mut self, n: Notification) {
        self.shown.push_back(n);
    }

    /// The message the next dismiss would close.
    pub fn current(&self) -> Option<&Notification> {
        self.shown.front()
    }

    pub fn dismiss(&mut self) -> Option<Notification> {
        self.shown.pop_front()
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.shown.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/notify.rs"]
mod tests;
