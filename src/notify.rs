use std::time::{Duration, Instant};

/// How long a toast stays on screen before the tick prunes it.
pub const TOAST_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification raised by a save/delete/validation outcome.
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    raised_at: Instant,
}

/// The set of currently visible toasts, newest last.
#[derive(Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message.into(), ToastKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message.into(), ToastKind::Error);
    }

    fn push(&mut self, message: String, kind: ToastKind) {
        self.items.push(Toast {
            message,
            kind,
            raised_at: Instant::now(),
        });
    }

    /// Drops toasts older than [`TOAST_TIMEOUT`]. Called from the tick.
    pub fn prune(&mut self) {
        self.items
            .retain(|toast| toast.raised_at.elapsed() <= TOAST_TIMEOUT);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
