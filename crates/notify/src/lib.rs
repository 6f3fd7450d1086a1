//! Notification collaborators: the outcome channel surfaced to users.
//!
//! The domain signals success or rejection through its return values; the
//! session layer translates those into notifications and pushes them through
//! a [`Notifier`]. Rendering (toast, terminal, log line) is the
//! implementation's concern.

pub mod notifier;

pub use notifier::{Notification, NotificationKind, Notifier, RecordingNotifier, TracingNotifier};
