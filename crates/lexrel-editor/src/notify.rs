//! Notification sink implementations.

use lexrel_domain::traits::Notifier;

/// Notifier that writes rejection messages to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Notifier that swallows all messages
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify_error(&self, _message: &str) {}
}
