//! Terminal rendering of popup notification banners.

use ninja_core::{message::Notification, traits::Notifier};
use tracing::info;

/// Prints notifications to stdout.
#[derive(Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Banner line as shown to the user.
    pub fn render(notification: &Notification) -> String {
        format!(
            "[{}] {}",
            notification.kind.as_str(),
            notification.message
        )
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        info!(kind = notification.kind.as_str(), "notification: {}", notification.message);
        println!("{}", Self::render(notification));
    }
}
