//! Transient notices for a terminal host: plain lines on stdout.

use snaptext_core::Notifier;
use tracing::debug;

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        debug!(notice = message, "User notice");
        println!("{message}");
    }
}
