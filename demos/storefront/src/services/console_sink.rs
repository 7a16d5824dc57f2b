// demos/storefront/src/services/console_sink.rs

use cartstore::NotificationSink;

/// Prints notifications to stderr, where a browser build would show a toast.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
  fn error(&self, message: &str) {
    eprintln!("✖ {}", message);
  }
}
