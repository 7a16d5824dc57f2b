// cartstore/src/services/notify.rs

use super::NotificationSink;
use parking_lot::Mutex;
use tracing::warn;

/// Emits notifications as `warn` events under the `cartstore::notify` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
  fn error(&self, message: &str) {
    warn!(target: "cartstore::notify", %message, "User notification");
  }
}

/// Keeps every message, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
  messages: Mutex<Vec<String>>,
}

impl RecordingSink {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn messages(&self) -> Vec<String> {
    self.messages.lock().clone()
  }

  pub fn clear(&self) {
    self.messages.lock().clear();
  }
}

impl NotificationSink for RecordingSink {
  fn error(&self, message: &str) {
    self.messages.lock().push(message.to_string());
  }
}
