pub mod client;
pub mod envelope;

use serde::Serialize;

/// The only value `send_message` returns to callers; no structured error
/// code is exposed beyond the resolved message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub success: bool,
    pub message: String,
}

impl DispatchResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}
