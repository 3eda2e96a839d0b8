pub mod catalog;

use thiserror::Error;

/// Failure taxonomy of the gateway client.
///
/// The `Display` text of every variant is the exact message surfaced to
/// callers in a [`DispatchResult`](crate::dispatch::DispatchResult); details
/// (status codes, response bodies, transport errors) go to the error log at
/// the point of failure instead of into the variant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// No valid token could be obtained; the message was never sent.
    #[error("Authentication token unavailable.")]
    TokenUnavailable,

    /// Provider response lacks the expected fields (token pair or ack path).
    #[error("Invalid API response format.")]
    MalformedResponse,

    /// The acknowledgment explicitly reported a numeric error code.
    #[error("{}", catalog::message_for(*.code))]
    Provider { code: i64 },

    /// HTTP 401; a token-store refresh was triggered as a side effect but the
    /// in-flight call still fails.
    #[error("API request failed. Check logs for details.")]
    Unauthorized,

    /// Non-2xx response or pure transport failure (connect, timeout, decode).
    #[error("API request failed. Check logs for details.")]
    RequestFailed,

    /// Token management called with an action outside enable/disable/delete.
    #[error("Invalid token action.")]
    InvalidAction,
}
