//! The uniform response envelope for RPC calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-facing text for failures whose detail must stay server-side.
pub const GENERIC_FAILURE: &str = "operation failed";

/// Response envelope: exactly one of `data`/`error` is populated.
///
/// The `status` field carries the HTTP-style code out-of-band; it is never
/// serialized into the body (the transport decides whether to mirror it
/// onto the HTTP response).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Whether the call succeeded.
    pub success: bool,
    /// Handler return value (success only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Caller-facing failure message (failure only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// HTTP-style status code.
    #[serde(skip)]
    pub status: u16,
}

impl RpcResponse {
    /// Creates a success envelope (status 200).
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            status: 200,
        }
    }

    /// Creates a failure envelope with the given status and message.
    pub fn fail(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_sets_data_only() {
        let resp = RpcResponse::ok(json!({"n": 3}));
        assert!(resp.success);
        assert_eq!(resp.data, Some(json!({"n": 3})));
        assert!(resp.error.is_none());
        assert_eq!(resp.status, 200);
    }

    #[test]
    fn fail_sets_error_only() {
        let resp = RpcResponse::fail(403, "authorization failed");
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert_eq!(resp.error.as_deref(), Some("authorization failed"));
        assert_eq!(resp.status, 403);
    }

    #[test]
    fn status_is_not_serialized() {
        let json = serde_json::to_string(&RpcResponse::fail(500, GENERIC_FAILURE)).expect("ser");
        assert!(!json.contains("status"));
        assert!(!json.contains("500"));
    }
}
