//! Positional argument binding.

use serde_json::Value;

/// Binds request parameters into a fixed number of positional slots.
///
/// The result always has exactly `arity` entries: extra parameters are
/// dropped, missing ones become `Value::Null`. This explicit adapter is
/// the whole calling convention; handlers never see the raw parameter
/// sequence length.
pub fn bind_args(arity: usize, params: &[Value]) -> Vec<Value> {
    (0..arity)
        .map(|i| params.get(i).cloned().unwrap_or(Value::Null))
        .collect()
}
