//! Newline-delimited JSON framing.
//!
//! Wire format, both directions:
//! ```text
//! ┌──────────────────────────┬────┐
//! │ JSON value (one line)    │ \n │
//! └──────────────────────────┴────┘
//! ```
//!
//! Requests are JSON strings (`"cabins on"`) or string sequences;
//! responses are `null` or the `get_state` object. Line splitting is the
//! reader's job; this module maps lines to values and replies to lines.

use serde_json::Value;

use crate::app::state::StateSnapshot;

/// Decode one request line into a JSON value.
pub fn decode(line: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(line.trim())
}

/// Encode a response line: the snapshot object, or `null` for commands
/// with no return value. Always newline-terminated.
pub fn encode(reply: Option<&StateSnapshot>) -> String {
    let mut line = serde_json::to_string(&reply).unwrap_or_else(|_| String::from("null"));
    line.push('\n');
    line
}
