//! Newline-delimited JSON framing for the worker channel.

use crate::kernel::services::ports::search::{InboundMessage, Result, SearchEvent};

pub fn decode_inbound(line: &str) -> Result<InboundMessage> {
    Ok(serde_json::from_str(line.trim())?)
}

pub fn encode_event(event: &SearchEvent) -> String {
    serde_json::to_string(event).unwrap_or_else(|e| {
        tracing::error!(error = %e, "serialize search event failed");
        r#"{"type":"error","message":"failed to encode event"}"#.to_string()
    })
}
