//! IPC protocol between the host and embedded pages.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: the page calls a method on its injected channel object,
//!   which posts `{"kind": ..., "payload": ...}` through `window.ipc` and
//!   triggers the `ipc_handler` registered on the WebView.
//! - **Rust -> JS**: the host calls `webview.evaluate_script(...)` with one of
//!   the dispatch snippets below.
//!
//! The engine page gets `window.bridge`, a single named object with
//! `sendToHost(text)`, `getVersion()`, `notifyReady()`, and `onMessage(cb)`.
//! Chrome panels get the kind-based `window.panel` object instead.

use serde::{Deserialize, Serialize};

/// Page→host text message over the engine bridge.
pub const KIND_HOST_MESSAGE: &str = "host_message";
/// The page's script environment finished initializing.
pub const KIND_PAGE_READY: &str = "page_ready";
/// Response to a document-cookie dump request.
pub const KIND_COOKIE_DUMP: &str = "cookie_dump";

/// A typed IPC message posted by a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type / command name.
    pub kind: String,
    /// The message payload (arbitrary JSON).
    pub payload: IpcPayload,
}

/// Payload of an IPC message — either a simple string or structured JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    Json(serde_json::Value),
    None,
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// The payload as text, when it is textual.
    pub fn payload_text(&self) -> Option<&str> {
        match &self.payload {
            IpcPayload::Text(s) => Some(s),
            IpcPayload::Json(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// The payload as a boolean, when it is one.
    pub fn payload_bool(&self) -> Option<bool> {
        match &self.payload {
            IpcPayload::Json(serde_json::Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// The payload as an integer, when it is numeric.
    pub fn payload_i64(&self) -> Option<i64> {
        match &self.payload {
            IpcPayload::Json(serde_json::Value::Number(n)) => n.as_i64(),
            _ => None,
        }
    }
}

/// Build the initialization script that installs `window.bridge` into every
/// document loaded by the engine pane.
pub fn channel_init_script(version: &str) -> String {
    let version_literal = js_string(version);
    format!(
        r#"(function() {{
    if (window.bridge) {{ return; }}
    var VERSION = {version_literal};
    window.bridge = {{
        sendToHost: function(text) {{
            window.ipc.postMessage(JSON.stringify({{
                kind: "{KIND_HOST_MESSAGE}",
                payload: String(text)
            }}));
        }},
        getVersion: function() {{
            return VERSION;
        }},
        notifyReady: function() {{
            window.ipc.postMessage(JSON.stringify({{
                kind: "{KIND_PAGE_READY}",
                payload: null
            }}));
        }},
        _handlers: [],
        onMessage: function(callback) {{
            this._handlers.push(callback);
        }},
        _deliver: function(text) {{
            for (var i = 0; i < this._handlers.length; i++) {{
                this._handlers[i](text);
            }}
        }}
    }};
}})();
"#
    )
}

/// Snippet that delivers a host→page message to the engine page's
/// registered `onMessage` callbacks.
pub fn js_deliver_message(payload: &str) -> String {
    format!(
        "window.bridge && window.bridge._deliver({});",
        js_string(payload)
    )
}

/// Snippet that dispatches a kind-tagged message to a chrome panel's
/// `window.panel` handler table.
pub fn js_panel_dispatch(kind: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.panel && window.panel._dispatch({}, {});",
        js_string(kind),
        payload_json,
    )
}

/// Encode text as a JS string literal.
fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_script_exposes_channel_methods() {
        let script = channel_init_script("0.1.0");
        assert!(script.contains("window.bridge"));
        assert!(script.contains("sendToHost"));
        assert!(script.contains("getVersion"));
        assert!(script.contains("notifyReady"));
        assert!(script.contains("onMessage"));
        assert!(script.contains("\"0.1.0\""));
        assert!(script.contains(KIND_HOST_MESSAGE));
        assert!(script.contains(KIND_PAGE_READY));
    }

    #[test]
    fn deliver_snippet_escapes_payload() {
        let js = js_deliver_message(r#"say "hi" there"#);
        assert!(js.starts_with("window.bridge && window.bridge._deliver("));
        // Inner quotes must be escaped so they cannot terminate the literal.
        assert!(js.contains(r#"say \"hi\" there"#));
    }

    #[test]
    fn panel_dispatch_snippet_encodes_kind_and_payload() {
        let js = js_panel_dispatch("status", &serde_json::json!({"text": "ok"}));
        assert!(js.contains("window.panel._dispatch(\"status\""));
        assert!(js.contains(r#"{"text":"ok"}"#));
    }

    #[test]
    fn parses_host_message() {
        let msg = IpcMessage::from_json(r#"{"kind":"host_message","payload":"hello"}"#).unwrap();
        assert_eq!(msg.kind, KIND_HOST_MESSAGE);
        assert_eq!(msg.payload_text(), Some("hello"));
    }

    #[test]
    fn parses_null_payload() {
        let msg = IpcMessage::from_json(r#"{"kind":"page_ready","payload":null}"#).unwrap();
        assert_eq!(msg.kind, KIND_PAGE_READY);
        assert!(msg.payload_text().is_none());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(IpcMessage::from_json("not json").is_none());
        assert!(IpcMessage::from_json("").is_none());
    }

    #[test]
    fn typed_payload_accessors() {
        let msg = IpcMessage::from_json(r#"{"kind":"set_opacity","payload":80}"#).unwrap();
        assert_eq!(msg.payload_i64(), Some(80));
        assert!(msg.payload_bool().is_none());

        let msg = IpcMessage::from_json(r#"{"kind":"set_transparent","payload":true}"#).unwrap();
        assert_eq!(msg.payload_bool(), Some(true));
        assert!(msg.payload_text().is_none());
    }
}
