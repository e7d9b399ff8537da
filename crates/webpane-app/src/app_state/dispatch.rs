//! Chrome command validation and dispatch.

use webpane_common::StatusNotice;
use webpane_webview::scripts::{OPACITY_MAX, OPACITY_MIN};
use webpane_webview::IpcMessage;

use super::console::SendOutcome;
use super::core::WebPaneApp;

// =============================================================================
// COMMAND ALLOWLIST
// =============================================================================

/// Allowed command kinds from the chrome panel.
///
/// Any message with a `kind` not in this list is rejected and logged.
const ALLOWED_CHROME_KINDS: &[&str] = &[
    "chrome_ready",
    "navigate",
    "nav_back",
    "nav_forward",
    "nav_reload",
    "nav_home",
    "clear_data",
    "console_send",
    "console_toggle",
    "set_opacity",
    "set_transparent",
    "set_cookie",
    "dump_cookies",
];

/// Check whether a chrome command kind is in the allowlist.
pub(super) fn is_chrome_kind_allowed(kind: &str) -> bool {
    ALLOWED_CHROME_KINDS.contains(&kind)
}

// =============================================================================
// DISPATCH
// =============================================================================

impl WebPaneApp {
    /// Handle a single command from the chrome panel.
    pub(super) fn handle_chrome_message(&mut self, body: &str) {
        let msg = match IpcMessage::from_json(body) {
            Some(m) => m,
            None => {
                tracing::warn!(
                    body_len = body.len(),
                    "chrome message rejected: failed to parse"
                );
                return;
            }
        };

        if !is_chrome_kind_allowed(&msg.kind) {
            tracing::warn!(kind = %msg.kind, "chrome message rejected: unknown kind");
            return;
        }

        tracing::debug!(kind = %msg.kind, "chrome command");

        match msg.kind.as_str() {
            "chrome_ready" => self.push_chrome_state(),
            "navigate" => {
                let input = msg.payload_text().unwrap_or_default().to_string();
                self.navigate(&input);
            }
            "nav_home" => {
                let home = self.home_url.clone();
                self.navigate(&home);
            }
            "nav_back" => {
                if let Some(engine) = &self.engine {
                    engine.go_back();
                }
            }
            "nav_forward" => {
                if let Some(engine) = &self.engine {
                    engine.go_forward();
                }
            }
            "nav_reload" => {
                if let Some(engine) = &self.engine {
                    engine.reload();
                }
            }
            "clear_data" => self.clear_browsing_data(),
            "console_send" => {
                let text = msg.payload_text().unwrap_or_default().to_string();
                self.console_send(&text);
            }
            "console_toggle" => {
                if let Some(open) = msg.payload_bool() {
                    self.console_open = open;
                    self.sync_pane_bounds();
                }
            }
            "set_opacity" => {
                if let Some(value) = msg.payload_i64() {
                    self.apply_opacity(value.clamp(0, 255) as u8);
                }
            }
            "set_transparent" => {
                if let Some(enabled) = msg.payload_bool() {
                    self.apply_transparency(enabled);
                }
            }
            "set_cookie" => {
                let line = msg.payload_text().unwrap_or_default().to_string();
                self.set_cookie(&line);
            }
            "dump_cookies" => {
                if let Some(engine) = &self.engine {
                    engine.dump_document_cookies();
                }
            }
            _ => {
                // Shouldn't happen — allowlist checked above
                tracing::warn!(kind = %msg.kind, "unhandled chrome command");
            }
        }
    }

    /// Empty or malformed input is silently ignored, matching the pane.
    fn navigate(&mut self, input: &str) {
        let loaded = match &mut self.engine {
            Some(engine) => engine.load(input),
            None => {
                self.update_status(StatusNotice::error("Engine pane not available"));
                return;
            }
        };
        if loaded {
            let url = self
                .engine
                .as_ref()
                .map(|e| e.current_url().to_string())
                .unwrap_or_default();
            self.update_status(StatusNotice::info(format!("Loading {url}")));
            self.chrome_dispatch("address", &serde_json::json!(url));
        }
    }

    fn console_send(&mut self, text: &str) {
        match self.console.send(text) {
            SendOutcome::Forward(payload) => {
                if let Some(engine) = &mut self.engine {
                    engine.broadcast_to_page(&payload);
                }
                self.update_status(StatusNotice::info(format!("Sent to page: {payload}")));
            }
            SendOutcome::Blank => {}
            SendOutcome::NotAttached(entry) => self.mirror_console_entry(&entry),
        }
    }

    fn clear_browsing_data(&mut self) {
        let Some(engine) = &self.engine else { return };
        match engine.clear_browsing_data() {
            Ok(()) => self.update_status(StatusNotice::info("Cache and cookies cleared")),
            Err(e) => {
                tracing::warn!(error = %e, "clear browsing data failed");
                self.update_status(StatusNotice::error("Failed to clear browsing data"));
            }
        }
    }

    fn apply_opacity(&mut self, percent: u8) {
        self.opacity_percent = percent.clamp(OPACITY_MIN, OPACITY_MAX);
        if let Some(engine) = &self.engine {
            engine.set_content_opacity(self.opacity_percent);
        }
    }

    fn apply_transparency(&mut self, enabled: bool) {
        self.transparent = enabled;
        if let Some(window) = &self.window {
            window.set_transparent(enabled);
        }
        if enabled {
            if let Some(engine) = &self.engine {
                engine.set_content_opacity(self.opacity_percent);
            }
        } else {
            // Leaving transparent mode restores full opacity.
            self.opacity_percent = OPACITY_MAX;
            if let Some(engine) = &self.engine {
                engine.set_content_opacity(OPACITY_MAX);
            }
            self.chrome_dispatch("opacity", &serde_json::json!(OPACITY_MAX));
        }
    }

    fn set_cookie(&mut self, line: &str) {
        let Some(engine) = &self.engine else { return };
        if engine.set_cookie_for_current_page(line) {
            self.update_status(StatusNotice::info("Cookie set on current document"));
        }
    }

    /// Initial state push when the chrome panel reports ready.
    fn push_chrome_state(&mut self) {
        let url = self
            .engine
            .as_ref()
            .map(|e| e.current_url().to_string())
            .unwrap_or_default();
        self.chrome_dispatch("address", &serde_json::json!(url));
        self.chrome_dispatch("opacity", &serde_json::json!(self.opacity_percent));
        self.chrome_dispatch("transparent", &serde_json::json!(self.transparent));
        self.chrome_dispatch("console_open", &serde_json::json!(self.console_open));

        // Replay the console log so a late chrome load misses nothing.
        let entries: Vec<serde_json::Value> = self
            .console
            .entries()
            .map(|e| {
                serde_json::json!({
                    "time": e.timestamp.clone(),
                    "direction": e.direction.label(),
                    "text": e.text.clone(),
                })
            })
            .collect();
        self.chrome_dispatch("console_replay", &serde_json::json!(entries));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_kind_allowed_valid() {
        assert!(is_chrome_kind_allowed("navigate"));
        assert!(is_chrome_kind_allowed("console_send"));
        assert!(is_chrome_kind_allowed("set_opacity"));
        assert!(is_chrome_kind_allowed("chrome_ready"));
    }

    #[test]
    fn chrome_kind_rejected_unknown() {
        assert!(!is_chrome_kind_allowed("eval"));
        assert!(!is_chrome_kind_allowed("exec"));
        assert!(!is_chrome_kind_allowed(""));
        assert!(!is_chrome_kind_allowed("navigate_extra"));
        assert!(!is_chrome_kind_allowed("NAVIGATE")); // case-sensitive
    }

    #[test]
    fn chrome_kind_rejected_injection_attempts() {
        assert!(!is_chrome_kind_allowed("navigate\0"));
        assert!(!is_chrome_kind_allowed("navigate; rm -rf /"));
        assert!(!is_chrome_kind_allowed("<script>alert(1)</script>"));
    }
}
