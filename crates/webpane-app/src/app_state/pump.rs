//! Pane polling and engine event handling.

use webpane_common::{StatusLevel, StatusNotice};
use webpane_webview::PaneEvent;

use super::console::ConsoleEntry;
use super::core::WebPaneApp;

impl WebPaneApp {
    /// Drain chrome commands, then engine events.
    pub(super) fn poll_panes(&mut self) {
        let bodies = match &self.chrome {
            Some(chrome) => chrome.drain(),
            None => Vec::new(),
        };
        for body in bodies {
            self.handle_chrome_message(&body);
        }

        let events = match &mut self.engine {
            Some(engine) => engine.pump(),
            None => Vec::new(),
        };
        for event in events {
            self.handle_pane_event(event);
        }
    }

    fn handle_pane_event(&mut self, event: PaneEvent) {
        match event {
            PaneEvent::UrlChanged(url) => {
                self.chrome_dispatch("address", &serde_json::json!(url));
            }

            PaneEvent::LoadFinished { ok: true, url } => {
                tracing::debug!(url = %url, "page load finished");
                self.update_status(StatusNotice::info("Page loaded"));

                // Greet the page; queued by the gate until it signals ready.
                let stamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
                let info = format!("host finished loading at {stamp}");
                if let Some(engine) = &mut self.engine {
                    engine.broadcast_to_page(&info);
                }
            }

            PaneEvent::LoadFinished { ok: false, url } => {
                tracing::warn!(url = %url, "page load failed");
                self.update_status(StatusNotice::error("Page failed to load"));
            }

            PaneEvent::TitleChanged(title) => {
                if let Some(window) = &self.window {
                    window.set_title(&title);
                }
            }

            PaneEvent::MessageFromPage(text) => {
                self.update_status(StatusNotice::info(format!("Message from page: {text}")));
                let entry = self.console.push_incoming(&text);
                self.mirror_console_entry(&entry);
            }

            PaneEvent::MessageToPage(text) => {
                let entry = self.console.push_outgoing(&text);
                self.mirror_console_entry(&entry);
            }

            PaneEvent::CookiesDumped(cookies) => {
                let text = if cookies.is_empty() {
                    "document cookies: (none)".to_string()
                } else {
                    format!("document cookies: {cookies}")
                };
                let entry = self.console.push_system(&text);
                self.mirror_console_entry(&entry);
            }

            PaneEvent::NavigationBlocked(url) => {
                self.update_status(StatusNotice::error(format!("Navigation refused: {url}")));
            }
        }
    }

    /// Push a status notice to the chrome status line and the local queue.
    pub(super) fn update_status(&mut self, notice: StatusNotice) {
        let level = match notice.level {
            StatusLevel::Info => "info",
            StatusLevel::Error => "error",
        };
        self.chrome_dispatch(
            "status",
            &serde_json::json!({
                "text": notice.text.clone(),
                "level": level,
                "ttlMs": notice.ttl_ms(),
            }),
        );
        self.status.push(notice);
    }

    /// Mirror a console log entry into the chrome panel.
    pub(super) fn mirror_console_entry(&self, entry: &ConsoleEntry) {
        self.chrome_dispatch(
            "console_append",
            &serde_json::json!({
                "time": entry.timestamp.clone(),
                "direction": entry.direction.label(),
                "text": entry.text.clone(),
            }),
        );
    }

    pub(super) fn chrome_dispatch(&self, kind: &str, payload: &serde_json::Value) {
        if let Some(chrome) = &self.chrome {
            chrome.dispatch(kind, payload);
        }
    }
}
