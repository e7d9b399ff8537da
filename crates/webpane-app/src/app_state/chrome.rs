//! The chrome pane: toolbar + message console rendered as HTML.
//!
//! A second child WebView loads the bundled chrome panel over `webpane://`.
//! Its IPC messages are drained by the app and dispatched against the
//! command allowlist; host→chrome updates go through the `window.panel`
//! handler table.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::WebViewBuilder;

use webpane_webview::{attach_content_protocol, ipc, ContentProvider};

/// The bundled chrome panel document.
const CHROME_URL: &str = "webpane://localhost/chrome/index.html";

pub(super) struct ChromePane {
    webview: wry::WebView,
    /// Raw IPC bodies from the chrome panel, drained each poll.
    events: Arc<Mutex<Vec<String>>>,
}

impl ChromePane {
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        provider: Arc<ContentProvider>,
    ) -> Result<Self, wry::Error> {
        let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);

        let builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(true)
            .with_devtools(cfg!(debug_assertions))
            .with_focused(false)
            .with_ipc_handler(move |request| {
                let body = request.body().to_string();
                if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                    warn!(body_len = body.len(), "chrome IPC rejected: invalid JSON");
                    return;
                }
                if let Ok(mut evts) = sink.lock() {
                    evts.push(body);
                }
            });

        let builder = attach_content_protocol(builder, provider);
        let webview = builder.with_url(CHROME_URL).build_as_child(window)?;

        debug!(url = CHROME_URL, "chrome pane created");
        Ok(Self { webview, events })
    }

    /// Drain all pending IPC bodies from the chrome panel.
    pub fn drain(&self) -> Vec<String> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }

    /// Dispatch a kind-tagged update to the chrome panel.
    pub fn dispatch(&self, kind: &str, payload: &serde_json::Value) {
        let js = ipc::js_panel_dispatch(kind, payload);
        if let Err(e) = self.webview.evaluate_script(&js) {
            warn!(kind, error = %e, "chrome dispatch failed");
        }
    }

    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }
}
