//! The engine pane: one embedded WebView plus its message bridge and
//! pending-message delivery gate.
//!
//! Engine callbacks (page load, title, IPC, navigation) push raw events into
//! a shared sink; [`EnginePane::pump`] drains the sink on the UI thread,
//! advances the delivery gate, performs any due flushes, and returns
//! high-level [`PaneEvent`]s for the application shell.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, error, warn};
use wry::raw_window_handle;
use wry::WebViewBuilder;

use webpane_bridge::{Bridge, BridgeEvent, DeliveryGate, NavSeq};

use crate::content::ContentProvider;
use crate::events::{PageLoadState, PaneEvent, RawPaneEvent};
use crate::ipc::{self, IpcMessage};
use crate::policy;
use crate::scripts;

/// Custom protocol scheme for bundled assets.
pub const CONTENT_SCHEME: &str = "webpane";

type RawEventSink = Arc<Mutex<Vec<RawPaneEvent>>>;

/// Configuration for creating the engine pane.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether the WebView background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Custom user agent string. Fixed at construction; the engine cannot
    /// change it afterwards.
    pub user_agent: Option<String>,
    /// Whether to enable clipboard access.
    pub clipboard: bool,
    /// Whether to enable autoplay for media.
    pub autoplay: bool,
    /// Where navigations refused by policy land.
    pub redirect_target: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: None,
            clipboard: true,
            autoplay: true,
            redirect_target: "https://example.com".to_string(),
        }
    }
}

/// The embedded browsing surface, owning its bridge and delivery gate.
pub struct EnginePane {
    webview: wry::WebView,
    bridge: Bridge,
    gate: DeliveryGate,
    raw_events: RawEventSink,
    /// Mirrors the gate's navigation sequence for the engine callbacks.
    nav_seq: Arc<AtomicU64>,
    /// Set by `load()` so the matching load-started callback does not begin
    /// a second navigation.
    expecting_start: bool,
    current_url: String,
    redirect_target: String,
}

impl EnginePane {
    /// Create the pane as a child of the given window.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        url: &str,
        config: EngineConfig,
        bridge: Bridge,
        content: Option<Arc<ContentProvider>>,
    ) -> Result<Self, wry::Error> {
        let raw_events: RawEventSink = Arc::new(Mutex::new(Vec::new()));
        let nav_seq = Arc::new(AtomicU64::new(0));

        let init_script = ipc::channel_init_script(bridge.version());

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_autoplay(config.autoplay)
            .with_focused(false)
            .with_initialization_script(init_script.as_str());

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = attach_ipc_handler(builder, Arc::clone(&raw_events), Arc::clone(&nav_seq));
        builder = attach_page_load_handler(builder, Arc::clone(&raw_events), Arc::clone(&nav_seq));
        builder = attach_title_handler(builder, Arc::clone(&raw_events));
        builder = attach_navigation_handler(builder, Arc::clone(&raw_events));

        if let Some(provider) = content {
            builder = attach_content_protocol(builder, provider);
        }

        builder = builder.with_url(url);

        let webview = builder.build_as_child(window)?;
        debug!(url, "engine pane created");

        Ok(Self {
            webview,
            bridge,
            gate: DeliveryGate::new(),
            raw_events,
            nav_seq,
            expecting_start: false,
            current_url: url.to_string(),
            redirect_target: config.redirect_target,
        })
    }

    /// The URL the pane last navigated to (best-effort tracking).
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Navigate to user-supplied input.
    ///
    /// Invalid input (empty, embedded whitespace) is silently ignored and
    /// `false` returned. Valid input resets readiness and issues the
    /// navigation.
    pub fn load(&mut self, input: &str) -> bool {
        let url = match policy::normalize_user_input(input) {
            Some(u) => u,
            None => {
                debug!(input, "ignoring invalid navigation target");
                return false;
            }
        };
        self.issue_navigation(&url)
    }

    pub fn go_back(&self) {
        self.run_script("history.back();");
    }

    pub fn go_forward(&self) {
        self.run_script("history.forward();");
    }

    pub fn reload(&self) {
        self.run_script("location.reload();");
    }

    /// Send a host→page message through the bridge.
    ///
    /// Blank payloads are ignored. Delivery is immediate when the page is
    /// ready, otherwise the message queues until the next ready transition.
    pub fn broadcast_to_page(&mut self, payload: &str) {
        if !self.bridge.dispatch_to_page(payload) {
            return;
        }
        match self.gate.send(payload) {
            Some(now) => self.deliver(&now),
            None => debug!(
                pending = self.gate.pending_len(),
                "message queued until page is ready"
            ),
        }
    }

    /// Clear the engine profile's cache, cookies, and storage.
    pub fn clear_browsing_data(&self) -> Result<(), wry::Error> {
        self.webview.clear_all_browsing_data()
    }

    /// Assign a cookie line on the current document. Blank lines are ignored
    /// and `false` returned.
    pub fn set_cookie_for_current_page(&self, line: &str) -> bool {
        match scripts::js_set_document_cookie(line) {
            Some(js) => {
                self.run_script(&js);
                true
            }
            None => false,
        }
    }

    /// Ask the page for its document cookies; the result arrives later as
    /// [`PaneEvent::CookiesDumped`].
    pub fn dump_document_cookies(&self) {
        self.run_script(&scripts::js_request_cookie_dump());
    }

    /// Apply a content opacity (percent, clamped to the slider range).
    pub fn set_content_opacity(&self, percent: u8) {
        self.run_script(&scripts::js_set_content_opacity(percent));
    }

    /// Set the pane bounds within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    /// Drain engine callbacks, advance the delivery gate, perform due
    /// flushes, and return the resulting high-level events in order.
    pub fn pump(&mut self) -> Vec<PaneEvent> {
        let raw: Vec<RawPaneEvent> = match self.raw_events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        };

        let mut out = Vec::new();
        for event in raw {
            match event {
                RawPaneEvent::PageLoad {
                    state: PageLoadState::Started,
                    url,
                    ..
                } => {
                    if self.expecting_start {
                        self.expecting_start = false;
                    } else {
                        // Engine-initiated navigation: link click, redirect,
                        // or reload. Readiness resets here too.
                        let seq = self.gate.begin_navigation();
                        self.nav_seq.store(seq.0, Ordering::Relaxed);
                    }
                    self.current_url = url.clone();
                    out.push(PaneEvent::UrlChanged(url));
                }
                RawPaneEvent::PageLoad {
                    state: PageLoadState::Finished,
                    url,
                    seq,
                } => {
                    // wry reports no failure state: the engine renders its
                    // own error page and completes the load.
                    let flushed = self.gate.load_finished(NavSeq(seq), true);
                    self.deliver_all(flushed);
                    out.push(PaneEvent::LoadFinished { ok: true, url });
                }
                RawPaneEvent::TitleChanged { title } => {
                    out.push(PaneEvent::TitleChanged(title));
                }
                RawPaneEvent::Ipc { body, seq } => {
                    self.handle_ipc(&body, seq, &mut out);
                }
                RawPaneEvent::NavigationBlocked { url } => {
                    let target = self.redirect_target.clone();
                    // A disallowed redirect target would loop forever.
                    if policy::is_navigation_allowed(&target) {
                        self.issue_navigation(&target);
                    } else {
                        warn!(target = %target, "redirect target refused by policy, staying put");
                    }
                    out.push(PaneEvent::NavigationBlocked(url));
                }
            }
        }

        for event in self.bridge.drain_events() {
            match event {
                BridgeEvent::HostMessage(text) => out.push(PaneEvent::MessageToPage(text)),
                BridgeEvent::PageMessage(text) => out.push(PaneEvent::MessageFromPage(text)),
                // The ready handshake is consumed by the gate; nothing for
                // the shell to do.
                BridgeEvent::PageReady => {}
            }
        }

        out
    }

    fn issue_navigation(&mut self, url: &str) -> bool {
        let seq = self.gate.begin_navigation();
        self.nav_seq.store(seq.0, Ordering::Relaxed);
        self.expecting_start = true;
        if let Err(e) = self.webview.load_url(url) {
            error!(url, error = %e, "failed to start navigation");
            self.expecting_start = false;
            return false;
        }
        self.current_url = url.to_string();
        true
    }

    fn handle_ipc(&mut self, body: &str, seq: u64, out: &mut Vec<PaneEvent>) {
        let msg = match IpcMessage::from_json(body) {
            Some(m) => m,
            None => {
                warn!(body_len = body.len(), "IPC message rejected: failed to parse");
                return;
            }
        };

        match msg.kind.as_str() {
            ipc::KIND_HOST_MESSAGE => match msg.payload_text() {
                Some(text) => self.bridge.receive_from_page(text),
                None => warn!("bridge message without text payload"),
            },
            ipc::KIND_PAGE_READY => {
                self.bridge.notify_page_ready();
                let flushed = self.gate.page_ready(NavSeq(seq));
                self.deliver_all(flushed);
            }
            ipc::KIND_COOKIE_DUMP => {
                let cookies = msg.payload_text().unwrap_or_default().to_string();
                out.push(PaneEvent::CookiesDumped(cookies));
            }
            other => warn!(kind = %other, "unknown IPC kind from page"),
        }
    }

    fn deliver_all(&mut self, payloads: Vec<String>) {
        for payload in payloads {
            self.deliver(&payload);
        }
    }

    fn deliver(&self, payload: &str) {
        self.run_script(&ipc::js_deliver_message(payload));
    }

    fn run_script(&self, js: &str) {
        if let Err(e) = self.webview.evaluate_script(js) {
            warn!(error = %e, "script evaluation failed");
        }
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

fn attach_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: RawEventSink,
    nav_seq: Arc<AtomicU64>,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();

        // Validate that the IPC body is valid JSON before forwarding
        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
            return;
        }

        let seq = nav_seq.load(Ordering::Relaxed);
        if let Ok(mut evts) = events.lock() {
            evts.push(RawPaneEvent::Ipc { body, seq });
        }
    })
}

fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: RawEventSink,
    nav_seq: Arc<AtomicU64>,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?state, url = %url, "page load");
        let seq = nav_seq.load(Ordering::Relaxed);
        if let Ok(mut evts) = events.lock() {
            evts.push(RawPaneEvent::PageLoad { state, url, seq });
        }
    })
}

fn attach_title_handler<'a>(builder: WebViewBuilder<'a>, events: RawEventSink) -> WebViewBuilder<'a> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(title = %title, "title changed");
        if let Ok(mut evts) = events.lock() {
            evts.push(RawPaneEvent::TitleChanged { title });
        }
    })
}

fn attach_navigation_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: RawEventSink,
) -> WebViewBuilder<'a> {
    builder.with_navigation_handler(move |url| {
        if policy::is_navigation_allowed(&url) {
            return true;
        }
        warn!(url = %url, "navigation refused by policy");
        if let Ok(mut evts) = events.lock() {
            evts.push(RawPaneEvent::NavigationBlocked { url });
        }
        false
    })
}

/// Register the `webpane://` custom protocol on a builder. Shared with the
/// chrome WebView, which serves its panel from the same provider.
pub fn attach_content_protocol<'a>(
    builder: WebViewBuilder<'a>,
    provider: Arc<ContentProvider>,
) -> WebViewBuilder<'a> {
    builder.with_custom_protocol(CONTENT_SCHEME.to_string(), move |_wv_id, request| {
        let uri = request.uri().to_string();
        let path = uri
            .strip_prefix("webpane://localhost/")
            .or_else(|| uri.strip_prefix("webpane://localhost"))
            .or_else(|| uri.strip_prefix("webpane:///"))
            .or_else(|| uri.strip_prefix("webpane://"))
            .unwrap_or("");

        match provider.resolve(path) {
            Some((mime, data)) => wry::http::Response::builder()
                .status(200)
                .header("Content-Type", mime.as_ref())
                .header("Access-Control-Allow-Origin", "webpane://localhost")
                .body(std::borrow::Cow::from(data.into_owned()))
                .unwrap(),
            None => {
                warn!(path = %path, "custom protocol: asset not found");
                wry::http::Response::builder()
                    .status(404)
                    .body(std::borrow::Cow::from(b"Not Found".to_vec()))
                    .unwrap()
            }
        }
    })
}
