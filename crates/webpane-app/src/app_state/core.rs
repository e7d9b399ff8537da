//! WebPaneApp struct definition and constructor.

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::window::Window;

use webpane_common::StatusLine;
use webpane_webview::EnginePane;

use super::chrome::ChromePane;
use super::console::MessageConsole;

/// How often pane event sinks are drained.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Top-level application state.
pub struct WebPaneApp {
    pub(super) home_url: String,
    /// User agent override for the engine pane (fixed at creation).
    pub(super) user_agent: Option<String>,
    /// Remote-debug port when the config enabled it.
    pub(super) debug_port: Option<u16>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,

    // Panes
    pub(super) engine: Option<EnginePane>,
    pub(super) chrome: Option<ChromePane>,

    // Message console state (the chrome renders it; this owns the log)
    pub(super) console: MessageConsole,

    // Status line
    pub(super) status: StatusLine,

    // Window chrome state
    pub(super) opacity_percent: u8,
    pub(super) transparent: bool,
    pub(super) console_open: bool,

    pub(super) last_poll: Instant,
}

impl WebPaneApp {
    pub fn new(home_url: String, user_agent: Option<String>, debug_port: Option<u16>) -> Self {
        Self {
            home_url,
            user_agent,
            debug_port,
            window: None,
            engine: None,
            chrome: None,
            console: MessageConsole::new(),
            status: StatusLine::default(),
            opacity_percent: webpane_webview::scripts::OPACITY_DEFAULT,
            transparent: false,
            console_open: false,
            last_poll: Instant::now(),
        }
    }
}
