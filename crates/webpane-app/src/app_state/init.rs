//! Window creation and pane setup.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use webpane_bridge::Bridge;
use webpane_webview::{ContentProvider, EngineConfig, EnginePane};

use super::chrome::ChromePane;
use super::core::WebPaneApp;
use super::layout::{compute_layout, pane_rect_to_wry};

/// Relative path from the working directory to the bundled assets.
const ASSETS_DIR: &str = "assets";

impl WebPaneApp {
    /// Create the window and both panes.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title("WebPane")
            .with_transparent(true)
            .with_inner_size(winit::dpi::LogicalSize::new(1200.0, 800.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let assets_path = std::env::current_dir().unwrap_or_default().join(ASSETS_DIR);
        if !assets_path.is_dir() {
            tracing::warn!(
                path = %assets_path.display(),
                "Assets directory not found — bundled pages will not resolve"
            );
        }
        let provider = Arc::new(ContentProvider::new(&assets_path));

        let size = window.inner_size();
        let layout = compute_layout(size.width as f64, size.height as f64, self.console_open);

        let bridge = Bridge::new(env!("CARGO_PKG_VERSION"));
        let engine_config = EngineConfig {
            // Transparent surface so the window transparency toggle works
            // without rebuilding the pane.
            transparent: true,
            devtools: cfg!(debug_assertions) || self.debug_port.is_some(),
            user_agent: self.user_agent.clone(),
            ..EngineConfig::default()
        };

        match EnginePane::create(
            window.as_ref(),
            pane_rect_to_wry(&layout.engine),
            &self.home_url,
            engine_config,
            bridge,
            Some(Arc::clone(&provider)),
        ) {
            Ok(pane) => self.engine = Some(pane),
            // The shell still runs: the console reports the missing channel.
            Err(e) => tracing::error!("Failed to create engine pane: {e}"),
        }

        match ChromePane::create(window.as_ref(), pane_rect_to_wry(&layout.chrome), provider) {
            Ok(pane) => self.chrome = Some(pane),
            Err(e) => {
                tracing::error!("Failed to create chrome pane: {e}");
                return false;
            }
        }

        if let Some(entry) = self.console.set_attached(self.engine.is_some()) {
            self.mirror_console_entry(&entry);
        }

        self.window = Some(window);
        tracing::info!("Window and panes initialized");
        true
    }

    /// Sync both pane bounds to the current window size.
    pub(super) fn sync_pane_bounds(&mut self) {
        let window = match &self.window {
            Some(w) => w,
            None => return,
        };
        let size = window.inner_size();
        let layout = compute_layout(size.width as f64, size.height as f64, self.console_open);

        if let Some(engine) = &self.engine {
            if let Err(e) = engine.set_bounds(pane_rect_to_wry(&layout.engine)) {
                tracing::warn!(error = %e, "Failed to update engine bounds");
            }
        }
        if let Some(chrome) = &self.chrome {
            if let Err(e) = chrome.set_bounds(pane_rect_to_wry(&layout.chrome)) {
                tracing::warn!(error = %e, "Failed to update chrome bounds");
            }
        }
    }
}
