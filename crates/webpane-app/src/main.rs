mod app_state;
mod cli;

use std::path::Path;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

/// The bundled demo page, served over the custom protocol.
const HOME_URL: &str = "webpane://localhost/home/index.html";

fn main() {
    // Parse CLI arguments
    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("webpane=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "webpane=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("WebPane v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load config
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let config = webpane_config::load_or_default(args.config.as_deref().map(Path::new));

    // Must happen before any WebView exists
    let debug_port = webpane_config::apply_remote_debugging(&config);

    let home_url = args.url.unwrap_or_else(|| HOME_URL.to_string());

    // Create event loop and run
    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = app_state::WebPaneApp::new(home_url, args.user_agent, debug_port);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
