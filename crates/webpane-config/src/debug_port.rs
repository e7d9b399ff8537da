//! Remote-debugging port validation and engine application.

use crate::schema::AppConfig;

const PORT_MIN: i64 = 1;
const PORT_MAX: i64 = 65535;

/// Environment variable WebKitGTK reads to start its inspector server.
const INSPECTOR_ENV: &str = "WEBKIT_INSPECTOR_SERVER";

/// The configured debug port, if it is present and in the valid 1–65535
/// range. Out-of-range values behave like an absent key.
pub fn validated_port(config: &AppConfig) -> Option<u16> {
    match config.remote_debug_port {
        Some(port) if (PORT_MIN..=PORT_MAX).contains(&port) => Some(port as u16),
        Some(port) => {
            tracing::warn!(port, "remote debug port out of range, feature disabled");
            None
        }
        None => None,
    }
}

/// Apply the remote-debugging setting to the engine environment.
///
/// Must run before any WebView is created. Returns the port when the feature
/// is enabled so callers can also switch on devtools.
pub fn apply_remote_debugging(config: &AppConfig) -> Option<u16> {
    let port = validated_port(config)?;
    // wry reads the engine environment at WebView construction.
    std::env::set_var(INSPECTOR_ENV, format!("127.0.0.1:{port}"));
    tracing::info!(port, "remote debugging enabled");
    Some(port)
}
