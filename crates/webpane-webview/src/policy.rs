//! Navigation policy: which URLs the engine pane may visit, and how raw
//! address-bar input becomes a loadable URL.

// =============================================================================
// SCHEME ALLOWLIST
// =============================================================================

/// Allowed URL prefixes for engine-pane navigation.
///
/// The pane is a general browsing surface, so the web schemes are open;
/// everything else (file:, javascript:, data:, ftp:, ...) is refused and the
/// pane falls back to its redirect target.
pub const ALLOWED_NAV_PREFIXES: &[&str] = &[
    "https://",
    "http://",
    // Custom protocol for bundled demo assets
    "webpane://",
    "about:",
];

/// Check whether a URL is allowed by the navigation policy.
pub fn is_navigation_allowed(url: &str) -> bool {
    ALLOWED_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

// =============================================================================
// ADDRESS-BAR INPUT
// =============================================================================

/// Turn raw user input into a loadable URL.
///
/// Empty input and input containing whitespace are invalid (`None`). Input
/// that already carries a scheme is used as-is; anything else is treated as a
/// hostname and prefixed with `https://`.
pub fn normalize_user_input(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return None;
    }
    if trimmed.contains("://") || trimmed.starts_with("about:") {
        return Some(trimmed.to_string());
    }
    Some(format!("https://{trimmed}"))
}

// =============================================================================
// TESTS
// =============================================================================
