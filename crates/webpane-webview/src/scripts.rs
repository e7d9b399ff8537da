//! JS snippet builders injected into the engine page.
//!
//! All text is encoded through `serde_json` so payloads cannot escape their
//! string literals.

use crate::ipc::KIND_COOKIE_DUMP;

/// Opacity slider range, in percent.
pub const OPACITY_MIN: u8 = 40;
pub const OPACITY_MAX: u8 = 100;
pub const OPACITY_DEFAULT: u8 = 95;

/// Assign a cookie line to the current document. Blank lines produce no
/// script.
pub fn js_set_document_cookie(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(format!("document.cookie = {};", js_string(line)))
}

/// Ask the page to post its document cookies back over IPC.
pub fn js_request_cookie_dump() -> String {
    format!(
        r#"window.ipc.postMessage(JSON.stringify({{ kind: "{KIND_COOKIE_DUMP}", payload: document.cookie }}));"#
    )
}

/// Apply a content opacity, clamped to the slider range.
pub fn js_set_content_opacity(percent: u8) -> String {
    let percent = percent.clamp(OPACITY_MIN, OPACITY_MAX);
    format!(
        r#"document.documentElement.style.opacity = "{:.2}";"#,
        f64::from(percent) / 100.0
    )
}

fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cookie_line_produces_no_script() {
        assert!(js_set_document_cookie("").is_none());
        assert!(js_set_document_cookie("   ").is_none());
    }

    #[test]
    fn cookie_line_is_escaped() {
        let js = js_set_document_cookie(r#"name="quoted"; Path=/"#).unwrap();
        assert!(js.starts_with("document.cookie = \""));
        assert!(js.contains(r#"\"quoted\""#));
        assert!(js.ends_with(';'));
    }

    #[test]
    fn cookie_dump_posts_over_ipc() {
        let js = js_request_cookie_dump();
        assert!(js.contains("cookie_dump"));
        assert!(js.contains("document.cookie"));
    }

    #[test]
    fn opacity_is_clamped_to_slider_range() {
        assert_eq!(
            js_set_content_opacity(95),
            r#"document.documentElement.style.opacity = "0.95";"#
        );
        assert_eq!(
            js_set_content_opacity(10),
            r#"document.documentElement.style.opacity = "0.40";"#
        );
        assert_eq!(
            js_set_content_opacity(255),
            r#"document.documentElement.style.opacity = "1.00";"#
        );
    }
}
