//! Pane layout: chrome strip on top, engine surface below.

// =============================================================================
// CONSTANTS
// =============================================================================

/// Height of the toolbar strip.
pub(super) const CHROME_BAR_HEIGHT: f64 = 48.0;

/// Extra chrome height when the message console is expanded.
pub(super) const CONSOLE_PANEL_HEIGHT: f64 = 240.0;

// =============================================================================
// LAYOUT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PaneRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct PaneLayout {
    pub chrome: PaneRect,
    pub engine: PaneRect,
}

/// Split the window into the chrome strip and the engine surface.
pub(super) fn compute_layout(width: f64, height: f64, console_open: bool) -> PaneLayout {
    let chrome_height = if console_open {
        CHROME_BAR_HEIGHT + CONSOLE_PANEL_HEIGHT
    } else {
        CHROME_BAR_HEIGHT
    };
    let chrome_height = chrome_height.min(height);
    PaneLayout {
        chrome: PaneRect {
            x: 0.0,
            y: 0.0,
            width,
            height: chrome_height,
        },
        engine: PaneRect {
            x: 0.0,
            y: chrome_height,
            width,
            height: (height - chrome_height).max(0.0),
        },
    }
}

/// Convert a layout rect (f64 logical coords) to a wry `Rect`.
pub(super) fn pane_rect_to_wry(rect: &PaneRect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(rect.x, rect.y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(rect.width, rect.height)),
    }
}

// =============================================================================
// TESTS
// =============================================================================
