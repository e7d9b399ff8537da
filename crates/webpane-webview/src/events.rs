//! Engine pane event types.

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Raw engine callbacks, pushed from the wry handlers and drained by
/// [`crate::pane::EnginePane::pump`]. Load and IPC callbacks carry the
/// navigation sequence observed at callback time so reports from a
/// superseded navigation can be discarded.
#[derive(Debug, Clone)]
pub(crate) enum RawPaneEvent {
    PageLoad {
        state: PageLoadState,
        url: String,
        seq: u64,
    },
    TitleChanged {
        title: String,
    },
    Ipc {
        body: String,
        seq: u64,
    },
    NavigationBlocked {
        url: String,
    },
}

/// High-level events produced by one `pump()` of the engine pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneEvent {
    /// The pane navigated; the address bar should follow.
    UrlChanged(String),
    /// A navigation completed.
    LoadFinished { ok: bool, url: String },
    /// The document title changed.
    TitleChanged(String),
    /// A message arrived from the page over the bridge.
    MessageFromPage(String),
    /// A host→page message was dispatched (for the console log).
    MessageToPage(String),
    /// Result of a document-cookie dump request.
    CookiesDumped(String),
    /// A navigation was refused by policy; the redirect target loads instead.
    NavigationBlocked(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_load_state_from_wry() {
        assert_eq!(
            PageLoadState::from(wry::PageLoadEvent::Started),
            PageLoadState::Started
        );
        assert_eq!(
            PageLoadState::from(wry::PageLoadEvent::Finished),
            PageLoadState::Finished
        );
    }
}
