//! The messaging endpoint shared between the host and the embedded page.
//!
//! `Bridge` does not touch the engine: actual page delivery is the owner's
//! job. It validates payloads, invokes the injected hooks, and records events
//! for observers to drain, matching the callback-sink pattern used elsewhere
//! in the workspace.

use std::collections::VecDeque;

/// Version string reported to the page when none was supplied.
const FALLBACK_VERSION: &str = "dev-build";

/// Traffic observed on a bridge, drained by the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// A host→page message was dispatched (possibly still queued for delivery).
    HostMessage(String),
    /// A page→host message was received.
    PageMessage(String),
    /// The page reported its script environment is initialized.
    PageReady,
}

/// Customization hooks injected at construction.
///
/// A strategy object instead of a subclass hierarchy: each direction gets an
/// optional closure invoked after the event is recorded.
#[derive(Default)]
pub struct BridgeHooks {
    pub on_host_message: Option<Box<dyn FnMut(&str)>>,
    pub on_page_message: Option<Box<dyn FnMut(&str)>>,
}

impl std::fmt::Debug for BridgeHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeHooks")
            .field("on_host_message", &self.on_host_message.is_some())
            .field("on_page_message", &self.on_page_message.is_some())
            .finish()
    }
}

/// Bidirectional named-channel endpoint between host and page.
#[derive(Debug)]
pub struct Bridge {
    version: String,
    hooks: BridgeHooks,
    events: VecDeque<BridgeEvent>,
}

impl Bridge {
    pub fn new(version: impl Into<String>) -> Self {
        Self::with_hooks(version, BridgeHooks::default())
    }

    pub fn with_hooks(version: impl Into<String>, hooks: BridgeHooks) -> Self {
        Self {
            version: version.into(),
            hooks,
            events: VecDeque::new(),
        }
    }

    /// The application version exposed to the page via `getVersion()`.
    pub fn version(&self) -> &str {
        if self.version.is_empty() {
            FALLBACK_VERSION
        } else {
            &self.version
        }
    }

    /// Dispatch a host→page message.
    ///
    /// Blank or whitespace-only payloads are silently ignored: no event, no
    /// hook, and `false` returned. Actual delivery (immediate or queued) is
    /// decided by the owner's delivery gate.
    pub fn dispatch_to_page(&mut self, payload: &str) -> bool {
        if payload.trim().is_empty() {
            return false;
        }
        self.events
            .push_back(BridgeEvent::HostMessage(payload.to_string()));
        if let Some(hook) = self.hooks.on_host_message.as_mut() {
            hook(payload);
        }
        true
    }

    /// Receive a page→host message.
    pub fn receive_from_page(&mut self, payload: &str) {
        self.events
            .push_back(BridgeEvent::PageMessage(payload.to_string()));
        if let Some(hook) = self.hooks.on_page_message.as_mut() {
            hook(payload);
        }
    }

    /// The page reports that its script environment is initialized.
    pub fn notify_page_ready(&mut self) {
        self.events.push_back(BridgeEvent::PageReady);
    }

    /// Drain all recorded events, in order.
    pub fn drain_events(&mut self) -> Vec<BridgeEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn blank_dispatch_is_a_no_op() {
        let mut bridge = Bridge::new("1.0.0");
        assert!(!bridge.dispatch_to_page(""));
        assert!(!bridge.dispatch_to_page("   "));
        assert!(!bridge.dispatch_to_page("\t\n"));
        assert!(bridge.drain_events().is_empty());
    }

    #[test]
    fn dispatch_records_event_and_returns_true() {
        let mut bridge = Bridge::new("1.0.0");
        assert!(bridge.dispatch_to_page("hello page"));
        assert_eq!(
            bridge.drain_events(),
            vec![BridgeEvent::HostMessage("hello page".into())]
        );
    }

    #[test]
    fn events_drain_in_order_and_only_once() {
        let mut bridge = Bridge::new("1.0.0");
        bridge.dispatch_to_page("one");
        bridge.receive_from_page("two");
        bridge.notify_page_ready();
        assert_eq!(
            bridge.drain_events(),
            vec![
                BridgeEvent::HostMessage("one".into()),
                BridgeEvent::PageMessage("two".into()),
                BridgeEvent::PageReady,
            ]
        );
        assert!(bridge.drain_events().is_empty());
    }

    #[test]
    fn hooks_are_invoked_per_direction() {
        let host_seen = Rc::new(RefCell::new(Vec::new()));
        let page_seen = Rc::new(RefCell::new(Vec::new()));
        let hooks = BridgeHooks {
            on_host_message: Some(Box::new({
                let seen = Rc::clone(&host_seen);
                move |p: &str| seen.borrow_mut().push(p.to_string())
            })),
            on_page_message: Some(Box::new({
                let seen = Rc::clone(&page_seen);
                move |p: &str| seen.borrow_mut().push(p.to_string())
            })),
        };
        let mut bridge = Bridge::with_hooks("1.0.0", hooks);

        bridge.dispatch_to_page("down");
        bridge.receive_from_page("up");
        bridge.dispatch_to_page("  "); // blank: hook must not fire

        assert_eq!(*host_seen.borrow(), vec!["down".to_string()]);
        assert_eq!(*page_seen.borrow(), vec!["up".to_string()]);
    }

    #[test]
    fn version_falls_back_when_unset() {
        let bridge = Bridge::new("");
        assert_eq!(bridge.version(), "dev-build");

        let bridge = Bridge::new("0.1.0");
        assert_eq!(bridge.version(), "0.1.0");
    }
}
