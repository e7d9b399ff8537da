//! Delivery scenarios combining a bridge with its gate, driven the way the
//! engine pane drives them.

use webpane_bridge::{Bridge, BridgeEvent, DeliveryGate, NavSeq};

/// Host-side harness: bridge + gate + a fake page sink standing in for
/// script evaluation.
struct Harness {
    bridge: Bridge,
    gate: DeliveryGate,
    delivered: Vec<String>,
}

impl Harness {
    fn new() -> Self {
        Self {
            bridge: Bridge::new("1.2.3"),
            gate: DeliveryGate::new(),
            delivered: Vec::new(),
        }
    }

    fn broadcast(&mut self, payload: &str) {
        if !self.bridge.dispatch_to_page(payload) {
            return;
        }
        if let Some(now) = self.gate.send(payload) {
            self.delivered.push(now);
        }
    }

    fn navigate(&mut self) -> NavSeq {
        self.gate.begin_navigation()
    }

    fn load_finished(&mut self, seq: NavSeq, ok: bool) {
        let flushed = self.gate.load_finished(seq, ok);
        self.delivered.extend(flushed);
    }

    fn page_ready(&mut self, seq: NavSeq) {
        let flushed = self.gate.page_ready(seq);
        self.delivered.extend(flushed);
    }
}

#[test]
fn three_messages_flush_in_order_then_queue_is_empty() {
    let mut h = Harness::new();
    h.broadcast("a");
    h.broadcast("b");
    h.broadcast("c");
    assert!(h.delivered.is_empty());

    let seq = h.navigate();
    h.load_finished(seq, true);
    h.page_ready(seq);

    assert_eq!(h.delivered, vec!["a", "b", "c"]);
    assert_eq!(h.gate.pending_len(), 0);
}

#[test]
fn queued_messages_survive_failed_navigation() {
    let mut h = Harness::new();
    h.broadcast("pending");

    // Navigation to A fails.
    let a = h.navigate();
    h.load_finished(a, false);
    assert!(h.delivered.is_empty());

    // Navigation to B succeeds; messages enqueued during B's load join the
    // retained ones, in order.
    let b = h.navigate();
    h.broadcast("during-b");
    h.load_finished(b, true);
    h.page_ready(b);

    assert_eq!(h.delivered, vec!["pending", "during-b"]);
}

#[test]
fn live_messages_deliver_immediately_after_handshake() {
    let mut h = Harness::new();
    let seq = h.navigate();
    h.page_ready(seq); // ready may precede load completion
    h.load_finished(seq, true);

    h.broadcast("instant");
    assert_eq!(h.delivered, vec!["instant"]);
    assert_eq!(h.gate.pending_len(), 0);
}

#[test]
fn blank_broadcast_never_reaches_the_page() {
    let mut h = Harness::new();
    let seq = h.navigate();
    h.load_finished(seq, true);
    h.page_ready(seq);

    h.broadcast("   ");
    h.broadcast("");
    assert!(h.delivered.is_empty());
    assert!(h.bridge.drain_events().is_empty());
}

#[test]
fn repeated_ready_flushes_only_once() {
    let mut h = Harness::new();
    h.broadcast("once");
    let seq = h.navigate();
    h.load_finished(seq, true);
    h.page_ready(seq);
    h.page_ready(seq);
    assert_eq!(h.delivered, vec!["once"]);
}

#[test]
fn slow_prior_navigation_cannot_flush_the_new_one() {
    let mut h = Harness::new();
    h.broadcast("guarded");

    let a = h.navigate();
    let b = h.navigate();

    // Late reports from A arrive after B started.
    h.load_finished(a, true);
    h.page_ready(a);
    assert!(h.delivered.is_empty());

    h.load_finished(b, true);
    h.page_ready(b);
    assert_eq!(h.delivered, vec!["guarded"]);
}

#[test]
fn observers_see_both_directions_of_traffic() {
    let mut h = Harness::new();
    let seq = h.navigate();
    h.load_finished(seq, true);
    h.page_ready(seq);

    h.broadcast("down");
    h.bridge.receive_from_page("up");

    let events = h.bridge.drain_events();
    assert_eq!(
        events,
        vec![
            BridgeEvent::HostMessage("down".into()),
            BridgeEvent::PageMessage("up".into()),
        ]
    );
}
