//! Host ↔ page messaging core.
//!
//! Two pieces, both engine-agnostic:
//! - [`Bridge`]: the named-channel endpoint the page talks to. Host-to-page
//!   dispatch, page-to-host receipt, a one-shot "page ready" handshake, and
//!   injected customization hooks.
//! - [`DeliveryGate`]: the pending-message queue and readiness state machine
//!   that decides when host-to-page messages actually reach the page.
//!
//! The engine pane owns one of each and wires them to the real WebView.

pub mod bridge;
pub mod readiness;

pub use bridge::{Bridge, BridgeEvent, BridgeHooks};
pub use readiness::{DeliveryGate, LoadPhase, NavSeq};
