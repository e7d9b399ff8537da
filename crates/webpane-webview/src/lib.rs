//! WebView embedding for the webpane shell.
//!
//! Wraps the `wry` crate to provide:
//! - The engine pane: one managed WebView plus its message bridge and
//!   pending-message delivery gate
//! - The page channel (`window.bridge`) injected into every document
//! - Navigation policy with a redirect target for disallowed schemes
//! - A custom protocol for serving bundled content
//! - Cookie and styling script helpers

pub mod content;
pub mod events;
pub mod ipc;
pub mod pane;
pub mod policy;
pub mod scripts;

pub use content::ContentProvider;
pub use events::{PageLoadState, PaneEvent};
pub use ipc::{IpcMessage, IpcPayload};
pub use pane::{attach_content_protocol, EngineConfig, EnginePane, CONTENT_SCHEME};
