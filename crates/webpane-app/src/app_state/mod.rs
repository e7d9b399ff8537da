//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Composes the engine pane (the browsing surface), the chrome
//! pane (toolbar + message console), and the glue between them.

mod chrome;
mod console;
mod core;
mod dispatch;
mod event_handler;
mod init;
mod layout;
mod pump;

pub use self::core::WebPaneApp;
