//! Read-only application configuration.
//!
//! A single JSON file, `config.json`, resolved next to the executable. All
//! fields are optional; a missing file means defaults. The config is built
//! once at startup and passed by reference, never held in global state.

pub mod debug_port;
pub mod loader;
pub mod schema;

pub use debug_port::{apply_remote_debugging, validated_port};
pub use loader::{config_path, load, load_from_path, load_or_default};
pub use schema::AppConfig;
