pub mod errors;
pub mod status;

pub use errors::{ConfigError, WebPaneError};
pub use status::{StatusLevel, StatusLine, StatusNotice};

pub type Result<T> = std::result::Result<T, WebPaneError>;
