use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config read error for {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("config parse error for {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum WebPaneError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::ReadError {
            path: PathBuf::from("/tmp/config.json"),
            reason: "is a directory".into(),
        };
        assert_eq!(
            err.to_string(),
            "config read error for /tmp/config.json: is a directory"
        );

        let err = ConfigError::ParseError {
            path: PathBuf::from("/tmp/config.json"),
            reason: "unexpected token".into(),
        };
        assert_eq!(
            err.to_string(),
            "config parse error for /tmp/config.json: unexpected token"
        );
    }

    #[test]
    fn webpane_error_from_config() {
        let config_err = ConfigError::ReadError {
            path: PathBuf::from("/tmp/config.json"),
            reason: "permission denied".into(),
        };
        let err: WebPaneError = config_err.into();
        assert!(matches!(err, WebPaneError::Config(_)));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn webpane_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: WebPaneError = io_err.into();
        assert!(matches!(err, WebPaneError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn webpane_error_other_variants() {
        let err = WebPaneError::WebView("script failed".into());
        assert_eq!(err.to_string(), "webview error: script failed");

        let err = WebPaneError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
