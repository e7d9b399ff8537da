use serde::{Deserialize, Serialize};

/// Contents of `config.json`.
///
/// Unknown keys are ignored so the file can carry settings for other tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Remote-debugging port for the embedded engine. Values outside
    /// 1–65535 disable the feature, same as omitting the key.
    pub remote_debug_port: Option<i64>,
}
