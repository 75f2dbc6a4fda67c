use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Color overrides by role name (e.g. "priority_high" = "#e05561").
    /// Unknown names and unparseable values are ignored.
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
