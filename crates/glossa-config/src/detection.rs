use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// Quiet period after the last text change before detection fires
fn default_quiet_ms() -> u64 {
    500
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DetectionConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_quiet_ms")]
    pub quiet_ms: u64,
    /// Source language assumed while detection has no answer
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl DetectionConfig {
    pub fn new() -> Self {
        let quiet_ms = env::var("GLOSSA_DETECT_QUIET_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_quiet_ms);

        let default_language =
            env::var("GLOSSA_DEFAULT_LANG").unwrap_or_else(|_| default_language());

        Self {
            quiet_ms,
            default_language,
            ..Self::default()
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            quiet_ms: default_quiet_ms(),
            default_language: default_language(),
        }
    }
}
