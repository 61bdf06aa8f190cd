use std::env;

use serde::{Deserialize, Serialize};

fn default_target_language() -> String {
    "en".to_string()
}

/// Bound on the joint text+audio await; 0 disables the timeout
fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    #[serde(default = "default_target_language")]
    pub target_language: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl LookupConfig {
    pub fn new() -> Self {
        let target_language =
            env::var("GLOSSA_TARGET_LANG").unwrap_or_else(|_| default_target_language());

        let timeout_seconds = env::var("GLOSSA_LOOKUP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        Self {
            target_language,
            timeout_seconds,
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            target_language: default_target_language(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
