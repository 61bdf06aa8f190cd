use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.glossa.dev/v1".to_string()
}

fn default_speech_url() -> String {
    "https://api.glossa.dev/v1/speech".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_speech_url")]
    pub speech_url: String,
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self {
            api_key: env::var("GLOSSA_API_KEY").unwrap_or_default(),
            api_url: env::var("GLOSSA_API_URL").unwrap_or_else(|_| default_api_url()),
            speech_url: env::var("GLOSSA_SPEECH_URL").unwrap_or_else(|_| default_speech_url()),
            ..Self::default()
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: String::new(),
            api_url: default_api_url(),
            speech_url: default_speech_url(),
        }
    }
}
