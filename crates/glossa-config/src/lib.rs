use serde::{Deserialize, Serialize};

use self::detection::DetectionConfig;
use self::lookup::LookupConfig;
use self::provider::ProviderConfig;
use self::ui::UiConfig;

pub mod detection;
pub mod lookup;
pub mod provider;
pub mod ui;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub detection: DetectionConfig,
    pub lookup: LookupConfig,
    pub ui: UiConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            provider: ProviderConfig::new(),
            detection: DetectionConfig::new(),
            lookup: LookupConfig::new(),
            ui: UiConfig::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
