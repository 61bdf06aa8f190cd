use serde::{Deserialize, Serialize};

fn default_max_examples() -> u32 {
    3
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_max_examples")]
    pub max_examples: u32,
}

impl UiConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_examples: default_max_examples(),
        }
    }
}
