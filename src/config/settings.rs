use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "http://localhost:30105";
pub const DEFAULT_MODEL: &str = "qwen2.5:0.5b";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base address of the Ollama server
    pub host: String,
    /// Model identifier sent with every request
    pub model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// Defaults, or the contents of `explicit` when one is given. No config
    /// file is looked up implicitly.
    pub fn load_with(explicit: Option<&Path>) -> Result<Self> {
        let Some(path) = explicit else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let value: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config TOML at {}", path.display()))?;
        Ok(value)
    }

    /// Command-line values win over file values.
    pub fn with_overrides(mut self, host: Option<&str>, model: Option<&str>) -> Self {
        if let Some(host) = host {
            self.host = host.to_string();
        }
        if let Some(model) = model {
            self.model = model.to_string();
        }
        self
    }
}
