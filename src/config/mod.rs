use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::series::access::Viewer;

/// Who the board is shown to. This is a display preference, not a login.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub staff: bool,
    /// Apply visibility rules in the TUI too (the CLI applies them whenever a viewer is set)
    #[serde(default)]
    pub filter_tui: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Number of events drafted when none is given on the command line
    #[serde(default = "default_event_count")]
    pub event_count: usize,
    /// Fixed seed for reproducible drafts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_event_count() -> usize {
    6
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            event_count: default_event_count(),
            seed: None,
        }
    }
}

/// Hex color overrides (`#RRGGBB` or `#RGB`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_selected: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub draft: DraftConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("seriesboard");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            // Keep the user's broken file around for them to fix
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Whether any viewer identity is configured at all
    pub fn has_viewer(&self) -> bool {
        self.viewer.staff || self.viewer.username.is_some() || self.viewer.user_id.is_some()
    }

    pub fn viewer(&self) -> Viewer {
        Viewer::from_parts(
            self.viewer.staff,
            self.viewer.username.as_deref(),
            self.viewer.user_id,
        )
    }
}
