use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::feed::PanelConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Fixed panel set, one entry per outlet. Order is display order.
    #[serde(default = "default_outlets")]
    pub outlets: Vec<OutletConfig>,
    #[serde(default)]
    pub embed: EmbedConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            sync: SyncConfig::default(),
            ui: UiConfig::default(),
            outlets: default_outlets(),
            embed: EmbedConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the headline backend; outlet paths are joined onto this.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Seconds between fetch cycles for each panel
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Request timeout in seconds (0 = no timeout)
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Seconds between forced full resyncs of every panel (0 = disabled)
    #[serde(default)]
    pub full_resync_interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            request_timeout_secs: default_timeout(),
            full_resync_interval_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

/// One outlet panel: a display label and the endpoint path under `base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutletConfig {
    pub label: String,
    pub path: String,
}

/// Timeline embeds shown beside the news panels. Rendering is delegated to
/// the host; the core only carries the handles through configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbedConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Account handles, without the leading '@'
    #[serde(default)]
    pub handles: Vec<String>,
}

fn default_base_url() -> String {
    "http://localhost:5000/api/news-from-db".to_string()
}

fn default_poll_interval() -> u64 {
    30
}

fn default_timeout() -> u64 {
    10
}

fn default_tick_rate() -> u64 {
    100
}

fn default_outlets() -> Vec<OutletConfig> {
    [
        ("CNN", "cnn-news"),
        ("CNBC", "cnbc-news"),
        ("Fox Business", "foxbusiness-news"),
        ("CBS News", "cbs-news"),
        ("Yahoo News", "yahoo-news"),
    ]
    .into_iter()
    .map(|(label, path)| OutletConfig {
        label: label.to_string(),
        path: path.to_string(),
    })
    .collect()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/newswall/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("newswall")
            .join("config.toml")
    }

    /// Resolve every configured outlet into an immutable panel binding.
    pub fn panel_configs(&self) -> crate::Result<Vec<PanelConfig>> {
        self.outlets
            .iter()
            .map(|outlet| self.resolve_outlet(outlet))
            .collect()
    }

    /// Resolve a single outlet by label (case-insensitive).
    pub fn panel_for_label(&self, label: &str) -> crate::Result<PanelConfig> {
        let outlet = self
            .outlets
            .iter()
            .find(|o| o.label.eq_ignore_ascii_case(label))
            .ok_or_else(|| crate::Error::UnknownOutlet(label.to_string()))?;
        self.resolve_outlet(outlet)
    }

    fn resolve_outlet(&self, outlet: &OutletConfig) -> crate::Result<PanelConfig> {
        let base = self.api.base_url.trim_end_matches('/');
        let path = outlet.path.trim_start_matches('/');
        let endpoint = Url::parse(&format!("{}/{}", base, path))?;

        Ok(PanelConfig {
            label: outlet.label.clone(),
            endpoint,
        })
    }
}
