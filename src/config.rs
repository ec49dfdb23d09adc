//! TOML configuration for the queuepulse daemon.
//!
//! Layered model: `QUEUEPULSE_CONFIG` env var, then the standard system
//! location, then compiled-in defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Root configuration for the queuepulse process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub ui: UiConfig,
}

/// Presentation-facing knobs consumed read-only by the serving boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Records per page in job listings.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Whether the metrics section is computed at all.
    #[serde(default = "default_show_metrics")]
    pub show_metrics: bool,
    /// Trailing window length in days for the metrics engine.
    #[serde(default = "default_window_days")]
    pub metrics_window_days: u32,
}

fn default_per_page() -> u32 {
    35
}

fn default_show_metrics() -> bool {
    true
}

fn default_window_days() -> u32 {
    2
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            show_metrics: default_show_metrics(),
            metrics_window_days: default_window_days(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Try to load configuration from, in order:
    /// 1. The path specified by the `QUEUEPULSE_CONFIG` environment variable.
    /// 2. `/etc/queuepulse/queuepulse.toml`.
    /// 3. Fall back to compiled-in defaults.
    pub fn load_or_default() -> Self {
        if let Ok(env_path) = std::env::var("QUEUEPULSE_CONFIG") {
            let path = Path::new(&env_path);
            match Self::load(path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "QUEUEPULSE_CONFIG set but file could not be loaded, trying fallback"
                    );
                }
            }
        }

        let system_path = Path::new("/etc/queuepulse/queuepulse.toml");
        if system_path.exists() {
            match Self::load(system_path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    warn!(error = %e, "system config could not be loaded, using defaults");
                }
            }
        }

        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if self.ui.per_page == 0 {
            anyhow::bail!("ui.per_page must be >= 1");
        }
        if self.ui.metrics_window_days == 0 {
            anyhow::bail!("ui.metrics_window_days must be >= 1");
        }
        Ok(())
    }
}
