use std::path::PathBuf;
use std::time::Duration;

/// Process-wide configuration, loaded once at start and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Label of the device being purchased, e.g. `"Galaxy Z Fold4 5G | Flip4 5G"`.
    pub purchase_device_model: String,
    /// Label of the specific model inside the purchase line, e.g. `"Galaxy Z Fold4 5G"`.
    pub selected_model: String,
    pub webdriver_url: String,
    pub site_path: PathBuf,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub wait_timeout_secs: u64,
    pub price_timeout_secs: u64,
    pub settle_delay_ms: u64,
}

impl AppConfig {
    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    #[must_use]
    pub fn price_timeout(&self) -> Duration {
        Duration::from_secs(self.price_timeout_secs)
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
