//! # Dashboard configuration: `dashboard.toml`
//!
//! Where the deals service lives and a few client-side knobs.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"   # REST deals service
//! use_sample_data = false              # serve seed data from memory instead
//!
//! [search]
//! debounce_ms = 500
//! ```
//!
//! All structs derive `Default` with production defaults, so a missing or
//! empty file is equivalent to the default configuration.

use serde::{Deserialize, Serialize};

/// Default address of the deals service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Top-level configuration stored in `dashboard.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Deals service configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Serve the built-in sample data instead of calling the service.
    #[serde(default)]
    pub use_sample_data: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            use_sample_data: false,
        }
    }
}

/// Search box configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Delay between the last keystroke and filtering. 0 filters immediately.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
}

fn default_debounce_ms() -> u32 {
    500
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl DashboardConfig {
    /// Config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                use_sample_data: false,
            },
            search: SearchConfig::default(),
        }
    }

    /// Builder method to serve sample data.
    pub fn with_sample_data(mut self) -> Self {
        self.api.use_sample_data = true;
        self
    }

    /// Builder method to set the search debounce.
    pub fn with_debounce(mut self, ms: u32) -> Self {
        self.search.debounce_ms = ms;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "dashboard.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.base_url(), "http://localhost:5000");
        assert_eq!(config.search.debounce_ms, 500);
        assert!(!config.api.use_sample_data);
    }

    #[test]
    fn test_partial_sections() {
        let config = DashboardConfig::from_toml(
            r#"
            [api]
            base_url = "https://deals.example.com/"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "https://deals.example.com");
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = DashboardConfig::new("http://10.0.0.2:5000")
            .with_sample_data()
            .with_debounce(0);
        let text = config.to_toml().unwrap();
        assert_eq!(DashboardConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(DashboardConfig::from_toml("[search]\ndebounce_ms = \"soon\"").is_err());
    }
}
