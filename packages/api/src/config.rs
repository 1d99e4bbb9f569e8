//! Where the dashboard's [`DashboardConfig`] comes from.
//!
//! Native builds read `dashboard.toml` from the working directory, then let
//! the environment (including a `.env` file) override it:
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `DEALS_API_URL` | `api.base_url` |
//! | `DEALS_SAMPLE_DATA` | `api.use_sample_data` (`1`/`true`) |
//!
//! Browser builds have no filesystem or process environment, so the same
//! variables are read at compile time instead.

use store::DashboardConfig;

pub const API_URL_VAR: &str = "DEALS_API_URL";
pub const SAMPLE_DATA_VAR: &str = "DEALS_SAMPLE_DATA";

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Apply environment-style overrides to `config`.
pub fn apply_overrides(
    mut config: DashboardConfig,
    api_url: Option<&str>,
    sample_data: Option<&str>,
) -> DashboardConfig {
    if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
        config.api.base_url = url.to_string();
    }
    if let Some(flag) = sample_data {
        config.api.use_sample_data = is_truthy(flag);
    }
    config
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> DashboardConfig {
    dotenvy::dotenv().ok();

    let path = std::path::Path::new(DashboardConfig::filename());
    let config = match std::fs::read_to_string(path) {
        Ok(raw) => DashboardConfig::from_toml(&raw).unwrap_or_else(|e| {
            tracing::warn!("ignoring invalid {}: {e}", path.display());
            DashboardConfig::default()
        }),
        Err(_) => DashboardConfig::default(),
    };

    let api_url = std::env::var(API_URL_VAR).ok();
    let sample_data = std::env::var(SAMPLE_DATA_VAR).ok();
    apply_overrides(config, api_url.as_deref(), sample_data.as_deref())
}

#[cfg(target_arch = "wasm32")]
pub fn load_config() -> DashboardConfig {
    apply_overrides(
        DashboardConfig::default(),
        option_env!("DEALS_API_URL"),
        option_env!("DEALS_SAMPLE_DATA"),
    )
}
