use crate::application::view_coordinator::CoordinatorSettings;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub gemini: GeminiSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Taken from the `API_KEY` environment variable
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub tick_interval_ms: u64,
    pub startup_delay_ms: u64,
}

impl GeminiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DashboardConfig {
    fn validate(self) -> anyhow::Result<Self> {
        if self.telemetry.tick_interval_ms == 0 {
            anyhow::bail!("telemetry.tick_interval_ms must be greater than zero");
        }
        Ok(self)
    }
}

impl TelemetrySettings {
    pub fn coordinator_settings(&self) -> CoordinatorSettings {
        CoordinatorSettings {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            startup_delay: Duration::from_millis(self.startup_delay_ms),
        }
    }
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("gemini.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("gemini.model", "gemini-3-flash-preview")?
        .set_default("gemini.timeout_secs", 30_i64)?
        .set_default("telemetry.tick_interval_ms", 5000_i64)?
        .set_default("telemetry.startup_delay_ms", 1000_i64)
}

/// Defaults, then `config/dashboard.toml` if present, then
/// `DASHBOARD_<SECTION>__<KEY>` environment overrides.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = with_defaults()?
        .add_source(File::with_name("config/dashboard").required(false))
        .add_source(
            Environment::with_prefix("DASHBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("gemini.api_key", std::env::var("API_KEY").ok())?
        .build()?;

    settings.try_deserialize::<DashboardConfig>()?.validate()
}

#[cfg(test)]
fn load_from_str(toml: &str) -> anyhow::Result<DashboardConfig> {
    let settings = with_defaults()?
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;

    settings.try_deserialize::<DashboardConfig>()?.validate()
}
