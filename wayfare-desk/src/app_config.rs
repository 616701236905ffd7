use serde::Deserialize;
use std::env;
use wayfare_catalog::PricingConfig;
use wayfare_booking::wizard::DEFAULT_MAX_PASSENGERS;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WizardConfig {
    #[serde(default = "default_max_passengers")]
    pub max_passengers: usize,
    /// Submit attempts before the session gives up on the booking API
    #[serde(default = "default_submit_attempts")]
    pub submit_attempts: u32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_passengers: default_max_passengers(),
            submit_attempts: default_submit_attempts(),
        }
    }
}

fn default_max_passengers() -> usize { DEFAULT_MAX_PASSENGERS }
fn default_submit_attempts() -> u32 { 2 }

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub draft_path: String,
    pub flights_path: String,
    /// Simulated booking API failures before the first success
    #[serde(default)]
    pub mock_failures: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `WAYFARE_WIZARD__MAX_PASSENGERS=4`
            .add_source(config::Environment::with_prefix("WAYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
