use wayfare_booking::WizardError;
use wayfare_catalog::PricingConfigError;

#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid pricing table: {0}")]
    Pricing(#[from] PricingConfigError),

    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Flight could not be loaded: {0}")]
    Load(String),

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

impl DeskError {
    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            DeskError::Config(_) | DeskError::Pricing(_) => 78,
            DeskError::Io { .. } | DeskError::Json { .. } => 66,
            DeskError::Load(_) => 69,
            DeskError::Wizard(_) => 65,
        }
    }
}
