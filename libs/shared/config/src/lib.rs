use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub availability_data_path: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            availability_data_path: env::var("AVAILABILITY_DATA_PATH")
                .unwrap_or_else(|_| {
                    warn!("AVAILABILITY_DATA_PATH not set, using default");
                    "data/availability.json".to_string()
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_else(|| {
                    warn!("PORT not set or invalid, using default 3000");
                    3000
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.availability_data_path.is_empty()
    }
}
