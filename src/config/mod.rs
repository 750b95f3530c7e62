//! Configuration module for the FactFusion client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the detection service
    pub api_url: String,
    /// Path to the persisted session file
    pub session_path: PathBuf,
    /// Directory report exports are written to
    pub export_dir: PathBuf,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("FACTFUSION_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());

        let session_path = env::var("FACTFUSION_SESSION_PATH")
            .unwrap_or_else(|_| "./data/session.json".to_string())
            .into();

        let export_dir = env::var("FACTFUSION_EXPORT_DIR")
            .unwrap_or_else(|_| "./exports".to_string())
            .into();

        let timeout_secs = env::var("FACTFUSION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let log_level = env::var("FACTFUSION_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_url,
            session_path,
            export_dir,
            timeout_secs,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("FACTFUSION_API_URL");
        env::remove_var("FACTFUSION_SESSION_PATH");
        env::remove_var("FACTFUSION_EXPORT_DIR");
        env::remove_var("FACTFUSION_TIMEOUT_SECS");
        env::remove_var("FACTFUSION_LOG_LEVEL");

        let config = Config::from_env();

        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.session_path, PathBuf::from("./data/session.json"));
        assert_eq!(config.export_dir, PathBuf::from("./exports"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.log_level, "info");
    }
}
