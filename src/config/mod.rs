use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub default_tenant: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    pub row_limit: i64,
    pub max_row_limit: i64,
    pub debug_logging: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("DATAGATE_API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("DATAGATE_TENANT_ID") {
            self.api.default_tenant = v;
        }
        if let Ok(v) = env::var("DATAGATE_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("DATAGATE_PREVIEW_ROW_LIMIT") {
            self.preview.row_limit = v.parse().unwrap_or(self.preview.row_limit);
        }
        if let Ok(v) = env::var("DATAGATE_PREVIEW_MAX_ROW_LIMIT") {
            self.preview.max_row_limit = v.parse().unwrap_or(self.preview.max_row_limit);
        }
        if let Ok(v) = env::var("DATAGATE_PREVIEW_DEBUG_LOGGING") {
            self.preview.debug_logging = v.parse().unwrap_or(self.preview.debug_logging);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8080".to_string(),
                default_tenant: "default-tenant".to_string(),
                request_timeout_secs: 30,
            },
            preview: PreviewConfig {
                row_limit: 10,
                max_row_limit: 1000,
                debug_logging: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.datagate.example.com".to_string(),
                default_tenant: "default-tenant".to_string(),
                request_timeout_secs: 15,
            },
            preview: PreviewConfig {
                row_limit: 10,
                max_row_limit: 500,
                debug_logging: false,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://datagate.example.com".to_string(),
                default_tenant: "default-tenant".to_string(),
                request_timeout_secs: 10,
            },
            preview: PreviewConfig {
                row_limit: 10,
                max_row_limit: 100,
                debug_logging: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
