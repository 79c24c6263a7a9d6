use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::rate_limit::RateLimitQuota;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub rate_limits: RateLimitSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_rate_limiting: bool,
    pub sweep_interval_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    /// Bearer token for the admin back-office. Admin routes answer 503 until set.
    pub admin_token: Option<String>,
}

/// The three throttling profiles. All share the same fixed-window primitive;
/// only the (window, ceiling) tuple differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// General API reads.
    pub api: QuotaSettings,
    /// Sensitive write endpoints.
    pub strict: QuotaSettings,
    /// Credential-related endpoints: long window, low attempt ceiling.
    pub auth: QuotaSettings,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuotaSettings {
    pub window_ms: u64,
    pub max_requests: u32,
}

impl QuotaSettings {
    pub fn quota(&self) -> RateLimitQuota {
        RateLimitQuota::new(Duration::from_millis(self.window_ms), self.max_requests)
    }
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
        // API overrides
        if let Ok(v) = env::var("API_ENABLE_RATE_LIMITING") {
            self.api.enable_rate_limiting = v.parse().unwrap_or(self.api.enable_rate_limiting);
        }
        if let Ok(v) = env::var("RATE_LIMIT_SWEEP_INTERVAL_SECS") {
            self.api.sweep_interval_secs = v.parse().unwrap_or(self.api.sweep_interval_secs);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Quota overrides, one pair per profile
        if let Ok(v) = env::var("API_RATE_LIMIT_REQUESTS") {
            self.rate_limits.api.max_requests = v.parse().unwrap_or(self.rate_limits.api.max_requests);
        }
        if let Ok(v) = env::var("API_RATE_LIMIT_WINDOW_MS") {
            self.rate_limits.api.window_ms = v.parse().unwrap_or(self.rate_limits.api.window_ms);
        }
        if let Ok(v) = env::var("STRICT_RATE_LIMIT_REQUESTS") {
            self.rate_limits.strict.max_requests = v.parse().unwrap_or(self.rate_limits.strict.max_requests);
        }
        if let Ok(v) = env::var("STRICT_RATE_LIMIT_WINDOW_MS") {
            self.rate_limits.strict.window_ms = v.parse().unwrap_or(self.rate_limits.strict.window_ms);
        }
        if let Ok(v) = env::var("AUTH_RATE_LIMIT_REQUESTS") {
            self.rate_limits.auth.max_requests = v.parse().unwrap_or(self.rate_limits.auth.max_requests);
        }
        if let Ok(v) = env::var("AUTH_RATE_LIMIT_WINDOW_MS") {
            self.rate_limits.auth.window_ms = v.parse().unwrap_or(self.rate_limits.auth.window_ms);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("ADMIN_API_TOKEN") {
            if !v.is_empty() {
                self.security.admin_token = Some(v);
            }
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                enable_rate_limiting: true,
                sweep_interval_secs: 60,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                admin_token: None,
            },
            rate_limits: RateLimitSettings::standard(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                enable_rate_limiting: true,
                sweep_interval_secs: 300,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                admin_token: None,
            },
            rate_limits: RateLimitSettings::standard(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                enable_rate_limiting: true,
                sweep_interval_secs: 300,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                enable_cors: true,
                admin_token: None,
            },
            rate_limits: RateLimitSettings::standard(),
        }
    }
}

impl RateLimitSettings {
    /// 10 requests/minute for reads, 3/minute for sensitive writes,
    /// 5 attempts per 15 minutes for credential endpoints.
    fn standard() -> Self {
        Self {
            api: QuotaSettings { window_ms: 60_000, max_requests: 10 },
            strict: QuotaSettings { window_ms: 60_000, max_requests: 3 },
            auth: QuotaSettings { window_ms: 900_000, max_requests: 5 },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(config.api.enable_rate_limiting);
        assert!(config.security.admin_token.is_none());
        assert_eq!(config.rate_limits.api.max_requests, 10);
        assert_eq!(config.rate_limits.api.window_ms, 60_000);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.api.enable_rate_limiting);
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.rate_limits.auth.max_requests, 5);
        assert_eq!(config.rate_limits.auth.window_ms, 900_000);
    }

    #[test]
    fn test_quota_settings_conversion() {
        let settings = QuotaSettings { window_ms: 1_500, max_requests: 7 };
        let quota = settings.quota();
        assert_eq!(quota.interval, Duration::from_millis(1_500));
        assert_eq!(quota.limit, 7);
    }
}
