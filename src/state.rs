use std::sync::Arc;

use crate::config::AppConfig;
use crate::rate_limit::{MemoryStore, RateLimitStore, RateLimiter};
use crate::services::agent_registry::AgentRegistry;

/// Shared server state. The rate-limit store is injected here rather than
/// living in a module-level static, so tests and alternative deployments can
/// supply their own.
#[derive(Clone)]
pub struct AppState {
    pub config: &'static AppConfig,
    pub store: Arc<dyn RateLimitStore>,
    pub api_limits: RateLimiter,
    pub strict_limits: RateLimiter,
    pub auth_limits: RateLimiter,
    pub agents: Arc<AgentRegistry>,
}

impl AppState {
    pub fn new(config: &'static AppConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: &'static AppConfig, store: Arc<dyn RateLimitStore>) -> Self {
        Self {
            config,
            api_limits: RateLimiter::new("api", config.rate_limits.api.quota(), store.clone()),
            strict_limits: RateLimiter::new(
                "strict",
                config.rate_limits.strict.quota(),
                store.clone(),
            ),
            auth_limits: RateLimiter::new("auth", config.rate_limits.auth.quota(), store.clone()),
            store,
            agents: Arc::new(AgentRegistry::new()),
        }
    }
}
