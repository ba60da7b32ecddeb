// 7.0 config.rs: all session settings in one place. limits, rate cap, order lifespan.
// 7.1 presets per environment, validate() for internal consistency.

use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, RiskLimits};
use crate::types::Lifespan;

/** 7.2: outbound action cap. `max_actions` inserts + cancels per `window_ms`. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub max_actions: usize,
    pub window_ms: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_actions: 50,
            window_ms: 1_000,
        }
    }
}

// The complete session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub engine: EngineConfig,
    pub rate_limit: RateLimitConfig,
    // Lifespan attached to every insert the session proposes
    #[serde(default)]
    pub lifespan: Lifespan,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            rate_limit: RateLimitConfig::default(),
            lifespan: Lifespan::GoodForDay,
        }
    }
}

impl SessionConfig {
    // Competition venue limits with a little headroom under the message cap
    pub fn competition() -> Self {
        let mut config = Self::default();
        config.rate_limit.max_actions = 45;
        config.engine.cancel_retention_ms = 10_000;
        config
    }

    // Smaller book and slower cadence for cautious runs
    pub fn conservative() -> Self {
        let mut config = Self::default();
        config.engine.limits = RiskLimits {
            order_limit: 4,
            volume_limit: 100,
            position_limit: 300,
        };
        config.rate_limit.max_actions = 10;
        config
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    // Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.engine.limits;

        if limits.order_limit == 0 {
            return Err(ConfigError::InvalidLimits {
                reason: "order limit must be at least 1".to_string(),
            });
        }

        if limits.volume_limit <= 0 || limits.position_limit <= 0 {
            return Err(ConfigError::InvalidLimits {
                reason: "volume and position limits must be positive".to_string(),
            });
        }

        if self.rate_limit.max_actions < 2 {
            // an eviction needs a cancel and an insert in the same window
            return Err(ConfigError::InvalidRateLimit {
                reason: "need at least 2 actions per window".to_string(),
            });
        }

        if self.rate_limit.window_ms <= 0 {
            return Err(ConfigError::InvalidRateLimit {
                reason: "window must be positive".to_string(),
            });
        }

        if self.engine.cancel_retention_ms < 0 {
            return Err(ConfigError::InvalidRetention(self.engine.cancel_retention_ms));
        }

        Ok(())
    }
}

// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid risk limits: {reason}")]
    InvalidLimits { reason: String },

    #[error("invalid rate limit: {reason}")]
    InvalidRateLimit { reason: String },

    #[error("cancel retention must be non-negative, got {0}ms")]
    InvalidRetention(i64),

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

// Environment presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Competition,
    Conservative,
}

impl Environment {
    pub fn config(&self) -> SessionConfig {
        match self {
            Environment::Development => SessionConfig::default(),
            Environment::Competition => SessionConfig::competition(),
            Environment::Conservative => SessionConfig::conservative(),
        }
    }
}
