//! Engine configuration options.

use serde::{Deserialize, Serialize};

/// Hard caps the venue enforces on a single competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Maximum simultaneous resting orders.
    pub order_limit: usize,
    /// Maximum aggregate resting volume across both sides.
    pub volume_limit: i64,
    /// Maximum absolute net position.
    pub position_limit: i64,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            order_limit: 10,
            volume_limit: 200,
            position_limit: 1_000,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub limits: RiskLimits,
    /// Maximum number of events to retain in memory.
    pub max_events: usize,
    /// How long a cancelled order is remembered for late fills.
    pub cancel_retention_ms: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limits: RiskLimits::default(),
            max_events: 100_000,
            cancel_retention_ms: 5_000,
        }
    }
}
