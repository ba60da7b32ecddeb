// 8.0.2: result types and errors for ledger operations.

use crate::types::OrderId;
use serde::{Deserialize, Serialize};

/// Why the admission controller turned an order away. These are expected
/// outcomes, not errors; the caller decides whether to evict and retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Already holding the maximum number of resting orders.
    OrderLimit,
    /// Resting volume is at the cap, no room at all.
    VolumeLimit,
    /// Realized position already at the cap in this direction.
    PositionSaturated,
    /// Position plus same-side resting volume already at the cap.
    PositionSaturatedWithResting,
}

impl RejectReason {
    /// Numeric reason code, 0 through 3.
    pub fn code(&self) -> u8 {
        match self {
            RejectReason::OrderLimit => 0,
            RejectReason::VolumeLimit => 1,
            RejectReason::PositionSaturated => 2,
            RejectReason::PositionSaturatedWithResting => 3,
        }
    }

    /// Capacity rejections can clear if a resting order is evicted.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            RejectReason::OrderLimit | RejectReason::PositionSaturatedWithResting
        )
    }
}

/// Outcome of a submit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Entered the ledger with this (possibly clamped) volume.
    Accepted { volume: i64 },
    Rejected(RejectReason),
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted { .. })
    }

    /// `(accepted, volume_or_reason_code)` pair for callers that want the flat form.
    pub fn as_pair(&self) -> (bool, i64) {
        match self {
            Admission::Accepted { volume } => (true, *volume),
            Admission::Rejected(reason) => (false, i64::from(reason.code())),
        }
    }
}

/// What a fill notification did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// Order still resting with this much left.
    Partial { remaining: i64 },
    /// Order fully filled and removed.
    Completed,
    /// Order was already cancelled locally; only position was booked.
    LateFill,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Price must be positive, got {0}")]
    InvalidPrice(i64),

    #[error("Volume must be positive, got {0}")]
    InvalidVolume(i64),

    #[error("Order {0} is already resting")]
    DuplicateOrder(OrderId),

    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    /// Fill for an id we never had or have already forgotten. The local
    /// mirror no longer matches the venue.
    #[error("Fill for unknown order {0}: local book has diverged from the venue")]
    UnknownOrder(OrderId),

    #[error("Fill of {filled} lots exceeds {resting} resting on order {order_id}")]
    Overfill {
        order_id: OrderId,
        filled: i64,
        resting: i64,
    },
}

impl LedgerError {
    /// Integrity faults: every later risk decision is suspect.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LedgerError::UnknownOrder(_) | LedgerError::Overfill { .. })
    }
}
