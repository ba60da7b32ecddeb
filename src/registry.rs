//! Outstanding-cancellation registry.
//!
//! Cancels and inserts are fire-and-forget, so a fill can arrive for an order
//! we already removed locally. The registry remembers what each cancelled
//! order was until the venue has had time to acknowledge it.

use crate::types::{OrderId, Price, Side, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelledOrder {
    pub side: Side,
    pub price: Price,
    /// Volume still working at the venue when we cancelled.
    pub volume: i64,
    pub cancelled_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct CancelledOrderRegistry {
    entries: HashMap<OrderId, CancelledOrder>,
}

impl CancelledOrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, order_id: OrderId, side: Side, price: Price, volume: i64, at: Timestamp) {
        self.entries.insert(
            order_id,
            CancelledOrder {
                side,
                price,
                volume,
                cancelled_at: at,
            },
        );
    }

    /// Take `volume` off a cancelled order after a late fill. The entry is
    /// dropped once nothing is left. Callers check `volume` against the
    /// entry first.
    pub fn consume(&mut self, order_id: OrderId, volume: i64) {
        let exhausted = match self.entries.get_mut(&order_id) {
            Some(entry) => {
                entry.volume -= volume;
                entry.volume <= 0
            }
            None => false,
        };
        if exhausted {
            self.entries.remove(&order_id);
        }
    }

    pub fn lookup(&self, order_id: OrderId) -> Option<&CancelledOrder> {
        self.entries.get(&order_id)
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.entries.contains_key(&order_id)
    }

    /// Drop entries cancelled more than `retention_ms` before `now`.
    /// Returns how many were dropped.
    pub fn prune(&mut self, now: Timestamp, retention_ms: i64) -> usize {
        let cutoff = now.as_millis() - retention_ms;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.cancelled_at.as_millis() >= cutoff);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
