//! Resting order types and the per-side sorted sequence.
//!
//! The ledger holds at most a handful of orders per side, so each side is a
//! plain `Vec` kept in ascending price order with linear insertion. Orders at
//! the same price keep arrival order (price-time priority).

use crate::types::{OrderId, Price, Side};
use serde::{Deserialize, Serialize};

/// An order we have sent to the venue and believe is still working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingOrder {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    pub volume: i64,
}

impl RestingOrder {
    pub fn new(id: OrderId, side: Side, price: Price, volume: i64) -> Self {
        debug_assert!(volume > 0, "resting volume must be positive");
        Self {
            id,
            side,
            price,
            volume,
        }
    }

    /// Reduce remaining volume. Returns true when nothing is left.
    pub fn fill(&mut self, volume: i64) -> bool {
        debug_assert!(volume <= self.volume, "cannot fill more than remaining");
        self.volume -= volume;
        self.volume == 0
    }
}

/// Aggregated volume at one price on one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    pub price: Price,
    pub total_volume: i64,
    pub order_count: usize,
}

/// One side of the ledger, sorted by ascending price.
#[derive(Debug, Clone)]
pub struct SideBook {
    side: Side,
    orders: Vec<RestingOrder>,
}

impl SideBook {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            orders: Vec::new(),
        }
    }

    /// Insert before the first order with a strictly higher price, so an
    /// order joining an existing level queues behind it.
    pub fn insert(&mut self, order: RestingOrder) {
        debug_assert_eq!(order.side, self.side);
        let idx = self
            .orders
            .iter()
            .position(|o| o.price > order.price)
            .unwrap_or(self.orders.len());
        self.orders.insert(idx, order);
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.orders.iter().any(|o| o.id == order_id)
    }

    pub fn get(&self, order_id: OrderId) -> Option<&RestingOrder> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    pub fn get_mut(&mut self, order_id: OrderId) -> Option<&mut RestingOrder> {
        self.orders.iter_mut().find(|o| o.id == order_id)
    }

    pub fn remove(&mut self, order_id: OrderId) -> Option<RestingOrder> {
        let idx = self.orders.iter().position(|o| o.id == order_id)?;
        Some(self.orders.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RestingOrder> {
        self.orders.iter()
    }

    pub fn as_slice(&self) -> &[RestingOrder] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn total_volume(&self) -> i64 {
        self.orders.iter().map(|o| o.volume).sum()
    }

    /// Most aggressive price: highest bid or lowest ask.
    pub fn best_price(&self) -> Option<Price> {
        match self.side {
            Side::Bid => self.orders.last().map(|o| o.price),
            Side::Ask => self.orders.first().map(|o| o.price),
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.orders.windows(2).all(|w| w[0].price <= w[1].price)
    }

    /// Depth per price level, most aggressive first.
    pub fn levels(&self, max_levels: usize) -> Vec<PriceLevel> {
        let mut levels: Vec<PriceLevel> = Vec::new();
        let ordered: Vec<&RestingOrder> = match self.side {
            Side::Bid => self.orders.iter().rev().collect(),
            Side::Ask => self.orders.iter().collect(),
        };

        for order in ordered {
            if levels.last().map(|l| l.price) != Some(order.price) {
                if levels.len() >= max_levels {
                    break;
                }
                levels.push(PriceLevel {
                    price: order.price,
                    total_volume: 0,
                    order_count: 0,
                });
            }
            if let Some(level) = levels.last_mut() {
                level.total_volume += order.volume;
                level.order_count += 1;
            }
        }

        levels
    }
}
