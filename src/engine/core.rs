// 8.0 engine/core.rs: the ledger. holds both sides, the counters, cost basis, hedge leg,
// the cancelled-order registry and the audit log.

use super::config::{EngineConfig, RiskLimits};
use crate::cost_basis::CostBasis;
use crate::events::{Event, EventId, EventPayload};
use crate::order::{RestingOrder, SideBook};
use crate::registry::CancelledOrderRegistry;
use crate::types::{OrderId, Price, Side, Timestamp};

/** 8.1: main ledger struct. all state lives here, mutated only through &mut self */
#[derive(Debug)]
pub struct Ledger {
    pub(super) config: EngineConfig,
    pub(super) bids: SideBook,
    pub(super) asks: SideBook,
    /// Realized net position from fills.
    pub(super) position: i64,
    /// Position if every resting order filled.
    pub(super) position_after_orders: i64,
    pub(super) volume: i64,
    pub(super) vol_bids: i64,
    pub(super) vol_asks: i64,
    pub(super) num_orders: usize,
    pub(super) cost_basis: CostBasis,
    /// Inverse exposure booked on the paired instrument.
    pub(super) future_position: i64,
    pub(super) last_buy_price: Option<Price>,
    pub(super) last_sell_price: Option<Price>,
    pub(super) cancelled: CancelledOrderRegistry,
    pub(super) events: Vec<Event>,
    pub(super) next_event_id: u64,
    pub(super) current_time: Timestamp,
}

impl Ledger {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            bids: SideBook::new(Side::Bid),
            asks: SideBook::new(Side::Ask),
            position: 0,
            position_after_orders: 0,
            volume: 0,
            vol_bids: 0,
            vol_asks: 0,
            num_orders: 0,
            cost_basis: CostBasis::new(),
            future_position: 0,
            last_buy_price: None,
            last_sell_price: None,
            cancelled: CancelledOrderRegistry::new(),
            events: Vec::new(),
            next_event_id: 1,
            current_time: Timestamp::from_millis(0),
        }
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = self.current_time.plus_millis(millis);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn limits(&self) -> &RiskLimits {
        &self.config.limits
    }

    pub fn bids(&self) -> &[RestingOrder] {
        self.bids.as_slice()
    }

    pub fn asks(&self) -> &[RestingOrder] {
        self.asks.as_slice()
    }

    pub fn book(&self, side: Side) -> &SideBook {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    pub(super) fn book_mut(&mut self, side: Side) -> &mut SideBook {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn position_after_orders(&self) -> i64 {
        self.position_after_orders
    }

    pub fn volume(&self) -> i64 {
        self.volume
    }

    pub fn vol_bids(&self) -> i64 {
        self.vol_bids
    }

    pub fn vol_asks(&self) -> i64 {
        self.vol_asks
    }

    pub(super) fn resting_volume_mut(&mut self, side: Side) -> &mut i64 {
        match side {
            Side::Bid => &mut self.vol_bids,
            Side::Ask => &mut self.vol_asks,
        }
    }

    pub fn num_orders(&self) -> usize {
        self.num_orders
    }

    pub fn cost_basis(&self) -> &CostBasis {
        &self.cost_basis
    }

    pub fn average_price(&self) -> i64 {
        self.cost_basis.average_price
    }

    pub fn future_position(&self) -> i64 {
        self.future_position
    }

    pub fn last_buy_price(&self) -> Option<Price> {
        self.last_buy_price
    }

    pub fn last_sell_price(&self) -> Option<Price> {
        self.last_sell_price
    }

    pub fn cancelled(&self) -> &CancelledOrderRegistry {
        &self.cancelled
    }

    /// Look an order up on either side.
    pub fn get_order(&self, order_id: OrderId) -> Option<&RestingOrder> {
        self.bids
            .get(order_id)
            .or_else(|| self.asks.get(order_id))
    }

    pub fn is_resting(&self, order_id: OrderId) -> bool {
        self.bids.contains(order_id) || self.asks.contains(order_id)
    }

    /// Forget cancelled orders older than the retention window.
    pub fn prune_cancelled(&mut self) -> usize {
        let dropped = self
            .cancelled
            .prune(self.current_time, self.config.cancel_retention_ms);
        if dropped > 0 {
            tracing::debug!(dropped, remaining = self.cancelled.len(), "pruned cancelled orders");
        }
        dropped
    }

    /// True when every counter agrees with the sequences and the caps hold.
    pub fn check_invariants(&self) -> bool {
        let limits = &self.config.limits;
        self.volume == self.vol_bids + self.vol_asks
            && self.num_orders == self.bids.len() + self.asks.len()
            && self.vol_bids == self.bids.total_volume()
            && self.vol_asks == self.asks.total_volume()
            && self.vol_bids >= 0
            && self.vol_asks >= 0
            && self.volume <= limits.volume_limit
            && self.num_orders <= limits.order_limit
            && self.position_after_orders == self.position + self.vol_bids - self.vol_asks
            && self.bids.is_sorted()
            && self.asks.is_sorted()
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), self.current_time, payload);
        self.next_event_id += 1;

        tracing::debug!(event_id = event.id.0, payload = ?event.payload, "ledger event");

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}
