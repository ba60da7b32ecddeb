// 11.0: every ledger mutation produces an event. used for audit trails and
// post-session review. the EventPayload enum lists all event types.

use crate::engine::RejectReason;
use crate::types::{OrderId, Price, Side, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    OrderAccepted(OrderAcceptedEvent),
    OrderRejected(OrderRejectedEvent),
    OrderFilled(OrderFilledEvent),
    LateFillReconciled(LateFillEvent),
    OrderCanceled(OrderCanceledEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAcceptedEvent {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub requested_volume: i64,
    /// Volume after clamping to the limits. may be less than requested.
    pub volume: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRejectedEvent {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub volume: i64,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFilledEvent {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub volume: i64,
    pub remaining: i64,
    pub position: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LateFillEvent {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub volume: i64,
    pub position: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCanceledEvent {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub volume: i64,
    pub reason: CancelReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelReason {
    /// Strategy asked for it.
    Requested,
    /// Removed to make room for a new order.
    Evicted,
    /// Venue reported an error for the order.
    VenueRejected,
}
