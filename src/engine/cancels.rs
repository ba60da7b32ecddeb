//! Cancellation and eviction.

use super::core::Ledger;
use super::results::LedgerError;
use crate::events::{CancelReason, EventPayload, OrderCanceledEvent};
use crate::order::RestingOrder;
use crate::types::{OrderId, Price, Side};

impl Ledger {
    /// Remove a resting order on our own initiative. Does not send a cancel
    /// to the venue; the id is remembered so a late fill can be reconciled.
    pub fn remove_order(&mut self, order_id: OrderId) -> Result<RestingOrder, LedgerError> {
        self.cancel_order(order_id, CancelReason::Requested)
    }

    pub fn cancel_order(
        &mut self,
        order_id: OrderId,
        reason: CancelReason,
    ) -> Result<RestingOrder, LedgerError> {
        let order = self
            .bids
            .remove(order_id)
            .or_else(|| self.asks.remove(order_id))
            .ok_or(LedgerError::OrderNotFound(order_id))?;

        self.position_after_orders -= order.side.signed(order.volume);
        self.volume -= order.volume;
        *self.resting_volume_mut(order.side) -= order.volume;
        self.num_orders -= 1;

        self.cancelled
            .record(order.id, order.side, order.price, order.volume, self.current_time);

        self.emit_event(EventPayload::OrderCanceled(OrderCanceledEvent {
            order_id,
            side: order.side,
            price: order.price,
            volume: order.volume,
            reason,
        }));

        Ok(order)
    }

    /// Evict the resting order furthest from `market_price` to free capacity.
    ///
    /// Both sides are scanned. On equal distance the larger id wins, so the
    /// most recently placed order goes first. If the pick sits at exactly the
    /// price and side about to be submitted, nothing is evicted: we would only
    /// cancel the level we are re-entering.
    ///
    /// Returns the evicted id so the caller can cancel it at the venue.
    pub fn remove_least_useful_order(
        &mut self,
        market_price: Price,
        proposed_price: Price,
        proposed_side: Side,
    ) -> Option<OrderId> {
        self.evict_furthest(None, market_price, proposed_price, proposed_side)
    }

    /// Like `remove_least_useful_order`, but only `side` is scanned. Position
    /// room on one side is only freed by cancelling volume on that side.
    pub fn remove_least_useful_order_on(
        &mut self,
        side: Side,
        market_price: Price,
        proposed_price: Price,
    ) -> Option<OrderId> {
        self.evict_furthest(Some(side), market_price, proposed_price, side)
    }

    fn evict_furthest(
        &mut self,
        only: Option<Side>,
        market_price: Price,
        proposed_price: Price,
        proposed_side: Side,
    ) -> Option<OrderId> {
        let victim = self
            .bids
            .iter()
            .chain(self.asks.iter())
            .filter(|o| only.map_or(true, |s| o.side == s))
            .max_by_key(|o| (o.price.distance(market_price), o.id))
            .map(|o| (o.id, o.side, o.price))?;

        let (order_id, side, price) = victim;
        if price == proposed_price && side == proposed_side {
            tracing::debug!(%order_id, %price, %side, "eviction skipped, same level as proposal");
            return None;
        }

        let evicted = self.cancel_order(order_id, CancelReason::Evicted).ok()?;
        tracing::info!(
            %order_id,
            %side,
            price = %evicted.price,
            volume = evicted.volume,
            distance = evicted.price.distance(market_price),
            "evicted resting order"
        );
        Some(order_id)
    }
}
