//! Admission control and insertion.
//!
//! An order is checked against the order-count, volume and position caps,
//! clamped to whatever room is left, and only then recorded. The clamped
//! volume goes back to the caller so the order sent to the venue matches.

use super::core::Ledger;
use super::results::{Admission, LedgerError, RejectReason};
use crate::events::{EventPayload, OrderAcceptedEvent, OrderRejectedEvent};
use crate::order::RestingOrder;
use crate::types::{OrderId, Price, Side};

impl Ledger {
    pub fn submit_bid(
        &mut self,
        price: Price,
        volume: i64,
        order_id: OrderId,
    ) -> Result<Admission, LedgerError> {
        self.submit(Side::Bid, price, volume, order_id)
    }

    pub fn submit_ask(
        &mut self,
        price: Price,
        volume: i64,
        order_id: OrderId,
    ) -> Result<Admission, LedgerError> {
        self.submit(Side::Ask, price, volume, order_id)
    }

    /// Admit and record an order. Does not send anything to the venue.
    pub fn submit(
        &mut self,
        side: Side,
        price: Price,
        volume: i64,
        order_id: OrderId,
    ) -> Result<Admission, LedgerError> {
        if price.value() <= 0 {
            return Err(LedgerError::InvalidPrice(price.value()));
        }
        if volume <= 0 {
            return Err(LedgerError::InvalidVolume(volume));
        }
        if self.is_resting(order_id) || self.cancelled.contains(order_id) {
            return Err(LedgerError::DuplicateOrder(order_id));
        }

        let admission = self.check_admission(side, volume);

        match admission {
            Admission::Accepted { volume: admitted } => {
                self.book_mut(side)
                    .insert(RestingOrder::new(order_id, side, price, admitted));
                self.position_after_orders += side.signed(admitted);
                self.volume += admitted;
                *self.resting_volume_mut(side) += admitted;
                self.num_orders += 1;

                if admitted < volume {
                    tracing::debug!(%order_id, %side, requested = volume, admitted, "order clamped");
                }

                self.emit_event(EventPayload::OrderAccepted(OrderAcceptedEvent {
                    order_id,
                    side,
                    price,
                    requested_volume: volume,
                    volume: admitted,
                }));
            }
            Admission::Rejected(reason) => {
                tracing::debug!(%order_id, %side, code = reason.code(), ?reason, "order rejected");

                self.emit_event(EventPayload::OrderRejected(OrderRejectedEvent {
                    order_id,
                    side,
                    price,
                    volume,
                    reason,
                }));
            }
        }

        Ok(admission)
    }

    /// Run the cap checks without touching state.
    ///
    /// Checked in order: order count, total volume, realized position, then
    /// position including same-side resting volume.
    pub fn check_admission(&self, side: Side, volume: i64) -> Admission {
        let limits = self.config.limits;

        if self.num_orders >= limits.order_limit {
            return Admission::Rejected(RejectReason::OrderLimit);
        }

        if self.volume >= limits.volume_limit {
            return Admission::Rejected(RejectReason::VolumeLimit);
        }

        let saturated = match side {
            Side::Bid => self.position >= limits.position_limit,
            Side::Ask => self.position <= -limits.position_limit,
        };
        if saturated {
            return Admission::Rejected(RejectReason::PositionSaturated);
        }

        let position_room = match side {
            Side::Bid => limits.position_limit - self.position - self.vol_bids,
            Side::Ask => limits.position_limit + self.position - self.vol_asks,
        };
        if position_room <= 0 {
            return Admission::Rejected(RejectReason::PositionSaturatedWithResting);
        }

        let clamped = volume
            .min(limits.volume_limit - self.volume)
            .min(position_room);
        debug_assert!(clamped > 0, "admitted volume must be positive");

        Admission::Accepted { volume: clamped }
    }
}
