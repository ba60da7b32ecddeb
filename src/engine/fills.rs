//! Fill processing.

use super::core::Ledger;
use super::results::{FillOutcome, LedgerError};
use crate::events::{EventPayload, LateFillEvent, OrderFilledEvent};
use crate::types::{OrderId, Price, Side};

impl Ledger {
    /// Book a (partial) fill of `volume` lots against `order_id`.
    ///
    /// Resting orders are searched bids first, then asks. An id we already
    /// cancelled is reconciled from the registry so the position still moves.
    /// An id found in neither place means the local mirror has diverged from
    /// the venue and is returned as a fatal error.
    pub fn amend_order(&mut self, volume: i64, order_id: OrderId) -> Result<FillOutcome, LedgerError> {
        if volume <= 0 {
            return Err(LedgerError::InvalidVolume(volume));
        }

        let resting = self
            .get_order(order_id)
            .map(|o| (o.side, o.price, o.volume));

        if let Some((side, price, resting)) = resting {
            if volume > resting {
                tracing::error!(%order_id, filled = volume, resting, "fill exceeds resting volume");
                return Err(LedgerError::Overfill {
                    order_id,
                    filled: volume,
                    resting,
                });
            }

            self.book_fill(side, price, volume);

            let completed = self
                .book_mut(side)
                .get_mut(order_id)
                .map(|o| o.fill(volume))
                .unwrap_or(false);
            if completed {
                self.book_mut(side).remove(order_id);
                self.num_orders -= 1;
            }
            *self.resting_volume_mut(side) -= volume;
            self.volume -= volume;

            let remaining = resting - volume;
            self.emit_event(EventPayload::OrderFilled(OrderFilledEvent {
                order_id,
                side,
                price,
                volume,
                remaining,
                position: self.position,
            }));

            return Ok(if completed {
                FillOutcome::Completed
            } else {
                FillOutcome::Partial { remaining }
            });
        }

        if let Some(entry) = self.cancelled.lookup(order_id).copied() {
            if volume > entry.volume {
                tracing::error!(%order_id, filled = volume, outstanding = entry.volume, "late fill exceeds cancelled volume");
                return Err(LedgerError::Overfill {
                    order_id,
                    filled: volume,
                    resting: entry.volume,
                });
            }

            self.book_fill(entry.side, entry.price, volume);
            self.cancelled.consume(order_id, volume);
            // no resting volume moved, so the projection moves with the position
            self.position_after_orders += entry.side.signed(volume);

            tracing::warn!(
                %order_id,
                side = %entry.side,
                volume,
                position = self.position,
                "fill arrived for cancelled order"
            );
            if self.position.abs() > self.config.limits.position_limit {
                tracing::warn!(
                    position = self.position,
                    limit = self.config.limits.position_limit,
                    "late fill pushed position past limit"
                );
            }

            self.emit_event(EventPayload::LateFillReconciled(LateFillEvent {
                order_id,
                side: entry.side,
                price: entry.price,
                volume,
                position: self.position,
            }));

            return Ok(FillOutcome::LateFill);
        }

        tracing::error!(%order_id, volume, "fill for unknown order, ledger out of sync with venue");
        Err(LedgerError::UnknownOrder(order_id))
    }

    // cost basis first: it needs the position from before the fill
    fn book_fill(&mut self, side: Side, price: Price, volume: i64) {
        self.cost_basis
            .calc_average_price(self.position, price, volume, side);
        self.position += side.signed(volume);
        self.future_position -= side.signed(volume);
        match side {
            Side::Bid => self.last_buy_price = Some(price),
            Side::Ask => self.last_sell_price = Some(price),
        }
    }
}
