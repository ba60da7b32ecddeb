//! Strategy-facing session.
//!
//! Wires the rate limiter in front of the ledger and turns a trading decision
//! into the insert/cancel actions to send. Venue callbacks (fills, errors,
//! clock ticks) are fed back through here so the ledger stays in step.

use crate::config::SessionConfig;
use crate::engine::{Admission, FillOutcome, Ledger, LedgerError, RejectReason};
use crate::events::CancelReason;
use crate::order::RestingOrder;
use crate::rate_limit::RollingWindowLimiter;
use crate::types::{Lifespan, OrderId, Price, Side, Timestamp};
use serde::{Deserialize, Serialize};

/// Outbound instruction for the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Insert {
        id: OrderId,
        side: Side,
        price: Price,
        volume: i64,
        lifespan: Lifespan,
    },
    Cancel {
        id: OrderId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStatus {
    /// Insert goes out with this (possibly clamped) volume.
    Submitted { volume: i64 },
    /// Rate window full, nothing sent. Ask again later.
    Throttled,
    /// Ledger would not take it, even after any eviction.
    Rejected(RejectReason),
}

#[derive(Debug, Clone)]
pub struct Proposal {
    pub order_id: OrderId,
    pub status: ProposalStatus,
    /// Actions to send, in order. A cancel for an evicted order comes first.
    pub actions: Vec<Action>,
}

#[derive(Debug)]
pub struct OrderSession {
    ledger: Ledger,
    limiter: RollingWindowLimiter,
    lifespan: Lifespan,
    next_order_id: u64,
}

impl OrderSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            limiter: RollingWindowLimiter::new(&config.rate_limit),
            lifespan: config.lifespan,
            ledger: Ledger::new(config.engine),
            next_order_id: 1,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn limiter(&self) -> &RollingWindowLimiter {
        &self.limiter
    }

    pub fn next_order_id(&mut self) -> OrderId {
        let id = OrderId(self.next_order_id);
        self.next_order_id += 1;
        id
    }

    /// Advance the session clock and forget stale cancellations.
    pub fn on_tick(&mut self, now: Timestamp) {
        self.ledger.set_time(now);
        self.ledger.prune_cancelled();
    }

    /// Try to place an order. On a capacity rejection one resting order is
    /// evicted (if the window has room for both the cancel and the insert)
    /// and the submission is retried once. An order-count rejection evicts
    /// from either side; a position rejection only from the proposed side.
    pub fn propose(
        &mut self,
        side: Side,
        price: Price,
        volume: i64,
        market_price: Price,
    ) -> Result<Proposal, LedgerError> {
        let now = self.ledger.time();
        let order_id = self.next_order_id();

        if self.limiter.remaining(now) == 0 {
            tracing::debug!(%order_id, %side, %price, "proposal throttled");
            return Ok(Proposal {
                order_id,
                status: ProposalStatus::Throttled,
                actions: Vec::new(),
            });
        }

        let mut actions = Vec::new();
        let mut admission = self.ledger.submit(side, price, volume, order_id)?;

        if let Admission::Rejected(reason) = admission {
            if reason.is_capacity() && self.limiter.remaining(now) >= 2 {
                let evicted = match reason {
                    RejectReason::PositionSaturatedWithResting => self
                        .ledger
                        .remove_least_useful_order_on(side, market_price, price),
                    _ => self
                        .ledger
                        .remove_least_useful_order(market_price, price, side),
                };
                if let Some(evicted) = evicted {
                    let acquired = self.limiter.try_acquire(now);
                    debug_assert!(acquired, "window had room for the cancel");
                    actions.push(Action::Cancel { id: evicted });
                    admission = self.ledger.submit(side, price, volume, order_id)?;
                }
            }
        }

        let status = match admission {
            Admission::Accepted { volume: admitted } => {
                if self.limiter.try_acquire(now) {
                    actions.push(Action::Insert {
                        id: order_id,
                        side,
                        price,
                        volume: admitted,
                        lifespan: self.lifespan,
                    });
                    ProposalStatus::Submitted { volume: admitted }
                } else {
                    // never sent, so a fill for it can't arrive
                    self.ledger
                        .cancel_order(order_id, CancelReason::Requested)?;
                    ProposalStatus::Throttled
                }
            }
            Admission::Rejected(reason) => ProposalStatus::Rejected(reason),
        };

        Ok(Proposal {
            order_id,
            status,
            actions,
        })
    }

    /// Cancel a resting order at the venue. `None` when the window is full.
    pub fn cancel(&mut self, order_id: OrderId) -> Result<Option<Action>, LedgerError> {
        let now = self.ledger.time();
        if !self.ledger.is_resting(order_id) {
            return Err(LedgerError::OrderNotFound(order_id));
        }
        if !self.limiter.try_acquire(now) {
            return Ok(None);
        }
        self.ledger.remove_order(order_id)?;
        Ok(Some(Action::Cancel { id: order_id }))
    }

    /// Venue reported a fill. `price` is the execution price; the ledger books
    /// against the order's own limit price.
    pub fn on_fill(
        &mut self,
        order_id: OrderId,
        price: Price,
        volume: i64,
    ) -> Result<FillOutcome, LedgerError> {
        tracing::debug!(%order_id, %price, volume, "fill");
        self.ledger.amend_order(volume, order_id)
    }

    /// Venue reported an error. Id 0 is a session-level error with no order.
    pub fn on_error(&mut self, order_id: OrderId, message: &str) -> Option<RestingOrder> {
        tracing::warn!(%order_id, message, "venue error");
        if order_id.0 == 0 || !self.ledger.is_resting(order_id) {
            return None;
        }
        self.ledger
            .cancel_order(order_id, CancelReason::VenueRejected)
            .ok()
    }

    pub fn profit_or_loss(&self, future_price: Price, paired_price: Price) -> i64 {
        self.ledger.calc_profit_or_loss(future_price, paired_price)
    }
}
