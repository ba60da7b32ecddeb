// 4.0: mark-to-market against a paired instrument. the paired price is clamped
// into a band around the future price so a stale quote can't swing PnL without bound.

use crate::types::Price;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Band half-width as a fraction of the future price.
pub const BAND_FRACTION: Decimal = dec!(0.02);
/// Band half-width is floored to a multiple of this many minor units.
pub const BAND_STEP: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampBand {
    pub lower: i64,
    pub upper: i64,
}

impl ClampBand {
    pub fn around(future_price: Price) -> Self {
        let delta = band_delta(future_price);
        Self {
            lower: future_price.value() - delta,
            upper: future_price.value() + delta,
        }
    }

    pub fn clamp(&self, price: Price) -> i64 {
        price.value().max(self.lower).min(self.upper)
    }

    pub fn contains(&self, price: Price) -> bool {
        price.value() >= self.lower && price.value() <= self.upper
    }
}

// 4.1: round(0.02 * price) half-to-even, then floor to the band step
pub fn band_delta(future_price: Price) -> i64 {
    let raw = (BAND_FRACTION * Decimal::from(future_price.value()))
        .round()
        .to_i64()
        .unwrap_or(0);
    (raw / BAND_STEP) * BAND_STEP
}

// 4.2: future leg at the future price, held leg at the clamped paired price
pub fn calc_profit_or_loss(
    future_position: i64,
    position: i64,
    future_price: Price,
    paired_price: Price,
) -> i64 {
    let clamped = ClampBand::around(future_price).clamp(paired_price);
    future_position * future_price.value() + position * clamped
}
