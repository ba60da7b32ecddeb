// 3.0: cost basis. volume-weighted average entry price of the open position.
// 3.1 has the extend / reduce / close / flip cases.

use crate::types::{Price, Side};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running average entry price plus the lots it was computed over.
///
/// `average_price` only means something while the accumulator for the open
/// direction is nonzero. Crossing flat resets the opposing accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBasis {
    pub average_price: i64,
    pub total_buy_volume: i64,
    pub total_sell_volume: i64,
}

impl CostBasis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_flat(&self) -> bool {
        self.total_buy_volume == 0 && self.total_sell_volume == 0
    }

    pub fn accumulated(&self, side: Side) -> i64 {
        match side {
            Side::Bid => self.total_buy_volume,
            Side::Ask => self.total_sell_volume,
        }
    }

    fn accumulator_mut(&mut self, side: Side) -> &mut i64 {
        match side {
            Side::Bid => &mut self.total_buy_volume,
            Side::Ask => &mut self.total_sell_volume,
        }
    }

    // 3.1: fold a fill into the basis. `position` is the realized position
    // before the fill is applied.
    pub fn calc_average_price(&mut self, position: i64, price: Price, volume: i64, side: Side) {
        if position == 0 || position.signum() == side.sign() {
            let accumulated = self.accumulated(side);
            self.average_price =
                weighted_average(accumulated, self.average_price, price.value(), volume);
            *self.accumulator_mut(side) += volume;
            return;
        }

        let held = if position > 0 { Side::Bid } else { Side::Ask };
        let after = position + side.signed(volume);

        if after == 0 {
            *self = Self::default();
        } else if after.signum() == position.signum() {
            *self.accumulator_mut(held) -= volume;
        } else {
            *self.accumulator_mut(held) = 0;
            *self.accumulator_mut(side) = after.abs();
            self.average_price = price.value();
        }
    }
}

// half-to-even rounding, same as Decimal::round
fn weighted_average(accumulated: i64, average: i64, price: i64, volume: i64) -> i64 {
    let total = accumulated + volume;
    if total == 0 {
        return average;
    }
    let notional = Decimal::from(accumulated) * Decimal::from(average)
        + Decimal::from(price) * Decimal::from(volume);
    (notional / Decimal::from(total))
        .round()
        .to_i64()
        .unwrap_or(average)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(p: i64) -> Price {
        Price::new_unchecked(p)
    }

    #[test]
    fn first_fill_sets_average() {
        let mut basis = CostBasis::new();
        basis.calc_average_price(0, px(100), 10, Side::Bid);
        assert_eq!(basis.average_price, 100);
        assert_eq!(basis.total_buy_volume, 10);
        assert_eq!(basis.total_sell_volume, 0);
    }

    #[test]
    fn extending_long_weights_by_volume() {
        let mut basis = CostBasis::new();
        basis.calc_average_price(0, px(100), 10, Side::Bid);
        basis.calc_average_price(10, px(200), 30, Side::Bid);
        // (10*100 + 30*200) / 40 = 175
        assert_eq!(basis.average_price, 175);
        assert_eq!(basis.total_buy_volume, 40);
    }

    #[test]
    fn average_rounds_half_to_even() {
        let mut basis = CostBasis::new();
        basis.calc_average_price(0, px(100), 1, Side::Ask);
        basis.calc_average_price(-1, px(101), 1, Side::Ask);
        // 100.5 rounds to 100
        assert_eq!(basis.average_price, 100);

        let mut basis = CostBasis::new();
        basis.calc_average_price(0, px(101), 1, Side::Ask);
        basis.calc_average_price(-1, px(102), 1, Side::Ask);
        // 101.5 rounds to 102
        assert_eq!(basis.average_price, 102);
    }

    #[test]
    fn reducing_keeps_average() {
        let mut basis = CostBasis::new();
        basis.calc_average_price(0, px(100), 10, Side::Bid);
        basis.calc_average_price(10, px(150), 4, Side::Ask);
        assert_eq!(basis.average_price, 100);
        assert_eq!(basis.total_buy_volume, 6);
    }

    #[test]
    fn closing_resets() {
        let mut basis = CostBasis::new();
        basis.calc_average_price(0, px(100), 10, Side::Ask);
        basis.calc_average_price(-10, px(90), 10, Side::Bid);
        assert_eq!(basis, CostBasis::default());
        assert!(basis.is_flat());
    }

    #[test]
    fn flipping_starts_fresh_at_fill_price() {
        let mut basis = CostBasis::new();
        basis.calc_average_price(0, px(100), 10, Side::Bid);
        basis.calc_average_price(10, px(120), 25, Side::Ask);
        assert_eq!(basis.average_price, 120);
        assert_eq!(basis.total_sell_volume, 15);
        assert_eq!(basis.total_buy_volume, 0);
    }
}
