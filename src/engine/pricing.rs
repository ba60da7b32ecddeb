//! Mark-to-market of the ledger's positions.

use super::core::Ledger;
use crate::mark_to_market::{calc_profit_or_loss, ClampBand};
use crate::types::Price;

impl Ledger {
    /// Unrealized PnL: hedge leg at `future_price`, held leg at `paired_price`
    /// clamped into the band around `future_price`.
    pub fn calc_profit_or_loss(&self, future_price: Price, paired_price: Price) -> i64 {
        let band = ClampBand::around(future_price);
        if !band.contains(paired_price) {
            tracing::debug!(
                %future_price,
                %paired_price,
                lower = band.lower,
                upper = band.upper,
                "paired price outside band, clamping"
            );
        }
        calc_profit_or_loss(self.future_position, self.position, future_price, paired_price)
    }

    /// Unrealized PnL of the held leg alone against its average entry price.
    pub fn open_position_pnl(&self, mark: Price) -> i64 {
        if self.position == 0 {
            return 0;
        }
        self.position * (mark.value() - self.cost_basis.average_price)
    }
}
