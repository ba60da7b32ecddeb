// 8.0: the order ledger. mirrors our own resting orders, enforces order/volume/position
// caps on admission, books fills into position and cost basis, and picks orders to evict.
// deterministic and event-driven with no external I/O.

mod admission;
mod cancels;
mod config;
mod core;
mod fills;
mod pricing;
mod results;

pub use config::{EngineConfig, RiskLimits};
pub use core::Ledger;
pub use results::{Admission, FillOutcome, LedgerError, RejectReason};
