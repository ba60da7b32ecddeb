// resting-ledger: local order ledger and risk-limit engine for a trading strategy.
// mirrors our own resting orders; the venue stays authoritative.
// all computation is deterministic with no external I/O. time is injected.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: OrderId, Side, Price, Lifespan, Timestamp
//   2.x  order.rs: resting orders and the sorted per-side sequence
//   3.x  cost_basis.rs: weighted average entry price
//   4.x  mark_to_market.rs: clamp band and unrealized PnL
//   5.x  registry.rs: cancelled-order registry for late fills
//   6.x  rate_limit.rs: rolling-window submission limiter
//   7.x  config.rs: session config, presets, validation
//   8.x  engine/: the ledger: admission, fills, cancels/eviction, pricing
//   11.x events.rs: audit events for every ledger mutation
//   12.x session.rs: strategy-facing driver, produces venue actions

pub mod cost_basis;
pub mod engine;
pub mod events;
pub mod mark_to_market;
pub mod order;
pub mod registry;
pub mod types;

pub mod config;
pub mod rate_limit;
pub mod session;

// re exports for convenience
pub use config::{ConfigError, Environment, RateLimitConfig, SessionConfig};
pub use cost_basis::CostBasis;
pub use engine::*;
pub use events::*;
pub use mark_to_market::{band_delta, calc_profit_or_loss, ClampBand};
pub use order::{PriceLevel, RestingOrder, SideBook};
pub use rate_limit::RollingWindowLimiter;
pub use registry::{CancelledOrder, CancelledOrderRegistry};
pub use session::{Action, OrderSession, Proposal, ProposalStatus};
pub use types::*;
