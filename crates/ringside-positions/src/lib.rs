//! # ringside-positions
//!
//! **Position manager for Ringside.**
//!
//! - **Limits**: per-tier caps for humans, bankroll-derived caps for agents,
//!   and the pre-trade [`PositionManager::check_position_limit`] gate
//! - **Accounting**: [`upsert_position`] folds a fill into a participant's
//!   net position (weighted-average cost, closes, flips, realized P&L)
//!
//! The designated market maker bypasses every limit. All reads and writes
//! go through the caller's [`ExchangeStore`](ringside_types::ExchangeStore)
//! transaction.

pub mod limits;
pub mod manager;

pub use limits::{LimitCheck, PositionManager};
pub use manager::{
    PositionFill, apply_fill, compute_exit_pnl, get_or_create_position, upsert_position,
    weighted_average_cost,
};
