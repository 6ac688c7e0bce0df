//! # ringside-types
//!
//! Shared types, errors, and configuration for the **Ringside** exchange core.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OrderId`], [`UserId`], [`TradeId`], [`LedgerEntryId`], [`MarketId`]
//! - **Market model**: [`Side`], [`Tier`], [`League`]
//! - **Pricing**: complementary YES/NO price conversion in [`pricing`]
//! - **Order model**: [`Order`], [`OrderInput`], [`OrderType`], [`OrderStatus`]
//! - **Trade model**: [`Trade`]
//! - **Position model**: [`Position`]
//! - **Credit ledger**: [`LedgerEntry`], [`LedgerKind`]
//! - **Configuration**: [`ExchangeConfig`], [`FeeSchedule`], [`LimitSchedule`]
//! - **Errors**: [`RingsideError`] with `RS_ERR_` prefix codes
//! - **Store port**: [`ExchangeStore`], the transactional boundary
//! - **Constants**: price bounds, payout, basis-point denominator

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod market;
pub mod order;
pub mod position;
pub mod pricing;
pub mod store;
pub mod trade;

// Re-export all primary types at crate root for ergonomic imports:
//   use ringside_types::{Order, Side, Trade, Position, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use ledger::*;
pub use market::*;
pub use order::*;
pub use position::*;
pub use store::*;
pub use trade::*;

// Constants and pricing helpers are accessed via their module path
// (`ringside_types::constants::PAYOUT_CENTS`, `ringside_types::pricing::complement`).
