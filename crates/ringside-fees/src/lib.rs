//! # ringside-fees
//!
//! **Fee engine for Ringside.** Pure, side-effect-free functions:
//!
//! - [`FeeEngine::compute_fee_rate`]: (tier, league, market-maker flag) → basis points
//! - [`FeeEngine::compute_fee`] / [`fee_at_rate`]: floor of `price × qty × rate / 10_000`
//! - [`compute_fight_tier`]: market tier from the two fighters' ratings
//! - [`max_fighter_stat`]: strongest finite rating in a stat bag
//!
//! Fees never round up: fractional cents are truncated.

pub mod schedule;
pub mod tier;

pub use schedule::{FeeEngine, fee_at_rate};
pub use tier::{STAT_FIELDS, StatBag, compute_fight_tier, max_fighter_stat, tier_for_bout};
