//! # ringside-matching
//!
//! **Matching engine for Ringside.**
//!
//! Given a validated incoming order and an open store transaction, the
//! engine walks the opposite side of the book in price-time priority,
//! produces trades at complementary prices, charges fees, posts ledger
//! debits, updates both parties' positions, and persists whatever is left
//! of the incoming order.
//!
//! - [`priority`]: the resting-order comparator (price desc, time asc)
//! - [`planner`]: pure fill planning, no store access
//! - [`engine`]: [`MatchingEngine::match_order`] and
//!   [`MatchingEngine::place_order`] (limit check + match)
//! - [`determinism`]: SHA-256 fill root for replay verification
//!
//! The engine has no threads and no retries. Isolation comes from the
//! caller's serializable transaction; on any error the caller rolls back.

pub mod determinism;
pub mod engine;
pub mod planner;
pub mod priority;

pub use determinism::{compute_fill_root, verify_fill_root};
pub use engine::{MatchOutcome, MatchingEngine, PlacementContext};
pub use planner::{FillPlan, PlannedFill, plan_fills};
pub use priority::{resting_priority, sort_book};
