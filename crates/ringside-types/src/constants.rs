//! System-wide constants for the Ringside exchange core.

/// Payout of one winning contract, in cents.
pub const PAYOUT_CENTS: i64 = 100;

/// Lowest quotable price, in cents.
pub const MIN_PRICE_CENTS: i64 = 1;

/// Highest quotable price, in cents.
pub const MAX_PRICE_CENTS: i64 = 99;

/// Basis points per unit (fee rates are expressed in bps).
pub const BPS_DENOMINATOR: i64 = 10_000;

/// Default fee for human participants in LOCAL-tier markets.
pub const DEFAULT_LOCAL_HUMAN_FEE_BPS: i64 = 200;

/// Default fee for human participants in REGIONAL/GRAND/INVITATIONAL markets.
pub const DEFAULT_UPPER_HUMAN_FEE_BPS: i64 = 0;

/// Default fee for agent participants, all tiers.
pub const DEFAULT_AGENT_FEE_BPS: i64 = 50;

/// Default human position caps per tier, in cents of notional.
pub const DEFAULT_LOCAL_LIMIT_CENTS: i64 = 10_000;
pub const DEFAULT_REGIONAL_LIMIT_CENTS: i64 = 25_000;
pub const DEFAULT_GRAND_LIMIT_CENTS: i64 = 50_000;
pub const DEFAULT_INVITATIONAL_LIMIT_CENTS: i64 = 100_000;

/// Share of a verified agent bankroll an agent may commit (500 bps = 5%).
pub const DEFAULT_AGENT_BANKROLL_SHARE_BPS: i64 = 500;

/// Absolute cap on an agent position, in cents.
pub const DEFAULT_AGENT_LIMIT_CAP_CENTS: i64 = 10_000;

/// Fighter stat at or above which a market is REGIONAL.
pub const REGIONAL_TIER_MIN_STAT: f64 = 80.0;

/// Fighter stat at or above which a market is GRAND.
pub const GRAND_TIER_MIN_STAT: f64 = 95.0;

/// Largest quantity a single order may carry. Keeps every
/// `quantity × price × bps` product well inside `i64`.
pub const MAX_ORDER_QUANTITY: i64 = 1_000_000_000;
