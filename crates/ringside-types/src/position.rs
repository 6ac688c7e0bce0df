//! Net position of one participant in one market.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{League, MarketId, Side, UserId};

/// A participant's net exposure to one market, keyed by `(user_id, market)`.
///
/// A quantity of zero is a valid resting state; `side` and `avg_cost_basis`
/// are then retained for audit but carry no exposure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub user_id: UserId,
    pub market: MarketId,
    pub league: League,
    pub side: Side,
    pub quantity: i64,
    /// Weighted average entry price of the current side, in cents.
    pub avg_cost_basis: i64,
    /// Cumulative realized profit and loss, in cents. May be negative.
    pub realized_pnl: i64,
    pub settled: bool,
    /// Filled in at event resolution by the settlement process.
    pub settlement_pnl: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Position {
    /// An empty position: no contracts, no cost, no P&L.
    #[must_use]
    pub fn empty(
        user_id: UserId,
        market: MarketId,
        league: League,
        side: Side,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            market,
            league,
            side,
            quantity: 0,
            avg_cost_basis: 0,
            realized_pnl: 0,
            settled: false,
            settlement_pnl: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.quantity == 0
    }

    /// Total cost committed to the open quantity, in cents. Saturates
    /// rather than wrapping.
    #[must_use]
    pub fn notional(&self) -> i64 {
        self.quantity.saturating_mul(self.avg_cost_basis)
    }
}
