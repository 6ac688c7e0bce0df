//! Trade types produced by the Ringside matching engine.
//!
//! A [`Trade`] is the immutable record of one fill between a resting (maker)
//! order and an incoming (taker) order. `price` is always the YES-equivalent
//! price so trades are comparable regardless of which side rested.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MarketId, OrderId, Side, TradeId, UserId, pricing};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Deterministic from taker order ID + fill sequence.
    pub id: TradeId,
    pub market: MarketId,
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    pub maker_user_id: UserId,
    pub taker_user_id: UserId,
    /// Side the maker holds. The taker holds the opposite side.
    pub maker_side: Side,
    /// YES-equivalent execution price in cents (1..=99).
    pub price: i64,
    pub quantity: i64,
    pub maker_fee: i64,
    pub taker_fee: i64,
    pub executed_at: DateTime<Utc>,
}

impl Trade {
    #[must_use]
    pub fn taker_side(&self) -> Side {
        self.maker_side.opposite()
    }

    /// Price per contract the maker paid, in the maker's own side.
    #[must_use]
    pub fn maker_cost(&self) -> i64 {
        pricing::native_price(self.maker_side, self.price)
    }

    /// Price per contract the taker paid, in the taker's own side.
    #[must_use]
    pub fn taker_cost(&self) -> i64 {
        pricing::native_price(self.taker_side(), self.price)
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trade[{}] {} {} x{} @ {} (YES)",
            self.id,
            self.market,
            self.taker_side(),
            self.quantity,
            self.price,
        )
    }
}
