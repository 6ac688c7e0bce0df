//! Credit-ledger postings.
//!
//! Each fill debits the contract cost from the maker and the taker. Fees are
//! tracked on the order and trade records, not folded into these amounts.
//! The designated market maker never receives postings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{LedgerEntryId, MarketId, OrderId, TradeId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerKind {
    /// Cost of contracts acquired by a fill.
    TradeDebit,
}

impl std::fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TradeDebit => write!(f, "TRADE_DEBIT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: LedgerEntryId,
    pub user_id: UserId,
    pub market: MarketId,
    pub order_id: OrderId,
    pub trade_id: TradeId,
    pub kind: LedgerKind,
    /// Signed amount in cents; debits are negative.
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Debit `cost × quantity` cents for a fill.
    #[must_use]
    pub fn trade_debit(
        user_id: UserId,
        market: MarketId,
        order_id: OrderId,
        trade_id: TradeId,
        cost: i64,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LedgerEntryId::new(),
            user_id,
            market,
            order_id,
            trade_id,
            kind: LedgerKind::TradeDebit,
            amount: -(cost * quantity),
            created_at: now,
        }
    }
}
