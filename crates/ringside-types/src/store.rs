//! The transactional store port.
//!
//! The exchange core never owns persistence. Every operation runs against an
//! [`ExchangeStore`] handle scoped to one caller-opened transaction with
//! serializable isolation; the caller commits or rolls back. Implementations
//! must see their own uncommitted writes.
//!
//! ```text
//! caller: begin tx (SERIALIZABLE)
//!   → check_position_limit(tx, ...)
//!   → match_order(tx, input)
//! caller: commit / rollback
//! ```

use crate::{LedgerEntry, MarketId, Order, OrderId, Position, Result, Side, Trade, UserId};

/// Operations the matching engine and position manager need from the store.
///
/// Errors from the backing store are returned unchanged and propagate
/// through the core with `?`.
pub trait ExchangeStore {
    // --- Orders ---

    /// Live (OPEN or PARTIALLY_FILLED) orders on `side` of `market`.
    ///
    /// No ordering is required; the matching engine applies price-time
    /// priority itself.
    fn find_live_orders(&mut self, market: &MarketId, side: Side) -> Result<Vec<Order>>;

    fn find_order(&mut self, id: OrderId) -> Result<Option<Order>>;

    fn create_order(&mut self, order: &Order) -> Result<()>;

    /// Overwrite an existing order record.
    fn update_order(&mut self, order: &Order) -> Result<()>;

    // --- Trades ---

    fn create_trade(&mut self, trade: &Trade) -> Result<()>;

    // --- Positions ---

    fn find_position(&mut self, user_id: UserId, market: &MarketId) -> Result<Option<Position>>;

    fn create_position(&mut self, position: &Position) -> Result<()>;

    /// Overwrite the position keyed by `(position.user_id, position.market)`.
    fn update_position(&mut self, position: &Position) -> Result<()>;

    // --- Credit ledger ---

    fn create_ledger_entry(&mut self, entry: &LedgerEntry) -> Result<()>;
}
