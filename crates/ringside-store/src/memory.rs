//! Snapshot-based in-memory store.
//!
//! A [`MemoryTx`] clones the committed state when it opens and works on the
//! copy, so it always reads its own writes and never exposes partial work.
//! The `&mut` borrow of the parent store keeps one transaction open at a time.

use std::collections::HashMap;

use ringside_types::{
    ExchangeStore, LedgerEntry, MarketId, Order, OrderId, Position, Result, RingsideError, Side,
    Trade, UserId,
};

#[derive(Debug, Clone, Default)]
struct State {
    orders: HashMap<OrderId, Order>,
    trades: Vec<Trade>,
    positions: HashMap<(UserId, MarketId), Position>,
    ledger: Vec<LedgerEntry>,
}

/// Committed exchange state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: State,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction over a snapshot of the committed state.
    pub fn begin(&mut self) -> MemoryTx<'_> {
        let working = self.state.clone();
        MemoryTx {
            store: self,
            working,
        }
    }

    /// Seed an order directly into committed state (fixtures, recovery).
    pub fn insert_order(&mut self, order: Order) -> Result<()> {
        if self.state.orders.contains_key(&order.id) {
            return Err(RingsideError::DuplicateOrder(order.id));
        }
        self.state.orders.insert(order.id, order);
        Ok(())
    }

    /// Seed a position directly into committed state.
    pub fn insert_position(&mut self, position: Position) {
        self.state
            .positions
            .insert((position.user_id, position.market.clone()), position);
    }

    // =================================================================
    // Read access (audit / tests)
    // =================================================================

    #[must_use]
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.state.orders.get(&id)
    }

    /// All orders, sorted by creation time then ID.
    #[must_use]
    pub fn orders(&self) -> Vec<&Order> {
        let mut all: Vec<&Order> = self.state.orders.values().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        all
    }

    /// Trades in insertion order.
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        &self.state.trades
    }

    #[must_use]
    pub fn position(&self, user_id: UserId, market: &MarketId) -> Option<Position> {
        self.state
            .positions
            .get(&(user_id, market.clone()))
            .cloned()
    }

    /// Ledger postings in insertion order.
    #[must_use]
    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.state.ledger
    }

    /// Net ledger balance for one participant, in cents.
    #[must_use]
    pub fn ledger_balance(&self, user_id: UserId) -> i64 {
        self.state
            .ledger
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.amount)
            .sum()
    }
}

/// An open transaction. Call [`commit`](Self::commit) to publish; drop to roll back.
#[derive(Debug)]
pub struct MemoryTx<'a> {
    store: &'a mut MemoryStore,
    working: State,
}

impl MemoryTx<'_> {
    /// Publish every write made through this handle.
    pub fn commit(self) {
        tracing::debug!(
            orders = self.working.orders.len(),
            trades = self.working.trades.len(),
            "Memory transaction committed"
        );
        self.store.state = self.working;
    }

    /// Discard every write made through this handle.
    pub fn rollback(self) {
        tracing::debug!("Memory transaction rolled back");
    }
}

impl ExchangeStore for MemoryTx<'_> {
    fn find_live_orders(&mut self, market: &MarketId, side: Side) -> Result<Vec<Order>> {
        Ok(self
            .working
            .orders
            .values()
            .filter(|o| o.market == *market && o.side == side && o.is_live())
            .cloned()
            .collect())
    }

    fn find_order(&mut self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.working.orders.get(&id).cloned())
    }

    fn create_order(&mut self, order: &Order) -> Result<()> {
        if self.working.orders.contains_key(&order.id) {
            return Err(RingsideError::DuplicateOrder(order.id));
        }
        self.working.orders.insert(order.id, order.clone());
        Ok(())
    }

    fn update_order(&mut self, order: &Order) -> Result<()> {
        let slot = self
            .working
            .orders
            .get_mut(&order.id)
            .ok_or(RingsideError::OrderNotFound(order.id))?;
        *slot = order.clone();
        Ok(())
    }

    fn create_trade(&mut self, trade: &Trade) -> Result<()> {
        self.working.trades.push(trade.clone());
        Ok(())
    }

    fn find_position(&mut self, user_id: UserId, market: &MarketId) -> Result<Option<Position>> {
        Ok(self
            .working
            .positions
            .get(&(user_id, market.clone()))
            .cloned())
    }

    fn create_position(&mut self, position: &Position) -> Result<()> {
        let key = (position.user_id, position.market.clone());
        if self.working.positions.contains_key(&key) {
            return Err(RingsideError::SerializationConflict(format!(
                "position for user {} in market {} already exists",
                position.user_id, position.market
            )));
        }
        self.working.positions.insert(key, position.clone());
        Ok(())
    }

    fn update_position(&mut self, position: &Position) -> Result<()> {
        let slot = self
            .working
            .positions
            .get_mut(&(position.user_id, position.market.clone()))
            .ok_or_else(|| RingsideError::PositionNotFound {
                user_id: position.user_id,
                market: position.market.clone(),
            })?;
        *slot = position.clone();
        Ok(())
    }

    fn create_ledger_entry(&mut self, entry: &LedgerEntry) -> Result<()> {
        self.working.ledger.push(entry.clone());
        Ok(())
    }
}
