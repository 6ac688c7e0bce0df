//! The matching engine.
//!
//! ```text
//! match_order(tx, input)
//!   1. load live opposite-side orders, sort by price desc / time asc
//!   2. plan fills (pure; skips self-matches, stops at non-crossing LIMIT)
//!   3. MARKET with no fills → NoLiquidity, nothing written
//!   4. persist the taker record (FILLED / resting / CANCELLED remainder)
//!   5. per fill: update maker, insert trade, debit maker, update maker position
//!   6. debit taker per fill, update taker position once with the aggregate
//! ```
//!
//! Every write goes through the caller's transaction. Nothing is retried
//! here; a serialization failure propagates and the caller may rerun the
//! whole call, which recomputes everything from the current book.

use chrono::{DateTime, Utc};
use ringside_fees::FeeEngine;
use ringside_positions::{
    LimitCheck, PositionFill, PositionManager, get_or_create_position, upsert_position,
};
use ringside_types::{
    ExchangeConfig, ExchangeStore, LedgerEntry, Order, OrderInput, OrderType, Position, Result,
    RingsideError, Tier, Trade, TradeId,
};

use crate::determinism::compute_fill_root;
use crate::planner::{FillPlan, PlannedFill, plan_fills};
use crate::priority::sort_book;

/// Market attributes the caller resolves before placing an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementContext {
    pub tier: Tier,
    /// Verified agent bankroll in cents; `None` for humans or unverified agents.
    pub agent_bankroll: Option<i64>,
}

/// Result of matching one incoming order.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Trades in execution order.
    pub fills: Vec<Trade>,
    /// The incoming order's record if it now rests on the book.
    pub resting_order: Option<Order>,
    /// The taker's position after all fills.
    pub position: Position,
    /// The incoming order's persisted record, whatever its final status.
    pub order: Order,
}

impl MatchOutcome {
    #[must_use]
    pub fn filled_qty(&self) -> i64 {
        self.order.filled_qty
    }
}

struct PricedFill<'a> {
    plan: &'a PlannedFill,
    maker_fee: i64,
    taker_fee: i64,
}

/// Matches incoming orders against the resting book.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    fees: FeeEngine,
    positions: PositionManager,
}

impl MatchingEngine {
    #[must_use]
    pub fn new(config: &ExchangeConfig) -> Self {
        Self {
            fees: FeeEngine::new(config),
            positions: PositionManager::new(config),
        }
    }

    #[must_use]
    pub fn fees(&self) -> &FeeEngine {
        &self.fees
    }

    #[must_use]
    pub fn positions(&self) -> &PositionManager {
        &self.positions
    }

    /// Validate, check exposure, then match.
    ///
    /// MARKET orders are limit-checked at the worst price they could pay.
    ///
    /// # Errors
    /// - [`RingsideError::InvalidOrder`] for malformed input
    /// - [`RingsideError::PositionLimitExceeded`] before any write
    /// - anything [`match_order`](Self::match_order) returns
    pub fn place_order<S>(
        &self,
        store: &mut S,
        input: &OrderInput,
        ctx: &PlacementContext,
    ) -> Result<MatchOutcome>
    where
        S: ExchangeStore + ?Sized,
    {
        input.validate()?;
        let existing = store.find_position(input.user_id, &input.market)?;
        self.positions.check_position_limit(&LimitCheck {
            user_id: input.user_id,
            existing: existing.as_ref(),
            order_side: input.side,
            order_quantity: input.quantity,
            order_price: input.exposure_price(),
            tier: ctx.tier,
            league: input.league,
            agent_bankroll: ctx.agent_bankroll,
        })?;
        self.match_order(store, input)
    }

    /// Match one pre-validated incoming order.
    ///
    /// # Errors
    /// - [`RingsideError::NoLiquidity`] if a MARKET order fills nothing;
    ///   no write has happened at that point
    /// - store errors, unchanged
    pub fn match_order<S>(&self, store: &mut S, input: &OrderInput) -> Result<MatchOutcome>
    where
        S: ExchangeStore + ?Sized,
    {
        let mut book = store.find_live_orders(&input.market, input.side.opposite())?;
        sort_book(&mut book);
        let plan = plan_fills(input, &book);

        if plan.is_empty() && input.order_type == OrderType::Market {
            tracing::warn!(
                order = %input.id,
                market = %input.market,
                side = %input.side,
                self_skipped = plan.self_matches_skipped,
                "MARKET order found no liquidity"
            );
            return Err(RingsideError::NoLiquidity {
                market: input.market.clone(),
                side: input.side,
            });
        }

        let now = Utc::now();
        let priced: Vec<PricedFill<'_>> = plan
            .fills
            .iter()
            .map(|fill| PricedFill {
                plan: fill,
                maker_fee: self.fees.fill_fee(
                    fill.maker.user_id,
                    fill.maker_cost,
                    fill.quantity,
                    fill.maker.fee_rate_bps,
                ),
                taker_fee: self.fees.fill_fee(
                    input.user_id,
                    fill.taker_cost,
                    fill.quantity,
                    input.fee_rate_bps,
                ),
            })
            .collect();

        // Final taker state is known up front; persist it before the trades
        // that reference it.
        let mut taker = Order::from_input(input, now);
        for fill in &priced {
            taker.apply_fill(fill.plan.quantity, fill.taker_fee, now);
        }
        if input.order_type == OrderType::Market && !taker.is_filled() {
            taker.cancel_remainder(now);
        }
        store.create_order(&taker)?;

        let mut trades = Vec::with_capacity(priced.len());
        let mut fill_seq: u64 = 0;
        for fill in &priced {
            let trade = self.execute_fill(store, &taker, fill, fill_seq, now)?;
            fill_seq += 1;
            trades.push(trade);
        }

        let position = self.settle_taker(store, input, &trades, &plan, now)?;
        let resting_order = taker.is_live().then(|| taker.clone());

        tracing::info!(
            order = %taker.id,
            market = %taker.market,
            side = %taker.side,
            order_type = %taker.order_type,
            fills = trades.len(),
            filled = taker.filled_qty,
            status = %taker.status,
            resting = resting_order.is_some(),
            fill_root = %hex::encode(compute_fill_root(&trades)),
            "Order matched"
        );

        Ok(MatchOutcome {
            fills: trades,
            resting_order,
            position,
            order: taker,
        })
    }

    /// Apply one fill to the maker side and record the trade.
    fn execute_fill<S>(
        &self,
        store: &mut S,
        taker: &Order,
        fill: &PricedFill<'_>,
        fill_seq: u64,
        now: DateTime<Utc>,
    ) -> Result<Trade>
    where
        S: ExchangeStore + ?Sized,
    {
        let planned = fill.plan;
        let mut maker = planned.maker.clone();
        maker.apply_fill(planned.quantity, fill.maker_fee, now);
        store.update_order(&maker)?;

        let trade = Trade {
            id: TradeId::deterministic(taker.id, fill_seq),
            market: taker.market.clone(),
            maker_order_id: maker.id,
            taker_order_id: taker.id,
            maker_user_id: maker.user_id,
            taker_user_id: taker.user_id,
            maker_side: maker.side,
            price: planned.trade_price,
            quantity: planned.quantity,
            maker_fee: fill.maker_fee,
            taker_fee: fill.taker_fee,
            executed_at: now,
        };
        store.create_trade(&trade)?;

        if !self.fees.is_market_maker(maker.user_id) {
            store.create_ledger_entry(&LedgerEntry::trade_debit(
                maker.user_id,
                maker.market.clone(),
                maker.id,
                trade.id,
                planned.maker_cost,
                planned.quantity,
                now,
            ))?;
        }

        upsert_position(
            &mut *store,
            &PositionFill {
                user_id: maker.user_id,
                market: maker.market.clone(),
                league: maker.league,
                side: maker.side,
                fill_qty: planned.quantity,
                fill_price: planned.maker_cost,
            },
        )?;

        tracing::debug!(
            trade_id = %trade.id,
            maker = %trade.maker_user_id,
            taker = %trade.taker_user_id,
            price = trade.price,
            qty = trade.quantity,
            maker_status = %maker.status,
            "Fill executed"
        );
        Ok(trade)
    }

    /// Post taker ledger debits and fold the aggregate fill into the taker's
    /// position.
    ///
    /// The position sees one fill of the total quantity at the half-up
    /// rounded average taker cost. When that fill closes or flips an
    /// existing position, realized P&L can differ from per-fill accounting
    /// by up to half a cent per contract closed. Holding 10 YES at 60 and
    /// closing through NO fills of 5 at 34 and 5 at 35 realizes 50 here
    /// (average 34.5 rounds to 35), where per-fill accounting gives 55.
    /// Ledger debits stay exact per fill.
    fn settle_taker<S>(
        &self,
        store: &mut S,
        input: &OrderInput,
        trades: &[Trade],
        plan: &FillPlan,
        now: DateTime<Utc>,
    ) -> Result<Position>
    where
        S: ExchangeStore + ?Sized,
    {
        if !self.fees.is_market_maker(input.user_id) {
            for (trade, fill) in trades.iter().zip(&plan.fills) {
                store.create_ledger_entry(&LedgerEntry::trade_debit(
                    input.user_id,
                    input.market.clone(),
                    input.id,
                    trade.id,
                    fill.taker_cost,
                    fill.quantity,
                    now,
                ))?;
            }
        }

        match plan.average_taker_cost() {
            Some(avg_cost) => upsert_position(
                &mut *store,
                &PositionFill {
                    user_id: input.user_id,
                    market: input.market.clone(),
                    league: input.league,
                    side: input.side,
                    fill_qty: plan.filled_qty(),
                    fill_price: avg_cost,
                },
            ),
            None => get_or_create_position(
                &mut *store,
                input.user_id,
                &input.market,
                input.league,
                input.side,
            ),
        }
    }
}
