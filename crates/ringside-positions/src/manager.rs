//! Position accounting.
//!
//! Every fill is folded into the participant's `(user, market)` position:
//!
//! - **same side**: quantity grows, average cost is re-weighted (rounded
//!   half-up to whole cents)
//! - **opposite side, smaller**: partial close, realized P&L on the fill
//! - **opposite side, equal**: exact close, quantity 0, side and cost kept
//! - **opposite side, larger**: close everything held, flip to the new side
//!   with the excess at the fill price
//!
//! Fees are not part of cost basis or realized P&L.

use chrono::{DateTime, Utc};
use ringside_types::{ExchangeStore, League, MarketId, Position, Result, Side, UserId, pricing};

/// One fill as seen by the position manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionFill {
    pub user_id: UserId,
    pub market: MarketId,
    pub league: League,
    /// Side the participant acquired.
    pub side: Side,
    pub fill_qty: i64,
    /// Native price paid per contract, in cents.
    pub fill_price: i64,
}

/// Profit from closing `quantity` contracts held at `entry_cost_basis` by
/// acquiring the complementary side at `exit_price`.
///
/// Side-agnostic: `100 - entry_cost_basis` is the break-even complement of
/// the original entry whichever side it was.
#[must_use]
pub fn compute_exit_pnl(quantity: i64, exit_price: i64, entry_cost_basis: i64) -> i64 {
    quantity * (pricing::complement(entry_cost_basis) - exit_price)
}

/// `round((held × avg + qty × price) / (held + qty))`, halves rounded up.
#[must_use]
pub fn weighted_average_cost(
    held_qty: i64,
    held_avg: i64,
    fill_qty: i64,
    fill_price: i64,
) -> i64 {
    let total_qty = held_qty + fill_qty;
    if total_qty == 0 {
        return held_avg;
    }
    let total_cost = held_qty * held_avg + fill_qty * fill_price;
    (2 * total_cost + total_qty).div_euclid(2 * total_qty)
}

/// Fold a fill into `position` in place. Returns the realized P&L delta.
pub fn apply_fill(
    position: &mut Position,
    side: Side,
    fill_qty: i64,
    fill_price: i64,
    now: DateTime<Utc>,
) -> i64 {
    let held = position.quantity;
    let mut realized = 0;

    if side == position.side {
        position.avg_cost_basis =
            weighted_average_cost(held, position.avg_cost_basis, fill_qty, fill_price);
        position.quantity = held + fill_qty;
    } else if fill_qty <= held {
        realized = compute_exit_pnl(fill_qty, fill_price, position.avg_cost_basis);
        position.quantity = held - fill_qty;
    } else {
        realized = compute_exit_pnl(held, fill_price, position.avg_cost_basis);
        position.side = side;
        position.quantity = fill_qty - held;
        position.avg_cost_basis = fill_price;
    }

    position.realized_pnl += realized;
    position.updated_at = now;
    realized
}

/// Apply a fill to the stored position, creating it on first fill.
pub fn upsert_position<S>(store: &mut S, fill: &PositionFill) -> Result<Position>
where
    S: ExchangeStore + ?Sized,
{
    let now = Utc::now();

    let Some(mut position) = store.find_position(fill.user_id, &fill.market)? else {
        let mut position = Position::empty(
            fill.user_id,
            fill.market.clone(),
            fill.league,
            fill.side,
            now,
        );
        position.quantity = fill.fill_qty;
        position.avg_cost_basis = fill.fill_price;
        store.create_position(&position)?;
        tracing::debug!(
            user = %fill.user_id,
            market = %fill.market,
            side = %fill.side,
            qty = fill.fill_qty,
            price = fill.fill_price,
            "Position opened"
        );
        return Ok(position);
    };

    let realized = apply_fill(&mut position, fill.side, fill.fill_qty, fill.fill_price, now);
    store.update_position(&position)?;

    tracing::debug!(
        user = %fill.user_id,
        market = %fill.market,
        side = %position.side,
        qty = position.quantity,
        avg = position.avg_cost_basis,
        realized,
        "Position updated"
    );
    Ok(position)
}

/// Return the stored position, creating an empty one if none exists.
pub fn get_or_create_position<S>(
    store: &mut S,
    user_id: UserId,
    market: &MarketId,
    league: League,
    side: Side,
) -> Result<Position>
where
    S: ExchangeStore + ?Sized,
{
    if let Some(position) = store.find_position(user_id, market)? {
        return Ok(position);
    }
    let position = Position::empty(user_id, market.clone(), league, side, Utc::now());
    store.create_position(&position)?;
    Ok(position)
}
