//! Pure fill planning.
//!
//! Decides which resting orders an incoming order fills and by how much,
//! without touching the store. The engine persists a plan only after it is
//! complete, so a MARKET order with no liquidity fails before any write.
//!
//! ## Self-Match Prevention
//!
//! Resting orders owned by the incoming order's user are skipped, not
//! consumed; matching continues with the next candidate.

use ringside_types::{Order, OrderInput, OrderType, pricing};

/// One planned match against a resting order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFill {
    /// The resting order as it stood before this fill.
    pub maker: Order,
    pub quantity: i64,
    /// Native price per contract paid by the maker.
    pub maker_cost: i64,
    /// Native price per contract paid by the taker; `maker_cost + taker_cost == 100`.
    pub taker_cost: i64,
    /// YES-equivalent trade price.
    pub trade_price: i64,
}

/// The outcome of walking the book for one incoming order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillPlan {
    pub fills: Vec<PlannedFill>,
    /// Same-user candidates passed over.
    pub self_matches_skipped: usize,
}

impl FillPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }

    #[must_use]
    pub fn filled_qty(&self) -> i64 {
        self.fills.iter().map(|f| f.quantity).sum()
    }

    /// Total taker cost across fills, excluding fees, in cents.
    #[must_use]
    pub fn taker_notional(&self) -> i64 {
        self.fills.iter().map(|f| f.taker_cost * f.quantity).sum()
    }

    /// Volume-weighted taker cost per contract, halves rounded up.
    /// `None` when nothing filled.
    #[must_use]
    pub fn average_taker_cost(&self) -> Option<i64> {
        let qty = self.filled_qty();
        if qty == 0 {
            return None;
        }
        Some((2 * self.taker_notional() + qty).div_euclid(2 * qty))
    }
}

/// Walk `book` (already in priority order, opposite side to `input`) and
/// plan fills for `input`.
///
/// LIMIT orders stop at the first non-crossing price; since the book is
/// price-descending nothing after it crosses either. MARKET orders take
/// everything available.
#[must_use]
pub fn plan_fills(input: &OrderInput, book: &[Order]) -> FillPlan {
    let min_cross = pricing::min_cross_price(input.order_type, input.price);
    let mut remaining = input.quantity;
    let mut plan = FillPlan::default();

    for maker in book {
        if remaining == 0 {
            break;
        }
        if input.order_type == OrderType::Limit && !pricing::crosses(min_cross, maker.price) {
            break;
        }
        if !maker.is_live() || maker.remaining_qty <= 0 {
            continue;
        }
        if maker.user_id == input.user_id {
            tracing::warn!(
                user = %input.user_id,
                taker_order = %input.id,
                maker_order = %maker.id,
                "Self-match skipped: same user on both sides"
            );
            plan.self_matches_skipped += 1;
            continue;
        }

        let quantity = remaining.min(maker.remaining_qty);
        let (maker_cost, taker_cost) = pricing::fill_costs(maker.price);
        plan.fills.push(PlannedFill {
            maker: maker.clone(),
            quantity,
            maker_cost,
            taker_cost,
            trade_price: pricing::yes_equivalent(maker.side, maker.price),
        });
        remaining -= quantity;
    }

    plan
}
