//! Complementary pricing.
//!
//! A YES contract and a NO contract on the same event pay 100 cents between
//! them, so a YES price `p` and a NO price `100 - p` describe the same trade.
//! Every crossing check, trade price and P&L computation in the workspace
//! goes through these functions rather than re-deriving `100 - x` locally.
//!
//! Terminology:
//! - **native price**: the price quoted on the order's own side.
//! - **YES-equivalent price**: the same economics expressed as a YES price.

use crate::constants::{MAX_PRICE_CENTS, MIN_PRICE_CENTS, PAYOUT_CENTS};
use crate::{OrderType, Side};

/// The complementary price: what the other side pays for the same contract pair.
#[must_use]
pub fn complement(price: i64) -> i64 {
    PAYOUT_CENTS - price
}

/// Convert a side-native price into its YES-equivalent price.
#[must_use]
pub fn yes_equivalent(side: Side, native: i64) -> i64 {
    match side {
        Side::Yes => native,
        Side::No => complement(native),
    }
}

/// Convert a YES-equivalent price into the price native to `side`.
#[must_use]
pub fn native_price(side: Side, yes_price: i64) -> i64 {
    match side {
        Side::Yes => yes_price,
        Side::No => complement(yes_price),
    }
}

/// Whether `price` is a quotable price (1..=99).
#[must_use]
pub fn is_valid_price(price: i64) -> bool {
    (MIN_PRICE_CENTS..=MAX_PRICE_CENTS).contains(&price)
}

/// Lowest opposite-side resting price an incoming order crosses.
///
/// A LIMIT at `P` crosses any opposite resting order at `R >= 100 - P`.
/// A MARKET order crosses everything.
#[must_use]
pub fn min_cross_price(order_type: OrderType, limit_price: i64) -> i64 {
    match order_type {
        OrderType::Limit => complement(limit_price),
        OrderType::Market => 0,
    }
}

/// Whether a resting order quoted at `resting_price` crosses an incoming
/// order whose minimum cross price is `min_cross`.
#[must_use]
pub fn crosses(min_cross: i64, resting_price: i64) -> bool {
    resting_price >= min_cross
}

/// Maker and taker costs for a fill against a resting order at `maker_price`.
///
/// Returns `(maker_cost, taker_cost)`; the two always sum to the payout.
#[must_use]
pub fn fill_costs(maker_price: i64) -> (i64, i64) {
    (maker_price, complement(maker_price))
}
