//! Resting-order priority.
//!
//! Candidates on the opposite side are ranked by their own quoted price,
//! highest first, then by creation time, oldest first. A higher resting
//! price on the opposite side is always a better YES-equivalent price for
//! the taker, so the same comparator serves both sides of the book.
//!
//! Order IDs break exact timestamp ties; they are UUIDv7 and therefore
//! arrival-ordered.

use std::cmp::Ordering;

use ringside_types::Order;

/// `Less` means `a` is matched before `b`.
#[must_use]
pub fn resting_priority(a: &Order, b: &Order) -> Ordering {
    b.price
        .cmp(&a.price)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort resting candidates into matching order.
pub fn sort_book(orders: &mut [Order]) {
    orders.sort_by(resting_priority);
}
