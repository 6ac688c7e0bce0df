//! Replay verification.
//!
//! Matching is a pure function of the incoming order and the book it sees,
//! so replaying an order against the same book must produce the same fills.
//! The fill root is a SHA-256 digest over the ordered trades that lets a
//! replay be compared without diffing full payloads.

use ringside_types::Trade;
use sha2::{Digest, Sha256};

/// Hash the economically meaningful fields of `trades`, in order.
///
/// Execution timestamps are excluded; they differ between replays.
#[must_use]
pub fn compute_fill_root(trades: &[Trade]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"ringside:fill_root:v1:");
    hasher.update((trades.len() as u64).to_le_bytes());

    for trade in trades {
        hasher.update(trade.id.0.as_bytes());
        let market = trade.market.as_str().as_bytes();
        hasher.update((market.len() as u64).to_le_bytes());
        hasher.update(market);
        hasher.update(trade.maker_order_id.0.as_bytes());
        hasher.update(trade.taker_order_id.0.as_bytes());
        hasher.update(trade.maker_user_id.0.as_bytes());
        hasher.update(trade.taker_user_id.0.as_bytes());
        hasher.update(trade.price.to_le_bytes());
        hasher.update(trade.quantity.to_le_bytes());
        hasher.update(trade.maker_fee.to_le_bytes());
        hasher.update(trade.taker_fee.to_le_bytes());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

#[must_use]
pub fn verify_fill_root(trades: &[Trade], expected_root: &[u8; 32]) -> bool {
    compute_fill_root(trades) == *expected_root
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use ringside_types::*;

    use super::*;

    fn make_trade(seq: u64, price: i64) -> Trade {
        let taker = OrderId::from_bytes([1; 16]);
        Trade {
            id: TradeId::deterministic(taker, seq),
            market: MarketId::new("bout-3"),
            maker_order_id: OrderId::from_bytes([3; 16]),
            taker_order_id: taker,
            maker_user_id: UserId::from_bytes([4; 16]),
            taker_user_id: UserId::from_bytes([2; 16]),
            maker_side: Side::No,
            price,
            quantity: 1,
            maker_fee: 0,
            taker_fee: 1,
            executed_at: Utc::now(),
        }
    }

    #[test]
    fn same_trades_same_root() {
        let a = vec![make_trade(0, 58), make_trade(1, 55)];
        let mut b = a.clone();
        for t in &mut b {
            t.executed_at = Utc::now() + chrono::Duration::hours(1);
        }
        assert_eq!(compute_fill_root(&a), compute_fill_root(&b));
    }

    #[test]
    fn price_change_changes_root() {
        assert_ne!(
            compute_fill_root(&[make_trade(0, 58)]),
            compute_fill_root(&[make_trade(0, 57)])
        );
    }

    #[test]
    fn order_matters() {
        let t1 = make_trade(0, 58);
        let t2 = make_trade(1, 55);
        assert_ne!(
            compute_fill_root(&[t1.clone(), t2.clone()]),
            compute_fill_root(&[t2, t1])
        );
    }

    #[test]
    fn market_key_is_length_prefixed() {
        let trade = make_trade(0, 58);
        let mut hasher = Sha256::new();
        hasher.update(b"ringside:fill_root:v1:");
        hasher.update(1u64.to_le_bytes());
        hasher.update(trade.id.0.as_bytes());
        hasher.update(6u64.to_le_bytes());
        hasher.update(b"bout-3");
        for id in [trade.maker_order_id.0, trade.taker_order_id.0] {
            hasher.update(id.as_bytes());
        }
        for id in [trade.maker_user_id.0, trade.taker_user_id.0] {
            hasher.update(id.as_bytes());
        }
        for n in [trade.price, trade.quantity, trade.maker_fee, trade.taker_fee] {
            hasher.update(n.to_le_bytes());
        }
        let expected: [u8; 32] = hasher.finalize().into();
        assert_eq!(compute_fill_root(&[trade]), expected);
    }

    #[test]
    fn verify_roundtrip() {
        let trades = vec![make_trade(0, 58)];
        let root = compute_fill_root(&trades);
        assert!(verify_fill_root(&trades, &root));
        assert!(!verify_fill_root(&trades, &[0xAB; 32]));
    }
}
