//! Integration test: replay determinism and book invariants
//!
//! Replaying the same orders against the same starting book must produce
//! the same trades, fee for fee, and therefore the same fill root. A seeded
//! random order flow checks the invariants that must hold after every
//! placement.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ringside_matching::{MatchingEngine, PlacementContext, compute_fill_root, verify_fill_root};
use ringside_store::{MemoryStore, SharedStore};
use ringside_types::*;

fn fixed_book() -> Vec<Order> {
    let t0 = Utc::now() - Duration::hours(1);
    let mut orders = Vec::new();
    for (i, (side, price, qty)) in [
        (Side::No, 45, 3),
        (Side::No, 42, 5),
        (Side::No, 42, 4),
        (Side::No, 30, 20),
        (Side::Yes, 20, 6),
    ]
    .into_iter()
    .enumerate()
    {
        let mut order = Order::dummy_resting(UserId::new(), side, price, qty, t0);
        order.created_at = t0 + Duration::seconds(i64::try_from(i).unwrap());
        orders.push(order);
    }
    orders
}

fn replay(book: &[Order], inputs: &[OrderInput]) -> Vec<Trade> {
    let engine = MatchingEngine::new(&ExchangeConfig::default());
    let mut store = MemoryStore::new();
    for order in book {
        store.insert_order(order.clone()).unwrap();
    }
    let mut trades = Vec::new();
    for input in inputs {
        let mut tx = store.begin();
        let outcome = engine.match_order(&mut tx, input).unwrap();
        tx.commit();
        trades.extend(outcome.fills);
    }
    trades
}

#[test]
fn replay_produces_identical_fill_root() {
    let book = fixed_book();
    let inputs = vec![
        OrderInput::dummy_limit(UserId::new(), Side::Yes, 60, 7),
        OrderInput::dummy_market(UserId::new(), Side::Yes, 10),
        OrderInput::dummy_limit(UserId::new(), Side::No, 85, 2),
    ];

    let first = replay(&book, &inputs);
    let second = replay(&book, &inputs);

    assert!(!first.is_empty());
    let root = compute_fill_root(&first);
    assert_eq!(
        root,
        compute_fill_root(&second),
        "Replaying the same orders against the same book MUST produce the same fill root"
    );
    assert!(verify_fill_root(&second, &root));

    let ids_a: Vec<_> = first.iter().map(|t| t.id).collect();
    let ids_b: Vec<_> = second.iter().map(|t| t.id).collect();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn different_book_different_root() {
    let book = fixed_book();
    let mut shifted = book.clone();
    shifted[0].price = 44;
    let inputs = vec![OrderInput::dummy_limit(UserId::new(), Side::Yes, 60, 7)];

    assert_ne!(
        compute_fill_root(&replay(&book, &inputs)),
        compute_fill_root(&replay(&shifted, &inputs))
    );
}

#[test]
fn seeded_order_flow_preserves_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5249_4e47);
    let mm = UserId::new();
    let users: Vec<UserId> = std::iter::once(mm)
        .chain((0..5).map(|_| UserId::new()))
        .collect();
    let engine = MatchingEngine::new(&ExchangeConfig::with_market_maker(mm));
    let shared = SharedStore::default();
    let ctx = PlacementContext {
        tier: Tier::Local,
        agent_bankroll: None,
    };

    let mut placed = 0;
    for _ in 0..300 {
        let user = users[rng.gen_range(0..users.len())];
        let side = if rng.gen_bool(0.5) { Side::Yes } else { Side::No };
        let qty = rng.gen_range(1..=25);
        let mut input = if rng.gen_bool(0.2) {
            OrderInput::dummy_market(user, side, qty)
        } else {
            OrderInput::dummy_limit(user, side, rng.gen_range(1..=99), qty)
        };
        input.fee_rate_bps = engine.fees().fee_rate_for(ctx.tier, input.league, user);

        match shared.transaction(|tx| engine.place_order(tx, &input, &ctx)) {
            Ok(outcome) => {
                placed += 1;
                assert!(outcome.order.is_consistent());
                assert_eq!(
                    outcome.fills.iter().map(|t| t.quantity).sum::<i64>(),
                    outcome.order.filled_qty
                );
            }
            Err(err) => assert!(
                err.is_matching_error() || err.is_position_limit_error(),
                "unexpected error: {err}"
            ),
        }
    }
    assert!(placed > 0);

    shared
        .read(|s| {
            let trades = s.trades();
            assert!(!trades.is_empty());

            for trade in trades {
                assert!((1..=99).contains(&trade.price));
                assert_eq!(trade.maker_cost() + trade.taker_cost(), 100);
                assert_ne!(trade.maker_user_id, trade.taker_user_id);
                if trade.maker_user_id == mm {
                    assert_eq!(trade.maker_fee, 0);
                }
                if trade.taker_user_id == mm {
                    assert_eq!(trade.taker_fee, 0);
                }
            }

            let orders = s.orders();
            for order in &orders {
                assert!(order.is_consistent(), "inconsistent order {}", order.id);
                let traded: i64 = trades
                    .iter()
                    .filter(|t| t.maker_order_id == order.id || t.taker_order_id == order.id)
                    .map(|t| t.quantity)
                    .sum();
                assert_eq!(traded, order.filled_qty, "order {}", order.id);
                if order.order_type == OrderType::Market {
                    assert!(!order.is_live());
                }
            }

            // No two live orders from different users may still cross.
            let live: Vec<_> = orders.iter().filter(|o| o.is_live()).collect();
            for yes in live.iter().filter(|o| o.side == Side::Yes) {
                for no in live.iter().filter(|o| o.side == Side::No) {
                    if yes.user_id != no.user_id {
                        assert!(
                            yes.price + no.price < 100,
                            "crossed book: YES {} vs NO {}",
                            yes.price,
                            no.price
                        );
                    }
                }
            }

            assert_eq!(s.ledger_balance(mm), 0);
            let debited: i64 = s.ledger().iter().map(|e| e.amount).sum();
            let expected: i64 = trades
                .iter()
                .map(|t| {
                    let maker = if t.maker_user_id == mm { 0 } else { t.maker_cost() };
                    let taker = if t.taker_user_id == mm { 0 } else { t.taker_cost() };
                    (maker + taker) * t.quantity
                })
                .sum();
            assert_eq!(debited, -expected);
        })
        .unwrap();
}
