//! Integration test: order placement end to end
//!
//! validate → limit check → match → persist
//!
//! Every scenario runs through `SharedStore::transaction` so commit and
//! rollback behave as they would behind the API.

use chrono::{Duration, Utc};
use ringside_matching::{MatchOutcome, MatchingEngine, PlacementContext};
use ringside_store::{MemoryStore, SharedStore};
use ringside_types::*;
use tracing_subscriber::EnvFilter;

const LOCAL: PlacementContext = PlacementContext {
    tier: Tier::Local,
    agent_bankroll: None,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn market() -> MarketId {
    MarketId::new("test-market")
}

fn shared_with(orders: Vec<Order>) -> SharedStore {
    let mut store = MemoryStore::new();
    for order in orders {
        store.insert_order(order).unwrap();
    }
    SharedStore::new(store)
}

fn place(
    shared: &SharedStore,
    engine: &MatchingEngine,
    input: &OrderInput,
) -> Result<MatchOutcome> {
    shared.transaction(|tx| engine.place_order(tx, input, &LOCAL))
}

#[test]
fn full_cross_at_complementary_price() {
    init_tracing();
    let engine = MatchingEngine::new(&ExchangeConfig::default());
    let maker = Order::dummy_resting(UserId::new(), Side::No, 42, 10, Utc::now());
    let shared = shared_with(vec![maker.clone()]);
    let taker = UserId::new();
    let input = OrderInput::dummy_limit(taker, Side::Yes, 60, 10);

    let outcome = place(&shared, &engine, &input).unwrap();

    assert_eq!(outcome.fills.len(), 1);
    let trade = &outcome.fills[0];
    assert_eq!(trade.price, 58);
    assert_eq!(trade.quantity, 10);
    assert_eq!(trade.taker_fee, 11);
    assert_eq!(trade.maker_fee, 8);
    assert_eq!(trade.maker_side, Side::No);
    assert_eq!(trade.taker_side(), Side::Yes);
    assert!(outcome.resting_order.is_none());
    assert_eq!(outcome.order.status, OrderStatus::Filled);

    shared
        .read(|s| {
            let maker_after = s.order(maker.id).unwrap();
            assert_eq!(maker_after.status, OrderStatus::Filled);
            assert_eq!(maker_after.remaining_qty, 0);
            assert_eq!(maker_after.total_fees, 8);
            assert_eq!(s.trades().len(), 1);

            let taker_pos = s.position(taker, &market()).unwrap();
            assert_eq!(
                (taker_pos.side, taker_pos.quantity, taker_pos.avg_cost_basis),
                (Side::Yes, 10, 58)
            );
            let maker_pos = s.position(maker.user_id, &market()).unwrap();
            assert_eq!(
                (maker_pos.side, maker_pos.quantity, maker_pos.avg_cost_basis),
                (Side::No, 10, 42)
            );

            assert_eq!(s.ledger_balance(taker), -580);
            assert_eq!(s.ledger_balance(maker.user_id), -420);
        })
        .unwrap();
}

#[test]
fn price_then_time_priority_across_two_makers() {
    init_tracing();
    let engine = MatchingEngine::new(&ExchangeConfig::default());
    let t0 = Utc::now() - Duration::minutes(5);
    let early = Order::dummy_resting(UserId::new(), Side::No, 45, 3, t0);
    let late = Order::dummy_resting(UserId::new(), Side::No, 42, 5, t0 + Duration::seconds(30));
    let shared = shared_with(vec![late.clone(), early.clone()]);
    let input = OrderInput::dummy_limit(UserId::new(), Side::Yes, 60, 7);

    let outcome = place(&shared, &engine, &input).unwrap();

    let fills: Vec<_> = outcome
        .fills
        .iter()
        .map(|t| (t.maker_order_id, t.price, t.quantity))
        .collect();
    assert_eq!(fills, vec![(early.id, 55, 3), (late.id, 58, 4)]);
    assert_eq!(outcome.filled_qty(), 7);
    assert!(outcome.resting_order.is_none());

    shared
        .read(|s| {
            let late_after = s.order(late.id).unwrap();
            assert_eq!(late_after.status, OrderStatus::PartiallyFilled);
            assert_eq!((late_after.filled_qty, late_after.remaining_qty), (4, 1));
            assert!(late_after.is_consistent());
        })
        .unwrap();
}

#[test]
fn market_on_empty_book_is_rejected() {
    init_tracing();
    let engine = MatchingEngine::new(&ExchangeConfig::default());
    let shared = SharedStore::default();
    let input = OrderInput::dummy_market(UserId::new(), Side::Yes, 10);

    let err = place(&shared, &engine, &input).unwrap_err();

    assert!(err.is_matching_error());
    assert!(err.to_string().starts_with("RS_ERR_500"));
    shared
        .read(|s| {
            assert!(s.orders().is_empty());
            assert!(s.trades().is_empty());
            assert!(s.ledger().is_empty());
        })
        .unwrap();
}

#[test]
fn market_partial_fill_cancels_remainder() {
    init_tracing();
    let engine = MatchingEngine::new(&ExchangeConfig::default());
    let maker = Order::dummy_resting(UserId::new(), Side::No, 40, 3, Utc::now());
    let shared = shared_with(vec![maker]);
    let input = OrderInput::dummy_market(UserId::new(), Side::Yes, 10);

    let outcome = place(&shared, &engine, &input).unwrap();

    assert_eq!(outcome.order.status, OrderStatus::Cancelled);
    assert_eq!(outcome.order.filled_qty, 3);
    assert_eq!(outcome.order.remaining_qty, 7);
    assert!(outcome.order.cancelled_at.is_some());
    assert!(outcome.resting_order.is_none());
    assert_eq!(outcome.fills[0].price, 60);

    shared
        .read(|s| {
            assert!(s.orders().iter().all(|o| !o.is_live()));
            assert_eq!(s.order(input.id).unwrap().status, OrderStatus::Cancelled);
        })
        .unwrap();
}

#[test]
fn opposite_fill_flips_position() {
    init_tracing();
    let engine = MatchingEngine::new(&ExchangeConfig::default());
    let holder = UserId::new();
    let maker = Order::dummy_resting(UserId::new(), Side::Yes, 65, 15, Utc::now());

    let mut store = MemoryStore::new();
    store.insert_order(maker).unwrap();
    let mut held = Position::empty(holder, market(), League::Human, Side::Yes, Utc::now());
    held.quantity = 10;
    held.avg_cost_basis = 60;
    store.insert_position(held);
    let shared = SharedStore::new(store);

    // Paying 35 for NO means taking the YES order resting at 65.
    let input = OrderInput::dummy_limit(holder, Side::No, 35, 15);
    let outcome = place(&shared, &engine, &input).unwrap();

    assert_eq!(outcome.fills[0].price, 65);
    let position = outcome.position;
    assert_eq!(position.side, Side::No);
    assert_eq!(position.quantity, 5);
    assert_eq!(position.avg_cost_basis, 35);
    assert_eq!(position.realized_pnl, 50);
}

#[test]
fn local_limit_gates_new_position() {
    init_tracing();
    let engine = MatchingEngine::new(&ExchangeConfig::default());
    let shared = SharedStore::default();
    let user = UserId::new();

    let too_big = OrderInput::dummy_limit(user, Side::Yes, 60, 200);
    let err = place(&shared, &engine, &too_big).unwrap_err();
    assert!(err.is_position_limit_error());
    match err {
        RingsideError::PositionLimitExceeded(violation) => {
            assert_eq!(violation.bound, LimitBound::NewPosition);
            assert_eq!(violation.requested, 12_000);
            assert_eq!(violation.limit, 10_000);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(shared.read(|s| s.orders().is_empty()).unwrap());

    let fits = OrderInput::dummy_limit(user, Side::Yes, 60, 100);
    let outcome = place(&shared, &engine, &fits).unwrap();
    assert_eq!(outcome.resting_order.map(|o| o.id), Some(fits.id));
}

#[test]
fn oversized_quantity_rejected_before_any_write() {
    init_tracing();
    let engine = MatchingEngine::new(&ExchangeConfig::default());
    let shared = SharedStore::default();
    let input = OrderInput::dummy_limit(UserId::new(), Side::Yes, 60, i64::MAX / 10);

    let err = place(&shared, &engine, &input).unwrap_err();

    assert!(matches!(err, RingsideError::InvalidOrder { .. }));
    shared
        .read(|s| {
            assert!(s.orders().is_empty());
            assert!(s.position(input.user_id, &market()).is_none());
        })
        .unwrap();
}

#[test]
fn market_maker_pays_no_fee_and_posts_no_ledger() {
    init_tracing();
    let mm = UserId::new();
    let engine = MatchingEngine::new(&ExchangeConfig::with_market_maker(mm));
    let maker = Order::dummy_resting(mm, Side::No, 42, 10, Utc::now());
    let shared = shared_with(vec![maker]);
    let taker = UserId::new();
    let input = OrderInput::dummy_limit(taker, Side::Yes, 60, 10);

    let outcome = place(&shared, &engine, &input).unwrap();

    assert_eq!(outcome.fills[0].maker_fee, 0);
    assert_eq!(outcome.fills[0].taker_fee, 11);
    shared
        .read(|s| {
            assert_eq!(s.ledger_balance(mm), 0);
            assert!(s.ledger().iter().all(|e| e.user_id == taker));
            // The market maker still carries the inventory.
            assert_eq!(s.position(mm, &market()).unwrap().quantity, 10);
        })
        .unwrap();
}

#[test]
fn market_maker_as_taker_is_fee_free() {
    init_tracing();
    let mm = UserId::new();
    let engine = MatchingEngine::new(&ExchangeConfig::with_market_maker(mm));
    let maker = Order::dummy_resting(UserId::new(), Side::Yes, 70, 5, Utc::now());
    let shared = shared_with(vec![maker.clone()]);
    let input = OrderInput::dummy_limit(mm, Side::No, 30, 5);

    let outcome = place(&shared, &engine, &input).unwrap();

    assert_eq!(outcome.fills[0].taker_fee, 0);
    assert_eq!(outcome.order.total_fees, 0);
    // floor(70 × 5 × 0.02) = 7
    assert_eq!(outcome.fills[0].maker_fee, 7);
    shared
        .read(|s| {
            assert_eq!(s.ledger_balance(mm), 0);
            assert_eq!(s.ledger_balance(maker.user_id), -350);
        })
        .unwrap();
}

#[test]
fn own_resting_order_is_never_matched() {
    init_tracing();
    let engine = MatchingEngine::new(&ExchangeConfig::default());
    let me = UserId::new();
    let t0 = Utc::now() - Duration::seconds(10);
    let mine = Order::dummy_resting(me, Side::No, 50, 5, t0);
    let theirs = Order::dummy_resting(UserId::new(), Side::No, 45, 2, t0);
    let shared = shared_with(vec![mine.clone(), theirs.clone()]);
    let input = OrderInput::dummy_limit(me, Side::Yes, 60, 5);

    let outcome = place(&shared, &engine, &input).unwrap();

    assert_eq!(outcome.fills.len(), 1);
    assert_eq!(outcome.fills[0].maker_order_id, theirs.id);
    assert_eq!(outcome.order.status, OrderStatus::PartiallyFilled);
    assert_eq!(outcome.resting_order.map(|o| o.remaining_qty), Some(3));
    shared
        .read(|s| {
            let untouched = s.order(mine.id).unwrap();
            assert_eq!(untouched.status, OrderStatus::Open);
            assert_eq!(untouched.remaining_qty, 5);
            assert!(s.trades().iter().all(|t| t.maker_user_id != t.taker_user_id));
        })
        .unwrap();
}

#[test]
fn maker_keeps_fee_rate_frozen_at_creation() {
    init_tracing();
    let engine = MatchingEngine::new(&ExchangeConfig::default());
    let mut maker = Order::dummy_resting(UserId::new(), Side::No, 50, 10, Utc::now());
    maker.fee_rate_bps = 50;
    let shared = shared_with(vec![maker]);
    let input = OrderInput::dummy_limit(UserId::new(), Side::Yes, 50, 10);

    let outcome = place(&shared, &engine, &input).unwrap();

    // 50 × 10 × 0.005 = 2.5 → 2 for the maker; 50 × 10 × 0.02 = 10 for the taker
    assert_eq!(outcome.fills[0].maker_fee, 2);
    assert_eq!(outcome.fills[0].taker_fee, 10);
}
