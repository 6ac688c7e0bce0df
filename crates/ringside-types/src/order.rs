//! Order types for the Ringside exchange core.
//!
//! An [`OrderInput`] is what a caller hands the matching engine after it has
//! authenticated the participant and validated the request. An [`Order`] is
//! the persisted record: the resting remainder of a LIMIT order, or the
//! terminal bookkeeping of a fully filled or cancelled one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{BPS_DENOMINATOR, MAX_ORDER_QUANTITY, MAX_PRICE_CENTS};
use crate::{League, MarketId, OrderId, RingsideError, Result, Side, UserId, pricing};

/// The type of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limit => write!(f, "LIMIT"),
            Self::Market => write!(f, "MARKET"),
        }
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderStatus {
    Open,
    PartiallyFilled,
    Filled,
    Cancelled,
    Expired,
}

impl OrderStatus {
    /// OPEN and PARTIALLY_FILLED orders rest on the book and can be matched.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Open | Self::PartiallyFilled)
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        !self.is_live()
    }

    /// Status of a live order given how much of it has filled.
    #[must_use]
    pub fn for_fill_state(filled_qty: i64, remaining_qty: i64) -> Self {
        if remaining_qty == 0 {
            Self::Filled
        } else if filled_qty == 0 {
            Self::Open
        } else {
            Self::PartiallyFilled
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// A validated, authenticated order as handed to the matching engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderInput {
    /// Caller-assigned identity for the order record.
    pub id: OrderId,
    pub user_id: UserId,
    pub market: MarketId,
    pub league: League,
    pub side: Side,
    pub order_type: OrderType,
    /// Native price in cents (1..=99). Ignored for MARKET orders.
    pub price: i64,
    pub quantity: i64,
    /// Fee rate frozen for the life of this order, in basis points.
    pub fee_rate_bps: i64,
}

impl OrderInput {
    /// Shape checks the API boundary is expected to run before matching.
    ///
    /// # Errors
    /// Returns [`RingsideError::InvalidOrder`] describing the first failure.
    pub fn validate(&self) -> Result<()> {
        if self.quantity <= 0 {
            return Err(RingsideError::InvalidOrder {
                reason: format!("quantity must be positive, got {}", self.quantity),
            });
        }
        if self.quantity > MAX_ORDER_QUANTITY {
            return Err(RingsideError::InvalidOrder {
                reason: format!(
                    "quantity {} exceeds the per-order maximum {MAX_ORDER_QUANTITY}",
                    self.quantity
                ),
            });
        }
        if self.order_type == OrderType::Limit && !pricing::is_valid_price(self.price) {
            return Err(RingsideError::InvalidOrder {
                reason: format!("limit price must be within 1..=99 cents, got {}", self.price),
            });
        }
        if !(0..=BPS_DENOMINATOR).contains(&self.fee_rate_bps) {
            return Err(RingsideError::InvalidOrder {
                reason: format!("fee rate {} bps out of range", self.fee_rate_bps),
            });
        }
        Ok(())
    }

    /// Price used for exposure checks: the limit price, or the worst
    /// possible native price for a MARKET order.
    #[must_use]
    pub fn exposure_price(&self) -> i64 {
        match self.order_type {
            OrderType::Limit => self.price,
            OrderType::Market => MAX_PRICE_CENTS,
        }
    }
}

/// Persisted order record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub market: MarketId,
    pub league: League,
    pub side: Side,
    pub order_type: OrderType,
    pub status: OrderStatus,
    /// Native price in cents. Zero for MARKET orders.
    pub price: i64,
    pub quantity: i64,
    pub filled_qty: i64,
    pub remaining_qty: i64,
    /// Fee rate frozen at creation, in basis points.
    pub fee_rate_bps: i64,
    /// Fees accrued across every fill of this order, in cents.
    pub total_fees: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Build a fresh, unfilled order record from an input.
    #[must_use]
    pub fn from_input(input: &OrderInput, now: DateTime<Utc>) -> Self {
        let price = match input.order_type {
            OrderType::Limit => input.price,
            OrderType::Market => 0,
        };
        Self {
            id: input.id,
            user_id: input.user_id,
            market: input.market.clone(),
            league: input.league,
            side: input.side,
            order_type: input.order_type,
            status: OrderStatus::Open,
            price,
            quantity: input.quantity,
            filled_qty: 0,
            remaining_qty: input.quantity,
            fee_rate_bps: input.fee_rate_bps,
            total_fees: 0,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.remaining_qty == 0
    }

    /// `filled + remaining == quantity`, the book's conservation invariant.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.filled_qty + self.remaining_qty == self.quantity
            && self.filled_qty >= 0
            && self.remaining_qty >= 0
    }

    /// Record a fill against this order and recompute its status.
    ///
    /// `qty` must not exceed `remaining_qty`; the matcher guarantees this.
    pub fn apply_fill(&mut self, qty: i64, fee: i64, now: DateTime<Utc>) {
        debug_assert!(qty > 0 && qty <= self.remaining_qty);
        self.filled_qty += qty;
        self.remaining_qty -= qty;
        self.total_fees += fee;
        self.status = OrderStatus::for_fill_state(self.filled_qty, self.remaining_qty);
        self.updated_at = now;
    }

    /// Cancel the unfilled remainder. Filled and remaining quantities keep
    /// their true values for audit.
    pub fn cancel_remainder(&mut self, now: DateTime<Utc>) {
        self.status = OrderStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.updated_at = now;
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl OrderInput {
    pub fn dummy_limit(user_id: UserId, side: Side, price: i64, quantity: i64) -> Self {
        Self {
            id: OrderId::new(),
            user_id,
            market: MarketId::new("test-market"),
            league: League::Human,
            side,
            order_type: OrderType::Limit,
            price,
            quantity,
            fee_rate_bps: crate::constants::DEFAULT_LOCAL_HUMAN_FEE_BPS,
        }
    }

    pub fn dummy_market(user_id: UserId, side: Side, quantity: i64) -> Self {
        Self {
            order_type: OrderType::Market,
            price: 0,
            ..Self::dummy_limit(user_id, side, 0, quantity)
        }
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// A live resting LIMIT order on `test-market` created at `created_at`.
    pub fn dummy_resting(
        user_id: UserId,
        side: Side,
        price: i64,
        quantity: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut order = Self::from_input(
            &OrderInput::dummy_limit(user_id, side, price, quantity),
            created_at,
        );
        order.id = OrderId::new();
        order
    }
}
