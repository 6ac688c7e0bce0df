//! Error types for the Ringside exchange core.
//!
//! All errors use the `RS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 3xx: Position errors
//! - 5xx: Matching errors
//! - 6xx: Store errors
//! - 9xx: General / internal errors

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{MarketId, OrderId, Side, UserId};

/// Which exposure bound an order would breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitBound {
    /// Opening a position from flat.
    NewPosition,
    /// Adding to an existing position on the same side (total notional).
    SameSideTotal,
    /// The excess that flips an opposite position onto the new side.
    FlipExcess,
}

impl fmt::Display for LimitBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewPosition => write!(f, "new position notional"),
            Self::SameSideTotal => write!(f, "same-side total notional"),
            Self::FlipExcess => write!(f, "side-flip excess notional"),
        }
    }
}

/// Details of a rejected position-limit check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitViolation {
    pub user_id: UserId,
    pub bound: LimitBound,
    /// Notional the order would put at risk under `bound`, in cents.
    pub requested: i64,
    /// Cap that applied, in cents.
    pub limit: i64,
}

impl fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} exceeds limit {} for user {}",
            self.bound, self.requested, self.limit, self.user_id
        )
    }
}

/// Central error enum for all Ringside operations.
#[derive(Debug, Error)]
pub enum RingsideError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The order failed shape validation.
    #[error("RS_ERR_100: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// The requested order was not found in the store.
    #[error("RS_ERR_101: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// An order with this ID already exists.
    #[error("RS_ERR_102: Order already exists: {0}")]
    DuplicateOrder(OrderId),

    // =================================================================
    // Position Errors (3xx)
    // =================================================================
    /// The order would push the participant past their exposure cap.
    #[error("RS_ERR_300: Position limit exceeded: {0}")]
    PositionLimitExceeded(LimitViolation),

    /// A position expected to exist was not found.
    #[error("RS_ERR_301: Position not found for user {user_id} in market {market}")]
    PositionNotFound { user_id: UserId, market: MarketId },

    // =================================================================
    // Matching Errors (5xx)
    // =================================================================
    /// A MARKET order found no crossable liquidity at all.
    #[error("RS_ERR_500: No liquidity for MARKET {side} order in market {market}")]
    NoLiquidity { market: MarketId, side: Side },

    // =================================================================
    // Store Errors (6xx)
    // =================================================================
    /// The backing store could not be reached or failed the operation.
    #[error("RS_ERR_600: Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The transaction lost a serialization race; the caller may retry.
    #[error("RS_ERR_601: Serialization conflict: {0}")]
    SerializationConflict(String),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("RS_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("RS_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, out-of-range values, etc.).
    #[error("RS_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error("RS_ERR_903: I/O error: {0}")]
    Io(String),
}

impl RingsideError {
    /// The matching-engine domain error (MARKET order with no liquidity).
    #[must_use]
    pub fn is_matching_error(&self) -> bool {
        matches!(self, Self::NoLiquidity { .. })
    }

    /// The position-manager domain error.
    #[must_use]
    pub fn is_position_limit_error(&self) -> bool {
        matches!(self, Self::PositionLimitExceeded(_))
    }

    /// Whether a caller wrapping the transaction may retry from scratch.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SerializationConflict(_))
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, RingsideError>;

impl From<std::io::Error> for RingsideError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RingsideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
