//! Exposure limits: a hard gate run before an order is matched.
//!
//! The cap bounds total notional cost (`quantity × price`) a participant may
//! hold on one side of one market. Reducing an opposite position never
//! needs a check; flipping only puts the excess at risk.
//!
//! ```text
//! existing     order side   check
//! ---------    ----------   ------------------------------------------------
//! flat         any          qty × price                          ≤ limit
//! same side    same         held × avg + qty × price             ≤ limit
//! opposite     qty ≤ held   always passes
//! opposite     qty > held   (qty − held) × price                 ≤ limit
//! ```

use ringside_types::constants::BPS_DENOMINATOR;
use ringside_types::{
    ExchangeConfig, League, LimitBound, LimitSchedule, LimitViolation, Position, Result,
    RingsideError, Side, Tier, UserId,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Inputs to a pre-trade limit check.
#[derive(Debug, Clone)]
pub struct LimitCheck<'a> {
    pub user_id: UserId,
    pub existing: Option<&'a Position>,
    pub order_side: Side,
    pub order_quantity: i64,
    /// Native price in cents the order may pay per contract.
    pub order_price: i64,
    pub tier: Tier,
    pub league: League,
    /// Verified agent bankroll in cents. Ignored for humans.
    pub agent_bankroll: Option<i64>,
}

/// Enforces per-participant exposure caps.
#[derive(Debug, Clone)]
pub struct PositionManager {
    limits: LimitSchedule,
    market_maker: Option<UserId>,
}

impl PositionManager {
    #[must_use]
    pub fn new(config: &ExchangeConfig) -> Self {
        Self {
            limits: config.limits.clone(),
            market_maker: config.market_maker,
        }
    }

    #[must_use]
    pub fn is_market_maker(&self, user_id: UserId) -> bool {
        self.market_maker == Some(user_id)
    }

    /// Cap in cents of notional.
    ///
    /// Humans get a fixed cap per tier. Agents get the configured share of
    /// their verified bankroll, bounded by the agent cap, and nothing at all
    /// without a bankroll.
    #[must_use]
    pub fn get_position_limit(&self, tier: Tier, league: League, bankroll: Option<i64>) -> i64 {
        match league {
            League::Human => match tier {
                Tier::Local => self.limits.local_cents,
                Tier::Regional => self.limits.regional_cents,
                Tier::Grand => self.limits.grand_cents,
                Tier::Invitational => self.limits.invitational_cents,
            },
            League::Agent => match bankroll {
                Some(cents) if cents > 0 => {
                    self.agent_bankroll_share(cents).min(self.limits.agent_cap_cents)
                }
                _ => 0,
            },
        }
    }

    /// Cap for a tier given by label; unknown labels use the LOCAL cap.
    #[must_use]
    pub fn get_position_limit_for_label(
        &self,
        tier_label: &str,
        league: League,
        bankroll: Option<i64>,
    ) -> i64 {
        let tier = Tier::parse(tier_label).unwrap_or(Tier::Local);
        self.get_position_limit(tier, league, bankroll)
    }

    // Whole cents only: notionals are integers, so `n <= share` and
    // `n <= floor(share)` agree.
    fn agent_bankroll_share(&self, bankroll: i64) -> i64 {
        let share = Decimal::from(bankroll) * Decimal::from(self.limits.agent_bankroll_share_bps)
            / Decimal::from(BPS_DENOMINATOR);
        share.floor().to_i64().unwrap_or(self.limits.agent_cap_cents)
    }

    /// Reject the order if it would breach the participant's cap.
    ///
    /// # Errors
    /// [`RingsideError::PositionLimitExceeded`] naming the violated bound.
    pub fn check_position_limit(&self, check: &LimitCheck<'_>) -> Result<()> {
        if self.is_market_maker(check.user_id) {
            return Ok(());
        }

        let limit = self.get_position_limit(check.tier, check.league, check.agent_bankroll);
        // Saturating: an overflowing notional must still exceed any cap.
        let order_notional = check.order_quantity.saturating_mul(check.order_price);

        let (bound, requested) = match check.existing {
            Some(pos) if pos.quantity > 0 && pos.side == check.order_side => (
                LimitBound::SameSideTotal,
                pos.notional().saturating_add(order_notional),
            ),
            Some(pos) if pos.quantity > 0 => {
                if check.order_quantity <= pos.quantity {
                    return Ok(());
                }
                (
                    LimitBound::FlipExcess,
                    (check.order_quantity - pos.quantity).saturating_mul(check.order_price),
                )
            }
            _ => (LimitBound::NewPosition, order_notional),
        };

        if requested > limit {
            tracing::warn!(
                user = %check.user_id,
                bound = %bound,
                requested,
                limit,
                "Position limit exceeded"
            );
            return Err(RingsideError::PositionLimitExceeded(LimitViolation {
                user_id: check.user_id,
                bound,
                requested,
                limit,
            }));
        }
        Ok(())
    }
}
