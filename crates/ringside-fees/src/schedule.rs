//! Fee rates and fee arithmetic.

use ringside_types::constants::BPS_DENOMINATOR;
use ringside_types::{ExchangeConfig, FeeSchedule, League, Tier, UserId};

/// Fee for `quantity` contracts at `cost_cents` each, at `rate_bps`.
///
/// Integer floor division: fractional cents are always dropped.
#[must_use]
pub fn fee_at_rate(cost_cents: i64, quantity: i64, rate_bps: i64) -> i64 {
    (cost_cents * quantity * rate_bps).div_euclid(BPS_DENOMINATOR)
}

/// Translates market and participant attributes into fees.
///
/// The designated market maker comes from [`ExchangeConfig`] so tests can
/// use any identity.
#[derive(Debug, Clone)]
pub struct FeeEngine {
    schedule: FeeSchedule,
    market_maker: Option<UserId>,
}

impl FeeEngine {
    #[must_use]
    pub fn new(config: &ExchangeConfig) -> Self {
        Self {
            schedule: config.fees.clone(),
            market_maker: config.market_maker,
        }
    }

    #[must_use]
    pub fn is_market_maker(&self, user_id: UserId) -> bool {
        self.market_maker == Some(user_id)
    }

    /// Fee rate in basis points.
    ///
    /// Market maker pays nothing; agents pay the agent rate in every tier;
    /// humans pay the LOCAL rate in LOCAL markets and the upper rate
    /// elsewhere.
    #[must_use]
    pub fn compute_fee_rate(&self, tier: Tier, league: League, is_market_maker: bool) -> i64 {
        if is_market_maker {
            return 0;
        }
        match league {
            League::Agent => self.schedule.agent_bps,
            League::Human if tier.is_upper() => self.schedule.upper_human_bps,
            League::Human => self.schedule.local_human_bps,
        }
    }

    /// Fee rate for a specific participant.
    #[must_use]
    pub fn fee_rate_for(&self, tier: Tier, league: League, user_id: UserId) -> i64 {
        self.compute_fee_rate(tier, league, self.is_market_maker(user_id))
    }

    #[must_use]
    pub fn compute_fee(
        &self,
        price_cents: i64,
        quantity: i64,
        tier: Tier,
        league: League,
        is_market_maker: bool,
    ) -> i64 {
        fee_at_rate(
            price_cents,
            quantity,
            self.compute_fee_rate(tier, league, is_market_maker),
        )
    }

    /// Fee charged to `user_id` for a fill at a rate frozen on their order.
    /// The market maker is always charged zero.
    #[must_use]
    pub fn fill_fee(&self, user_id: UserId, cost_cents: i64, quantity: i64, rate_bps: i64) -> i64 {
        if self.is_market_maker(user_id) {
            0
        } else {
            fee_at_rate(cost_cents, quantity, rate_bps)
        }
    }
}
