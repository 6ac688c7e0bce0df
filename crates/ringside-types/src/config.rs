//! Configuration for the exchange core: the designated market maker and
//! the fee and position-limit schedules.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{self, BPS_DENOMINATOR};
use crate::{Result, RingsideError, UserId};

/// Top-level configuration injected into the fee, position and matching
/// components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// The designated market maker: fee-exempt, limit-exempt, and excluded
    /// from credit-ledger postings. `None` disables the privilege.
    pub market_maker: Option<UserId>,
    pub fees: FeeSchedule,
    pub limits: LimitSchedule,
}

/// Fee rates in basis points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub local_human_bps: i64,
    pub upper_human_bps: i64,
    pub agent_bps: i64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            local_human_bps: constants::DEFAULT_LOCAL_HUMAN_FEE_BPS,
            upper_human_bps: constants::DEFAULT_UPPER_HUMAN_FEE_BPS,
            agent_bps: constants::DEFAULT_AGENT_FEE_BPS,
        }
    }
}

/// Position caps in cents of notional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitSchedule {
    pub local_cents: i64,
    pub regional_cents: i64,
    pub grand_cents: i64,
    pub invitational_cents: i64,
    /// Share of a verified agent bankroll usable as a cap, in basis points.
    pub agent_bankroll_share_bps: i64,
    pub agent_cap_cents: i64,
}

impl Default for LimitSchedule {
    fn default() -> Self {
        Self {
            local_cents: constants::DEFAULT_LOCAL_LIMIT_CENTS,
            regional_cents: constants::DEFAULT_REGIONAL_LIMIT_CENTS,
            grand_cents: constants::DEFAULT_GRAND_LIMIT_CENTS,
            invitational_cents: constants::DEFAULT_INVITATIONAL_LIMIT_CENTS,
            agent_bankroll_share_bps: constants::DEFAULT_AGENT_BANKROLL_SHARE_BPS,
            agent_cap_cents: constants::DEFAULT_AGENT_LIMIT_CAP_CENTS,
        }
    }
}

impl ExchangeConfig {
    /// Config with a designated market maker and default schedules.
    #[must_use]
    pub fn with_market_maker(market_maker: UserId) -> Self {
        Self {
            market_maker: Some(market_maker),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_market_maker(&self, user_id: UserId) -> bool {
        self.market_maker == Some(user_id)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject out-of-range fee rates and negative caps.
    pub fn validate(&self) -> Result<()> {
        let fees = [
            ("fees.local_human_bps", self.fees.local_human_bps),
            ("fees.upper_human_bps", self.fees.upper_human_bps),
            ("fees.agent_bps", self.fees.agent_bps),
            ("limits.agent_bankroll_share_bps", self.limits.agent_bankroll_share_bps),
        ];
        for (name, bps) in fees {
            if !(0..=BPS_DENOMINATOR).contains(&bps) {
                return Err(RingsideError::Configuration(format!(
                    "{name} must be within 0..={BPS_DENOMINATOR}, got {bps}"
                )));
            }
        }
        let caps = [
            ("limits.local_cents", self.limits.local_cents),
            ("limits.regional_cents", self.limits.regional_cents),
            ("limits.grand_cents", self.limits.grand_cents),
            ("limits.invitational_cents", self.limits.invitational_cents),
            ("limits.agent_cap_cents", self.limits.agent_cap_cents),
        ];
        for (name, cap) in caps {
            if cap < 0 {
                return Err(RingsideError::Configuration(format!(
                    "{name} must not be negative, got {cap}"
                )));
            }
        }
        Ok(())
    }
}
