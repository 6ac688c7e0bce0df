//! Market classification: contract side, market tier, participant league.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which contract an order buys. Both sides are bought; "selling" YES is
/// expressed as buying NO at the complementary price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Yes,
    No,
}

impl Side {
    /// The other contract on the same event.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Yes => Self::No,
            Self::No => Self::Yes,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "YES"),
            Self::No => write!(f, "NO"),
        }
    }
}

/// Market tier, derived from the stronger participant's rating.
///
/// `Invitational` is assigned manually and never derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Local,
    Regional,
    Grand,
    Invitational,
}

impl Tier {
    /// Parse a tier label. Unrecognised labels yield `None`; callers that
    /// need a cap fall back to LOCAL.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "LOCAL" => Some(Self::Local),
            "REGIONAL" => Some(Self::Regional),
            "GRAND" => Some(Self::Grand),
            "INVITATIONAL" => Some(Self::Invitational),
            _ => None,
        }
    }

    /// REGIONAL and above settle fee-free for humans.
    #[must_use]
    pub fn is_upper(self) -> bool {
        !matches!(self, Self::Local)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "LOCAL"),
            Self::Regional => write!(f, "REGIONAL"),
            Self::Grand => write!(f, "GRAND"),
            Self::Invitational => write!(f, "INVITATIONAL"),
        }
    }
}

/// Which participant population a market (and its orders) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Human,
    Agent,
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Agent => write!(f, "agent"),
        }
    }
}
