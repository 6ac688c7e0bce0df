//! Market tier derivation from fighter ratings.

use ringside_types::Tier;
use ringside_types::constants::{GRAND_TIER_MIN_STAT, REGIONAL_TIER_MIN_STAT};
use serde_json::{Map, Value};

/// A fighter's rating sheet as received from the event feed.
pub type StatBag = Map<String, Value>;

/// Rating fields considered when ranking a fighter.
pub const STAT_FIELDS: [&str; 8] = [
    "striking",
    "grappling",
    "wrestling",
    "submission",
    "cardio",
    "chin",
    "power",
    "speed",
];

/// Highest finite value among [`STAT_FIELDS`]; 0 when none is present.
///
/// Missing fields, strings, nulls and other non-numeric values are ignored.
#[must_use]
pub fn max_fighter_stat(stats: &StatBag) -> f64 {
    STAT_FIELDS
        .iter()
        .filter_map(|field| stats.get(*field).and_then(Value::as_f64))
        .filter(|v| v.is_finite())
        .fold(None, |best: Option<f64>, v| Some(best.map_or(v, |b| b.max(v))))
        .unwrap_or(0.0)
}

/// Tier from the stronger of the two fighters' ratings:
/// below 80 → LOCAL, 80 up to 95 → REGIONAL, 95 and above → GRAND.
///
/// INVITATIONAL is never derived.
#[must_use]
pub fn compute_fight_tier(stat_a: f64, stat_b: f64) -> Tier {
    let stronger = stat_a.max(stat_b);
    if stronger >= GRAND_TIER_MIN_STAT {
        Tier::Grand
    } else if stronger >= REGIONAL_TIER_MIN_STAT {
        Tier::Regional
    } else {
        Tier::Local
    }
}

/// Tier for a bout between two fighters' stat bags.
#[must_use]
pub fn tier_for_bout(a: &StatBag, b: &StatBag) -> Tier {
    compute_fight_tier(max_fighter_stat(a), max_fighter_stat(b))
}
