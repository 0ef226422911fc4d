//! Configuration of the point model, the set and match formats, and the iteration guards.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::InvalidConfig;

/// Opponent adjustment of the server's effective win probability. A returner that is stronger than
/// the tour average reduces the server's rate by exactly the excess.
///
/// The tour averages are fixed constants rather than values recalculated from the population of
/// profiles; treat them as tunable.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentConfig {
    pub enabled: bool,
    pub tour_avg_return_vs_first: f64,
    pub tour_avg_return_vs_second: f64,
    pub first_serve_clamp: RangeInclusive<f64>,
    pub second_serve_clamp: RangeInclusive<f64>,
}
impl AdjustmentConfig {
    pub const TOUR_AVG_RETURN_VS_FIRST: f64 = 0.35;
    pub const TOUR_AVG_RETURN_VS_SECOND: f64 = 0.50;

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        for (name, avg) in [
            ("tour_avg_return_vs_first", self.tour_avg_return_vs_first),
            ("tour_avg_return_vs_second", self.tour_avg_return_vs_second),
        ] {
            if !(0.0..=1.0).contains(&avg) {
                return Err(InvalidConfig(format!("{name} must lie in [0, 1], got {avg}")));
            }
        }
        for (name, clamp) in [
            ("first_serve_clamp", &self.first_serve_clamp),
            ("second_serve_clamp", &self.second_serve_clamp),
        ] {
            if clamp.is_empty() || *clamp.start() < 0.0 || *clamp.end() > 1.0 {
                return Err(InvalidConfig(format!(
                    "{name} must be a non-empty range within [0, 1], got {clamp:?}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tour_avg_return_vs_first: Self::TOUR_AVG_RETURN_VS_FIRST,
            tour_avg_return_vs_second: Self::TOUR_AVG_RETURN_VS_SECOND,
            first_serve_clamp: 0.30..=0.95,
            second_serve_clamp: 0.20..=0.85,
        }
    }
}

/// How a set is decided once the games reach the tiebreak trigger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TiebreakPolicy {
    /// First to 7 points.
    #[default]
    #[strum(to_string = "standard", serialize = "normal")]
    #[serde(alias = "normal")]
    Standard,

    /// First to 10 points.
    Super,

    /// No tiebreak; play on until one player leads by two games.
    None,
}
impl TiebreakPolicy {
    /// Points needed to win the tiebreak, if one is played.
    pub fn target_points(&self) -> Option<u32> {
        match self {
            TiebreakPolicy::Standard => Some(7),
            TiebreakPolicy::Super => Some(10),
            TiebreakPolicy::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetConfig {
    pub tiebreak_at: u32,
    pub tiebreak: TiebreakPolicy,
}
impl SetConfig {
    pub const DEFAULT_TIEBREAK_AT: u32 = 6;
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            tiebreak_at: Self::DEFAULT_TIEBREAK_AT,
            tiebreak: TiebreakPolicy::Standard,
        }
    }
}

/// Match format, resolved upstream from the tournament and surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchFormat {
    pub best_of: u8,
    pub final_set: TiebreakPolicy,
    pub tiebreak_at: u32,
}
impl MatchFormat {
    pub fn best_of_three() -> Self {
        Self {
            best_of: 3,
            final_set: TiebreakPolicy::Standard,
            tiebreak_at: SetConfig::DEFAULT_TIEBREAK_AT,
        }
    }

    pub fn best_of_five() -> Self {
        Self {
            best_of: 5,
            ..Self::best_of_three()
        }
    }

    pub fn with_final_set(mut self, final_set: TiebreakPolicy) -> Self {
        self.final_set = final_set;
        self
    }

    pub fn sets_to_win(&self) -> u8 {
        self.best_of / 2 + 1
    }

    /// Set configuration for a set played at the given set count. Only the deciding set
    /// honours the final-set policy.
    pub fn set_config(&self, p1_sets: u8, p2_sets: u8) -> SetConfig {
        let deciding = p1_sets + 1 == self.sets_to_win() && p2_sets + 1 == self.sets_to_win();
        SetConfig {
            tiebreak_at: self.tiebreak_at,
            tiebreak: if deciding {
                self.final_set
            } else {
                TiebreakPolicy::Standard
            },
        }
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.best_of == 0 || self.best_of % 2 == 0 {
            return Err(InvalidConfig(format!(
                "best_of must be odd and positive, got {}",
                self.best_of
            )));
        }
        if self.tiebreak_at == 0 {
            return Err(InvalidConfig("tiebreak_at must be positive".into()));
        }
        Ok(())
    }
}

impl Default for MatchFormat {
    fn default() -> Self {
        Self::best_of_three()
    }
}

/// Upper bounds on the number of iterations at each level of the hierarchy. Valid profiles
/// terminate with probability 1; degenerate ones (e.g., neither player ever winning a point on
/// serve) would otherwise loop forever.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationLimits {
    pub max_points_per_game: u32,
    pub max_points_per_tiebreak: u32,
    pub max_games_per_set: u32,
}

impl Default for IterationLimits {
    fn default() -> Self {
        Self {
            max_points_per_game: 1_000,
            max_points_per_tiebreak: 1_000,
            max_games_per_set: 1_000,
        }
    }
}

/// Everything a single match simulation needs besides the profiles and the random source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimConfig {
    pub format: MatchFormat,
    pub adjustment: AdjustmentConfig,
    pub limits: IterationLimits,
}
impl SimConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        self.format.validate()?;
        self.adjustment.validate()
    }
}
