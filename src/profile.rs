//! Per-player serve and return profiles. These are produced upstream, by aggregating historical
//! match logs, and are treated as immutable for the duration of a simulation run.

use serde::{Deserialize, Serialize};

use crate::error::InvalidProfile;

/// Tolerance applied to the ace and double fault invariants, which are typically derived from
/// sums of rounded percentages.
const INVARIANT_TOLERANCE: f64 = 1e-9;

/// Serving performance, expressed as rates over all service points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServeProfile {
    /// Fraction of first serves that land in.
    pub first_serve_in: f64,
    /// Fraction of points won when the first serve lands in.
    pub first_serve_win: f64,
    /// Fraction of points won on the second serve.
    pub second_serve_win: f64,
    /// Fraction of all service points that are aces.
    pub ace: f64,
    /// Fraction of all service points that are double faults.
    pub double_fault: f64,
}
impl ServeProfile {
    pub fn validate(&self) -> Result<(), InvalidProfile> {
        check_prob("first_serve_in", self.first_serve_in)?;
        check_prob("first_serve_win", self.first_serve_win)?;
        check_prob("second_serve_win", self.second_serve_win)?;
        check_prob("ace", self.ace)?;
        check_prob("double_fault", self.double_fault)?;

        if self.ace > self.first_serve_in + INVARIANT_TOLERANCE {
            return Err(InvalidProfile::AceExceedsFirstServeIn {
                ace: self.ace,
                first_serve_in: self.first_serve_in,
            });
        }
        let first_serve_out = 1.0 - self.first_serve_in;
        if self.double_fault > first_serve_out + INVARIANT_TOLERANCE {
            return Err(InvalidProfile::DoubleFaultExceedsFirstServeOut {
                double_fault: self.double_fault,
                first_serve_out,
            });
        }
        Ok(())
    }

    /// Probability of an ace given that the first serve landed in.
    #[inline]
    pub fn ace_given_first_in(&self) -> f64 {
        self.ace / self.first_serve_in
    }

    /// Probability of a double fault given that the first serve missed.
    #[inline]
    pub fn double_fault_given_first_out(&self) -> f64 {
        self.double_fault / (1.0 - self.first_serve_in)
    }
}

/// Returning performance. Either rate may be absent, in which case the opponent's serve is not
/// adjusted for the corresponding serve type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnProfile {
    #[serde(default)]
    pub vs_first_serve: Option<f64>,
    #[serde(default)]
    pub vs_second_serve: Option<f64>,
}
impl ReturnProfile {
    pub fn validate(&self) -> Result<(), InvalidProfile> {
        if let Some(rate) = self.vs_first_serve {
            check_prob("vs_first_serve", rate)?;
        }
        if let Some(rate) = self.vs_second_serve {
            check_prob("vs_second_serve", rate)?;
        }
        Ok(())
    }
}

/// Everything the engine knows about one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub serve: ServeProfile,
    #[serde(default, rename = "return")]
    pub ret: Option<ReturnProfile>,
}
impl PlayerProfile {
    pub fn new(serve: ServeProfile) -> Self {
        Self { serve, ret: None }
    }

    pub fn with_return(mut self, ret: ReturnProfile) -> Self {
        self.ret = Some(ret);
        self
    }

    pub fn validate(&self) -> Result<(), InvalidProfile> {
        self.serve.validate()?;
        if let Some(ret) = &self.ret {
            ret.validate()?;
        }
        Ok(())
    }
}

impl From<ServeProfile> for PlayerProfile {
    fn from(serve: ServeProfile) -> Self {
        Self::new(serve)
    }
}

/// The two players of a match, as handed over by the profile aggregation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub p1: PlayerProfile,
    pub p2: PlayerProfile,
}
impl Matchup {
    pub fn validate(&self) -> Result<(), InvalidProfile> {
        self.p1.validate()?;
        self.p2.validate()
    }

    /// The same matchup with the players swapped.
    pub fn reverse(&self) -> Matchup {
        Matchup {
            p1: self.p2.clone(),
            p2: self.p1.clone(),
        }
    }
}

fn check_prob(field: &'static str, value: f64) -> Result<(), InvalidProfile> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(InvalidProfile::OutOfRange { field, value })
    }
}
