//! Errors raised by the simulation engine.

use strum_macros::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("{0}")]
    InvalidProfile(#[from] InvalidProfile),

    #[error("{0}")]
    NonTerminating(#[from] NonTerminating),

    #[error("{0}")]
    InvalidConfig(#[from] InvalidConfig),
}

#[derive(Debug, Error, PartialEq)]
pub enum InvalidProfile {
    #[error("{field} must be a probability in [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("ace rate {ace} exceeds first serve in rate {first_serve_in}")]
    AceExceedsFirstServeIn { ace: f64, first_serve_in: f64 },

    #[error("double fault rate {double_fault} exceeds first serve out rate {first_serve_out}")]
    DoubleFaultExceedsFirstServeOut {
        double_fault: f64,
        first_serve_out: f64,
    },
}

#[derive(Debug, Error, PartialEq)]
#[error("{stage} did not terminate within {limit} iterations")]
pub struct NonTerminating {
    pub stage: Stage,
    pub limit: u32,
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid configuration: {0}")]
pub struct InvalidConfig(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    #[strum(serialize = "game")]
    Game,
    #[strum(serialize = "tiebreak")]
    Tiebreak,
    #[strum(serialize = "set")]
    Set,
}
