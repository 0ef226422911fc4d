//! Profile fixtures shared by the tests.

use crate::config::AdjustmentConfig;
use crate::profile::{PlayerProfile, ReturnProfile, ServeProfile};

/// A server whose first serve always lands in and never aces, so that every point is a rally won
/// with probability `win`.
pub fn rally_only(win: f64) -> PlayerProfile {
    PlayerProfile::new(ServeProfile {
        first_serve_in: 1.0,
        first_serve_win: win,
        second_serve_win: 0.0,
        ace: 0.0,
        double_fault: 0.0,
    })
}

pub fn regression_server() -> PlayerProfile {
    PlayerProfile::new(ServeProfile {
        first_serve_in: 0.60,
        first_serve_win: 0.75,
        second_serve_win: 0.50,
        ace: 0.08,
        double_fault: 0.03,
    })
}

/// A player with tour-average serving and returning.
pub fn tour_average() -> PlayerProfile {
    PlayerProfile::new(ServeProfile {
        first_serve_in: 0.62,
        first_serve_win: 0.72,
        second_serve_win: 0.51,
        ace: 0.06,
        double_fault: 0.035,
    })
    .with_return(ReturnProfile {
        vs_first_serve: Some(AdjustmentConfig::TOUR_AVG_RETURN_VS_FIRST),
        vs_second_serve: Some(AdjustmentConfig::TOUR_AVG_RETURN_VS_SECOND),
    })
}
