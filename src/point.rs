//! Resolution of a single point from the server's and (optionally) the returner's profiles.
//!
//! The first serve lands in with `first_serve_in`. A serve that lands in is an ace with the ace
//! rate conditioned on that event; otherwise the rally is won with the (possibly adjusted) first
//! serve win rate. A missed first serve is followed by a second serve that is always in, except
//! for double faults, again conditioned on the first serve having missed.

use tinyrand::Rand;

use crate::config::AdjustmentConfig;
use crate::probs::bernoulli;
use crate::profile::{ReturnProfile, ServeProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointWinner {
    Server,
    Returner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    Ace,
    DoubleFault,
    Rally,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServeNumber {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointOutcome {
    pub winner: PointWinner,
    pub kind: PointKind,
    pub serve: ServeNumber,
}

pub fn simulate(
    server: &ServeProfile,
    returner: Option<&ReturnProfile>,
    adjustment: &AdjustmentConfig,
    rand: &mut impl Rand,
) -> PointOutcome {
    if bernoulli(server.first_serve_in, rand) {
        if bernoulli(server.ace_given_first_in(), rand) {
            return PointOutcome {
                winner: PointWinner::Server,
                kind: PointKind::Ace,
                serve: ServeNumber::First,
            };
        }
        let win_prob = effective_win_prob(server, returner, adjustment, ServeNumber::First);
        PointOutcome {
            winner: rally_winner(win_prob, rand),
            kind: PointKind::Rally,
            serve: ServeNumber::First,
        }
    } else {
        if bernoulli(server.double_fault_given_first_out(), rand) {
            return PointOutcome {
                winner: PointWinner::Returner,
                kind: PointKind::DoubleFault,
                serve: ServeNumber::Second,
            };
        }
        let win_prob = effective_win_prob(server, returner, adjustment, ServeNumber::Second);
        PointOutcome {
            winner: rally_winner(win_prob, rand),
            kind: PointKind::Rally,
            serve: ServeNumber::Second,
        }
    }
}

#[inline]
fn rally_winner(win_prob: f64, rand: &mut impl Rand) -> PointWinner {
    if bernoulli(win_prob, rand) {
        PointWinner::Server
    } else {
        PointWinner::Returner
    }
}

/// The server's probability of winning a point that is not an ace or a double fault.
///
/// With the adjustment enabled and the returner's rate for this serve type known, the server's
/// base rate is shifted by the returner's deviation from the tour average and clamped. Otherwise
/// the base rate is used as is.
pub fn effective_win_prob(
    server: &ServeProfile,
    returner: Option<&ReturnProfile>,
    adjustment: &AdjustmentConfig,
    serve: ServeNumber,
) -> f64 {
    let (base, returner_rate, tour_avg, clamp) = match serve {
        ServeNumber::First => (
            server.first_serve_win,
            returner.and_then(|ret| ret.vs_first_serve),
            adjustment.tour_avg_return_vs_first,
            &adjustment.first_serve_clamp,
        ),
        ServeNumber::Second => (
            server.second_serve_win,
            returner.and_then(|ret| ret.vs_second_serve),
            adjustment.tour_avg_return_vs_second,
            &adjustment.second_serve_clamp,
        ),
    };
    match returner_rate {
        Some(returner_rate) if adjustment.enabled => {
            (base + tour_avg - returner_rate).clamp(*clamp.start(), *clamp.end())
        }
        _ => base,
    }
}

/// Frequencies of point kinds over a run of independently sampled points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointTally {
    pub points: u64,
    pub server_wins: u64,
    pub aces: u64,
    pub double_faults: u64,
    pub first_serve_rallies: u64,
    pub second_serve_rallies: u64,
}
impl PointTally {
    pub fn record(&mut self, outcome: &PointOutcome) {
        self.points += 1;
        if outcome.winner == PointWinner::Server {
            self.server_wins += 1;
        }
        match (outcome.kind, outcome.serve) {
            (PointKind::Ace, _) => self.aces += 1,
            (PointKind::DoubleFault, _) => self.double_faults += 1,
            (PointKind::Rally, ServeNumber::First) => self.first_serve_rallies += 1,
            (PointKind::Rally, ServeNumber::Second) => self.second_serve_rallies += 1,
        }
    }

    pub fn ace_rate(&self) -> f64 {
        self.aces as f64 / self.points as f64
    }

    pub fn double_fault_rate(&self) -> f64 {
        self.double_faults as f64 / self.points as f64
    }

    pub fn server_win_rate(&self) -> f64 {
        self.server_wins as f64 / self.points as f64
    }
}

/// Samples `points` points and tallies the outcomes.
pub fn tally(
    server: &ServeProfile,
    returner: Option<&ReturnProfile>,
    adjustment: &AdjustmentConfig,
    points: u64,
    rand: &mut impl Rand,
) -> PointTally {
    let mut tally = PointTally::default();
    for _ in 0..points {
        tally.record(&simulate(server, returner, adjustment, rand));
    }
    tally
}
