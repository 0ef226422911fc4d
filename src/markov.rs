//! Exact win probabilities for the equivalent i.i.d.-point model, in which each player wins a
//! point on their own serve with a fixed probability. The point simulator produces exactly such a
//! process once its branches are collapsed into a single serve-point probability, so these serve
//! as a reference for the Monte Carlo estimates.
//!
//! Score grids are walked forward until either player reaches the target or the score reaches the
//! last tie before the target, from where play proceeds in pairs (one served by each player) until
//! one side takes both. Sets assume the standard tiebreak trigger at 6–6.

use crate::config::{AdjustmentConfig, MatchFormat, TiebreakPolicy};
use crate::domain::{Player, Score};
use crate::point::{effective_win_prob, ServeNumber};
use crate::profile::{PlayerProfile, ReturnProfile, ServeProfile};
use crate::set::GAMES_TO_WIN;
use crate::tiebreak::server_of_point;

/// Probability that the server wins a point, marginalised over aces, double faults and rallies.
pub fn serve_point_prob(
    server: &ServeProfile,
    returner: Option<&ReturnProfile>,
    adjustment: &AdjustmentConfig,
) -> f64 {
    let first_rally = server.first_serve_in - server.ace;
    let second_rally = 1.0 - server.first_serve_in - server.double_fault;
    server.ace
        + first_rally * effective_win_prob(server, returner, adjustment, ServeNumber::First)
        + second_rally * effective_win_prob(server, returner, adjustment, ServeNumber::Second)
}

/// Probability of holding serve when each point is won with probability `p`.
pub fn hold_prob(p: f64) -> f64 {
    let q = 1.0 - p;
    let before_deuce = p.powi(4) * (1.0 + 4.0 * q + 10.0 * q * q);
    let reach_deuce = 20.0 * p.powi(3) * q.powi(3);
    before_deuce + reach_deuce * deuce_win(p * p, q * q)
}

/// Probability that player 1 wins a tiebreak to `target` points, opened by `first_server`.
/// `p1_serve` and `p2_serve` are each player's probability of winning a point on their own serve.
pub fn tiebreak_prob(p1_serve: f64, p2_serve: f64, target: u32, first_server: Player) -> f64 {
    let race = race(target, |point| match server_of_point(point, first_server) {
        Player::P1 => p1_serve,
        Player::P2 => 1.0 - p2_serve,
    });
    let p1_wins_pair = p1_serve * (1.0 - p2_serve);
    let p2_wins_pair = (1.0 - p1_serve) * p2_serve;
    race.p1_terminal() + race.deuce * deuce_win(p1_wins_pair, p2_wins_pair)
}

/// Set outcomes split by winner and by the parity of the total number of games played, which
/// determines the server of the following set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetProbs {
    pub p1_even: f64,
    pub p1_odd: f64,
    pub p2_even: f64,
    pub p2_odd: f64,
}
impl SetProbs {
    pub fn p1_win(&self) -> f64 {
        self.p1_even + self.p1_odd
    }

    pub fn p2_win(&self) -> f64 {
        self.p2_even + self.p2_odd
    }
}

pub fn set_probs(
    p1_serve: f64,
    p2_serve: f64,
    first_server: Player,
    policy: TiebreakPolicy,
) -> SetProbs {
    let (p1_hold, p2_hold) = (hold_prob(p1_serve), hold_prob(p2_serve));
    let race = race(GAMES_TO_WIN, |game| {
        let server = if game % 2 == 0 {
            first_server
        } else {
            first_server.other()
        };
        match server {
            Player::P1 => p1_hold,
            Player::P2 => 1.0 - p2_hold,
        }
    });

    let mut probs = SetProbs::default();
    for (score, prob) in &race.terminals {
        let even = score.total() % 2 == 0;
        match (score.p1 == GAMES_TO_WIN, even) {
            (true, true) => probs.p1_even += prob,
            (true, false) => probs.p1_odd += prob,
            (false, true) => probs.p2_even += prob,
            (false, false) => probs.p2_odd += prob,
        }
    }

    // from 5–5, the next two games are served one apiece
    let p1_wins_pair = p1_hold * (1.0 - p2_hold);
    let p2_wins_pair = (1.0 - p1_hold) * p2_hold;
    match policy.target_points() {
        Some(target) => {
            // 7–5 either way is even; a tiebreak from 6–6 ends 7–6, which is odd
            let split = 1.0 - p1_wins_pair - p2_wins_pair;
            let tiebreak = tiebreak_prob(p1_serve, p2_serve, target, first_server);
            probs.p1_even += race.deuce * p1_wins_pair;
            probs.p2_even += race.deuce * p2_wins_pair;
            probs.p1_odd += race.deuce * split * tiebreak;
            probs.p2_odd += race.deuce * split * (1.0 - tiebreak);
        }
        None => {
            // advantage sets always end on an even total
            let p1_from_deuce = deuce_win(p1_wins_pair, p2_wins_pair);
            probs.p1_even += race.deuce * p1_from_deuce;
            probs.p2_even += race.deuce * (1.0 - p1_from_deuce);
        }
    }
    probs
}

/// Probability that player 1 wins the match, averaged over the coin toss for the first server.
/// Set servers follow the same parity rule as the match simulator.
pub fn match_prob(p1_serve: f64, p2_serve: f64, format: &MatchFormat) -> f64 {
    let sets_to_win = format.sets_to_win() as usize;
    // mass over (p1 sets, p2 sets) × [player 1 to serve first, player 2 to serve first]
    let mut grid = vec![[0.0; 2]; sets_to_win * sets_to_win];
    grid[0] = [0.5, 0.5];
    let mut p1_win = 0.0;
    for total in 0..(2 * sets_to_win - 1) {
        let min_p1_sets = total.saturating_sub(sets_to_win - 1);
        for p1_sets in min_p1_sets..=usize::min(total, sets_to_win - 1) {
            let p2_sets = total - p1_sets;
            let policy = format.set_config(p1_sets as u8, p2_sets as u8).tiebreak;
            for server in [Player::P1, Player::P2] {
                let mass = grid[p1_sets * sets_to_win + p2_sets][slot(server)];
                if mass == 0.0 {
                    continue;
                }
                let set = set_probs(p1_serve, p2_serve, server, policy);
                if p1_sets + 1 == sets_to_win {
                    p1_win += mass * set.p1_win();
                } else {
                    let next = &mut grid[(p1_sets + 1) * sets_to_win + p2_sets];
                    next[slot(server)] += mass * set.p1_even;
                    next[slot(server.other())] += mass * set.p1_odd;
                }
                if p2_sets + 1 < sets_to_win {
                    let next = &mut grid[p1_sets * sets_to_win + p2_sets + 1];
                    next[slot(server)] += mass * set.p2_even;
                    next[slot(server.other())] += mass * set.p2_odd;
                }
            }
        }
    }
    p1_win
}

/// Reference match probability for two profiles under the given adjustment.
pub fn match_prob_for_profiles(
    p1: &PlayerProfile,
    p2: &PlayerProfile,
    format: &MatchFormat,
    adjustment: &AdjustmentConfig,
) -> f64 {
    let p1_serve = serve_point_prob(&p1.serve, p2.ret.as_ref(), adjustment);
    let p2_serve = serve_point_prob(&p2.serve, p1.ret.as_ref(), adjustment);
    match_prob(p1_serve, p2_serve, format)
}

#[inline]
fn slot(player: Player) -> usize {
    match player {
        Player::P1 => 0,
        Player::P2 => 1,
    }
}

/// Probability of player 1 eventually winning two in a row from a tie, given the probabilities of
/// each side taking a pair outright. When neither side can ever take a pair, the tie is never
/// broken; the symmetric 0.5 is returned.
fn deuce_win(p1_wins_pair: f64, p2_wins_pair: f64) -> f64 {
    let decisive = p1_wins_pair + p2_wins_pair;
    if decisive == 0.0 {
        0.5
    } else {
        p1_wins_pair / decisive
    }
}

#[derive(Debug)]
struct Race {
    /// Scores in which one side reached the target without passing through the final tie.
    terminals: Vec<(Score, f64)>,
    /// Probability of reaching `(target − 1, target − 1)`.
    deuce: f64,
}
impl Race {
    fn p1_terminal(&self) -> f64 {
        self.terminals
            .iter()
            .filter(|(score, _)| score.p1 > score.p2)
            .map(|(_, prob)| prob)
            .sum()
    }
}

/// Walks a race to `target`, where `p1_wins(n)` is player 1's probability of taking the item
/// (point or game) at index `n`.
fn race(target: u32, p1_wins: impl Fn(u32) -> f64) -> Race {
    let t = target as usize;
    debug_assert!(t >= 1);
    let mut grid = vec![0.0; t * t];
    grid[0] = 1.0;
    let mut terminals = Vec::with_capacity(2 * t);
    let mut deuce = 0.0;
    for n in 0..(2 * t - 1) {
        for i in n.saturating_sub(t - 1)..=usize::min(n, t - 1) {
            let j = n - i;
            let mass = grid[i * t + j];
            if mass == 0.0 {
                continue;
            }
            if i == t - 1 && j == t - 1 {
                deuce += mass;
                continue;
            }
            let p = p1_wins(n as u32);
            if i + 1 == t {
                terminals.push((Score::new(target, j as u32), mass * p));
            } else {
                grid[(i + 1) * t + j] += mass * p;
            }
            if j + 1 == t {
                terminals.push((Score::new(i as u32, target), mass * (1.0 - p)));
            } else {
                grid[i * t + j + 1] += mass * (1.0 - p);
            }
        }
    }
    Race { terminals, deuce }
}

#[cfg(test)]
mod tests;
