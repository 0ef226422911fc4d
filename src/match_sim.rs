//! A complete best-of-_N_ match, played as a sequence of sets.

use tinyrand::Rand;

use crate::config::SimConfig;
use crate::domain::{Player, Score};
use crate::error::NonTerminating;
use crate::probs::bernoulli;
use crate::profile::PlayerProfile;
use crate::set::{self, SetOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Player,
    pub first_server: Player,
    /// Sets won by each player.
    pub sets: Score,
    pub set_outcomes: Vec<SetOutcome>,
}
impl MatchOutcome {
    pub fn set_scores(&self) -> impl Iterator<Item = &Score> {
        self.set_outcomes.iter().map(|set| &set.score)
    }

    /// Game scores of every set, from player 1's perspective, e.g., `6-4 3-6 7-6`.
    pub fn score_line(&self) -> String {
        self.set_scores()
            .map(Score::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn tiebreaks(&self) -> usize {
        self.set_outcomes
            .iter()
            .filter(|set| set.tiebreak.is_some())
            .count()
    }
}

/// Simulates a match. The first server is decided by a fair coin. Each subsequent set is opened
/// by the same player if the preceding set had an even number of games, and by the other player
/// if odd.
pub fn simulate(
    p1: &PlayerProfile,
    p2: &PlayerProfile,
    config: &SimConfig,
    rand: &mut impl Rand,
) -> Result<MatchOutcome, NonTerminating> {
    let sets_to_win = config.format.sets_to_win();
    let first_server = if bernoulli(0.5, rand) {
        Player::P1
    } else {
        Player::P2
    };

    let mut sets = Score::nil_all();
    let mut set_outcomes = Vec::with_capacity(config.format.best_of as usize);
    let mut server = first_server;
    while sets.p1 < sets_to_win as u32 && sets.p2 < sets_to_win as u32 {
        let set_config = config.format.set_config(sets.p1 as u8, sets.p2 as u8);
        let set = set::simulate(
            p1,
            p2,
            server,
            &set_config,
            &config.adjustment,
            &config.limits,
            rand,
        )?;
        sets.increment(set.winner);
        if set.score.total() % 2 == 1 {
            server = server.other();
        }
        set_outcomes.push(set);
    }

    let winner = if sets.p1 > sets.p2 {
        Player::P1
    } else {
        Player::P2
    };
    Ok(MatchOutcome {
        winner,
        first_server,
        sets,
        set_outcomes,
    })
}
