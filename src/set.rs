//! A set: first to six games with a two-game margin, decided by a tiebreak at the trigger score
//! unless the policy calls for an advantage set.

use tinyrand::Rand;

use crate::config::{AdjustmentConfig, IterationLimits, SetConfig};
use crate::domain::{Player, Score};
use crate::error::{NonTerminating, Stage};
use crate::game;
use crate::point::PointWinner;
use crate::profile::PlayerProfile;
use crate::tiebreak;

pub const GAMES_TO_WIN: u32 = 6;
pub const MARGIN: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOutcome {
    pub winner: Player,
    pub score: Score,
    pub tiebreak: Option<Score>,
}

/// Simulates a set. The server alternates every game, starting with `first_server`. When a
/// tiebreak is played, it is opened by the player whose turn it is to serve, rather than always by
/// player 1; this is the only departure from the usual rotation. Under i.i.d. points the tiebreak
/// win probability is the same either way.
pub fn simulate(
    p1: &PlayerProfile,
    p2: &PlayerProfile,
    first_server: Player,
    config: &SetConfig,
    adjustment: &AdjustmentConfig,
    limits: &IterationLimits,
    rand: &mut impl Rand,
) -> Result<SetOutcome, NonTerminating> {
    let mut score = Score::nil_all();
    let mut server = first_server;
    for _ in 0..limits.max_games_per_set {
        let (serving, returning) = match server {
            Player::P1 => (p1, p2),
            Player::P2 => (p2, p1),
        };
        let game = game::simulate(
            &serving.serve,
            returning.ret.as_ref(),
            adjustment,
            limits.max_points_per_game,
            rand,
        )?;
        let game_winner = match game.winner {
            PointWinner::Server => server,
            PointWinner::Returner => server.other(),
        };
        score.increment(game_winner);
        server = server.other();

        if let Some(winner) = score.leader(GAMES_TO_WIN, MARGIN) {
            return Ok(SetOutcome {
                winner,
                score,
                tiebreak: None,
            });
        }

        if score.p1 == config.tiebreak_at && score.p2 == config.tiebreak_at {
            if let Some(target) = config.tiebreak.target_points() {
                let tiebreak = tiebreak::simulate(
                    p1,
                    p2,
                    target,
                    server,
                    adjustment,
                    limits.max_points_per_tiebreak,
                    rand,
                )?;
                score.increment(tiebreak.winner);
                return Ok(SetOutcome {
                    winner: tiebreak.winner,
                    score,
                    tiebreak: Some(tiebreak.score),
                });
            }
        }
    }
    Err(NonTerminating {
        stage: Stage::Set,
        limit: limits.max_games_per_set,
    })
}
