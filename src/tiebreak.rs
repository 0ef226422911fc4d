//! Tiebreaks, played to 7 points (or 10 for a super-tiebreak) with a two-point margin.
//!
//! The initial server serves point 0 alone. From then on, service alternates in blocks of two
//! points, starting with the other player: points 1–2 go to the other player, 3–4 back to the
//! initial server, and so on.

use tinyrand::Rand;

use crate::config::AdjustmentConfig;
use crate::domain::{Player, Score};
use crate::error::{NonTerminating, Stage};
use crate::point::{self, PointWinner};
use crate::profile::PlayerProfile;

pub const MARGIN: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TiebreakOutcome {
    pub winner: Player,
    pub score: Score,
}

/// The player serving the point at the given (zero-based) index.
#[inline]
pub fn server_of_point(point: u32, first_server: Player) -> Player {
    if point == 0 || ((point - 1) / 2) % 2 == 1 {
        first_server
    } else {
        first_server.other()
    }
}

pub fn simulate(
    p1: &PlayerProfile,
    p2: &PlayerProfile,
    target: u32,
    first_server: Player,
    adjustment: &AdjustmentConfig,
    max_points: u32,
    rand: &mut impl Rand,
) -> Result<TiebreakOutcome, NonTerminating> {
    let mut score = Score::nil_all();
    for point in 0..max_points {
        let server = server_of_point(point, first_server);
        let (serving, returning) = match server {
            Player::P1 => (p1, p2),
            Player::P2 => (p2, p1),
        };
        let outcome = point::simulate(&serving.serve, returning.ret.as_ref(), adjustment, rand);
        let point_winner = match outcome.winner {
            PointWinner::Server => server,
            PointWinner::Returner => server.other(),
        };
        score.increment(point_winner);

        if let Some(winner) = score.leader(target, MARGIN) {
            return Ok(TiebreakOutcome { winner, score });
        }
    }
    Err(NonTerminating {
        stage: Stage::Tiebreak,
        limit: max_points,
    })
}

#[cfg(test)]
mod tests {
    use tinyrand::{Seeded, StdRand};

    use super::*;
    use crate::testing::rally_only;

    #[test]
    fn serve_rotation() {
        let servers: Vec<_> = (0..9).map(|point| server_of_point(point, Player::P1)).collect();
        assert_eq!(
            vec![
                Player::P1,
                Player::P2,
                Player::P2,
                Player::P1,
                Player::P1,
                Player::P2,
                Player::P2,
                Player::P1,
                Player::P1
            ],
            servers
        );
        assert_eq!(Player::P2, server_of_point(0, Player::P2));
        assert_eq!(Player::P1, server_of_point(1, Player::P2));
        assert_eq!(Player::P2, server_of_point(3, Player::P2));
    }

    #[test]
    fn always_terminates_with_target_and_margin() {
        let mut rand = StdRand::seed(5);
        for (target, first_server) in [(7, Player::P1), (10, Player::P2)] {
            for _ in 0..5_000 {
                let outcome = simulate(
                    &rally_only(0.55),
                    &rally_only(0.6),
                    target,
                    first_server,
                    &AdjustmentConfig::default(),
                    1_000,
                    &mut rand,
                )
                .unwrap();
                let winning = outcome.score.of(outcome.winner);
                let losing = outcome.score.of(outcome.winner.other());
                assert!(winning >= target, "{:?}", outcome);
                assert!(winning >= losing + 2, "{:?}", outcome);
                if losing >= target - 1 {
                    assert_eq!(winning, losing + 2, "{:?}", outcome);
                } else {
                    assert_eq!(target, winning, "{:?}", outcome);
                }
            }
        }
    }

    #[test]
    fn servers_always_hold() {
        // every point goes to the server, so the score tracks the rotation exactly
        let mut rand = StdRand::seed(0);
        let result = simulate(
            &rally_only(1.0),
            &rally_only(1.0),
            7,
            Player::P1,
            &AdjustmentConfig::default(),
            40,
            &mut rand,
        );
        assert_eq!(
            Err(NonTerminating {
                stage: Stage::Tiebreak,
                limit: 40
            }),
            result
        );
    }

    #[test]
    fn long_deadlock_reports_limit() {
        // more points than a 16-bit tally could count
        let mut rand = StdRand::seed(0);
        let result = simulate(
            &rally_only(1.0),
            &rally_only(1.0),
            7,
            Player::P1,
            &AdjustmentConfig::default(),
            200_000,
            &mut rand,
        );
        assert_eq!(
            Err(NonTerminating {
                stage: Stage::Tiebreak,
                limit: 200_000
            }),
            result
        );
    }

    #[test]
    fn dominant_player_wins_to_love() {
        let mut rand = StdRand::seed(0);
        let outcome = simulate(
            &rally_only(1.0),
            &rally_only(0.0),
            10,
            Player::P2,
            &AdjustmentConfig::default(),
            1_000,
            &mut rand,
        )
        .unwrap();
        assert_eq!(
            TiebreakOutcome {
                winner: Player::P1,
                score: Score::new(10, 0)
            },
            outcome
        );
    }
}
