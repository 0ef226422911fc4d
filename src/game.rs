//! A single service game: first to four points with a two-point margin.

use tinyrand::Rand;

use crate::config::AdjustmentConfig;
use crate::error::{NonTerminating, Stage};
use crate::point::{self, PointWinner};
use crate::profile::{ReturnProfile, ServeProfile};

pub const POINTS_TO_WIN: u32 = 4;
pub const MARGIN: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: PointWinner,
    pub server_points: u32,
    pub returner_points: u32,
}
impl GameOutcome {
    pub fn is_hold(&self) -> bool {
        self.winner == PointWinner::Server
    }
}

pub fn simulate(
    server: &ServeProfile,
    returner: Option<&ReturnProfile>,
    adjustment: &AdjustmentConfig,
    max_points: u32,
    rand: &mut impl Rand,
) -> Result<GameOutcome, NonTerminating> {
    let (mut server_points, mut returner_points) = (0u32, 0u32);
    for _ in 0..max_points {
        match point::simulate(server, returner, adjustment, rand).winner {
            PointWinner::Server => server_points += 1,
            PointWinner::Returner => returner_points += 1,
        }

        if server_points >= POINTS_TO_WIN && server_points >= returner_points + MARGIN {
            return Ok(GameOutcome {
                winner: PointWinner::Server,
                server_points,
                returner_points,
            });
        }
        if returner_points >= POINTS_TO_WIN && returner_points >= server_points + MARGIN {
            return Ok(GameOutcome {
                winner: PointWinner::Returner,
                server_points,
                returner_points,
            });
        }
    }
    Err(NonTerminating {
        stage: Stage::Game,
        limit: max_points,
    })
}
