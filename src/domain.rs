use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, Serialize, Deserialize)]
pub enum Player {
    #[strum(serialize = "P1")]
    P1,
    #[strum(serialize = "P2")]
    P2,
}
impl Player {
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }
}

/// A pair of tallies (points, games or sets) from the perspective of player 1 and player 2.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub p1: u32,
    pub p2: u32,
}
impl Score {
    pub fn new(p1: u32, p2: u32) -> Self {
        Self { p1, p2 }
    }

    pub fn nil_all() -> Self {
        Self { p1: 0, p2: 0 }
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.p1 + self.p2
    }

    #[inline]
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::P1 => self.p1,
            Player::P2 => self.p2,
        }
    }

    #[inline]
    pub fn increment(&mut self, player: Player) {
        match player {
            Player::P1 => self.p1 += 1,
            Player::P2 => self.p2 += 1,
        }
    }

    /// The player who has reached at least `min` and leads by at least `margin`, if any.
    #[inline]
    pub fn leader(&self, min: u32, margin: u32) -> Option<Player> {
        if self.p1 >= min && self.p1 >= self.p2 + margin {
            Some(Player::P1)
        } else if self.p2 >= min && self.p2 >= self.p1 + margin {
            Some(Player::P2)
        } else {
            None
        }
    }

    /// The same score as seen by the other player.
    pub fn flip(&self) -> Score {
        Score {
            p1: self.p2,
            p2: self.p1,
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.p1, self.p2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other() {
        assert_eq!(Player::P2, Player::P1.other());
        assert_eq!(Player::P1, Player::P2.other());
    }

    #[test]
    fn leader() {
        assert_eq!(None, Score::new(3, 0).leader(4, 2));
        assert_eq!(Some(Player::P1), Score::new(4, 0).leader(4, 2));
        assert_eq!(None, Score::new(4, 3).leader(4, 2));
        assert_eq!(Some(Player::P2), Score::new(6, 8).leader(4, 2));
        assert_eq!(None, Score::new(6, 6).leader(6, 2));
        assert_eq!(Some(Player::P2), Score::new(0, 1).leader(1, 1));
    }

    #[test]
    fn increment_and_total() {
        let mut score = Score::nil_all();
        score.increment(Player::P1);
        score.increment(Player::P2);
        score.increment(Player::P2);
        assert_eq!(Score::new(1, 2), score);
        assert_eq!(3, score.total());
        assert_eq!(2, score.of(Player::P2));
    }

    #[test]
    fn display() {
        assert_eq!("7-6", Score::new(7, 6).to_string());
        assert_eq!("P2", Player::P2.to_string());
    }
}
