use std::fmt;

use serde::{Deserialize, Serialize};

/// Side to move. Nim is strictly two-player.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Returns the opponent.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Zero-based seat index.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index())
    }
}

/// Remove `count` objects from the pile at index `pile`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub pile: usize,
    pub count: usize,
}

impl Action {
    pub fn new(pile: usize, count: usize) -> Self {
        Self { pile, count }
    }
}

impl From<(usize, usize)> for Action {
    fn from((pile, count): (usize, usize)) -> Self {
        Self { pile, count }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.pile, self.count)
    }
}
