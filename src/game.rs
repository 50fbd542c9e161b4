use serde::Serialize;

use crate::action::{Action, Player};
use crate::error::{GameError, InvalidAction};
use crate::state::{DEFAULT_PILES, GameStatus, StateKey, legal_actions_for};

/// Core misère Nim rules engine.
///
/// The winner is set exactly when every pile is empty. The player who takes the
/// last object loses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameState {
    piles: Vec<usize>,
    player: Player,
    winner: Option<Player>,
}

impl GameState {
    pub fn new(piles: Vec<usize>) -> Result<Self, GameError> {
        if piles.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "at least one pile is required",
            ));
        }
        if piles.iter().all(|&count| count == 0) {
            return Err(GameError::InvalidConfiguration(
                "piles must hold at least one object",
            ));
        }
        Ok(Self {
            piles,
            player: Player::First,
            winner: None,
        })
    }

    /// Builds a state from signed counts as they arrive from callers outside the crate.
    pub fn from_counts(counts: &[i64]) -> Result<Self, GameError> {
        let mut piles = Vec::with_capacity(counts.len());
        for (index, &count) in counts.iter().enumerate() {
            let size =
                usize::try_from(count).map_err(|_| GameError::NegativePile { index, count })?;
            piles.push(size);
        }
        Self::new(piles)
    }

    /// The classic `[1, 3, 5, 7]` opening.
    pub fn standard() -> Self {
        Self {
            piles: DEFAULT_PILES.to_vec(),
            player: Player::First,
            winner: None,
        }
    }

    pub fn piles(&self) -> &[usize] {
        &self.piles
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(winner) => GameStatus::Finished { winner },
            None => GameStatus::Ongoing,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.piles.iter().all(|&count| count == 0)
    }

    /// Total number of objects left on the table.
    pub fn remaining(&self) -> usize {
        self.piles.iter().sum()
    }

    pub fn key(&self) -> StateKey {
        StateKey::from(self.piles.as_slice())
    }

    pub fn legal_actions(&self) -> Vec<Action> {
        legal_actions_for(&self.piles)
    }

    /// Returns the successor state, leaving `self` untouched.
    pub fn apply(&self, action: Action) -> Result<Self, GameError> {
        let mut next = self.clone();
        next.play(action)?;
        Ok(next)
    }

    /// Applies a move in place. Nothing changes when the move is rejected.
    pub fn play(&mut self, action: Action) -> Result<(), GameError> {
        self.validate(action)?;
        self.piles[action.pile] -= action.count;
        let mover = self.player;
        self.player = mover.other();
        if self.is_terminal() {
            self.winner = Some(mover.other());
        }
        Ok(())
    }

    fn validate(&self, action: Action) -> Result<(), InvalidAction> {
        if self.is_terminal() {
            return Err(InvalidAction::GameOver);
        }
        let Some(&available) = self.piles.get(action.pile) else {
            return Err(InvalidAction::PileIndex {
                index: action.pile,
                piles: self.piles.len(),
            });
        };
        if action.count == 0 {
            return Err(InvalidAction::ZeroCount);
        }
        if action.count > available {
            return Err(InvalidAction::CountExceedsPile {
                pile: action.pile,
                count: action.count,
                available,
            });
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::standard()
    }
}
