use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::error::GameError;
use crate::game::GameState;

/// Baseline bot that samples uniformly from the legal action set.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_action(
        &mut self,
        _state: &GameState,
        legal_actions: &[Action],
    ) -> Result<Action, GameError> {
        legal_actions
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoLegalActions)
    }
}
