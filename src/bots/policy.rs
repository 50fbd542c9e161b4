use std::sync::Arc;

use rand::Rng;

use crate::action::Action;
use crate::bot::Bot;
use crate::error::GameError;
use crate::game::GameState;
use crate::ml::QLearningAgent;

/// Bot backed by a trained Q-learning agent.
pub struct PolicyBot<R: Rng> {
    agent: Arc<QLearningAgent>,
    rng: R,
    explore: bool,
}

impl<R: Rng> PolicyBot<R> {
    /// Greedy bot: ties between equally valued moves are broken with `rng`.
    pub fn new(agent: Arc<QLearningAgent>, rng: R) -> Self {
        Self {
            agent,
            rng,
            explore: false,
        }
    }

    /// Use the agent's default exploration rate instead of pure exploitation.
    pub fn exploring(mut self) -> Self {
        self.explore = true;
        self
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }
}

impl<R: Rng> Bot for PolicyBot<R> {
    fn select_action(
        &mut self,
        state: &GameState,
        legal_actions: &[Action],
    ) -> Result<Action, GameError> {
        let rate = if self.explore {
            self.agent.default_exploration_rate()
        } else {
            0.0
        };
        self.agent
            .choose_action(&state.key(), legal_actions, rate, &mut self.rng)
    }
}
