use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::q_table::QTable;
use crate::action::Action;
use crate::error::GameError;
use crate::game::GameState;
use crate::state::StateKey;

pub const DEFAULT_LEARNING_RATE: f64 = 0.5;
pub const DEFAULT_EXPLORATION_RATE: f64 = 0.1;

/// Recognized agent settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub learning_rate: f64,
    pub default_exploration_rate: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            default_exploration_rate: DEFAULT_EXPLORATION_RATE,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(GameError::InvalidConfiguration(
                "learning rate must lie in (0, 1]",
            ));
        }
        check_exploration_rate(self.default_exploration_rate)
    }
}

pub(crate) fn check_exploration_rate(rate: f64) -> Result<(), GameError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(GameError::InvalidConfiguration(
            "exploration rate must lie in [0, 1]",
        ))
    }
}

/// Tabular Q-learning agent with an epsilon-greedy policy.
///
/// Queries take `&self` and draw randomness from the caller's generator, so a
/// trained agent can serve many games at once as long as nobody is updating it.
#[derive(Clone, Debug)]
pub struct QLearningAgent {
    table: QTable,
    config: AgentConfig,
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self {
            table: QTable::new(),
            config: AgentConfig::default(),
        }
    }
}

impl QLearningAgent {
    pub fn new(config: AgentConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            table: QTable::new(),
            config,
        })
    }

    pub fn config(&self) -> AgentConfig {
        self.config
    }

    pub fn learning_rate(&self) -> f64 {
        self.config.learning_rate
    }

    pub fn default_exploration_rate(&self) -> f64 {
        self.config.default_exploration_rate
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Number of stored `(state, action)` estimates.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn value(&self, state: &StateKey, action: Action) -> f64 {
        self.table.get(state, action)
    }

    /// Best estimate over the legal actions of `state`; 0 once the game is over.
    pub fn best_value(&self, state: &StateKey) -> f64 {
        self.table.max_value(state, &state.legal_actions())
    }

    /// Every legal action of `state` whose estimate equals the maximum.
    pub fn greedy_actions(&self, state: &StateKey) -> Vec<Action> {
        maximal_actions(&self.table, state, &state.legal_actions())
    }

    /// Epsilon-greedy selection. A rate of 0 only randomizes among tied maxima.
    pub fn choose_action<R: Rng>(
        &self,
        state: &StateKey,
        legal_actions: &[Action],
        exploration_rate: f64,
        rng: &mut R,
    ) -> Result<Action, GameError> {
        if legal_actions.is_empty() {
            return Err(GameError::NoLegalActions);
        }
        check_exploration_rate(exploration_rate)?;
        if exploration_rate > 0.0 && rng.gen_bool(exploration_rate) {
            return legal_actions
                .choose(rng)
                .copied()
                .ok_or(GameError::NoLegalActions);
        }
        maximal_actions(&self.table, state, legal_actions)
            .choose(rng)
            .copied()
            .ok_or(GameError::NoLegalActions)
    }

    /// Picks a move for a live game. `explore = false` forces a greedy choice.
    pub fn act<R: Rng>(
        &self,
        game: &GameState,
        explore: bool,
        rng: &mut R,
    ) -> Result<Action, GameError> {
        let rate = if explore {
            self.config.default_exploration_rate
        } else {
            0.0
        };
        self.choose_action(&game.key(), &game.legal_actions(), rate, rng)
    }

    /// One-step temporal-difference update without discounting:
    /// `Q(s, a) += alpha * (reward + max_a' Q(s', a') - Q(s, a))`.
    pub fn update(
        &mut self,
        state: &StateKey,
        action: Action,
        reward: f64,
        next_state: &StateKey,
    ) {
        let old = self.value(state, action);
        let target = reward + self.best_value(next_state);
        let new = old + self.config.learning_rate * (target - old);
        self.table.set(state.clone(), action, new);
    }
}

fn maximal_actions(table: &QTable, state: &StateKey, actions: &[Action]) -> Vec<Action> {
    let mut best = f64::NEG_INFINITY;
    let mut tied = Vec::new();
    for &action in actions {
        let value = table.get(state, action);
        if value > best {
            best = value;
            tied.clear();
            tied.push(action);
        } else if value == best {
            tied.push(action);
        }
    }
    tied
}
