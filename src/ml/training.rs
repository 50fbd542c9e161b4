use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::agent::{AgentConfig, DEFAULT_EXPLORATION_RATE, QLearningAgent};
use crate::action::{Action, Player};
use crate::error::GameError;
use crate::game::GameState;
use crate::state::{DEFAULT_PILES, StateKey};

pub const DEFAULT_TRAINING_SEED: u64 = 0x5EED_0F_0DD_1177;
const LOSS_REWARD: f64 = -1.0;

/// Settings for a self-play run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Pile configuration every episode starts from.
    pub initial_piles: Vec<usize>,
    /// Fixed epsilon used while generating experience. Must be positive.
    pub exploration_rate: f64,
    pub seed: u64,
    /// Emit a progress line every this many episodes (0 disables it).
    pub log_every: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            initial_piles: DEFAULT_PILES.to_vec(),
            exploration_rate: DEFAULT_EXPLORATION_RATE,
            seed: DEFAULT_TRAINING_SEED,
            log_every: 1000,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.exploration_rate > 0.0 && self.exploration_rate <= 1.0) {
            return Err(GameError::InvalidConfiguration(
                "training exploration rate must lie in (0, 1]",
            ));
        }
        GameState::new(self.initial_piles.clone()).map(|_| ())
    }
}

/// One recorded decision.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryStep {
    pub state: StateKey,
    pub action: Action,
    pub player: Player,
}

/// Ordered decisions of a single episode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    steps: Vec<TrajectoryStep>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: StateKey, action: Action, player: Player) {
        self.steps.push(TrajectoryStep {
            state,
            action,
            player,
        });
    }

    pub fn steps(&self) -> &[TrajectoryStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A finished self-play game.
#[derive(Clone, Debug)]
pub struct Episode {
    pub trajectory: Trajectory,
    pub terminal: StateKey,
    pub winner: Player,
}

/// Aggregate counters for a training run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub moves: usize,
    pub first_player_wins: usize,
    pub table_size: usize,
}

/// Drives self-play episodes and backs rewards up through the value table.
pub struct Trainer<R: Rng> {
    config: TrainingConfig,
    agent_config: AgentConfig,
    rng: R,
}

impl Trainer<StdRng> {
    pub fn new(config: TrainingConfig, agent_config: AgentConfig) -> Result<Self, GameError> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, agent_config, rng)
    }
}

impl<R: Rng> Trainer<R> {
    pub fn with_rng(
        config: TrainingConfig,
        agent_config: AgentConfig,
        rng: R,
    ) -> Result<Self, GameError> {
        config.validate()?;
        agent_config.validate()?;
        Ok(Self {
            config,
            agent_config,
            rng,
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Trains a fresh agent for `num_episodes` self-play games.
    pub fn train(&mut self, num_episodes: usize) -> Result<QLearningAgent, GameError> {
        let mut agent = QLearningAgent::new(self.agent_config)?;
        self.train_agent(&mut agent, num_episodes)?;
        Ok(agent)
    }

    /// Continues training an existing agent. Its own configuration is kept.
    pub fn train_agent(
        &mut self,
        agent: &mut QLearningAgent,
        num_episodes: usize,
    ) -> Result<TrainingSummary, GameError> {
        log::info!(
            "training {} episodes from {:?} (epsilon {}, alpha {})",
            num_episodes,
            self.config.initial_piles,
            self.config.exploration_rate,
            agent.learning_rate()
        );
        let mut summary = TrainingSummary::default();
        for episode_index in 0..num_episodes {
            let episode = self.run_episode(agent)?;
            assign_credit(agent, &episode);
            summary.episodes += 1;
            summary.moves += episode.trajectory.len();
            if episode.winner == Player::First {
                summary.first_player_wins += 1;
            }
            if self.config.log_every > 0 && (episode_index + 1) % self.config.log_every == 0 {
                log::debug!(
                    "episode {:>8}  moves {:>3}  table {:>6}",
                    episode_index + 1,
                    episode.trajectory.len(),
                    agent.len()
                );
            }
        }
        summary.table_size = agent.len();
        log::info!(
            "training finished: {} moves, {} estimates",
            summary.moves,
            summary.table_size
        );
        Ok(summary)
    }

    /// Plays one game against itself without touching the value table.
    pub fn run_episode(&mut self, agent: &QLearningAgent) -> Result<Episode, GameError> {
        let mut game = GameState::new(self.config.initial_piles.clone())?;
        let mut trajectory = Trajectory::new();
        loop {
            let state = game.key();
            let legal = game.legal_actions();
            let action =
                agent.choose_action(&state, &legal, self.config.exploration_rate, &mut self.rng)?;
            trajectory.push(state, action, game.player());
            game.play(action)?;
            if let Some(winner) = game.winner() {
                return Ok(Episode {
                    trajectory,
                    terminal: game.key(),
                    winner,
                });
            }
        }
    }
}

/// Walks an episode backwards applying the delayed reward.
///
/// The loser's final move is scored -1 against the terminal state. Every other
/// move is scored 0 against the next state the same player faces, which is two
/// plies later, or the terminal state when that player never moves again.
/// Estimates always belong to the player to move, so bootstrapping from the
/// opponent's position would flip the sign of the signal.
pub fn assign_credit(agent: &mut QLearningAgent, episode: &Episode) {
    let steps = episode.trajectory.steps();
    let Some(last) = steps.len().checked_sub(1) else {
        return;
    };
    for (index, step) in steps.iter().enumerate().rev() {
        let reward = if index == last { LOSS_REWARD } else { 0.0 };
        let next_state = steps
            .get(index + 2)
            .map(|next| &next.state)
            .unwrap_or(&episode.terminal);
        agent.update(&step.state, step.action, reward, next_state);
    }
}

/// Trains a fresh agent with the default configuration.
pub fn train(num_episodes: usize) -> Result<QLearningAgent, GameError> {
    Trainer::new(TrainingConfig::default(), AgentConfig::default())?.train(num_episodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(steps: Vec<(Vec<usize>, Action, Player)>, terminal: Vec<usize>) -> Episode {
        let mut trajectory = Trajectory::new();
        for (piles, action, player) in steps {
            trajectory.push(StateKey::from(piles), action, player);
        }
        Episode {
            trajectory,
            terminal: StateKey::from(terminal),
            winner: Player::First,
        }
    }

    #[test]
    fn losing_move_is_punished() {
        let mut agent = QLearningAgent::default();
        let ep = episode(
            vec![
                (vec![2], Action::new(0, 1), Player::First),
                (vec![1], Action::new(0, 1), Player::Second),
            ],
            vec![0],
        );
        assign_credit(&mut agent, &ep);
        assert_eq!(agent.value(&StateKey::from(vec![1]), Action::new(0, 1)), -0.5);
        // The winning move bootstraps from the terminal state and stays at 0.
        assert_eq!(agent.value(&StateKey::from(vec![2]), Action::new(0, 1)), 0.0);
    }

    #[test]
    fn credit_flows_back_to_the_same_player() {
        let mut agent = QLearningAgent::default();
        let ep = Episode {
            winner: Player::Second,
            ..episode(
                vec![
                    (vec![2, 1], Action::new(0, 1), Player::First),
                    (vec![1, 1], Action::new(0, 1), Player::Second),
                    (vec![0, 1], Action::new(1, 1), Player::First),
                ],
                vec![0, 0],
            )
        };
        assign_credit(&mut agent, &ep);
        let lost = agent.value(&StateKey::from(vec![0, 1]), Action::new(1, 1));
        assert_eq!(lost, -0.5);
        // First's opening move is scored against [0, 1], where its only move is worth -0.5.
        let opening = agent.value(&StateKey::from(vec![2, 1]), Action::new(0, 1));
        assert_eq!(opening, -0.25);
        // Second never moves again, so its move is scored against the terminal state.
        assert_eq!(agent.value(&StateKey::from(vec![1, 1]), Action::new(0, 1)), 0.0);
    }

    #[test]
    fn empty_trajectory_is_a_no_op() {
        let mut agent = QLearningAgent::default();
        assign_credit(&mut agent, &episode(Vec::new(), vec![0]));
        assert!(agent.is_empty());
    }

    #[test]
    fn zero_exploration_is_rejected_for_training() {
        let config = TrainingConfig {
            exploration_rate: 0.0,
            ..TrainingConfig::default()
        };
        assert!(matches!(
            Trainer::new(config, AgentConfig::default()),
            Err(GameError::InvalidConfiguration(_))
        ));
    }
}
