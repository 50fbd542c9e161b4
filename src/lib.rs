//! Misère Nim rules engine and a tabular Q-learning agent trained by self-play.

pub mod action;
pub mod arena;
pub mod bot;
pub mod bots;
pub mod error;
pub mod game;
pub mod ml;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, Player};
pub use crate::arena::{MatchOutcome, WinRate, evaluate, play_match};
pub use crate::bot::Bot;
pub use crate::bots::registry::{create_bot_from_spec, label_for_spec};
pub use crate::bots::{HeuristicBot, HumanBot, PolicyBot, RandomBot};
pub use crate::error::{ErrorKind, GameError, InvalidAction};
pub use crate::game::GameState;
pub use crate::ml::{
    AgentConfig, QLearningAgent, Trainer, TrainingConfig, TrainingSummary, Trajectory, train,
};
pub use crate::state::{DEFAULT_PILES, GameStatus, StateKey};
pub use crate::visualize::{VisualOptions, describe_action, render_state};
