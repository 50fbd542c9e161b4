pub mod agent;
pub mod q_table;
pub mod training;

pub use agent::{AgentConfig, DEFAULT_EXPLORATION_RATE, DEFAULT_LEARNING_RATE, QLearningAgent};
pub use q_table::QTable;
pub use training::{
    DEFAULT_TRAINING_SEED, Episode, Trainer, TrainingConfig, TrainingSummary, Trajectory,
    TrajectoryStep, assign_credit, train,
};
