use thiserror::Error;

/// Errors that can occur when configuring, playing or querying the engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("invalid configuration: pile {index} has negative count {count}")]
    NegativePile { index: usize, count: i64 },
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("no legal actions available")]
    NoLegalActions,
}

/// Coarse classification used by callers that translate errors into responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad initial configuration. A caller bug.
    Configuration,
    /// A move broke the rules. Client-correctable.
    InvalidAction,
    /// An action was requested for a finished game. A caller bug.
    NoLegalAction,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidConfiguration(_) | GameError::NegativePile { .. } => {
                ErrorKind::Configuration
            }
            GameError::InvalidAction(_) => ErrorKind::InvalidAction,
            GameError::NoLegalActions => ErrorKind::NoLegalAction,
        }
    }
}

/// Details of rejected moves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("game is already over")]
    GameOver,
    #[error("pile index {index} is out of range for {piles} piles")]
    PileIndex { index: usize, piles: usize },
    #[error("must remove at least one object")]
    ZeroCount,
    #[error("cannot remove {count} from pile {pile} holding {available}")]
    CountExceedsPile {
        pile: usize,
        count: usize,
        available: usize,
    },
}
