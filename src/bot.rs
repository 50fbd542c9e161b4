use crate::action::Action;
use crate::error::GameError;
use crate::game::GameState;

/// Interface for anything that can pick a Nim move.
pub trait Bot {
    fn select_action(
        &mut self,
        state: &GameState,
        legal_actions: &[Action],
    ) -> Result<Action, GameError>;
}
