//! Head-to-head games between bots.
//!
//! Win rates are counted per game, with the two bots swapping seats every game
//! so neither profits from always moving first.

use crate::action::Player;
use crate::bot::Bot;
use crate::error::GameError;
use crate::game::GameState;

/// Result of a single finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Player,
    pub moves: usize,
}

/// Plays one game to completion, `first` moving first.
pub fn play_match(
    first: &mut dyn Bot,
    second: &mut dyn Bot,
    initial: &[usize],
) -> Result<MatchOutcome, GameError> {
    let mut game = GameState::new(initial.to_vec())?;
    let mut moves = 0usize;
    loop {
        if let Some(winner) = game.winner() {
            return Ok(MatchOutcome { winner, moves });
        }
        let legal = game.legal_actions();
        let action = match game.player() {
            Player::First => first.select_action(&game, &legal)?,
            Player::Second => second.select_action(&game, &legal)?,
        };
        game.play(action)?;
        moves += 1;
    }
}

/// Wins out of games played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WinRate {
    pub wins: usize,
    pub games: usize,
}

impl WinRate {
    pub fn rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    /// Binomial standard error of `rate`.
    pub fn standard_error(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let p = self.rate();
        (p * (1.0 - p) / self.games as f64).sqrt()
    }

    pub fn record(&mut self, won: bool) {
        self.games += 1;
        if won {
            self.wins += 1;
        }
    }
}

/// Plays `games` games and counts the challenger's wins. Seats alternate,
/// the challenger moving first in even-numbered games.
pub fn evaluate(
    challenger: &mut dyn Bot,
    opponent: &mut dyn Bot,
    games: usize,
    initial: &[usize],
) -> Result<WinRate, GameError> {
    let mut result = WinRate::default();
    for game_index in 0..games {
        let (outcome, seat) = if game_index % 2 == 0 {
            (play_match(challenger, opponent, initial)?, Player::First)
        } else {
            (play_match(opponent, challenger, initial)?, Player::Second)
        };
        result.record(outcome.winner == seat);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;

    /// Always takes one object from the first non-empty pile.
    struct Nibbler;

    impl Bot for Nibbler {
        fn select_action(
            &mut self,
            _state: &GameState,
            legal_actions: &[Action],
        ) -> Result<Action, GameError> {
            legal_actions
                .iter()
                .copied()
                .find(|action| action.count == 1)
                .ok_or(GameError::NoLegalActions)
        }
    }

    #[test]
    fn odd_total_loses_for_the_first_mover() {
        // Three objects taken one at a time: the first player takes the last one.
        let outcome = play_match(&mut Nibbler, &mut Nibbler, &[1, 2]).expect("game finishes");
        assert_eq!(outcome.moves, 3);
        assert_eq!(outcome.winner, Player::Second);
    }

    #[test]
    fn evaluate_swaps_seats() {
        // With an odd total the second mover always wins, so each bot wins half.
        let result = evaluate(&mut Nibbler, &mut Nibbler, 10, &[3]).expect("games finish");
        assert_eq!(result, WinRate { wins: 5, games: 10 });
        assert_eq!(result.rate(), 0.5);
    }

    #[test]
    fn standard_error_of_empty_record_is_zero() {
        let empty = WinRate::default();
        assert_eq!(empty.rate(), 0.0);
        assert_eq!(empty.standard_error(), 0.0);
    }

    #[test]
    fn rejects_invalid_initial_piles() {
        assert!(play_match(&mut Nibbler, &mut Nibbler, &[0, 0]).is_err());
    }
}
