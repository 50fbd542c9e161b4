use std::io::{self, Write};

use crate::action::Action;
use crate::bot::Bot;
use crate::error::GameError;
use crate::game::GameState;
use crate::visualize::{describe_action, render_state};

/// Interactive bot that queries a human via standard input.
pub struct HumanBot {
    name: String,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

impl Bot for HumanBot {
    fn select_action(
        &mut self,
        state: &GameState,
        legal_actions: &[Action],
    ) -> Result<Action, GameError> {
        if legal_actions.is_empty() {
            return Err(GameError::NoLegalActions);
        }
        loop {
            println!("\n=== {}'s turn ({}) ===", self.name, state.player());
            println!("{}", render_state(state));
            println!("Type '<pile> <count>', 'help' or 'q' to quit.");
            print!("Move: ");
            if io::stdout().flush().is_err() {
                eprintln!("failed to flush stdout");
            }
            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_err() {
                eprintln!("failed to read input");
                continue;
            }
            let trimmed = input.trim();
            if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
                println!("Exiting game at user's request.");
                std::process::exit(0);
            }
            if trimmed.eq_ignore_ascii_case("help") {
                println!("Enter the pile index followed by how many objects to remove, e.g. '2 3'.");
                continue;
            }
            let Some(action) = parse_move(trimmed) else {
                println!("Invalid input: '{trimmed}'. Expected two numbers.");
                continue;
            };
            // Rejected moves are reported with the engine's own wording.
            if let Err(err) = state.apply(action) {
                println!("{err}");
                continue;
            }
            println!("You chose: {}", describe_action(&action));
            return Ok(action);
        }
    }
}

fn parse_move(input: &str) -> Option<Action> {
    let mut parts = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());
    let pile = parts.next()?.parse().ok()?;
    let count = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Action::new(pile, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_and_comma_separated_moves() {
        assert_eq!(parse_move("2 3"), Some(Action::new(2, 3)));
        assert_eq!(parse_move("1,4"), Some(Action::new(1, 4)));
        assert_eq!(parse_move("1, 4"), Some(Action::new(1, 4)));
    }

    #[test]
    fn rejects_malformed_moves() {
        assert_eq!(parse_move("2"), None);
        assert_eq!(parse_move("a b"), None);
        assert_eq!(parse_move("1 2 3"), None);
        assert_eq!(parse_move("-1 2"), None);
    }
}
