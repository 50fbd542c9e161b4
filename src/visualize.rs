use std::fmt::Write;

use crate::action::Action;
use crate::game::GameState;
use crate::state::GameStatus;

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub token: char,
    pub show_counts: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            token: '|',
            show_counts: true,
        }
    }
}

pub fn render_state(state: &GameState) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameState, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status() {
        GameStatus::Ongoing => format!("Ongoing ({} to move)", state.player()),
        GameStatus::Finished { winner } => format!("Finished (winner: {winner})"),
    };
    let _ = writeln!(out, "Game status: {status}");
    for (index, &size) in state.piles().iter().enumerate() {
        let tokens: String = std::iter::repeat_n(options.token, size)
            .flat_map(|token| [token, ' '])
            .collect();
        if options.show_counts {
            let _ = writeln!(out, "  Pile {index}: {:<2} {}", size, tokens.trim_end());
        } else {
            let _ = writeln!(out, "  Pile {index}: {}", tokens.trim_end());
        }
    }
    out
}

pub fn describe_action(action: &Action) -> String {
    let noun = if action.count == 1 { "object" } else { "objects" };
    format!("remove {} {noun} from pile {}", action.count, action.pile)
}
