use crate::action::Action;
use crate::bot::Bot;
use crate::error::GameError;
use crate::game::GameState;

/// Plays the closed-form misère strategy.
///
/// Used as a strong reference opponent when measuring trained agents. Training
/// never consults it.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }
}

impl Bot for HeuristicBot {
    fn select_action(
        &mut self,
        state: &GameState,
        legal_actions: &[Action],
    ) -> Result<Action, GameError> {
        if legal_actions.is_empty() {
            return Err(GameError::NoLegalActions);
        }
        misere_move(state.piles()).ok_or(GameError::NoLegalActions)
    }
}

/// Best misère move for `piles`, or `None` when every pile is empty.
///
/// While two or more piles hold more than one object this is ordinary nim-sum
/// play. Once at most one pile is large, the aim flips to leaving an odd number
/// of single-object piles.
pub fn misere_move(piles: &[usize]) -> Option<Action> {
    let mut large = piles
        .iter()
        .enumerate()
        .filter(|&(_, &size)| size > 1)
        .map(|(pile, _)| pile);
    let first_large = large.next();
    let second_large = large.next();

    match (first_large, second_large) {
        (None, _) => piles
            .iter()
            .position(|&size| size == 1)
            .map(|pile| Action::new(pile, 1)),
        (Some(pile), None) => {
            let singles = piles.iter().filter(|&&size| size == 1).count();
            let size = piles[pile];
            let count = if singles % 2 == 0 { size - 1 } else { size };
            Some(Action::new(pile, count))
        }
        (Some(_), Some(_)) => {
            let nim_sum = piles.iter().fold(0, |acc, &size| acc ^ size);
            if nim_sum == 0 {
                return largest_pile(piles).map(|pile| Action::new(pile, 1));
            }
            piles
                .iter()
                .position(|&size| size ^ nim_sum < size)
                .map(|pile| Action::new(pile, piles[pile] - (piles[pile] ^ nim_sum)))
        }
    }
}

fn largest_pile(piles: &[usize]) -> Option<usize> {
    piles
        .iter()
        .enumerate()
        .filter(|&(_, &size)| size > 0)
        .max_by_key(|&(_, &size)| size)
        .map(|(pile, _)| pile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_odd_singles_in_the_endgame() {
        // Two singles is even, so keep one object behind on the large pile.
        assert_eq!(misere_move(&[1, 1, 4]), Some(Action::new(2, 3)));
        assert_eq!(misere_move(&[1, 4]), Some(Action::new(1, 4)));
        assert_eq!(misere_move(&[0, 2]), Some(Action::new(1, 1)));
    }

    #[test]
    fn takes_a_single_when_nothing_else_is_left() {
        assert_eq!(misere_move(&[0, 1, 1]), Some(Action::new(1, 1)));
        assert_eq!(misere_move(&[0, 0]), None);
    }

    #[test]
    fn zeroes_the_nim_sum_with_several_large_piles() {
        let action = misere_move(&[1, 3, 5, 6]).expect("a move exists");
        let mut piles = vec![1, 3, 5, 6];
        piles[action.pile] -= action.count;
        assert_eq!(piles.iter().fold(0, |acc, &size| acc ^ size), 0);
    }

    #[test]
    fn stalls_from_a_lost_position() {
        // Nim-sum already zero: shave one object off the biggest pile.
        assert_eq!(misere_move(&[2, 3, 1]), Some(Action::new(1, 1)));
    }
}
