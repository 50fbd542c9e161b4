use serde::{Deserialize, Serialize};

use crate::action::{Action, Player};

/// Pile configuration used when none is given.
pub const DEFAULT_PILES: [usize; 4] = [1, 3, 5, 7];

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: Player },
}

/// Canonical, hashable form of a pile collection.
///
/// Two positions with the same pile counts share a key no matter how they were
/// reached, so the key carries everything needed to enumerate moves.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey(Box<[usize]>);

impl StateKey {
    pub fn piles(&self) -> &[usize] {
        &self.0
    }

    pub fn is_terminal(&self) -> bool {
        self.0.iter().all(|&count| count == 0)
    }

    /// Every `(pile, count)` pair with `1 <= count <= pile size`, ordered by pile then count.
    pub fn legal_actions(&self) -> Vec<Action> {
        legal_actions_for(&self.0)
    }
}

impl From<&[usize]> for StateKey {
    fn from(piles: &[usize]) -> Self {
        Self(piles.into())
    }
}

impl From<Vec<usize>> for StateKey {
    fn from(piles: Vec<usize>) -> Self {
        Self(piles.into_boxed_slice())
    }
}

pub(crate) fn legal_actions_for(piles: &[usize]) -> Vec<Action> {
    let mut actions = Vec::with_capacity(piles.iter().sum());
    for (pile, &size) in piles.iter().enumerate() {
        for count in 1..=size {
            actions.push(Action::new(pile, count));
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ignores_history() {
        let a = StateKey::from(vec![1, 0, 2]);
        let b = StateKey::from(&[1usize, 0, 2][..]);
        assert_eq!(a, b);
        assert_ne!(a, StateKey::from(vec![2, 0, 1]));
    }

    #[test]
    fn terminal_key_has_no_actions() {
        let key = StateKey::from(vec![0, 0]);
        assert!(key.is_terminal());
        assert!(key.legal_actions().is_empty());
    }

    #[test]
    fn actions_are_ordered_by_pile_then_count() {
        let key = StateKey::from(vec![2, 0, 1]);
        assert_eq!(
            key.legal_actions(),
            vec![Action::new(0, 1), Action::new(0, 2), Action::new(2, 1)]
        );
    }
}
