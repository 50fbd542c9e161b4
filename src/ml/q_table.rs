use std::collections::HashMap;

use crate::action::Action;
use crate::state::StateKey;

/// Value estimates keyed by `(state, action)`. Unseen pairs are worth 0.
#[derive(Clone, Debug, Default)]
pub struct QTable {
    values: HashMap<(StateKey, Action), f64>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: &StateKey, action: Action) -> f64 {
        self.values
            .get(&(state.clone(), action))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, state: StateKey, action: Action, value: f64) {
        self.values.insert((state, action), value);
    }

    /// Maximum estimate over the given actions, 0 when there are none.
    pub fn max_value(&self, state: &StateKey, actions: &[Action]) -> f64 {
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(StateKey, Action), &f64)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_pairs_default_to_zero() {
        let table = QTable::new();
        let key = StateKey::from(vec![1, 3]);
        assert_eq!(table.get(&key, Action::new(1, 2)), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn max_value_counts_unseen_actions() {
        let mut table = QTable::new();
        let key = StateKey::from(vec![2]);
        table.set(key.clone(), Action::new(0, 1), -0.5);
        let actions = key.legal_actions();
        // (0, 2) is unseen and therefore beats the negative estimate.
        assert_eq!(table.max_value(&key, &actions), 0.0);
        table.set(key.clone(), Action::new(0, 2), -0.25);
        assert_eq!(table.max_value(&key, &actions), -0.25);
    }

    #[test]
    fn max_value_without_actions_is_zero() {
        let table = QTable::new();
        let key = StateKey::from(vec![0, 0]);
        assert_eq!(table.max_value(&key, &[]), 0.0);
    }
}
