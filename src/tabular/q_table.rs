//! Value table for tabular temporal difference learning

use std::{collections::HashMap, hash::Hash};

use crate::error::{Error, Result};

/// Q-table mapping each state to one action-value per action
///
/// Rows are created lazily: the inserting accessors ([`QTable::row`],
/// [`QTable::row_mut`]) store an all-zero row the first time a state is
/// referenced. Every stored row has exactly `num_actions` entries.
#[derive(Debug, Clone)]
pub struct QTable<S> {
    /// Action-values: state -> [Q(s, 0), ..., Q(s, nA - 1)]
    values: HashMap<S, Vec<f64>>,
    num_actions: usize,
}

impl<S> QTable<S>
where
    S: Eq + Hash + Clone,
{
    /// Create an empty Q-table for `num_actions` actions
    pub fn new(num_actions: usize) -> Self {
        Self {
            values: HashMap::new(),
            num_actions,
        }
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Get the row for `state`, inserting a zero row if it is unseen
    pub fn row(&mut self, state: &S) -> &[f64] {
        self.row_mut(state)
    }

    /// Mutable row for `state`, inserting a zero row if it is unseen
    pub fn row_mut(&mut self, state: &S) -> &mut [f64] {
        let num_actions = self.num_actions;
        self.values
            .entry(state.clone())
            .or_insert_with(|| vec![0.0; num_actions])
    }

    /// Get the row for `state` without inserting
    pub fn get(&self, state: &S) -> Option<&[f64]> {
        self.values.get(state).map(Vec::as_slice)
    }

    /// Replace the row for `state`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActionCountMismatch`] if `values` does not hold one
    /// entry per action.
    pub fn insert(&mut self, state: S, values: Vec<f64>) -> Result<()> {
        if values.len() != self.num_actions {
            return Err(Error::ActionCountMismatch {
                expected: self.num_actions,
                got: values.len(),
            });
        }
        self.values.insert(state, values);
        Ok(())
    }

    /// States with a stored row, in arbitrary order
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.values.keys()
    }

    /// Drop every row
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of states with a stored row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Index of the largest action-value; ties go to the lowest index
pub fn greedy_action(row: &[f64]) -> usize {
    let mut best = 0;
    for (action, &value) in row.iter().enumerate().skip(1) {
        if value > row[best] {
            best = action;
        }
    }
    best
}

/// Largest action-value in a row
pub fn max_value(row: &[f64]) -> f64 {
    row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Arithmetic mean of a row
pub fn mean_value(row: &[f64]) -> f64 {
    if row.is_empty() {
        return 0.0;
    }
    row.iter().sum::<f64>() / row.len() as f64
}
