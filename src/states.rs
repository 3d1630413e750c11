//! This module provides the `StateSet` owning the states of an automaton, and the
//! read-only `StateSnapshot` returned by its terminal/non-terminal filters.

use crate::types::{DfaError, State};
use tracing::trace;

/// The set of states of an automaton.
///
/// States are unique by name and kept sorted by the integer suffix of their names,
/// so `q2, q0, q10, q1` enumerate as `q0, q1, q2, q10`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSet {
    states: Vec<State>,
}

impl StateSet {
    /// Creates an empty state set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new non-terminal state named `name`.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the state was added.
    /// * `Ok(false)` if a state with that name already exists; the set is unchanged.
    /// * `Err(DfaError::InvalidStateName)` if the name is not `q<non-negative integer>`.
    pub fn insert(&mut self, name: &str) -> Result<bool, DfaError> {
        let state = State::new(name)?;
        Ok(self.insert_state(state))
    }

    /// Inserts an already validated state. Returns `false` if the name is taken.
    pub fn insert_state(&mut self, state: State) -> bool {
        if self.contains(state.name()) {
            return false;
        }

        self.states.push(state);
        self.states.sort_by_key(State::index);
        true
    }

    /// Inserts every valid name of `names`.
    ///
    /// Invalid names do not stop the batch. One diagnostic is returned per distinct
    /// offending name, in the order they were first seen; an empty vector means every
    /// name was accepted.
    pub fn insert_all<'a, I>(&mut self, names: I) -> Vec<DfaError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut errors: Vec<DfaError> = Vec::new();

        for name in names {
            if let Err(error) = self.insert(name) {
                if !errors.contains(&error) {
                    trace!(%error, "rejected state name");
                    errors.push(error);
                }
            }
        }

        errors
    }

    /// Removes the state named `name`. Returns `true` if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(index) => {
                self.states.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the position of the state named `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        index_of(&self.states, name)
    }

    /// Returns the state at `index` in sorted order.
    pub fn at(&self, index: usize) -> Option<&State> {
        self.states.get(index)
    }

    /// Looks up a state by name.
    pub fn get(&self, name: &str) -> Option<&State> {
        self.index_of(name).map(|index| &self.states[index])
    }

    /// Looks up a state by name for in-place edits of its terminal flag.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut State> {
        let index = self.index_of(name)?;
        self.states.get_mut(index)
    }

    /// Marks the state named `name` as terminal or non-terminal.
    pub fn set_terminal(&mut self, name: &str, terminal: bool) -> Result<(), DfaError> {
        let state = self
            .get_mut(name)
            .ok_or_else(|| DfaError::UnknownState(name.to_string()))?;
        state.set_terminal(terminal);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Iterates over the states in ascending index order.
    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    /// Returns a snapshot holding only the terminal states.
    pub fn terminal_states(&self) -> StateSnapshot {
        self.filtered(true)
    }

    /// Returns a snapshot holding only the non-terminal states.
    pub fn non_terminal_states(&self) -> StateSnapshot {
        self.filtered(false)
    }

    fn filtered(&self, terminal: bool) -> StateSnapshot {
        StateSnapshot {
            states: self
                .states
                .iter()
                .filter(|state| state.is_terminal() == terminal)
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

/// An independent, read-only copy of part of a `StateSet`.
///
/// A snapshot keeps the sort order of the set it was taken from but does not follow
/// later edits; take a new one after changing the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    states: Vec<State>,
}

impl StateSnapshot {
    pub fn index_of(&self, name: &str) -> Option<usize> {
        index_of(&self.states, name)
    }

    pub fn at(&self, index: usize) -> Option<&State> {
        self.states.get(index)
    }

    pub fn get(&self, name: &str) -> Option<&State> {
        self.index_of(name).map(|index| &self.states[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    /// Returns the state names in order.
    pub fn names(&self) -> Vec<&str> {
        self.states.iter().map(State::name).collect()
    }
}

impl<'a> IntoIterator for &'a StateSnapshot {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

fn index_of(states: &[State], name: &str) -> Option<usize> {
    states.iter().rposition(|state| state.name() == name)
}
