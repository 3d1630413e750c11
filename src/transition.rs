//! This module provides the `TransitionFunction`, the partial mapping from
//! (state, symbol) pairs to successor states.

use crate::alphabet::Alphabet;
use crate::states::StateSet;
use crate::types::{State, Transition};

/// The transitions of an automaton, addressed by origin name and symbol.
///
/// The function does not own the states or the symbols it refers to. Operations that
/// need to resolve them take the owning `StateSet` and `Alphabet` as arguments; the
/// `Automaton` wires these together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionFunction {
    transitions: Vec<Transition>,
}

impl TransitionFunction {
    /// Creates an empty transition function.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the transition `δ(origin, symbol) = destination`.
    ///
    /// # Returns
    ///
    /// * `true` if the transition was recorded.
    /// * `false` if `origin` or `destination` is not in `states`, `symbol` is not in
    ///   `alphabet`, or a transition for `(origin, symbol)` already exists.
    pub fn add_transition(
        &mut self,
        states: &StateSet,
        alphabet: &Alphabet,
        origin: &str,
        symbol: char,
        destination: &str,
    ) -> bool {
        let (Some(origin), Some(symbol), Some(destination)) = (
            states.get(origin),
            alphabet.get(symbol),
            states.get(destination),
        ) else {
            return false;
        };

        if self.find(origin.name(), symbol.as_char()).is_some() {
            return false;
        }

        self.transitions.push(Transition {
            origin: origin.name().to_string(),
            symbol,
            destination: destination.name().to_string(),
        });
        true
    }

    /// Returns the destination name of the transition for `(origin, symbol)`.
    pub fn lookup(&self, origin: &str, symbol: char) -> Option<&str> {
        self.find(origin, symbol)
            .map(|transition| transition.destination.as_str())
    }

    /// Resolves the destination of `(origin, symbol)` against `states`.
    ///
    /// A transition whose destination has since been removed from the set resolves
    /// to `None`, the same as an undefined one.
    pub fn resolve<'s>(&self, states: &'s StateSet, origin: &str, symbol: char) -> Option<&'s State> {
        self.lookup(origin, symbol)
            .and_then(|destination| states.get(destination))
    }

    fn find(&self, origin: &str, symbol: char) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.origin == origin && t.symbol.as_char() == symbol)
    }

    /// Removes every transition.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Returns the number of recorded transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition> {
        self.transitions.iter()
    }

    /// Returns how many transitions a totally defined function over `states` and
    /// `alphabet` holds.
    pub fn required(states: &StateSet, alphabet: &Alphabet) -> usize {
        states.len() * alphabet.len()
    }

    /// Checks whether the function is totally defined over `states` × `alphabet`.
    ///
    /// This compares counts only: it holds when the number of transitions equals
    /// `|states| * |alphabet|` and both sets are non-empty. `add_transition` rejects a
    /// second entry for the same pair, so the count matches only when every pair was
    /// filled, provided the function was rebuilt after the last edit of either set.
    /// Stale entries left over from removed states or symbols are still counted, so
    /// this is not a check to run against untrusted input.
    pub fn is_totally_defined(&self, states: &StateSet, alphabet: &Alphabet) -> bool {
        !states.is_empty()
            && !alphabet.is_empty()
            && self.transitions.len() == Self::required(states, alphabet)
    }
}
