//! This module defines the core data structures and types shared by the automaton model,
//! including symbols, states, transitions, recorded processing steps, run outcomes and
//! error types.

use crate::tape::Tape;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The literal character every state name starts with.
pub const STATE_PREFIX: char = 'q';
/// The symbol used to denote the empty word in derivations.
pub const EMPTY_WORD: char = 'ε';
/// The marker rendered in place of a destination when a transition is undefined.
pub const UNDEFINED_MARKER: &str = "(undefined symbol)";

/// A single input character of the automaton.
///
/// Symbols are ordered and compared by their underlying character value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(char);

impl Symbol {
    /// Creates a new symbol from a character.
    pub fn new(value: char) -> Self {
        Self(value)
    }

    /// Returns the underlying character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Self(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named automaton state.
///
/// The name always has the form `q<n>` with `n` a non-negative integer; the numeric
/// part is kept alongside the name and drives the ordering inside a `StateSet`.
/// Equality is decided by name and terminal flag; use `name()` when only the identity
/// of the state matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateRepr")]
pub struct State {
    name: String,
    #[serde(skip)]
    index: u64,
    terminal: bool,
}

#[derive(Deserialize)]
struct StateRepr {
    name: String,
    #[serde(default)]
    terminal: bool,
}

impl TryFrom<StateRepr> for State {
    type Error = DfaError;

    fn try_from(repr: StateRepr) -> Result<Self, Self::Error> {
        let mut state = State::new(repr.name)?;
        state.set_terminal(repr.terminal);
        Ok(state)
    }
}

impl State {
    /// Creates a non-terminal state after validating its name.
    ///
    /// # Returns
    ///
    /// * `Ok(State)` if the name is `q` followed by a non-negative integer.
    /// * `Err(DfaError::InvalidStateName)` otherwise.
    pub fn new(name: impl Into<String>) -> Result<Self, DfaError> {
        let name = name.into();
        let index = parse_state_name(&name)?;

        Ok(Self {
            name,
            index,
            terminal: false,
        })
    }

    /// Creates a terminal state after validating its name.
    pub fn terminal(name: impl Into<String>) -> Result<Self, DfaError> {
        let mut state = Self::new(name)?;
        state.terminal = true;
        Ok(state)
    }

    /// Returns the name of the state.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the integer parsed from the name suffix.
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn set_terminal(&mut self, terminal: bool) {
        self.terminal = terminal;
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Validates a state name and returns its numeric suffix.
///
/// `q0`, `q12` are valid. `p1` fails on the prefix; `q`, `qx` and `q-1` fail on the index,
/// as does any suffix above `u64::MAX`.
pub fn parse_state_name(name: &str) -> Result<u64, DfaError> {
    let suffix = name
        .strip_prefix(STATE_PREFIX)
        .ok_or_else(|| DfaError::InvalidStateName {
            name: name.to_string(),
            defect: NameDefect::Prefix,
        })?;

    suffix.parse().map_err(|_| DfaError::InvalidStateName {
        name: name.to_string(),
        defect: NameDefect::Index,
    })
}

/// A single entry of the transition function.
///
/// Endpoints are stored by name and resolved against the owning `StateSet` when used,
/// so a change to a state's terminal flag is visible through every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// The state the transition leaves from.
    pub origin: String,
    /// The symbol read from the tape.
    pub symbol: Symbol,
    /// The state the automaton moves to.
    pub destination: String,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "δ({}, {}) = {}", self.origin, self.symbol, self.destination)
    }
}

/// One recorded step of a simulation run.
///
/// The destination is absent exactly when the transition for the origin and the symbol
/// read was undefined; `is_valid` reports the same fact.
///
/// Steps of one run share the tape's buffer and keep only the offset of their unread
/// suffix.
#[derive(Debug, Clone)]
pub struct ProcessingStep {
    origin: State,
    symbol: char,
    destination: Option<State>,
    word: Arc<str>,
    /// Byte offset of the unread suffix in `word`.
    rest: usize,
    valid: bool,
}

impl ProcessingStep {
    /// Records a step. `remaining` is the unread part of the tape after `symbol`.
    pub fn new(
        origin: State,
        symbol: char,
        destination: Option<State>,
        remaining: &str,
    ) -> Self {
        Self::build(origin, symbol, destination, Arc::from(remaining), 0)
    }

    /// Records a step whose unread suffix starts at cell `next` of `tape`.
    pub(crate) fn on_tape(
        origin: State,
        symbol: char,
        destination: Option<State>,
        tape: &Tape,
        next: usize,
    ) -> Self {
        Self::build(origin, symbol, destination, tape.shared(), tape.offset(next))
    }

    fn build(
        origin: State,
        symbol: char,
        destination: Option<State>,
        word: Arc<str>,
        rest: usize,
    ) -> Self {
        Self {
            origin,
            symbol,
            valid: destination.is_some(),
            destination,
            word,
            rest,
        }
    }

    /// Returns the state the step started from.
    pub fn origin(&self) -> &State {
        &self.origin
    }

    /// Returns the symbol read in this step.
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Returns the state reached, or `None` when the transition was undefined.
    pub fn destination(&self) -> Option<&State> {
        self.destination.as_ref()
    }

    /// Returns the unread suffix of the tape after this step's symbol.
    pub fn remaining(&self) -> &str {
        &self.word[self.rest..]
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl PartialEq for ProcessingStep {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.symbol == other.symbol
            && self.destination == other.destination
            && self.remaining() == other.remaining()
    }
}

impl Eq for ProcessingStep {}

impl Serialize for ProcessingStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut step = serializer.serialize_struct("ProcessingStep", 5)?;
        step.serialize_field("origin", &self.origin)?;
        step.serialize_field("symbol", &self.symbol)?;
        step.serialize_field("destination", &self.destination)?;
        step.serialize_field("remaining", self.remaining())?;
        step.serialize_field("valid", &self.valid)?;
        step.end()
    }
}

/// The terminal configuration of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The whole tape was consumed and the run ended in a terminal state.
    Accepted { state: String },
    /// The whole tape was consumed and the run ended in a non-terminal state.
    Rejected { state: String },
    /// No transition is defined for `state` and `symbol`, read at `position`.
    Undefined {
        state: String,
        symbol: char,
        position: usize,
    },
}

impl Outcome {
    /// Returns `true` if the word was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    /// Returns the name of the state the run stopped in.
    pub fn state(&self) -> &str {
        match self {
            Outcome::Accepted { state }
            | Outcome::Rejected { state }
            | Outcome::Undefined { state, .. } => state,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted { state } => write!(f, "accepted in {state}"),
            Outcome::Rejected { state } => write!(f, "rejected in non-terminal state {state}"),
            Outcome::Undefined {
                state,
                symbol,
                position,
            } => write!(
                f,
                "rejected: no transition from {state} on '{symbol}' at position {position}"
            ),
        }
    }
}

/// The part of a state name that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameDefect {
    /// The name does not start with `q`.
    Prefix,
    /// The suffix is not a non-negative integer that fits in a `u64`.
    Index,
}

impl fmt::Display for NameDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameDefect::Prefix => write!(f, "name must start with '{STATE_PREFIX}'"),
            NameDefect::Index => {
                write!(f, "'{STATE_PREFIX}' must be followed by a non-negative integer")
            }
        }
    }
}

/// Represents the errors that can occur while editing or running an automaton.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DfaError {
    /// A state name does not match `q<non-negative integer>`.
    #[error("Invalid state name '{name}': {defect}")]
    InvalidStateName { name: String, defect: NameDefect },
    /// The transition function does not cover every (state, symbol) pair.
    #[error("Transition function is not totally defined: {defined} of {required} transitions")]
    IncompleteTransitionFunction { defined: usize, required: usize },
    /// A state name that is not part of the state set.
    #[error("Unknown state: {0}")]
    UnknownState(String),
    /// A run was requested before an initial state was selected.
    #[error("No initial state selected")]
    MissingInitialState,
    /// No sample automaton is registered under the given name.
    #[error("Sample '{0}' not found")]
    UnknownSample(String),
}
