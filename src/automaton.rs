//! This module defines the `Automaton` struct, which owns the five components of a
//! deterministic finite automaton and simulates it over an input tape, recording each
//! processed symbol for later inspection.

use crate::alphabet::Alphabet;
use crate::states::{StateSet, StateSnapshot};
use crate::tape::Tape;
use crate::transition::TransitionFunction;
use crate::types::{DfaError, Outcome, ProcessingStep, State};
use std::fmt;
use tracing::{debug, trace};

/// One row of the tabular form of a transition function.
///
/// `cells` holds one optional destination name per alphabet symbol, in alphabet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub state: String,
    pub cells: Vec<Option<String>>,
}

/// A deterministic finite automaton `M = (Σ, Q, δ, q0, F)`.
///
/// The automaton owns its alphabet, its state set and its transition function. The
/// initial state is kept by name and is always a member of the state set, since states
/// are only removed through the automaton, and `F` is the terminal subset of the state set. The steps of the last run
/// are retained until the next one starts.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    alphabet: Alphabet,
    states: StateSet,
    transitions: TransitionFunction,
    initial: Option<String>,
    history: Vec<ProcessingStep>,
}

impl Automaton {
    /// Creates an empty automaton with no symbols, states or transitions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn alphabet_mut(&mut self) -> &mut Alphabet {
        &mut self.alphabet
    }

    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Adds the state `name`. See [`StateSet::insert`].
    pub fn insert_state(&mut self, name: &str) -> Result<bool, DfaError> {
        self.states.insert(name)
    }

    /// Adds every name in `names`, returning one error per distinct invalid name.
    pub fn insert_states<'a, I>(&mut self, names: I) -> Vec<DfaError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.states.insert_all(names)
    }

    /// Removes the state `name`, deselecting it if it was the initial state.
    ///
    /// Transitions that mention the state are kept and resolve as undefined.
    pub fn remove_state(&mut self, name: &str) -> bool {
        if self.initial.as_deref() == Some(name) {
            self.initial = None;
        }
        self.states.remove(name)
    }

    pub fn set_terminal(&mut self, name: &str, terminal: bool) -> Result<(), DfaError> {
        self.states.set_terminal(name, terminal)
    }

    /// Removes every state and the initial state selection.
    pub fn clear_states(&mut self) {
        self.initial = None;
        self.states.clear();
    }

    pub fn transitions(&self) -> &TransitionFunction {
        &self.transitions
    }

    /// Returns a snapshot of the terminal states `F`.
    pub fn terminal_states(&self) -> StateSnapshot {
        self.states.terminal_states()
    }

    /// Returns a snapshot of the states outside `F`.
    pub fn non_terminal_states(&self) -> StateSnapshot {
        self.states.non_terminal_states()
    }

    /// Adds `δ(origin, symbol) = destination`, resolving all three against this
    /// automaton's states and alphabet. See [`TransitionFunction::add_transition`].
    pub fn add_transition(&mut self, origin: &str, symbol: char, destination: &str) -> bool {
        self.transitions
            .add_transition(&self.states, &self.alphabet, origin, symbol, destination)
    }

    pub fn clear_transitions(&mut self) {
        self.transitions.clear();
    }

    /// Checks whether the transition function covers every (state, symbol) pair.
    pub fn is_totally_defined(&self) -> bool {
        self.transitions
            .is_totally_defined(&self.states, &self.alphabet)
    }

    /// Returns the transition function as one row per state and one cell per symbol.
    pub fn transition_table(&self) -> Vec<TableRow> {
        self.states
            .iter()
            .map(|state| TableRow {
                state: state.name().to_string(),
                cells: self
                    .alphabet
                    .iter()
                    .map(|symbol| {
                        self.transitions
                            .lookup(state.name(), symbol.as_char())
                            .map(str::to_string)
                    })
                    .collect(),
            })
            .collect()
    }

    /// Clears the transition function and rebuilds it from `rows`.
    ///
    /// Cells are matched to alphabet symbols by position. Empty cells, and cells that
    /// fail to resolve to a state, are skipped.
    ///
    /// # Returns
    ///
    /// The number of transitions recorded.
    pub fn load_table(&mut self, rows: &[TableRow]) -> usize {
        self.transitions.clear();

        let symbols: Vec<char> = self.alphabet.iter().map(|s| s.as_char()).collect();
        let mut added = 0;
        for row in rows {
            for (symbol, cell) in symbols.iter().zip(&row.cells) {
                if let Some(destination) = cell {
                    if self.add_transition(&row.state, *symbol, destination) {
                        added += 1;
                    }
                }
            }
        }

        added
    }

    /// Selects the initial state by name.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the state exists.
    /// * `Err(DfaError::UnknownState)` if it is not in the state set; the previous
    ///   selection is kept.
    pub fn set_initial_state(&mut self, name: &str) -> Result<(), DfaError> {
        if !self.states.contains(name) {
            return Err(DfaError::UnknownState(name.to_string()));
        }

        self.initial = Some(name.to_string());
        Ok(())
    }

    pub fn clear_initial_state(&mut self) {
        self.initial = None;
    }

    /// Returns the initial state, if one is selected.
    pub fn initial_state(&self) -> Option<&State> {
        self.initial.as_deref().and_then(|name| self.states.get(name))
    }

    /// Returns the steps recorded by the last run, in order.
    pub fn history(&self) -> &[ProcessingStep] {
        &self.history
    }

    /// Checks whether the automaton accepts the word on `tape`.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the whole tape was consumed and the run ended in a terminal state.
    /// * `Ok(false)` otherwise, including when an undefined transition stopped the run.
    /// * `Err(_)` under the same conditions as [`Automaton::run`].
    pub fn accepts(&mut self, tape: &Tape) -> Result<bool, DfaError> {
        self.run(tape).map(|outcome| outcome.is_accepted())
    }

    /// Runs the automaton over `tape`, recording one step per symbol read.
    ///
    /// The previous history is discarded first. The empty word records no step and
    /// is decided by the initial state alone. An undefined transition ends the run with
    /// `Outcome::Undefined`; its step stays in the history marked invalid.
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome)` describing where the run stopped.
    /// * `Err(DfaError::IncompleteTransitionFunction)` if the transition function is not
    ///   totally defined. No step is recorded.
    /// * `Err(DfaError::MissingInitialState)` if no initial state is selected.
    pub fn run(&mut self, tape: &Tape) -> Result<Outcome, DfaError> {
        self.history.clear();

        if !self.is_totally_defined() {
            return Err(DfaError::IncompleteTransitionFunction {
                defined: self.transitions.len(),
                required: TransitionFunction::required(&self.states, &self.alphabet),
            });
        }

        let mut current = self
            .initial_state()
            .cloned()
            .ok_or(DfaError::MissingInitialState)?;

        debug!(word = %tape, initial = %current, "starting run");

        for (position, symbol) in tape.cells().enumerate() {
            let destination = self
                .transitions
                .resolve(&self.states, current.name(), symbol)
                .cloned();

            trace!(
                position,
                from = %current,
                %symbol,
                to = ?destination.as_ref().map(State::name),
                "step"
            );

            self.history.push(ProcessingStep::on_tape(
                current.clone(),
                symbol,
                destination.clone(),
                tape,
                position + 1,
            ));

            match destination {
                Some(next) => current = next,
                None => {
                    let outcome = Outcome::Undefined {
                        state: current.name().to_string(),
                        symbol,
                        position,
                    };
                    debug!(%outcome, "run stopped");
                    return Ok(outcome);
                }
            }
        }

        let state = current.name().to_string();
        let outcome = if current.is_terminal() {
            Outcome::Accepted { state }
        } else {
            Outcome::Rejected { state }
        };
        debug!(%outcome, steps = self.history.len(), "run finished");

        Ok(outcome)
    }
}

impl fmt::Display for Automaton {
    /// Formats the automaton as its 5-tuple, e.g. `M = ({a, b}, {q0, q1}, δ, q0, {q1})`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |items: Vec<String>| items.join(", ");

        write!(
            f,
            "M = ({{{}}}, {{{}}}, δ, {}, {{{}}})",
            join(self.alphabet.iter().map(|s| s.to_string()).collect()),
            join(self.states.iter().map(|s| s.to_string()).collect()),
            self.initial_state().map_or("-", State::name),
            join(self.terminal_states().iter().map(|s| s.to_string()).collect()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    /// The automaton over {a, b} accepting words that contain `aa` or `bb`.
    fn create_m1() -> Automaton {
        let mut automaton = Automaton::new();
        automaton.alphabet_mut().insert_all("ab".chars());
        assert!(automaton
            .insert_states(["q0", "q1", "q2", "q3"])
            .is_empty());
        automaton.set_terminal("q3", true).unwrap();
        automaton.set_initial_state("q0").unwrap();

        for (origin, symbol, destination) in [
            ("q0", 'a', "q1"),
            ("q0", 'b', "q2"),
            ("q1", 'a', "q3"),
            ("q1", 'b', "q2"),
            ("q2", 'a', "q1"),
            ("q2", 'b', "q3"),
            ("q3", 'a', "q3"),
            ("q3", 'b', "q3"),
        ] {
            assert!(automaton.add_transition(origin, symbol, destination));
        }

        automaton
    }

    fn summary(step: &ProcessingStep) -> (&str, char, Option<&str>, &str, bool) {
        (
            step.origin().name(),
            step.symbol(),
            step.destination().map(State::name),
            step.remaining(),
            step.is_valid(),
        )
    }

    #[test]
    fn test_accepts_word() {
        let mut automaton = create_m1();

        assert_eq!(automaton.accepts(&Tape::from("abaa")), Ok(true));

        let steps: Vec<_> = automaton.history().iter().map(summary).collect();
        assert_eq!(
            steps,
            vec![
                ("q0", 'a', Some("q1"), "baa", true),
                ("q1", 'b', Some("q2"), "aa", true),
                ("q2", 'a', Some("q1"), "a", true),
                ("q1", 'a', Some("q3"), "", true),
            ]
        );
        assert!(automaton.history()[3].destination().unwrap().is_terminal());
    }

    #[test]
    fn test_rejects_in_non_terminal_state() {
        let mut automaton = create_m1();

        let outcome = automaton.run(&Tape::from("abab")).unwrap();
        assert_eq!(
            outcome,
            Outcome::Rejected {
                state: "q2".to_string()
            }
        );
        assert_eq!(automaton.history().len(), 4);
    }

    #[test]
    fn test_empty_word() {
        let mut automaton = create_m1();

        assert_eq!(automaton.accepts(&Tape::from("")), Ok(false));
        assert!(automaton.history().is_empty());

        automaton.set_terminal("q0", true).unwrap();
        assert_eq!(automaton.accepts(&Tape::default()), Ok(true));
        assert!(automaton.history().is_empty());
    }

    #[test]
    fn test_undefined_symbol_rejects() {
        let mut automaton = create_m1();

        let outcome = automaton.run(&Tape::from("ac")).unwrap();
        assert_eq!(
            outcome,
            Outcome::Undefined {
                state: "q1".to_string(),
                symbol: 'c',
                position: 1,
            }
        );

        let steps: Vec<_> = automaton.history().iter().map(summary).collect();
        assert_eq!(
            steps,
            vec![
                ("q0", 'a', Some("q1"), "c", true),
                ("q1", 'c', None, "", false),
            ]
        );

        assert_eq!(automaton.accepts(&Tape::from("ac")), Ok(false));
    }

    #[test]
    fn test_undefined_symbol_stops_early() {
        let mut automaton = create_m1();

        assert_eq!(automaton.accepts(&Tape::from("xaa")), Ok(false));
        assert_eq!(automaton.history().len(), 1);
        assert_eq!(automaton.history()[0].remaining(), "aa");
    }

    #[test]
    fn test_incomplete_transition_function() {
        let mut automaton = create_m1();
        automaton.accepts(&Tape::from("ab")).unwrap();
        assert!(!automaton.history().is_empty());

        let rows: Vec<TableRow> = automaton
            .transition_table()
            .into_iter()
            .filter(|row| row.state != "q3")
            .collect();
        assert_eq!(automaton.load_table(&rows), 6);

        assert_eq!(
            automaton.accepts(&Tape::from("abaa")),
            Err(DfaError::IncompleteTransitionFunction {
                defined: 6,
                required: 8,
            })
        );
        assert!(automaton.history().is_empty());
    }

    #[test]
    fn test_missing_initial_state() {
        let mut automaton = create_m1();
        automaton.clear_initial_state();

        assert_eq!(
            automaton.accepts(&Tape::from("ab")),
            Err(DfaError::MissingInitialState)
        );
        assert!(automaton.history().is_empty());
    }

    #[test]
    fn test_set_initial_state_requires_member() {
        let mut automaton = create_m1();

        assert_eq!(
            automaton.set_initial_state("q9"),
            Err(DfaError::UnknownState("q9".to_string()))
        );
        assert_eq!(automaton.initial_state().map(State::name), Some("q0"));
    }

    #[test]
    fn test_removing_initial_state_deselects_it() {
        let mut automaton = create_m1();

        assert!(automaton.remove_state("q0"));
        assert_eq!(automaton.initial_state(), None);

        assert_eq!(automaton.insert_state("q0"), Ok(true));
        assert_eq!(automaton.initial_state(), None);
        assert_eq!(automaton.to_string(), "M = ({a, b}, {q0, q1, q2, q3}, δ, -, {q3})");
        assert_eq!(
            automaton.accepts(&Tape::from("aa")),
            Err(DfaError::MissingInitialState)
        );

        automaton.set_initial_state("q0").unwrap();
        assert!(automaton.remove_state("q1"));
        assert_eq!(automaton.initial_state().map(State::name), Some("q0"));

        automaton.clear_states();
        assert_eq!(automaton.initial_state(), None);
        assert!(automaton.states().is_empty());
    }

    #[test]
    fn test_terminal_flag_is_seen_by_run() {
        let mut automaton = create_m1();
        assert_eq!(automaton.accepts(&Tape::from("ab")), Ok(false));

        automaton.set_terminal("q2", true).unwrap();
        assert_eq!(automaton.accepts(&Tape::from("ab")), Ok(true));
        assert_eq!(automaton.terminal_states().names(), vec!["q2", "q3"]);
        assert_eq!(automaton.non_terminal_states().names(), vec!["q0", "q1"]);
    }

    #[test]
    fn test_long_tape_runs_iteratively() {
        let mut automaton = create_m1();
        let tape: Tape = std::iter::repeat('a').take(200_000).collect();

        assert_eq!(automaton.accepts(&tape), Ok(true));
        assert_eq!(automaton.history().len(), 200_000);
    }

    #[test]
    fn test_history_shares_tape_buffer() {
        let mut automaton = create_m1();
        let tape = Tape::from("abbab");
        automaton.accepts(&tape).unwrap();

        let buffer = tape.as_str().as_bytes().as_ptr_range();
        for (position, step) in automaton.history().iter().enumerate() {
            assert_eq!(step.remaining(), tape.suffix(position + 1));
            assert!((buffer.start..=buffer.end).contains(&step.remaining().as_ptr()));
        }

        let last = automaton.history().last().unwrap();
        assert_eq!(last.remaining().as_ptr(), buffer.end);
    }

    #[test]
    fn test_transition_table_round_trip() {
        let mut automaton = create_m1();
        let table = automaton.transition_table();

        assert_eq!(table.len(), 4);
        assert_eq!(
            table[0],
            TableRow {
                state: "q0".to_string(),
                cells: vec![Some("q1".to_string()), Some("q2".to_string())],
            }
        );

        assert_eq!(automaton.load_table(&table), 8);
        assert!(automaton.is_totally_defined());
        assert_eq!(automaton.transition_table(), table);
    }

    #[test]
    fn test_load_table_skips_bad_cells() {
        let mut automaton = create_m1();
        let rows = vec![TableRow {
            state: "q0".to_string(),
            cells: vec![Some("q1".to_string()), Some("q9".to_string())],
        }];

        assert_eq!(automaton.load_table(&rows), 1);
        assert_eq!(automaton.transitions().lookup("q0", 'b'), None);
    }

    #[test]
    fn test_display() {
        let automaton = create_m1();

        assert_eq!(
            automaton.to_string(),
            "M = ({a, b}, {q0, q1, q2, q3}, δ, q0, {q3})"
        );
        assert_eq!(Automaton::new().to_string(), "M = ({}, {}, δ, -, {})");
    }
}
