//! This crate provides the core logic for a Deterministic Finite Automaton simulator.
//! It includes modules for describing an automaton (alphabet, states, transition
//! function), running it over an input tape while recording every step, narrating a run
//! as a derivation of the extended transition function, and a catalogue of sample
//! automata.

pub mod alphabet;
pub mod automaton;
pub mod derivation;
pub mod samples;
pub mod states;
pub mod tape;
pub mod transition;
pub mod types;

/// Re-exports the `Alphabet` struct from the alphabet module.
pub use alphabet::Alphabet;
/// Re-exports the `Automaton` struct and its tabular transition row.
pub use automaton::{Automaton, TableRow};
/// Re-exports the `Derivation` transcript builder.
pub use derivation::Derivation;
/// Re-exports `SampleCatalog` and `SampleInfo` from the samples module.
pub use samples::{SampleCatalog, SampleInfo};
/// Re-exports the state set and its read-only snapshot.
pub use states::{StateSet, StateSnapshot};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the `TransitionFunction` struct from the transition module.
pub use transition::TransitionFunction;
/// Re-exports the shared types of the automaton model.
pub use types::{
    parse_state_name, DfaError, NameDefect, Outcome, ProcessingStep, State, Symbol, Transition,
    EMPTY_WORD, STATE_PREFIX, UNDEFINED_MARKER,
};
