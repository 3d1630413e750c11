use crate::automaton::Automaton;
use crate::transition::TransitionFunction;
use crate::types::DfaError;
use tracing::warn;

/// The source data of a built-in automaton.
struct SampleDefinition {
    name: &'static str,
    description: &'static str,
    alphabet: &'static str,
    states: &'static [&'static str],
    terminal: &'static [&'static str],
    initial: &'static str,
    transitions: &'static [(&'static str, char, &'static str)],
}

static DEFINITIONS: [SampleDefinition; 4] = [
    SampleDefinition {
        name: "aa-or-bb",
        description: "Words over {a, b} containing aa or bb",
        alphabet: "ab",
        states: &["q0", "q1", "q2", "q3"],
        terminal: &["q3"],
        initial: "q0",
        transitions: &[
            ("q0", 'a', "q1"),
            ("q0", 'b', "q2"),
            ("q1", 'a', "q3"),
            ("q1", 'b', "q2"),
            ("q2", 'a', "q1"),
            ("q2", 'b', "q3"),
            ("q3", 'a', "q3"),
            ("q3", 'b', "q3"),
        ],
    },
    SampleDefinition {
        name: "even-zeros",
        description: "Binary words with an even number of 0s",
        alphabet: "01",
        states: &["q0", "q1"],
        terminal: &["q0"],
        initial: "q0",
        transitions: &[
            ("q0", '0', "q1"),
            ("q0", '1', "q0"),
            ("q1", '0', "q0"),
            ("q1", '1', "q1"),
        ],
    },
    SampleDefinition {
        name: "ends-with-ab",
        description: "Words over {a, b} ending in ab",
        alphabet: "ab",
        states: &["q0", "q1", "q2"],
        terminal: &["q2"],
        initial: "q0",
        transitions: &[
            ("q0", 'a', "q1"),
            ("q0", 'b', "q0"),
            ("q1", 'a', "q1"),
            ("q1", 'b', "q2"),
            ("q2", 'a', "q1"),
            ("q2", 'b', "q0"),
        ],
    },
    SampleDefinition {
        name: "binary-mod-3",
        description: "Binary numbers divisible by 3",
        alphabet: "01",
        states: &["q0", "q1", "q2"],
        terminal: &["q0"],
        initial: "q0",
        transitions: &[
            ("q0", '0', "q0"),
            ("q0", '1', "q1"),
            ("q1", '0', "q2"),
            ("q1", '1', "q0"),
            ("q2", '0', "q1"),
            ("q2", '1', "q2"),
        ],
    },
];

struct Sample {
    name: &'static str,
    description: &'static str,
    automaton: Automaton,
}

lazy_static::lazy_static! {
    static ref SAMPLES: Vec<Sample> = DEFINITIONS
        .iter()
        .filter_map(|definition| match build(definition) {
            Ok(automaton) => Some(Sample {
                name: definition.name,
                description: definition.description,
                automaton,
            }),
            Err(error) => {
                warn!(sample = definition.name, %error, "failed to build sample");
                None
            }
        })
        .collect();
}

fn build(definition: &SampleDefinition) -> Result<Automaton, DfaError> {
    let mut automaton = Automaton::new();
    automaton.alphabet_mut().insert_all(definition.alphabet.chars());

    if let Some(error) = automaton
        .insert_states(definition.states.iter().copied())
        .into_iter()
        .next()
    {
        return Err(error);
    }
    for name in definition.terminal {
        automaton.set_terminal(name, true)?;
    }

    automaton.set_initial_state(definition.initial)?;
    for &(origin, symbol, destination) in definition.transitions {
        automaton.add_transition(origin, symbol, destination);
    }

    if !automaton.is_totally_defined() {
        return Err(DfaError::IncompleteTransitionFunction {
            defined: automaton.transitions().len(),
            required: TransitionFunction::required(automaton.states(), automaton.alphabet()),
        });
    }

    Ok(automaton)
}

/// Summary of a built-in automaton.
#[derive(Debug, Clone)]
pub struct SampleInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// The 5-tuple, e.g. `M = ({0, 1}, {q0, q1}, δ, q0, {q0})`.
    pub formal: String,
    pub state_count: usize,
    pub symbol_count: usize,
}

/// Access to the catalogue of built-in automata.
pub struct SampleCatalog;

impl SampleCatalog {
    /// Get the number of available samples
    pub fn count() -> usize {
        SAMPLES.len()
    }

    /// List all sample names
    pub fn names() -> Vec<&'static str> {
        SAMPLES.iter().map(|sample| sample.name).collect()
    }

    /// Get a fresh copy of the sample named `name`
    pub fn get(name: &str) -> Result<Automaton, DfaError> {
        Self::find(name).map(|sample| sample.automaton.clone())
    }

    /// Get information about the sample named `name`
    pub fn info(name: &str) -> Result<SampleInfo, DfaError> {
        Self::find(name).map(Self::summarize)
    }

    /// Get information about every sample, in catalogue order
    pub fn list() -> Vec<SampleInfo> {
        SAMPLES.iter().map(Self::summarize).collect()
    }

    fn find(name: &str) -> Result<&'static Sample, DfaError> {
        SAMPLES
            .iter()
            .find(|sample| sample.name == name)
            .ok_or_else(|| DfaError::UnknownSample(name.to_string()))
    }

    fn summarize(sample: &Sample) -> SampleInfo {
        SampleInfo {
            name: sample.name,
            description: sample.description,
            formal: sample.automaton.to_string(),
            state_count: sample.automaton.states().len(),
            symbol_count: sample.automaton.alphabet().len(),
        }
    }
}
