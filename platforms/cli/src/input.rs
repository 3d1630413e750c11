//! Splitting of the comma-separated fields given on the command line, and loading of
//! their contents into an `Automaton`.

use dfa::{Automaton, DfaError};
use thiserror::Error;
use tracing::debug;

/// Separates items inside a single field, e.g. `--states q0,q1,q2`.
pub const SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A transition that is not of the form `origin,symbol,destination`.
    #[error("Invalid transition '{0}': expected origin,symbol,destination")]
    MalformedTransition(String),
    /// An error raised by the automaton while loading the fields.
    #[error(transparent)]
    Automaton(#[from] DfaError),
}

/// Problems found while loading fields that did not stop the load.
#[derive(Debug, Default, PartialEq)]
pub struct Diagnostics {
    /// Alphabet items longer than one character.
    pub symbols: Vec<String>,
    /// State names that failed validation.
    pub states: Vec<DfaError>,
    /// Transitions that referred to unknown states or symbols, or repeated a pair.
    pub transitions: Vec<String>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty() && self.states.is_empty() && self.transitions.is_empty()
    }

    /// Renders one message per problem group.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();

        if !self.symbols.is_empty() {
            messages.push(format!(
                "ignored alphabet items {:?}: symbols are single characters",
                self.symbols
            ));
        }
        messages.extend(self.states.iter().map(|error| format!("ignored state: {error}")));
        if !self.transitions.is_empty() {
            messages.push(format!(
                "ignored transitions {:?}: unknown state or symbol, or pair already defined",
                self.transitions
            ));
        }

        messages
    }
}

/// Splits a field on [`SEPARATOR`], trimming items and dropping empty ones.
pub fn split(field: &str) -> impl Iterator<Item = &str> {
    field
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Inserts every single-character item of `field` into the alphabet.
///
/// Returns the distinct items that were longer than one character.
pub fn insert_symbols(automaton: &mut Automaton, field: &str) -> Vec<String> {
    let mut invalid: Vec<String> = Vec::new();

    for item in split(field) {
        let mut chars = item.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => {
                automaton.alphabet_mut().insert(symbol);
            }
            _ => {
                if !invalid.iter().any(|seen| seen == item) {
                    invalid.push(item.to_string());
                }
            }
        }
    }

    invalid
}

/// Inserts every state named in `field`, returning one diagnostic per invalid name.
pub fn insert_states(automaton: &mut Automaton, field: &str) -> Vec<DfaError> {
    automaton.insert_states(split(field))
}

/// Marks every state named in `field` as terminal.
pub fn mark_terminal(automaton: &mut Automaton, field: &str) -> Result<(), InputError> {
    for name in split(field) {
        automaton.set_terminal(name, true)?;
    }

    Ok(())
}

/// Parses `origin,symbol,destination`.
pub fn parse_transition(text: &str) -> Result<(&str, char, &str), InputError> {
    let malformed = || InputError::MalformedTransition(text.to_string());

    let parts: Vec<&str> = text.split(SEPARATOR).map(str::trim).collect();
    let [origin, symbol, destination] = parts.as_slice() else {
        return Err(malformed());
    };

    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) if !origin.is_empty() && !destination.is_empty() => {
            Ok((*origin, symbol, *destination))
        }
        _ => Err(malformed()),
    }
}

/// The fields describing an automaton.
#[derive(Debug, Default)]
pub struct Definition<'a> {
    pub alphabet: &'a str,
    pub states: &'a str,
    pub terminal: Option<&'a str>,
    pub initial: Option<&'a str>,
    pub transitions: &'a [String],
}

/// Builds an automaton from `definition`.
///
/// Invalid alphabet items, state names and unresolvable transitions are skipped and
/// reported in the returned `Diagnostics`. Malformed transitions, unknown terminal
/// states and an unknown initial state are errors. Without an explicit initial state
/// the first state is used.
pub fn load(definition: &Definition<'_>) -> Result<(Automaton, Diagnostics), InputError> {
    let mut automaton = Automaton::new();
    let mut diagnostics = Diagnostics {
        symbols: insert_symbols(&mut automaton, definition.alphabet),
        states: insert_states(&mut automaton, definition.states),
        ..Diagnostics::default()
    };

    if let Some(terminal) = definition.terminal {
        mark_terminal(&mut automaton, terminal)?;
    }

    let initial = match definition.initial {
        Some(name) => Some(name.to_string()),
        None => automaton.states().at(0).map(|state| state.name().to_string()),
    };
    if let Some(name) = initial {
        automaton.set_initial_state(&name)?;
    }

    for text in definition.transitions {
        let (origin, symbol, destination) = parse_transition(text)?;
        if !automaton.add_transition(origin, symbol, destination) {
            diagnostics.transitions.push(text.clone());
        }
    }

    debug!(automaton = %automaton, transitions = automaton.transitions().len(), "loaded");

    Ok((automaton, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfa::{NameDefect, Tape};

    #[test]
    fn test_split() {
        assert_eq!(split(" a, b,,c ").collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(split("").count(), 0);
    }

    #[test]
    fn test_insert_symbols_reports_long_items() {
        let mut automaton = Automaton::new();
        let invalid = insert_symbols(&mut automaton, "b,a,ab,b,ab,cd");

        assert_eq!(invalid, vec!["ab".to_string(), "cd".to_string()]);
        assert_eq!(automaton.alphabet().len(), 2);
    }

    #[test]
    fn test_insert_states_reports_bad_names() {
        let mut automaton = Automaton::new();
        let errors = insert_states(&mut automaton, "q1,x1,q0");

        assert_eq!(automaton.states().len(), 2);
        assert_eq!(
            errors,
            vec![DfaError::InvalidStateName {
                name: "x1".to_string(),
                defect: NameDefect::Prefix,
            }]
        );
    }

    #[test]
    fn test_parse_transition() {
        assert_eq!(parse_transition("q0,a,q1").unwrap(), ("q0", 'a', "q1"));
        assert_eq!(parse_transition(" q0 , a , q1 ").unwrap(), ("q0", 'a', "q1"));

        for text in ["q0,a", "q0,ab,q1", "q0,,q1", ",a,q1", "q0,a,q1,q2"] {
            assert_eq!(
                parse_transition(text),
                Err(InputError::MalformedTransition(text.to_string())),
                "{text}"
            );
        }
    }

    #[test]
    fn test_load() {
        let transitions: Vec<String> = ["q0,0,q1", "q0,1,q0", "q1,0,q0", "q1,1,q1", "q1,1,q0"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let (mut automaton, diagnostics) = load(&Definition {
            alphabet: "0,1",
            states: "q1,q0",
            terminal: Some("q0"),
            initial: None,
            transitions: &transitions,
        })
        .unwrap();

        assert_eq!(automaton.initial_state().map(|s| s.name()), Some("q0"));
        assert_eq!(diagnostics.transitions, vec!["q1,1,q0".to_string()]);
        assert!(automaton.is_totally_defined());
        assert_eq!(automaton.accepts(&Tape::from("1001")), Ok(true));
        assert_eq!(automaton.accepts(&Tape::from("10")), Ok(false));
    }

    #[test]
    fn test_load_unknown_initial_state() {
        let result = load(&Definition {
            alphabet: "a",
            states: "q0",
            initial: Some("q5"),
            ..Definition::default()
        });

        assert!(matches!(
            result,
            Err(InputError::Automaton(DfaError::UnknownState(name))) if name == "q5"
        ));
    }

    #[test]
    fn test_diagnostics_messages() {
        let diagnostics = Diagnostics {
            symbols: vec!["ab".to_string()],
            ..Diagnostics::default()
        };

        assert!(!diagnostics.is_empty());
        assert_eq!(diagnostics.messages().len(), 1);
        assert!(Diagnostics::default().messages().is_empty());
    }

    #[test]
    fn test_clean_load_has_no_diagnostics() {
        let transitions = vec!["q0,a,q0".to_string()];
        let (_, diagnostics) = load(&Definition {
            alphabet: "a",
            states: "q0",
            transitions: &transitions,
            ..Definition::default()
        })
        .unwrap();

        assert!(diagnostics.is_empty());
        assert!(diagnostics.messages().is_empty());
    }
}
