//! This module turns the step history of a run into the derivation of the extended
//! transition function over the input word:
//!
//! ```text
//! δ̂(q, ε)  = q
//! δ̂(q, aw) = δ̂(δ(q, a), w)
//! ```

use crate::types::{ProcessingStep, EMPTY_WORD, UNDEFINED_MARKER};
use serde::Serialize;
use std::fmt;

const EXTENDED: &str = "δ̂";

/// The line-by-line derivation of one run.
///
/// Each step except the last contributes the unexpanded and the one-level expanded
/// form. The last step closes the induction with `δ̂(q, ε) = q` when its transition was
/// defined, or ends with the undefined-symbol marker when it was not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Derivation {
    lines: Vec<String>,
}

impl Derivation {
    /// Builds the derivation for `history`. An empty history (the empty word) yields
    /// an empty derivation.
    pub fn new(history: &[ProcessingStep]) -> Self {
        let mut lines = Vec::with_capacity(history.len() * 2 + 1);

        for (i, step) in history.iter().enumerate() {
            let origin = step.origin().name();
            let symbol = step.symbol();
            let remaining = step.remaining();

            lines.push(format!("{EXTENDED}({origin}, {symbol}{remaining}) ="));

            if i + 1 < history.len() {
                lines.push(format!("{EXTENDED}(δ({origin}, {symbol}), {remaining}) ="));
                continue;
            }

            match step.destination() {
                Some(destination) => {
                    lines.push(format!("{EXTENDED}(δ({origin}, {symbol}), {EMPTY_WORD}) ="));
                    lines.push(format!(
                        "{EXTENDED}({destination}, {EMPTY_WORD}) = {destination}"
                    ));
                }
                None => {
                    let rest = if remaining.is_empty() {
                        EMPTY_WORD.to_string()
                    } else {
                        remaining.to_string()
                    };
                    lines.push(format!(
                        "{EXTENDED}(δ({origin}, {symbol}), {rest}) = {UNDEFINED_MARKER}"
                    ));
                }
            }
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            return write!(
                f,
                "The empty word has no extended transition function derivation."
            );
        }

        write!(f, "{}", self.lines.join("\n"))
    }
}
