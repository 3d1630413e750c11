//! This module provides the `Tape`, the input word fed to an automaton.

use std::fmt;
use std::sync::Arc;

/// An immutable, finite sequence of input characters.
///
/// The word is kept in one shared buffer. Steps recorded during a run hold a handle
/// to that buffer and an offset into it instead of copies of the unread suffix, so a
/// run's history grows linearly with the tape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    word: Arc<str>,
    /// Byte offset of each cell in `word`.
    starts: Vec<usize>,
}

impl Tape {
    /// Creates a tape holding `cells`.
    pub fn new(cells: impl Into<Vec<char>>) -> Self {
        cells.into().into_iter().collect()
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Returns the character in cell `index` (0-based).
    pub fn cell(&self, index: usize) -> Option<char> {
        let start = *self.starts.get(index)?;
        self.word[start..].chars().next()
    }

    /// Returns the cells from `from` to the end; empty when `from` is past the end.
    pub fn suffix(&self, from: usize) -> &str {
        &self.word[self.offset(from)..]
    }

    /// Iterates over the cells in order.
    pub fn cells(&self) -> std::str::Chars<'_> {
        self.word.chars()
    }

    pub fn as_str(&self) -> &str {
        &self.word
    }

    /// Byte offset of cell `index`, or the length of the word past the end.
    pub(crate) fn offset(&self, index: usize) -> usize {
        self.starts
            .get(index)
            .copied()
            .unwrap_or(self.word.len())
    }

    pub(crate) fn shared(&self) -> Arc<str> {
        Arc::clone(&self.word)
    }
}

impl Default for Tape {
    fn default() -> Self {
        Tape::from("")
    }
}

impl From<&str> for Tape {
    fn from(word: &str) -> Self {
        Self {
            starts: word.char_indices().map(|(start, _)| start).collect(),
            word: Arc::from(word),
        }
    }
}

impl FromIterator<char> for Tape {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let word: String = iter.into_iter().collect();
        Tape::from(word.as_str())
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells() {
        let tape = Tape::from("abc");

        assert_eq!(tape.len(), 3);
        assert_eq!(tape.cell(0), Some('a'));
        assert_eq!(tape.cell(2), Some('c'));
        assert_eq!(tape.cell(3), None);
        assert_eq!(tape.cells().collect::<String>(), "abc");
        assert_eq!(tape.to_string(), "abc");
    }

    #[test]
    fn test_suffix() {
        let tape = Tape::new(vec!['a', 'b', 'a', 'a']);

        assert_eq!(tape.suffix(1), "baa");
        assert_eq!(tape.suffix(4), "");
        assert_eq!(tape.suffix(9), "");
    }

    #[test]
    fn test_multibyte_cells() {
        let tape = Tape::from("αβc");

        assert_eq!(tape.len(), 3);
        assert_eq!(tape.cell(1), Some('β'));
        assert_eq!(tape.suffix(1), "βc");
        assert_eq!(tape.suffix(2), "c");
    }

    #[test]
    fn test_empty_tape() {
        let tape = Tape::from("");

        assert!(tape.is_empty());
        assert_eq!(tape.cell(0), None);
        assert_eq!(tape, Tape::default());
    }
}
