//! This module provides the `Alphabet`, the set of input symbols admitted by an automaton.

use crate::types::Symbol;

/// A set of unique symbols, kept sorted in ascending character order.
///
/// Inserting a symbol that is already present is a no-op. The whole set is re-sorted
/// after each insertion, which is fine for the tens of symbols an alphabet holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    /// Creates an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the position of the symbol whose character is `symbol`, if any.
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().rposition(|s| s.as_char() == symbol)
    }

    /// Inserts a symbol, keeping the alphabet sorted.
    ///
    /// # Returns
    ///
    /// * `true` if the symbol was added.
    /// * `false` if a symbol with the same character was already present.
    pub fn insert(&mut self, symbol: impl Into<Symbol>) -> bool {
        let symbol = symbol.into();
        if self.contains(symbol.as_char()) {
            return false;
        }

        self.symbols.push(symbol);
        self.symbols.sort();
        true
    }

    /// Inserts every character of `symbols`, returning how many were new.
    pub fn insert_all<I>(&mut self, symbols: I) -> usize
    where
        I: IntoIterator<Item = char>,
    {
        symbols
            .into_iter()
            .filter(|&symbol| self.insert(symbol))
            .count()
    }

    /// Removes the symbol whose character is `symbol`.
    ///
    /// Returns `true` if it was found and removed.
    pub fn remove(&mut self, symbol: char) -> bool {
        match self.index_of(symbol) {
            Some(index) => {
                self.symbols.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbol at `index` in sorted order.
    pub fn at(&self, index: usize) -> Option<Symbol> {
        self.symbols.get(index).copied()
    }

    /// Looks up a symbol by character.
    pub fn get(&self, symbol: char) -> Option<Symbol> {
        self.index_of(symbol).and_then(|index| self.at(index))
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index_of(symbol).is_some()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    /// Iterates over the symbols in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().copied()
    }

    /// Returns the symbols as a slice.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut alphabet = Alphabet::new();
        alphabet.insert_all(iter);
        alphabet
    }
}
