//! Alphabet: the ordered symbol set a machine operates over.
//!
//! An [`Alphabet`] fixes the universe of symbols and exposes the
//! index↔symbol bijection every other component works in. Permutations,
//! rotors, and the machine all address symbols by their alphabet index.

use std::collections::HashMap;

use crate::error::{EnigmaError, Result};

/// Characters with structural meaning in configuration and message text.
/// They can never be alphabet symbols.
const RESERVED: [char; 3] = ['(', ')', '*'];

/// An ordered set of distinct symbols with index↔symbol mapping.
///
/// Indices run `0..size()` in symbol order. Lookup is O(1) in both
/// directions: a `Vec` for index→symbol and a reverse map for
/// symbol→index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Creates an alphabet from an explicit symbol string.
    ///
    /// Symbol order in the string fixes the index order.
    ///
    /// # Parameters
    /// - `symbols`: The symbols, in index order.
    ///
    /// # Errors
    /// Returns [`EnigmaError::MalformedAlphabet`] if the string is empty,
    /// repeats a symbol, or contains whitespace or one of `(`, `)`, `*`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alpha = Alphabet::new("AXLE").unwrap();
    /// assert_eq!(alpha.size(), 4);
    /// assert_eq!(alpha.to_index('L').unwrap(), 2);
    /// ```
    pub fn new(symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            return Err(EnigmaError::MalformedAlphabet("alphabet is empty".into()));
        }
        let mut chars = Vec::with_capacity(symbols.len());
        let mut index = HashMap::with_capacity(symbols.len());
        for ch in symbols.chars() {
            if ch.is_whitespace() {
                return Err(EnigmaError::MalformedAlphabet(
                    "whitespace is not a valid symbol".into(),
                ));
            }
            if RESERVED.contains(&ch) {
                return Err(EnigmaError::MalformedAlphabet(format!(
                    "symbol '{ch}' is reserved"
                )));
            }
            if index.insert(ch, chars.len()).is_some() {
                return Err(EnigmaError::MalformedAlphabet(format!(
                    "symbol '{ch}' appears more than once"
                )));
            }
            chars.push(ch);
        }
        Ok(Alphabet {
            symbols: chars,
            index,
        })
    }

    /// Creates an alphabet covering the inclusive character range
    /// `first..=last`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::MalformedAlphabet`] if `first > last` or the
    /// range contains a reserved character.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let abc = Alphabet::range('A', 'C').unwrap();
    /// assert_eq!(abc.size(), 3);
    /// assert!(abc.contains('B'));
    /// assert!(!abc.contains('D'));
    /// ```
    pub fn range(first: char, last: char) -> Result<Self> {
        if first > last {
            return Err(EnigmaError::MalformedAlphabet(format!(
                "range '{first}'-'{last}' is inverted"
            )));
        }
        let symbols: String = (first..=last).collect();
        Self::new(&symbols)
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if `ch` is a member of this alphabet.
    pub fn contains(&self, ch: char) -> bool {
        self.index.contains_key(&ch)
    }

    /// Maps a symbol to its index.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if `ch` is not a member.
    pub fn to_index(&self, ch: char) -> Result<usize> {
        self.index
            .get(&ch)
            .copied()
            .ok_or(EnigmaError::InvalidSymbol(ch))
    }

    /// Maps an index to its symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] if `index >= size()`.
    pub fn to_symbol(&self, index: usize) -> Result<char> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange {
                index,
                size: self.symbols.len(),
            })
    }
}

impl Default for Alphabet {
    /// The upper-case Latin alphabet `A..=Z`.
    fn default() -> Self {
        let symbols: Vec<char> = ('A'..='Z').collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet { symbols, index }
    }
}
