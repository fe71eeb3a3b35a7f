//! Permutation: a bijection on alphabet indices given in cycle notation.
//!
//! A cycle string like `(ABC) (DE)` maps each symbol to the next symbol in
//! its cycle, wrapping from the last back to the first (`A→B`, `B→C`,
//! `C→A`, `D→E`, `E→D`). Symbols in no cycle are fixed points, as is a
//! singleton cycle `(A)`. The forward and inverse index tables are built
//! once at construction, so lookups never rescan the cycle text.

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// A total bijection on `0..N` alphabet indices, expressed as disjoint
/// cycles over the alphabet's symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Alphabet,
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Parses a cycle-notation string into a permutation over `alphabet`.
    ///
    /// Whitespace between cycles is ignored; cycles may also butt up
    /// against each other (`(AB)(CD)`). The empty string is the identity.
    ///
    /// # Parameters
    /// - `cycles`: Cycle-notation text, e.g. `"(ABC) (DE)"`.
    /// - `alphabet`: The alphabet the cycles are defined over.
    ///
    /// # Errors
    /// Returns [`EnigmaError::MalformedPermutation`] if a symbol is not in
    /// the alphabet, a symbol appears twice, a cycle is empty or
    /// unterminated, whitespace or `(` appears inside a cycle, or any text
    /// appears outside parentheses.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Alphabet::range('A', 'E').unwrap();
    /// let perm = Permutation::new("(ABC) (DE)", &alpha).unwrap();
    /// assert_eq!(perm.permute_char('A').unwrap(), 'B');
    /// assert_eq!(perm.permute_char('C').unwrap(), 'A');
    /// assert_eq!(perm.invert_char('A').unwrap(), 'C');
    /// assert_eq!(perm.permute_char('E').unwrap(), 'D');
    /// ```
    pub fn new(cycles: &str, alphabet: &Alphabet) -> Result<Self> {
        let n = alphabet.size();
        let mut forward: Vec<usize> = (0..n).collect();
        let mut seen = vec![false; n];
        let mut current: Vec<usize> = Vec::new();
        let mut in_cycle = false;

        for ch in cycles.chars() {
            if !in_cycle {
                if ch.is_whitespace() {
                    continue;
                }
                if ch == '(' {
                    in_cycle = true;
                    current.clear();
                    continue;
                }
                return Err(EnigmaError::MalformedPermutation(format!(
                    "unexpected '{ch}' outside a cycle"
                )));
            }
            match ch {
                ')' => {
                    if current.is_empty() {
                        return Err(EnigmaError::MalformedPermutation("empty cycle".into()));
                    }
                    for k in 0..current.len() {
                        forward[current[k]] = current[(k + 1) % current.len()];
                    }
                    in_cycle = false;
                }
                '(' => {
                    return Err(EnigmaError::MalformedPermutation(
                        "'(' inside a cycle".into(),
                    ));
                }
                _ if ch.is_whitespace() => {
                    return Err(EnigmaError::MalformedPermutation(
                        "whitespace inside a cycle".into(),
                    ));
                }
                _ => {
                    let idx = alphabet.to_index(ch).map_err(|_| {
                        EnigmaError::MalformedPermutation(format!(
                            "symbol '{ch}' is not in the alphabet"
                        ))
                    })?;
                    if seen[idx] {
                        return Err(EnigmaError::MalformedPermutation(format!(
                            "symbol '{ch}' appears more than once"
                        )));
                    }
                    seen[idx] = true;
                    current.push(idx);
                }
            }
        }
        if in_cycle {
            return Err(EnigmaError::MalformedPermutation(
                "unterminated cycle".into(),
            ));
        }

        let mut inverse = vec![0usize; n];
        for (i, &v) in forward.iter().enumerate() {
            inverse[v] = i;
        }
        Ok(Permutation {
            alphabet: alphabet.clone(),
            forward,
            inverse,
        })
    }

    /// The identity permutation over `alphabet` (every index a fixed
    /// point). Used as the default plugboard.
    pub fn identity(alphabet: &Alphabet) -> Self {
        let n = alphabet.size();
        Permutation {
            alphabet: alphabet.clone(),
            forward: (0..n).collect(),
            inverse: (0..n).collect(),
        }
    }

    /// Returns the size of the underlying alphabet.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Reduces an arbitrary (possibly negative) offset into `0..size()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Alphabet::range('A', 'E').unwrap();
    /// let perm = Permutation::identity(&alpha);
    /// assert_eq!(perm.wrap(-1), 4);
    /// assert_eq!(perm.wrap(7), 2);
    /// ```
    pub fn wrap(&self, p: isize) -> usize {
        p.rem_euclid(self.alphabet.size() as isize) as usize
    }

    /// Returns the successor of `p` within its cycle (or `p` itself for a
    /// fixed point). The argument is reduced mod the alphabet size first.
    pub fn permute(&self, p: usize) -> usize {
        self.forward[p % self.forward.len()]
    }

    /// Returns the predecessor of `c` within its cycle: the inverse of
    /// [`permute`](Self::permute).
    pub fn invert(&self, c: usize) -> usize {
        self.inverse[c % self.inverse.len()]
    }

    /// Character-valued [`permute`](Self::permute).
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if `ch` is not in the
    /// alphabet.
    pub fn permute_char(&self, ch: char) -> Result<char> {
        let idx = self.alphabet.to_index(ch)?;
        self.alphabet.to_symbol(self.permute(idx))
    }

    /// Character-valued [`invert`](Self::invert).
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if `ch` is not in the
    /// alphabet.
    pub fn invert_char(&self, ch: char) -> Result<char> {
        let idx = self.alphabet.to_index(ch)?;
        self.alphabet.to_symbol(self.invert(idx))
    }

    /// Returns true iff no index maps to itself.
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &v)| i != v)
    }

    /// Returns the alphabet this permutation is defined over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}
