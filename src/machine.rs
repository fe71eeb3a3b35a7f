//! Machine: rotor slots, plugboard, stepping mechanism, and signal path.
//!
//! A machine owns a catalogue of rotors and binds a subset of them into
//! ordered slots: slot 0 holds the reflector, slots 1..n-1 run left to
//! right, and the P pawls engage the rightmost P slots. Each keypress
//! first steps the rotors, then traces one signal through the stack:
//!
//! ```text
//! keyboard → plugboard → slot n-1 → … → slot 1 → slot 0 (reflector)
//!                                                     │
//! lamp     ← plugboard ← slot n-1 ← … ← slot 1 ←──────┘
//! ```
//!
//! Because the reflector folds the path back, conversion is self-inverse:
//! running ciphertext through an identically configured machine yields the
//! plaintext again.

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// A complete rotor machine: catalogue, slot bindings, and plugboard.
///
/// The machine owns every rotor outright; slots hold indices into the
/// catalogue, so a rotor's offset can only ever be driven by the one
/// machine holding it.
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Alphabet,
    num_rotors: usize,
    pawls: usize,
    catalogue: Vec<Rotor>,
    slots: Vec<usize>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine with `num_rotors` slots, `pawls` pawls, and the
    /// given rotor catalogue. No rotors are bound yet; call
    /// [`insert_rotors`](Self::insert_rotors) before converting. The
    /// plugboard starts as the identity.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidOperation`] unless
    /// `1 < num_rotors` and `pawls < num_rotors`, or if any catalogue
    /// rotor is wired over a different alphabet.
    pub fn new(
        alphabet: Alphabet,
        num_rotors: usize,
        pawls: usize,
        catalogue: Vec<Rotor>,
    ) -> Result<Self> {
        if num_rotors < 2 {
            return Err(EnigmaError::InvalidOperation(format!(
                "a machine needs at least 2 rotor slots, got {num_rotors}"
            )));
        }
        if pawls >= num_rotors {
            return Err(EnigmaError::InvalidOperation(format!(
                "pawl count {pawls} must be less than the slot count {num_rotors}"
            )));
        }
        for rotor in &catalogue {
            if rotor.alphabet() != &alphabet {
                return Err(EnigmaError::InvalidOperation(format!(
                    "rotor '{}' is wired over a different alphabet",
                    rotor.name()
                )));
            }
        }
        let plugboard = Permutation::identity(&alphabet);
        debug!(
            "machine constructed: {} slots, {} pawls, {} rotors in catalogue",
            num_rotors,
            pawls,
            catalogue.len()
        );
        Ok(Machine {
            alphabet,
            num_rotors,
            pawls,
            catalogue,
            slots: Vec::new(),
            plugboard,
        })
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls, and thus of slots that can rotate.
    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    /// Returns the machine's alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Binds the named catalogue rotors into slots 0..n-1 in order.
    /// `names[0]` must name a reflector. Matching is case-insensitive.
    /// Rotor settings are left untouched; follow with
    /// [`set_rotors`](Self::set_rotors).
    ///
    /// Validation completes before any slot changes, so a failed call
    /// leaves the previous binding intact.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidOperation`] if the name count differs from
    ///   the slot count.
    /// - [`EnigmaError::UnknownRotor`] for a name not in the catalogue.
    /// - [`EnigmaError::DuplicateRotor`] if a rotor is named twice.
    /// - [`EnigmaError::MissingReflector`] if `names[0]` is not a
    ///   reflector, or [`EnigmaError::InvalidOperation`] if a reflector is
    ///   bound past slot 0.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::InvalidOperation(format!(
                "expected {} rotor names, got {}",
                self.num_rotors,
                names.len()
            )));
        }
        let mut chosen: Vec<usize> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let found = self
                .catalogue
                .iter()
                .position(|r| r.name().eq_ignore_ascii_case(name))
                .ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;
            if chosen.contains(&found) {
                return Err(EnigmaError::DuplicateRotor(
                    self.catalogue[found].name().to_string(),
                ));
            }
            chosen.push(found);
        }
        if !self.catalogue[chosen[0]].reflecting() {
            return Err(EnigmaError::MissingReflector);
        }
        for &idx in &chosen[1..] {
            if self.catalogue[idx].reflecting() {
                return Err(EnigmaError::InvalidOperation(format!(
                    "reflector '{}' can only occupy the first slot",
                    self.catalogue[idx].name()
                )));
            }
        }
        debug!(
            "rotors bound: {}",
            chosen
                .iter()
                .map(|&i| self.catalogue[i].name())
                .collect::<Vec<_>>()
                .join(" ")
        );
        self.slots = chosen;
        Ok(())
    }

    /// Sets the rotors in slots 1..n-1 from a string of alphabet symbols,
    /// leftmost slot first. The whole string is validated before any
    /// rotor moves.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidOperation`] if no rotors are bound.
    /// - [`EnigmaError::SettingLengthMismatch`] unless the string covers
    ///   exactly the non-reflector slots.
    /// - [`EnigmaError::SettingSymbolInvalid`] for out-of-alphabet
    ///   characters.
    pub fn set_rotors(&mut self, setting: &str) -> Result<()> {
        if self.slots.is_empty() {
            return Err(EnigmaError::InvalidOperation(
                "no rotors inserted".to_string(),
            ));
        }
        let got = setting.chars().count();
        if got != self.num_rotors - 1 {
            return Err(EnigmaError::SettingLengthMismatch {
                expected: self.num_rotors - 1,
                got,
            });
        }
        let mut positions = Vec::with_capacity(got);
        for ch in setting.chars() {
            match self.alphabet.to_index(ch) {
                Ok(idx) => positions.push(idx),
                Err(_) => return Err(EnigmaError::SettingSymbolInvalid(ch)),
            }
        }
        for (i, &posn) in positions.iter().enumerate() {
            self.catalogue[self.slots[i + 1]].set(posn as isize)?;
        }
        Ok(())
    }

    /// Replaces the plugboard permutation.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidOperation`] if the permutation is
    /// defined over a different alphabet.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<()> {
        if plugboard.alphabet() != &self.alphabet {
            return Err(EnigmaError::InvalidOperation(
                "plugboard alphabet differs from the machine's".to_string(),
            ));
        }
        self.plugboard = plugboard;
        Ok(())
    }

    /// Returns the current offset symbols of the bound rotors, left to
    /// right. Empty until rotors are inserted.
    pub fn settings(&self) -> String {
        self.slots
            .iter()
            .map(|&s| {
                self.alphabet
                    .to_symbol(self.catalogue[s].setting())
                    .expect("rotor setting within alphabet")
            })
            .collect()
    }

    /// Converts one character, advancing the rotors first. ASCII letters
    /// are upper-cased before lookup.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidOperation`] if no rotors are bound
    /// and [`EnigmaError::InvalidSymbol`] if the character is not in the
    /// alphabet.
    pub fn convert_char(&mut self, ch: char) -> Result<char> {
        if self.slots.len() != self.num_rotors {
            return Err(EnigmaError::InvalidOperation(
                "no rotors inserted".to_string(),
            ));
        }
        let idx = self.alphabet.to_index(ch.to_ascii_uppercase())?;
        self.step_rotors()?;

        let mut signal = self.plugboard.permute(idx);
        for x in (0..self.slots.len()).rev() {
            signal = self.catalogue[self.slots[x]].convert_forward(signal);
        }
        for y in 1..self.slots.len() {
            signal = self.catalogue[self.slots[y]].convert_backward(signal);
        }
        signal = self.plugboard.permute(signal);
        self.alphabet.to_symbol(signal)
    }

    /// Converts a message, dropping spaces and advancing rotor state
    /// progressively. The result has one symbol per non-space input
    /// character.
    ///
    /// # Errors
    /// As [`convert_char`](Self::convert_char), at the first offending
    /// character.
    pub fn convert(&mut self, msg: &str) -> Result<String> {
        let mut out = String::with_capacity(msg.len());
        for ch in msg.chars() {
            if ch == ' ' {
                continue;
            }
            out.push(self.convert_char(ch)?);
        }
        trace!("converted {} symbols, settings now {}", out.len(), self.settings());
        Ok(out)
    }

    /// Advances the rotors for one keypress.
    ///
    /// Notch states are read for all slots before any offset changes, then
    /// every flagged slot advances: the rightmost pawl always engages, and
    /// a pawl engages both its own slot and the right neighbour whose
    /// notch it fell into (the neighbour advancing twice in a row is the
    /// double-step). Slots left of the pawl range never self-advance.
    fn step_rotors(&mut self) -> Result<()> {
        let n = self.slots.len();
        let mut advance = vec![false; n];
        if self.pawls > 0 {
            advance[n - 1] = true;
        }
        let first_pawl = n - self.pawls;
        for i in first_pawl..n - 1 {
            if self.catalogue[self.slots[i + 1]].at_notch() {
                advance[i] = true;
                advance[i + 1] = true;
            }
        }
        for (i, flagged) in advance.into_iter().enumerate() {
            if flagged {
                let rotor = &mut self.catalogue[self.slots[i]];
                if rotor.rotates() {
                    rotor.advance()?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reflector `(AC) (BD)` plus two movers over A-D; 3 slots, 2 pawls.
    fn small_machine() -> Machine {
        let alpha = Alphabet::range('A', 'D').unwrap();
        let catalogue = vec![
            Rotor::reflector("B", Permutation::new("(AC) (BD)", &alpha).unwrap()),
            Rotor::moving("I", Permutation::new("(ABCD)", &alpha).unwrap(), "C").unwrap(),
            Rotor::moving("II", Permutation::new("(AD) (BC)", &alpha).unwrap(), "D").unwrap(),
        ];
        Machine::new(alpha, 3, 2, catalogue).unwrap()
    }

    fn bound_small_machine() -> Machine {
        let mut mach = small_machine();
        mach.insert_rotors(&["B", "I", "II"]).unwrap();
        mach.set_rotors("AA").unwrap();
        mach
    }

    #[test]
    fn test_geometry_validation() {
        let alpha = Alphabet::range('A', 'D').unwrap();
        assert!(matches!(
            Machine::new(alpha.clone(), 1, 0, vec![]),
            Err(EnigmaError::InvalidOperation(_))
        ));
        assert!(matches!(
            Machine::new(alpha.clone(), 3, 3, vec![]),
            Err(EnigmaError::InvalidOperation(_))
        ));
        assert!(Machine::new(alpha, 3, 0, vec![]).is_ok());
    }

    #[test]
    fn test_catalogue_alphabet_must_match() {
        let ad = Alphabet::range('A', 'D').unwrap();
        let az = Alphabet::range('A', 'Z').unwrap();
        let stray = Rotor::fixed("Beta", Permutation::new("", &az).unwrap());
        assert!(matches!(
            Machine::new(ad, 3, 2, vec![stray]),
            Err(EnigmaError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_insert_rotors_binds_in_order() {
        let mut mach = small_machine();
        mach.insert_rotors(&["B", "I", "II"]).unwrap();
        assert_eq!(mach.settings(), "AAA");
    }

    #[test]
    fn test_insert_rotors_case_insensitive() {
        let mut mach = small_machine();
        mach.insert_rotors(&["b", "i", "ii"]).unwrap();
        assert_eq!(mach.settings(), "AAA");
    }

    #[test]
    fn test_insert_rotors_unknown_name() {
        let mut mach = small_machine();
        assert_eq!(
            mach.insert_rotors(&["B", "I", "III"]).unwrap_err(),
            EnigmaError::UnknownRotor("III".to_string())
        );
    }

    #[test]
    fn test_insert_rotors_duplicate() {
        let mut mach = small_machine();
        assert_eq!(
            mach.insert_rotors(&["B", "I", "I"]).unwrap_err(),
            EnigmaError::DuplicateRotor("I".to_string())
        );
    }

    #[test]
    fn test_insert_rotors_requires_reflector_first() {
        let mut mach = small_machine();
        assert_eq!(
            mach.insert_rotors(&["I", "B", "II"]).unwrap_err(),
            EnigmaError::MissingReflector
        );
    }

    #[test]
    fn test_insert_rotors_rejects_reflector_mid_stack() {
        let alpha = Alphabet::range('A', 'D').unwrap();
        let catalogue = vec![
            Rotor::reflector("B", Permutation::new("(AC) (BD)", &alpha).unwrap()),
            Rotor::reflector("C", Permutation::new("(AB) (CD)", &alpha).unwrap()),
            Rotor::moving("I", Permutation::new("(ABCD)", &alpha).unwrap(), "C").unwrap(),
        ];
        let mut mach = Machine::new(alpha, 3, 1, catalogue).unwrap();
        assert!(matches!(
            mach.insert_rotors(&["B", "C", "I"]),
            Err(EnigmaError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_insert_rotors_wrong_count() {
        let mut mach = small_machine();
        assert!(matches!(
            mach.insert_rotors(&["B", "I"]),
            Err(EnigmaError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_failed_insert_keeps_previous_binding() {
        let mut mach = bound_small_machine();
        mach.set_rotors("BC").unwrap();
        assert!(mach.insert_rotors(&["B", "I", "nosuch"]).is_err());
        // Previous binding and settings still active
        assert_eq!(mach.settings(), "ABC");
    }

    #[test]
    fn test_set_rotors_requires_binding() {
        let mut mach = small_machine();
        assert!(matches!(
            mach.set_rotors("AA"),
            Err(EnigmaError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_set_rotors_length_mismatch() {
        let mut mach = small_machine();
        mach.insert_rotors(&["B", "I", "II"]).unwrap();
        assert_eq!(
            mach.set_rotors("A").unwrap_err(),
            EnigmaError::SettingLengthMismatch {
                expected: 2,
                got: 1
            }
        );
        assert_eq!(
            mach.set_rotors("AAA").unwrap_err(),
            EnigmaError::SettingLengthMismatch {
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn test_set_rotors_invalid_symbol_is_atomic() {
        let mut mach = bound_small_machine();
        mach.set_rotors("BC").unwrap();
        assert_eq!(
            mach.set_rotors("AZ").unwrap_err(),
            EnigmaError::SettingSymbolInvalid('Z')
        );
        // No rotor moved
        assert_eq!(mach.settings(), "ABC");
    }

    #[test]
    fn test_set_plugboard_alphabet_mismatch() {
        let mut mach = small_machine();
        let az = Alphabet::range('A', 'Z').unwrap();
        let plug = Permutation::new("(AB)", &az).unwrap();
        assert!(matches!(
            mach.set_plugboard(plug),
            Err(EnigmaError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_convert_before_insert() {
        let mut mach = small_machine();
        assert!(matches!(
            mach.convert_char('A'),
            Err(EnigmaError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_convert_steps_before_encoding() {
        let mut mach = bound_small_machine();
        mach.convert_char('A').unwrap();
        // Both pawl-engaged slots start off-notch, so only the rightmost
        // advances on the first keypress.
        assert_eq!(mach.settings(), "AAB");
    }

    #[test]
    fn test_convert_strips_spaces_and_uppercases() {
        let mut forward = bound_small_machine();
        let ct = forward.convert("abcd dcba").unwrap();
        let mut reference = bound_small_machine();
        assert_eq!(reference.convert("ABCDDCBA").unwrap(), ct);
        assert_eq!(ct.len(), 8);
    }

    #[test]
    fn test_small_machine_frozen_ciphertext() {
        let mut mach = bound_small_machine();
        assert_eq!(mach.convert("ABCD DCBA").unwrap(), "CDABBADC");
    }

    #[test]
    fn test_conversion_is_self_inverse() {
        let mut mach = bound_small_machine();
        let ct = mach.convert("ABCD DCBA").unwrap();
        mach.insert_rotors(&["B", "I", "II"]).unwrap();
        mach.set_rotors("AA").unwrap();
        assert_eq!(mach.convert(&ct).unwrap(), "ABCDDCBA");
    }

    #[test]
    fn test_convert_rejects_non_member() {
        let mut mach = bound_small_machine();
        assert_eq!(
            mach.convert("AB.CD").unwrap_err(),
            EnigmaError::InvalidSymbol('.')
        );
    }

    #[test]
    fn test_insert_rotors_does_not_reset_settings() {
        let mut mach = bound_small_machine();
        mach.set_rotors("CD").unwrap();
        mach.insert_rotors(&["B", "I", "II"]).unwrap();
        assert_eq!(mach.settings(), "ACD");
    }

    #[test]
    fn test_accessors() {
        let mach = small_machine();
        assert_eq!(mach.num_rotors(), 3);
        assert_eq!(mach.num_pawls(), 2);
        assert_eq!(mach.alphabet().size(), 4);
    }
}
