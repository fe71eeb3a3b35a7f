//! Rotor: a wired substitution element with a rotational offset.
//!
//! A rotor couples one [`Permutation`] (its wiring, fixed at manufacture)
//! with a mutable setting in `0..N`. Rotating the rotor does not rewire
//! it: the setting shifts which contact of the wiring a signal enters, so
//! a signal at index `p` enters contact `p + setting` and leaves at the
//! wired output minus `setting`, everything mod N.
//!
//! Three kinds exist. *Moving* rotors advance under the machine's pawls
//! and carry notch positions that trigger their left neighbour. *Fixed*
//! rotors sit in the stack but never move. A *Reflector* is pinned at
//! setting 0 and folds the signal back through the stack.

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

/// Variant-specific rotor data. Notches are stored as alphabet indices so
/// notch checks compare directly against the setting.
#[derive(Debug, Clone)]
enum RotorKind {
    Moving { notches: Vec<usize> },
    Fixed,
    Reflector,
}

/// A named rotor: wiring, kind, and current rotational setting.
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    perm: Permutation,
    kind: RotorKind,
    setting: usize,
}

impl Rotor {
    /// Creates a moving rotor with the given notch symbols.
    ///
    /// # Parameters
    /// - `name`: Rotor name, used for slot binding lookups.
    /// - `perm`: The wiring.
    /// - `notches`: One or more symbols at which this rotor trips its left
    ///   neighbour.
    ///
    /// # Errors
    /// Returns [`EnigmaError::MalformedConfig`] if `notches` is empty and
    /// [`EnigmaError::InvalidSymbol`] if a notch symbol is not in the
    /// wiring's alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{Alphabet, Permutation, Rotor};
    ///
    /// let alpha = Alphabet::range('A', 'D').unwrap();
    /// let perm = Permutation::new("(AC)", &alpha).unwrap();
    /// let mut rotor = Rotor::moving("I", perm, "D").unwrap();
    /// assert_eq!(rotor.convert_forward(0), 2);
    /// rotor.set(1).unwrap();
    /// assert_eq!(rotor.convert_forward(0), 0);
    /// ```
    pub fn moving(name: &str, perm: Permutation, notches: &str) -> Result<Self> {
        if notches.is_empty() {
            return Err(EnigmaError::MalformedConfig(format!(
                "moving rotor '{name}' has no notches"
            )));
        }
        let mut positions = Vec::with_capacity(notches.len());
        for ch in notches.chars() {
            positions.push(perm.alphabet().to_index(ch)?);
        }
        Ok(Rotor {
            name: name.to_string(),
            perm,
            kind: RotorKind::Moving { notches: positions },
            setting: 0,
        })
    }

    /// Creates a fixed rotor: part of the signal path, never advances.
    pub fn fixed(name: &str, perm: Permutation) -> Self {
        Rotor {
            name: name.to_string(),
            perm,
            kind: RotorKind::Fixed,
            setting: 0,
        }
    }

    /// Creates a reflector: fixed at setting 0, flagged as the element
    /// that folds the signal back through the stack.
    pub fn reflector(name: &str, perm: Permutation) -> Self {
        Rotor {
            name: name.to_string(),
            perm,
            kind: RotorKind::Reflector,
            setting: 0,
        }
    }

    /// Returns the rotor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the alphabet the wiring is defined over.
    pub fn alphabet(&self) -> &Alphabet {
        self.perm.alphabet()
    }

    /// Returns the current rotational setting in `0..N`.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// True for rotors the pawl mechanism may advance.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// True for the signal-reflecting rotor.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Sets the rotational offset to `posn mod N`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidOperation`] for a reflector unless
    /// the wrapped position is 0.
    pub fn set(&mut self, posn: isize) -> Result<()> {
        let wrapped = self.perm.wrap(posn);
        if self.reflecting() && wrapped != 0 {
            return Err(EnigmaError::InvalidOperation(format!(
                "reflector '{}' only has position 0",
                self.name
            )));
        }
        self.setting = wrapped;
        Ok(())
    }

    /// Advances the rotor one position, wrapping at the alphabet size.
    /// A no-op for fixed rotors.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidOperation`] for a reflector; the
    /// machine never drives one.
    pub fn advance(&mut self) -> Result<()> {
        match self.kind {
            RotorKind::Moving { .. } => {
                self.setting = self.perm.wrap(self.setting as isize + 1);
                Ok(())
            }
            RotorKind::Fixed => Ok(()),
            RotorKind::Reflector => Err(EnigmaError::InvalidOperation(format!(
                "reflector '{}' cannot advance",
                self.name
            ))),
        }
    }

    /// True iff this is a moving rotor whose current setting sits on one
    /// of its notches.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.setting),
            _ => false,
        }
    }

    /// Converts an index through the wiring right-to-left (signal entering
    /// the rotor's right contact), adjusted for the current setting.
    pub fn convert_forward(&self, p: usize) -> usize {
        let contact = self.perm.wrap(p as isize + self.setting as isize);
        self.perm
            .wrap(self.perm.permute(contact) as isize - self.setting as isize)
    }

    /// Converts an index through the wiring left-to-right: the inverse of
    /// [`convert_forward`](Self::convert_forward) at the same setting.
    pub fn convert_backward(&self, c: usize) -> usize {
        let contact = self.perm.wrap(c as isize + self.setting as isize);
        self.perm
            .wrap(self.perm.invert(contact) as isize - self.setting as isize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper_latin() -> Alphabet {
        Alphabet::range('A', 'Z').unwrap()
    }

    fn sample_mover() -> Rotor {
        let alpha = upper_latin();
        let perm = Permutation::new(
            "(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)",
            &alpha,
        )
        .unwrap();
        Rotor::moving("V", perm, "E").unwrap()
    }

    #[test]
    fn test_convert_forward_at_zero_setting() {
        let rotor = sample_mover();
        // F (5) → I (8) straight through the wiring
        assert_eq!(rotor.convert_forward(5), 8);
    }

    #[test]
    fn test_convert_adjusts_for_setting() {
        let mut rotor = sample_mover();
        rotor.set(1).unwrap();
        // A enters contact B; wiring sends B → J; J exits as I
        assert_eq!(rotor.convert_forward(0), 8);
        assert_eq!(rotor.convert_backward(8), 0);
    }

    #[test]
    fn test_forward_backward_inverse_all_indices() {
        let mut rotor = sample_mover();
        for setting in [0, 1, 13, 25] {
            rotor.set(setting).unwrap();
            for p in 0..26 {
                assert_eq!(rotor.convert_backward(rotor.convert_forward(p)), p);
            }
        }
    }

    #[test]
    fn test_at_notch() {
        let mut rotor = sample_mover();
        assert!(!rotor.at_notch());
        rotor.set(4).unwrap(); // E
        assert!(rotor.at_notch());
        rotor.set(5).unwrap();
        assert!(!rotor.at_notch());
    }

    #[test]
    fn test_multiple_notches() {
        let alpha = upper_latin();
        let perm = Permutation::new("", &alpha).unwrap();
        let mut rotor = Rotor::moving("VI", perm, "MZ").unwrap();
        rotor.set(12).unwrap(); // M
        assert!(rotor.at_notch());
        rotor.set(25).unwrap(); // Z
        assert!(rotor.at_notch());
        rotor.set(0).unwrap();
        assert!(!rotor.at_notch());
    }

    #[test]
    fn test_advance_wraps() {
        let mut rotor = sample_mover();
        rotor.set(25).unwrap();
        rotor.advance().unwrap();
        assert_eq!(rotor.setting(), 0);
        rotor.advance().unwrap();
        assert_eq!(rotor.setting(), 1);
    }

    #[test]
    fn test_set_wraps_and_accepts_negative() {
        let mut rotor = sample_mover();
        rotor.set(26).unwrap();
        assert_eq!(rotor.setting(), 0);
        rotor.set(-1).unwrap();
        assert_eq!(rotor.setting(), 25);
    }

    #[test]
    fn test_moving_requires_notches() {
        let alpha = upper_latin();
        let perm = Permutation::new("", &alpha).unwrap();
        assert!(matches!(
            Rotor::moving("I", perm.clone(), ""),
            Err(EnigmaError::MalformedConfig(_))
        ));
        assert_eq!(
            Rotor::moving("I", perm, "é").unwrap_err(),
            EnigmaError::InvalidSymbol('é')
        );
    }

    #[test]
    fn test_fixed_rotor_never_moves() {
        let alpha = upper_latin();
        let perm = Permutation::new("(AFNIRLBSQWVXGUZDKMTPCOYJHE)", &alpha).unwrap();
        let mut rotor = Rotor::fixed("Beta", perm);
        assert!(!rotor.rotates());
        assert!(!rotor.reflecting());
        rotor.set(7).unwrap();
        assert_eq!(rotor.setting(), 7);
        rotor.advance().unwrap(); // no-op
        assert_eq!(rotor.setting(), 7);
        assert!(!rotor.at_notch());
    }

    #[test]
    fn test_reflector_pinned_at_zero() {
        let alpha = upper_latin();
        let perm = Permutation::new("(AB) (CD)", &alpha).unwrap();
        let mut rotor = Rotor::reflector("B", perm);
        assert!(rotor.reflecting());
        assert!(!rotor.rotates());
        assert!(rotor.set(0).is_ok());
        assert!(rotor.set(26).is_ok()); // wraps to 0
        assert!(matches!(
            rotor.set(1),
            Err(EnigmaError::InvalidOperation(_))
        ));
        assert!(matches!(
            rotor.advance(),
            Err(EnigmaError::InvalidOperation(_))
        ));
        assert!(!rotor.at_notch());
        assert_eq!(rotor.setting(), 0);
    }

    #[test]
    fn test_capability_queries() {
        let alpha = upper_latin();
        let perm = Permutation::new("", &alpha).unwrap();
        let mover = Rotor::moving("I", perm.clone(), "Q").unwrap();
        assert!(mover.rotates());
        assert!(!mover.reflecting());
        let refl = Rotor::reflector("B", perm);
        assert!(refl.reflecting());
        assert!(!refl.rotates());
    }
}
