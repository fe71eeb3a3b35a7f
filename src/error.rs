//! Error types for the enigma library.

use thiserror::Error;

/// Errors produced by the enigma library.
///
/// Every variant describes a configuration or input problem; none are
/// transient. Operations surface them immediately and leave no partially
/// applied state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// A character is not a member of the machine's alphabet.
    #[error("symbol '{0}' is not in the alphabet")]
    InvalidSymbol(char),
    /// An index lies outside the alphabet's `0..size` range.
    #[error("index {index} is outside the alphabet range 0..{size}")]
    IndexOutOfRange { index: usize, size: usize },
    /// An alphabet description is empty, repeats a symbol, uses a reserved
    /// character, or gives an inverted range.
    #[error("malformed alphabet: {0}")]
    MalformedAlphabet(String),
    /// A cycle string violates the cycle-notation grammar.
    #[error("malformed permutation cycles: {0}")]
    MalformedPermutation(String),
    /// An operation was applied to a component that cannot perform it.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// A rotor name does not match any rotor in the catalogue.
    #[error("unknown rotor '{0}'")]
    UnknownRotor(String),
    /// The same rotor was bound to more than one slot.
    #[error("rotor '{0}' bound to more than one slot")]
    DuplicateRotor(String),
    /// Slot 0 was bound to a rotor that is not a reflector.
    #[error("first rotor slot is not a reflector")]
    MissingReflector,
    /// A rotor-setting string does not cover exactly the non-reflector slots.
    #[error("setting has {got} characters, expected {expected}")]
    SettingLengthMismatch { expected: usize, got: usize },
    /// A rotor-setting string contains an out-of-alphabet character.
    #[error("setting symbol '{0}' is not in the alphabet")]
    SettingSymbolInvalid(char),
    /// The configuration text is truncated or ill-formed.
    #[error("malformed configuration: {0}")]
    MalformedConfig(String),
    /// The message text is ill-formed (no leading setting line, or a
    /// directive with missing fields).
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnigmaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_symbol() {
        let err = EnigmaError::InvalidSymbol('%');
        assert_eq!(format!("{}", err), "symbol '%' is not in the alphabet");
    }

    #[test]
    fn test_display_index_out_of_range() {
        let err = EnigmaError::IndexOutOfRange { index: 26, size: 26 };
        assert_eq!(
            format!("{}", err),
            "index 26 is outside the alphabet range 0..26"
        );
    }

    #[test]
    fn test_display_setting_length_mismatch() {
        let err = EnigmaError::SettingLengthMismatch {
            expected: 4,
            got: 3,
        };
        assert_eq!(format!("{}", err), "setting has 3 characters, expected 4");
    }

    #[test]
    fn test_display_missing_reflector() {
        let err = EnigmaError::MissingReflector;
        assert_eq!(format!("{}", err), "first rotor slot is not a reflector");
    }

    #[test]
    fn test_display_unknown_rotor() {
        let err = EnigmaError::UnknownRotor("VIII".to_string());
        assert_eq!(format!("{}", err), "unknown rotor 'VIII'");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            EnigmaError::InvalidSymbol('A'),
            EnigmaError::InvalidSymbol('A')
        );
        assert_ne!(
            EnigmaError::InvalidSymbol('A'),
            EnigmaError::InvalidSymbol('B')
        );
        assert_ne!(
            EnigmaError::MissingReflector,
            EnigmaError::DuplicateRotor("I".to_string())
        );
    }

    #[test]
    fn test_error_clone() {
        let err = EnigmaError::MalformedConfig("configuration file truncated".to_string());
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }

    #[test]
    fn test_error_trait_object() {
        let err: &dyn std::error::Error = &EnigmaError::MissingReflector;
        assert!(err.source().is_none());
    }
}
