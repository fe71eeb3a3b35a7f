//! Enigma rotor machine simulator.
//!
//! A machine is built over an arbitrary symbol alphabet and carries a
//! catalogue of rotors, each a wired permutation in a moving, fixed, or
//! reflecting frame. Bound rotors sit in ordered slots with the
//! reflector leftmost; pawls engage the rightmost slots and produce the
//! characteristic double-stepping of the middle rotors. Because every
//! signal is folded back through the reflector, conversion is
//! self-inverse: the same machine in the same starting state deciphers
//! its own output.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbol ↔ index bijection)
//!     ↕
//! Permutation  (cycle-notation wiring over an alphabet)
//!     ↕
//! Rotor        (a permutation in a frame: moving / fixed / reflector)
//!     ↕ catalogue + slot bindings
//! Machine      (stepping mechanism, plugboard, signal path)
//!     ↕
//! config / message  (configuration text and message sessions)
//! ```
//!
//! # Examples
//!
//! Build a machine from configuration text and convert a message:
//!
//! ```
//! use enigma::MachineConfig;
//!
//! let config = "
//! A-D
//! 3 2
//! B R (AC) (BD)
//! I MC (ABCD)
//! II MD (AD) (BC)
//! ";
//! let mut machine = MachineConfig::parse(config).unwrap().into_machine().unwrap();
//! machine.insert_rotors(&["B", "I", "II"]).unwrap();
//! machine.set_rotors("AA").unwrap();
//!
//! let ciphertext = machine.convert("ABCD DCBA").unwrap();
//! assert_eq!(ciphertext, "CDABBADC");
//!
//! // Rewind to the starting setting and the machine deciphers itself.
//! machine.set_rotors("AA").unwrap();
//! assert_eq!(machine.convert(&ciphertext).unwrap(), "ABCDDCBA");
//! ```
//!
//! Assemble the parts directly:
//!
//! ```
//! use enigma::{Alphabet, Machine, Permutation, Rotor};
//!
//! let alphabet = Alphabet::range('A', 'D').unwrap();
//! let rotors = vec![
//!     Rotor::reflector("B", Permutation::new("(AC) (BD)", &alphabet).unwrap()),
//!     Rotor::moving("I", Permutation::new("(ABCD)", &alphabet).unwrap(), "C").unwrap(),
//! ];
//! let mut machine = Machine::new(alphabet, 2, 1, rotors).unwrap();
//! machine.insert_rotors(&["B", "I"]).unwrap();
//! machine.set_rotors("A").unwrap();
//! assert_eq!(machine.convert_char('A').unwrap(), 'C');
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod message;
pub mod permutation;
pub mod rotor;

pub use alphabet::Alphabet;
pub use config::MachineConfig;
pub use error::EnigmaError;
pub use machine::Machine;
pub use message::SettingDirective;
pub use permutation::Permutation;
pub use rotor::Rotor;
