//! Configuration parsing: alphabet, slot/pawl counts, rotor catalogue.
//!
//! A configuration is whitespace-separated tokens. The first token names
//! the alphabet (`A-Z` range form, or an explicit symbol list), the next
//! two give the slot and pawl counts, and the rest describe rotors: a
//! name, a type token (`R`, `N`, or `M` followed by its notch symbols,
//! e.g. `MV`), then the wiring cycles. Cycle lists may continue across
//! lines; line breaks carry no meaning.
//!
//! ```text
//! A-D
//! 3 2
//! B R (AC) (BD)
//! I MC (ABCD)
//! II MD (AD) (BC)
//! ```

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// A parsed machine configuration: the alphabet, the slot and pawl
/// counts, and the full rotor catalogue.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    alphabet: Alphabet,
    num_rotors: usize,
    num_pawls: usize,
    rotors: Vec<Rotor>,
}

impl MachineConfig {
    /// Parses a configuration text.
    ///
    /// # Errors
    /// Returns [`EnigmaError::MalformedConfig`] for truncated text,
    /// non-numeric counts, unknown rotor types, or repeated rotor names;
    /// [`EnigmaError::MalformedAlphabet`] and
    /// [`EnigmaError::MalformedPermutation`] pass through from alphabet
    /// and wiring parsing.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::MachineConfig;
    ///
    /// let text = "
    /// A-D
    /// 3 2
    /// B R (AC) (BD)
    /// I MC (ABCD)
    /// II MD (AD) (BC)
    /// ";
    /// let config = MachineConfig::parse(text).unwrap();
    /// assert_eq!(config.num_rotors(), 3);
    /// assert_eq!(config.num_pawls(), 2);
    ///
    /// let mut machine = config.into_machine().unwrap();
    /// machine.insert_rotors(&["B", "I", "II"]).unwrap();
    /// machine.set_rotors("AA").unwrap();
    /// assert_eq!(machine.convert("ABCD DCBA").unwrap(), "CDABBADC");
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = text.split_whitespace().peekable();

        let alphabet = parse_alphabet(next_token(&mut tokens)?)?;
        let num_rotors = parse_count(next_token(&mut tokens)?, "slot count")?;
        let num_pawls = parse_count(next_token(&mut tokens)?, "pawl count")?;

        let mut rotors: Vec<Rotor> = Vec::new();
        while let Some(name) = tokens.next() {
            if name.starts_with('(') {
                return Err(EnigmaError::MalformedConfig(format!(
                    "rotor name expected, found cycle text '{name}'"
                )));
            }
            if rotors.iter().any(|r| r.name().eq_ignore_ascii_case(name)) {
                return Err(EnigmaError::MalformedConfig(format!(
                    "rotor '{name}' declared twice"
                )));
            }
            let type_token = next_token(&mut tokens)?;

            let mut cycles = String::new();
            while let Some(tok) = tokens.peek() {
                if !tok.starts_with('(') {
                    break;
                }
                if !cycles.is_empty() {
                    cycles.push(' ');
                }
                cycles.push_str(tok);
                tokens.next();
            }
            let perm = Permutation::new(&cycles, &alphabet)?;

            let mut type_chars = type_token.chars();
            let kind = type_chars.next();
            let rest = type_chars.as_str();
            let rotor = match kind {
                Some('M') => Rotor::moving(name, perm, rest)?,
                Some('N') if rest.is_empty() => Rotor::fixed(name, perm),
                Some('R') if rest.is_empty() => Rotor::reflector(name, perm),
                _ => {
                    return Err(EnigmaError::MalformedConfig(format!(
                        "unknown rotor type '{type_token}' for rotor '{name}'"
                    )));
                }
            };
            rotors.push(rotor);
        }

        debug!(
            "configuration parsed: {} slots, {} pawls, {} rotors, alphabet of {}",
            num_rotors,
            num_pawls,
            rotors.len(),
            alphabet.size()
        );
        Ok(MachineConfig {
            alphabet,
            num_rotors,
            num_pawls,
            rotors,
        })
    }

    /// Returns the configured alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the configured slot count.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the configured pawl count.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the rotor catalogue.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Builds the machine this configuration describes.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidOperation`] if the slot/pawl counts
    /// are inconsistent.
    pub fn into_machine(self) -> Result<Machine> {
        Machine::new(self.alphabet, self.num_rotors, self.num_pawls, self.rotors)
    }
}

fn next_token<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<&'a str> {
    tokens.next().ok_or_else(|| {
        EnigmaError::MalformedConfig("configuration file truncated".to_string())
    })
}

/// `X-Y` (exactly three characters, hyphen in the middle) is an inclusive
/// range; any other token is an explicit symbol list.
fn parse_alphabet(token: &str) -> Result<Alphabet> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() == 3 && chars[1] == '-' {
        Alphabet::range(chars[0], chars[2])
    } else {
        Alphabet::new(token)
    }
}

fn parse_count(token: &str, what: &str) -> Result<usize> {
    token.parse().map_err(|_| {
        EnigmaError::MalformedConfig(format!("{what} '{token}' is not a number"))
    })
}
