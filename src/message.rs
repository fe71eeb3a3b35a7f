//! Message session processing.
//!
//! An input stream is a sequence of lines. A line whose first non-space
//! character is `*` is a setting directive: it names the rotors to bind (leftmost
//! first), gives the initial setting, and optionally lists plugboard
//! cycles. Every other non-blank line is a message enciphered under the
//! most recent directive, emitted in five-symbol groups. Blank lines
//! pass through so the grouping of the output mirrors the input.
//!
//! ```text
//! * B BETA I II III AAAA (YF) (ZH)
//! FROM HIS SHOULDER HIAWATHA
//! ```

use tracing::debug;

use crate::error::{EnigmaError, Result};
use crate::machine::Machine;

/// A parsed setting directive: rotor names, initial setting, and the
/// plugboard cycle text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDirective {
    rotor_names: Vec<String>,
    setting: String,
    plug_cycles: String,
}

impl SettingDirective {
    /// Parses a directive line for a machine with `num_rotors` slots.
    /// The leading `*` may be present or already stripped.
    ///
    /// # Errors
    /// Returns [`EnigmaError::MalformedInput`] if the line has fewer
    /// fields than the rotor names and setting require.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::SettingDirective;
    ///
    /// let directive = SettingDirective::parse("* B I II AA (XY)", 3).unwrap();
    /// assert_eq!(directive.rotor_names(), ["B", "I", "II"]);
    /// assert_eq!(directive.setting(), "AA");
    /// assert_eq!(directive.plug_cycles(), "(XY)");
    /// ```
    pub fn parse(line: &str, num_rotors: usize) -> Result<Self> {
        let body = line.trim_start();
        let body = body.strip_prefix('*').unwrap_or(body);
        let fields: Vec<&str> = body.split_whitespace().collect();
        if fields.len() < num_rotors + 1 {
            return Err(EnigmaError::MalformedInput(format!(
                "setting line has {} fields, expected at least {} ({} rotor names and a setting)",
                fields.len(),
                num_rotors + 1,
                num_rotors
            )));
        }
        let rotor_names = fields[..num_rotors]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let setting = fields[num_rotors].to_string();
        let plug_cycles = fields[num_rotors + 1..].join(" ");
        Ok(SettingDirective {
            rotor_names,
            setting,
            plug_cycles,
        })
    }

    /// Returns the rotor names, leftmost slot first.
    pub fn rotor_names(&self) -> &[String] {
        &self.rotor_names
    }

    /// Returns the initial setting text.
    pub fn setting(&self) -> &str {
        &self.setting
    }

    /// Returns the plugboard cycle text, empty when the directive
    /// carried none.
    pub fn plug_cycles(&self) -> &str {
        &self.plug_cycles
    }

    /// Reconfigures `machine` according to this directive: binds the
    /// named rotors, applies the setting, and replaces the plugboard.
    ///
    /// # Errors
    /// Propagates the machine's binding and setting errors, and
    /// [`EnigmaError::MalformedPermutation`] from the plugboard cycles.
    pub fn apply(&self, machine: &mut Machine) -> Result<()> {
        machine.insert_rotors(&self.rotor_names)?;
        machine.set_rotors(&self.setting)?;
        let plugboard =
            crate::permutation::Permutation::new(&self.plug_cycles, machine.alphabet())?;
        machine.set_plugboard(plugboard)?;
        debug!(
            "machine reset: rotors {:?}, setting {}",
            self.rotor_names, self.setting
        );
        Ok(())
    }
}

/// Runs a whole message session through `machine` and returns the
/// output text, one line per input line.
///
/// The first non-blank line must be a setting directive. Blank lines
/// before it are dropped; blank lines after it are echoed. Message
/// lines are converted and regrouped into blocks of five symbols.
///
/// # Errors
/// Returns [`EnigmaError::MalformedInput`] if a message line precedes
/// the first directive, and propagates conversion and directive errors.
///
/// # Examples
///
/// ```
/// use enigma::MachineConfig;
/// use enigma::message::process_messages;
///
/// let config = "
/// A-D
/// 3 2
/// B R (AC) (BD)
/// I MC (ABCD)
/// II MD (AD) (BC)
/// ";
/// let mut machine = MachineConfig::parse(config).unwrap().into_machine().unwrap();
/// let output = process_messages(&mut machine, "* B I II AA\nABCD DCBA\n").unwrap();
/// assert_eq!(output, "CDABB ADC\n");
/// ```
pub fn process_messages(machine: &mut Machine, input: &str) -> Result<String> {
    let mut output = String::new();
    let mut configured = false;
    for line in input.lines() {
        if line.trim_start().starts_with('*') {
            let directive = SettingDirective::parse(line, machine.num_rotors())?;
            directive.apply(machine)?;
            configured = true;
        } else if line.trim().is_empty() {
            if configured {
                output.push('\n');
            }
        } else if !configured {
            return Err(EnigmaError::MalformedInput(
                "message text precedes the first setting line".to_string(),
            ));
        } else {
            let converted = machine.convert(line)?;
            output.push_str(&format_groups(&converted));
            output.push('\n');
        }
    }
    Ok(output)
}

/// Regroups `text` into blocks of five symbols separated by single
/// spaces. The final block may be shorter.
///
/// # Examples
///
/// ```
/// use enigma::message::format_groups;
///
/// assert_eq!(format_groups("QVPQSOKOILPUBKJ"), "QVPQS OKOIL PUBKJ");
/// assert_eq!(format_groups("ABCDEFG"), "ABCDE FG");
/// assert_eq!(format_groups(""), "");
/// ```
pub fn format_groups(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(5)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
