//! Command-line front end: configure a machine, run a message session.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use enigma::message::process_messages;
use enigma::MachineConfig;

/// Enigma rotor machine simulator.
///
/// Builds a machine from the configuration file, then processes a
/// message session: setting lines select and position rotors, every
/// other line is converted and printed in five-symbol groups.
#[derive(Debug, Parser)]
#[command(name = "enigma", version, about)]
struct Cli {
    /// Machine configuration file
    config: PathBuf,

    /// Message session input; standard input when omitted
    input: Option<PathBuf>,

    /// Converted output; standard output when omitted
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config_text = fs::read_to_string(&cli.config)
        .with_context(|| format!("could not read configuration file '{}'", cli.config.display()))?;
    let mut machine = MachineConfig::parse(&config_text)?.into_machine()?;

    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read input file '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("could not read standard input")?;
            buf
        }
    };

    let output = process_messages(&mut machine, &input)?;

    match &cli.output {
        Some(path) => fs::write(path, &output)
            .with_context(|| format!("could not write output file '{}'", path.display()))?,
        None => print!("{output}"),
    }
    Ok(())
}
