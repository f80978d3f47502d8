//! cdc - Circuit Description Code inspector
//!
//! Parses one CDC string and prints its canonical form, an impedance table
//! and optionally the closed-form impedance expression.
//!
//! # Usage
//!
//! ```bash
//! cdc "R(CR)W" -f 0.1 -f 1 -f 10 --symbolic
//! ```

use clap::Parser;
use cdc_core::{error::Result, parse, SymbolicConfig, DEFAULT_DECIMALS};

/// Circuit Description Code inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Circuit description, e.g. "R(CR)"
    #[arg(value_name = "CDC")]
    cdc: String,

    /// Decimals used for parameter values
    #[arg(short, long, default_value_t = DEFAULT_DECIMALS)]
    decimals: usize,

    /// Frequency in Hz to evaluate the impedance at (repeatable)
    #[arg(short, long = "frequency", value_name = "HZ")]
    frequencies: Vec<f64>,

    /// Print the closed-form impedance expression
    #[arg(long)]
    symbolic: bool,

    /// Replace parameter symbols with their values in the expression
    #[arg(long, requires = "symbolic")]
    substitute: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let circuit = parse(&args.cdc)?;
    println!("{}", circuit);
    println!("{}", circuit.to_cdc(Some(args.decimals)));

    if !args.frequencies.is_empty() {
        println!("{:>14} {:>16} {:>16}", "f [Hz]", "Re(Z) [ohm]", "Im(Z) [ohm]");
        for (f, z) in args.frequencies.iter().zip(circuit.impedances(&args.frequencies)) {
            println!("{:>14.6e} {:>16.8e} {:>16.8e}", f, z.re, z.im);
        }
    }

    if args.symbolic {
        let config = SymbolicConfig::new().with_substitution(args.substitute);
        println!("Z({}) = {}", config.frequency_symbol, circuit.to_symbolic_with(&config));
    }

    Ok(())
}
