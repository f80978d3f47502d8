//! Closed-form impedance expressions.
//!
//! A circuit can be turned into an [`Expr`] in a single free variable, the
//! excitation frequency. Element parameters either stay as named symbols
//! (`<parameter>_<element label>`, e.g. `R_R_1`) or are replaced by their
//! current values.
//!
//! ```
//! use cdc_core::{parse, FREQUENCY_SYMBOL};
//!
//! let circuit = parse("R{R=100}C{C=1e-6}").unwrap();
//! let expr = circuit.to_symbolic(true);
//! let z = expr.evaluate_at(FREQUENCY_SYMBOL, 1.0e3).unwrap();
//! assert!((z - circuit.impedance(1.0e3)).norm() < 1e-9);
//! ```

mod expr;

pub use expr::Expr;

use std::f64::consts::PI;

use crate::FREQUENCY_SYMBOL;

/// Configuration for symbolic expression generation.
#[derive(Debug, Clone)]
pub struct SymbolicConfig {
    /// Name of the free frequency variable.
    pub frequency_symbol: String,
    /// Replace parameter symbols with their current numeric values.
    pub substitute: bool,
}

impl Default for SymbolicConfig {
    fn default() -> Self {
        Self {
            frequency_symbol: FREQUENCY_SYMBOL.to_string(),
            substitute: false,
        }
    }
}

impl SymbolicConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name of the frequency variable.
    pub fn with_frequency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.frequency_symbol = symbol.into();
        self
    }

    /// Substitute parameter values instead of emitting parameter symbols.
    pub fn with_substitution(mut self, substitute: bool) -> Self {
        self.substitute = substitute;
        self
    }

    /// The `jω` term, i.e. `j*2π*f`.
    pub(crate) fn jw(&self) -> Expr {
        Expr::Imaginary * Expr::number(2.0 * PI) * Expr::symbol(self.frequency_symbol.as_str())
    }
}
