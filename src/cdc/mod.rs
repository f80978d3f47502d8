//! Circuit description code (CDC) compiler.
//!
//! A CDC string describes an equivalent circuit as nested series and
//! parallel connections of elements, optionally with parameter values,
//! limits, fixed flags and labels.
//!
//! # Grammar Overview
//!
//! ```text
//! circuit     = series
//! series      = branch { branch }
//! branch      = element | parallel | group
//! group       = '[' series ']'
//! parallel    = '(' branch branch { branch } ')'
//! element     = symbol [ block ]
//! block       = '{' param { ',' param } [ ':' label ] '}'
//! param       = identifier '=' number [ '/' [ number ] [ '/' number ] ] [ 'F' ]
//!
//! symbol      = letter { lowercase_letter }
//! number      = ['-'|'+'] (digit+ ['.' digit*] [('e'|'E') ['-'|'+'] digit+] | "inf")
//! label       = { any_char except '}' }
//! ```
//!
//! Whitespace between tokens is ignored. A series group nested directly in
//! a series, or a parallel connection nested directly in a parallel
//! connection, is merged into its parent.
//!
//! # Parameter values
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `R=100` | value |
//! | `R=100/10` | value and lower limit |
//! | `R=100/10/1000` | value, lower and upper limit |
//! | `n=0.9//0.99` | value and upper limit |
//! | `C=1e-6F` | fixed value |
//!
//! # Example
//!
//! ```text
//! R{R=1.0E+02:electrolyte}(C{C=1.0E-06}R{R=1.0E+03/0/inf})
//! ```

mod format;
mod parser;
mod tokenizer;

pub use format::format_value;
pub use parser::Parser;
pub use tokenizer::{parse_number, Token, TokenKind, Tokenizer};

use crate::circuit::Circuit;
use crate::error::ParsingError;

/// Parse a CDC string into a circuit.
///
/// ```
/// let circuit = cdc_core::parse("R(CR)").unwrap();
/// assert_eq!(circuit.to_string(), "[R(CR)]");
/// ```
pub fn parse(input: &str) -> Result<Circuit, ParsingError> {
    Parser::new().process(input)
}
