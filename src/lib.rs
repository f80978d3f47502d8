//! # CDC Core
//!
//! A compiler and runtime for Circuit Description Code, the compact text
//! notation for equivalent circuits used in impedance spectroscopy.
//!
//! This library provides:
//! - A tokenizer and parser for CDC strings, with precise error reporting
//! - A circuit tree of elements, series and parallel connections
//! - Canonical CDC serialization, with or without parameter blocks
//! - Numeric complex impedance evaluation
//! - Closed-form impedance expressions in the excitation frequency
//! - A builder for constructing circuits in code
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`cdc`] - Tokenizer, parser and number formatting for CDC text
//! - [`circuit`] - Circuit tree, connections and the builder
//! - [`elements`] - Element kinds, parameter definitions and impedance models
//! - [`symbolic`] - Expression tree for closed-form impedances
//! - [`error`] - Error types
//!
//! ## Usage
//!
//! ```
//! use cdc_core::parse;
//!
//! let circuit = parse("R{R=100}(C{C=1e-6}R{R=1e3})").unwrap();
//! assert_eq!(circuit.to_string(), "[R(CR)]");
//! assert_eq!(
//!     circuit.to_cdc(Some(1)),
//!     "[R{R=1.0E+02}(C{C=1.0E-06}R{R=1.0E+03})]"
//! );
//!
//! let z = circuit.impedance(1.0e3);
//! assert!(z.re > 100.0 && z.im < 0.0);
//! ```
//!
//! ## Impedance Evaluation
//!
//! Element impedances are evaluated at the angular frequency ω = 2πf.
//! Series connections add impedances; parallel connections add admittances.

pub mod cdc;
pub mod circuit;
pub mod elements;
pub mod error;
pub mod symbolic;

// Re-export main types for convenience
pub use cdc::{parse, Parser, Token, TokenKind, Tokenizer};
pub use circuit::{Circuit, CircuitBuilder, Connection, ConnectionKind, Node, NodeRef};
pub use elements::{known_elements, Element, ElementDefinition, ElementKind, Parameter, ParameterDefinition};
pub use error::{BuilderError, CdcError, ConnectionError, ElementError, ParsingError, Result, SymbolicError};
pub use symbolic::{Expr, SymbolicConfig};

/// Name of the free frequency variable in symbolic expressions
pub const FREQUENCY_SYMBOL: &str = "f";

/// Decimals used when serializing parameter blocks without an explicit precision
pub const DEFAULT_DECIMALS: usize = 6;
