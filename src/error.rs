//! Error types for the CDC compiler and runtime.
//!
//! Parsing failures are reported as [`ParsingError`], with one variant per
//! violated grammar rule. Element, connection and builder precondition
//! violations have their own enums, and [`CdcError`] unifies all of them.

use thiserror::Error;

use crate::circuit::ConnectionKind;

/// Result type alias using [`CdcError`].
pub type Result<T> = std::result::Result<T, CdcError>;

/// Unified error type for all CDC operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CdcError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Element(#[from] ElementError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Symbolic(#[from] SymbolicError),
}

/// A CDC string that could not be parsed.
///
/// `position` is the byte offset of the offending token in the input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    // ============ Structure ============
    /// `[]` or `()` with nothing inside
    #[error("connection at position {position} contains no elements")]
    ConnectionWithoutElements { position: usize },

    /// `(X)` with a single branch
    #[error("parallel connection at position {position} has {branches} branch(es), expected at least 2")]
    InsufficientElementsInParallelConnection { position: usize, branches: usize },

    /// Input ended before the current construct was closed
    #[error("input ended at position {position} while parsing {context}")]
    InsufficientTokens {
        position: usize,
        context: &'static str,
    },

    /// A token that is not allowed where it appears
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken { position: usize, token: String },

    /// Symbol not found in the element registry
    #[error("invalid element symbol '{symbol}' at position {position}")]
    InvalidElementSymbol { position: usize, symbol: String },

    // ============ Parameter blocks ============
    /// The same parameter assigned twice in one block
    #[error("parameter '{name}' defined more than once at position {position}")]
    DuplicateParameterDefinition { position: usize, name: String },

    /// A value slot without a number in it
    #[error("expected a numeric value at position {position}, found {found}")]
    ExpectedNumericValue { position: usize, found: String },

    /// `=` with nothing in front of it
    #[error("expected a parameter identifier before '=' at position {position}")]
    ExpectedParameterIdentifier { position: usize },

    /// Parameter name unknown to the element kind
    #[error("'{symbol}' has no parameter named '{name}' (position {position})")]
    InvalidParameterDefinition {
        position: usize,
        symbol: String,
        name: String,
    },

    /// Lower limit above the value
    #[error("lower limit {lower} of parameter '{name}' exceeds its value {value} (position {position})")]
    InvalidParameterLowerLimit {
        position: usize,
        name: String,
        value: f64,
        lower: f64,
    },

    /// Upper limit below the value
    #[error("upper limit {upper} of parameter '{name}' is below its value {value} (position {position})")]
    InvalidParameterUpperLimit {
        position: usize,
        name: String,
        value: f64,
        upper: f64,
    },

    /// More definitions than the element kind declares
    #[error("'{symbol}' accepts {expected} parameter(s), too many given at position {position}")]
    TooManyParameterDefinitions {
        position: usize,
        symbol: String,
        expected: usize,
    },
}

impl ParsingError {
    /// Byte offset into the input where the error was detected.
    pub fn position(&self) -> usize {
        match self {
            Self::ConnectionWithoutElements { position }
            | Self::InsufficientElementsInParallelConnection { position, .. }
            | Self::InsufficientTokens { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::InvalidElementSymbol { position, .. }
            | Self::DuplicateParameterDefinition { position, .. }
            | Self::ExpectedNumericValue { position, .. }
            | Self::ExpectedParameterIdentifier { position }
            | Self::InvalidParameterDefinition { position, .. }
            | Self::InvalidParameterLowerLimit { position, .. }
            | Self::InvalidParameterUpperLimit { position, .. }
            | Self::TooManyParameterDefinitions { position, .. } => *position,
        }
    }

    /// Stable name of the error kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::ConnectionWithoutElements { .. } => "ConnectionWithoutElements",
            Self::InsufficientElementsInParallelConnection { .. } => {
                "InsufficientElementsInParallelConnection"
            }
            Self::InsufficientTokens { .. } => "InsufficientTokens",
            Self::UnexpectedToken { .. } => "UnexpectedToken",
            Self::InvalidElementSymbol { .. } => "InvalidElementSymbol",
            Self::DuplicateParameterDefinition { .. } => "DuplicateParameterDefinition",
            Self::ExpectedNumericValue { .. } => "ExpectedNumericValue",
            Self::ExpectedParameterIdentifier { .. } => "ExpectedParameterIdentifier",
            Self::InvalidParameterDefinition { .. } => "InvalidParameterDefinition",
            Self::InvalidParameterLowerLimit { .. } => "InvalidParameterLowerLimit",
            Self::InvalidParameterUpperLimit { .. } => "InvalidParameterUpperLimit",
            Self::TooManyParameterDefinitions { .. } => "TooManyParameterDefinitions",
        }
    }
}

/// Precondition violations raised by element accessors and mutators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    #[error("element '{symbol}' has no parameter named '{name}'")]
    UnknownParameter { symbol: String, name: String },

    #[error("parameter '{name}' cannot be set to {value}")]
    InvalidValue { name: String, value: f64 },

    #[error("value {value} of parameter '{name}' is below its lower limit {lower}")]
    LowerLimit { name: String, value: f64, lower: f64 },

    #[error("value {value} of parameter '{name}' is above its upper limit {upper}")]
    UpperLimit { name: String, value: f64, upper: f64 },

    #[error("lower limit {lower} of parameter '{name}' is above its upper limit {upper}")]
    LimitOrder { name: String, lower: f64, upper: f64 },

    #[error("identifier of '{symbol}' is already assigned ({current})")]
    IdentifierAlreadyAssigned { symbol: String, current: u32 },

    #[error("invalid identifier {identifier}: must be a non-negative integer")]
    InvalidIdentifier { identifier: i64 },

    #[error("invalid label '{label}'")]
    InvalidLabel { label: String },
}

/// Structural invariant violations of a series/parallel connection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectionError {
    #[error("{kind} connection contains no elements")]
    Empty { kind: ConnectionKind },

    #[error("parallel connection has {count} branch(es), expected at least 2")]
    InsufficientBranches { count: usize },
}

/// Errors raised while closing [`crate::CircuitBuilder`] scopes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuilderError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Element(#[from] ElementError),

    #[error("{open} nested scope(s) still open")]
    UnclosedScopes { open: usize },

    #[error("no nested scope to close")]
    NoOpenScope,
}

/// Errors raised while evaluating a symbolic expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolicError {
    #[error("symbol '{name}' has no value bound to it")]
    UnboundSymbol { name: String },
}
