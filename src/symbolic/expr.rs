//! Algebraic expression tree.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::ops;

use num_complex::Complex64;

use crate::elements::math;
use crate::error::SymbolicError;

/// A closed-form expression over complex numbers.
///
/// Sums and products are n-ary; division is a product with a `-1` power.
/// Nothing is simplified beyond merging nested sums and products.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Real constant
    Number(f64),
    /// The imaginary unit `j`
    Imaginary,
    /// Named free variable
    Symbol(String),
    /// Sum of terms
    Add(Vec<Expr>),
    /// Product of factors
    Mul(Vec<Expr>),
    /// `base ^ exponent`
    Pow(Box<Expr>, Box<Expr>),
    /// Hyperbolic tangent
    Tanh(Box<Expr>),
    /// Hyperbolic cotangent
    Coth(Box<Expr>),
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    pub fn pow(self, exponent: Expr) -> Self {
        Self::Pow(Box::new(self), Box::new(exponent))
    }

    pub fn powf(self, exponent: f64) -> Self {
        self.pow(Self::Number(exponent))
    }

    pub fn sqrt(self) -> Self {
        self.powf(0.5)
    }

    pub fn recip(self) -> Self {
        self.powf(-1.0)
    }

    pub fn tanh(self) -> Self {
        Self::Tanh(Box::new(self))
    }

    pub fn coth(self) -> Self {
        Self::Coth(Box::new(self))
    }

    /// Evaluate with every free symbol taken from `bindings`.
    pub fn evaluate(&self, bindings: &HashMap<String, Complex64>) -> Result<Complex64, SymbolicError> {
        match self {
            Self::Number(value) => Ok(Complex64::new(*value, 0.0)),
            Self::Imaginary => Ok(Complex64::i()),
            Self::Symbol(name) => bindings
                .get(name)
                .copied()
                .ok_or_else(|| SymbolicError::UnboundSymbol { name: name.clone() }),
            Self::Add(terms) => terms
                .iter()
                .try_fold(Complex64::new(0.0, 0.0), |acc, term| Ok(acc + term.evaluate(bindings)?)),
            Self::Mul(factors) => factors
                .iter()
                .try_fold(Complex64::new(1.0, 0.0), |acc, factor| Ok(acc * factor.evaluate(bindings)?)),
            Self::Pow(base, exponent) => {
                let base = base.evaluate(bindings)?;
                let exponent = exponent.evaluate(bindings)?;
                Ok(complex_pow(base, exponent))
            }
            Self::Tanh(argument) => Ok(math::tanh(argument.evaluate(bindings)?)),
            Self::Coth(argument) => Ok(math::coth(argument.evaluate(bindings)?)),
        }
    }

    /// Evaluate an expression whose only free symbol is `symbol`.
    pub fn evaluate_at(&self, symbol: &str, value: f64) -> Result<Complex64, SymbolicError> {
        let mut bindings = HashMap::with_capacity(1);
        bindings.insert(symbol.to_string(), Complex64::new(value, 0.0));
        self.evaluate(&bindings)
    }

    /// Replace every occurrence of the symbol `name` with `value`.
    pub fn substitute(&self, name: &str, value: &Expr) -> Expr {
        match self {
            Self::Symbol(symbol) if symbol == name => value.clone(),
            Self::Number(_) | Self::Imaginary | Self::Symbol(_) => self.clone(),
            Self::Add(terms) => Self::Add(terms.iter().map(|t| t.substitute(name, value)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|f| f.substitute(name, value)).collect()),
            Self::Pow(base, exponent) => base
                .substitute(name, value)
                .pow(exponent.substitute(name, value)),
            Self::Tanh(argument) => argument.substitute(name, value).tanh(),
            Self::Coth(argument) => argument.substitute(name, value).coth(),
        }
    }

    /// Names of all symbols in the expression, sorted.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut symbols = BTreeSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols(&self, symbols: &mut BTreeSet<String>) {
        match self {
            Self::Symbol(name) => {
                symbols.insert(name.clone());
            }
            Self::Number(_) | Self::Imaginary => {}
            Self::Add(items) | Self::Mul(items) => {
                for item in items {
                    item.collect_symbols(symbols);
                }
            }
            Self::Pow(base, exponent) => {
                base.collect_symbols(symbols);
                exponent.collect_symbols(symbols);
            }
            Self::Tanh(argument) | Self::Coth(argument) => argument.collect_symbols(symbols),
        }
    }

    /// Whether this is the literal constant zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Number(value) if *value == 0.0)
    }

    fn is_atom(&self) -> bool {
        match self {
            Self::Number(value) => *value >= 0.0,
            Self::Imaginary | Self::Symbol(_) | Self::Tanh(_) | Self::Coth(_) => true,
            Self::Add(_) | Self::Mul(_) | Self::Pow(..) => false,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_atom() {
            write!(f, "{}", self)
        } else {
            write!(f, "({})", self)
        }
    }
}

/// Real exponents go through `powf` (and the exact `inv`/`sqrt` shortcuts)
/// so that results match the numeric element formulas.
fn complex_pow(base: Complex64, exponent: Complex64) -> Complex64 {
    if exponent.im != 0.0 {
        return base.powc(exponent);
    }
    if exponent.re == -1.0 {
        base.inv()
    } else if exponent.re == 0.5 {
        base.sqrt()
    } else if exponent.re == 1.0 {
        base
    } else {
        base.powf(exponent.re)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value),
            Self::Imaginary => write!(f, "j"),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{}", term)?;
                }
                Ok(())
            }
            Self::Mul(factors) => {
                for (i, factor) in factors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    factor.fmt_operand(f)?;
                }
                Ok(())
            }
            Self::Pow(base, exponent) => {
                if **exponent == Self::Number(-1.0) {
                    write!(f, "1/")?;
                    return base.fmt_operand(f);
                }
                base.fmt_operand(f)?;
                write!(f, "^")?;
                exponent.fmt_operand(f)
            }
            Self::Tanh(argument) => write!(f, "tanh({})", argument),
            Self::Coth(argument) => write!(f, "coth({})", argument),
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        let mut terms = match self {
            Self::Add(terms) => terms,
            other => vec![other],
        };
        match rhs {
            Self::Add(more) => terms.extend(more),
            other => terms.push(other),
        }
        Self::Add(terms)
    }
}

impl ops::Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        let mut factors = match self {
            Self::Mul(factors) => factors,
            other => vec![other],
        };
        match rhs {
            Self::Mul(more) => factors.extend(more),
            other => factors.push(other),
        }
        Self::Mul(factors)
    }
}

impl ops::Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        self * rhs.recip()
    }
}
