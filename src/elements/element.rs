//! Element instances: identifier, label and validated parameters.

use std::fmt;

use num_complex::Complex64;

use super::{ElementDefinition, ElementKind};
use crate::cdc::format_value;
use crate::error::ElementError;
use crate::symbolic::{Expr, SymbolicConfig};

/// Current state of one element parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: &'static str,
    pub value: f64,
    /// Held constant by fitting routines. Recorded only.
    pub fixed: bool,
    pub lower: f64,
    pub upper: f64,
}

/// A circuit element.
///
/// Parameter values, limits, fixed flags and the label can be changed through
/// validated setters. The identifier is assigned once, by the circuit that
/// takes ownership of the element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    kind: ElementKind,
    identifier: Option<u32>,
    label: Option<String>,
    parameters: Vec<Parameter>,
}

impl Element {
    /// Create an element with the kind's default parameters.
    pub fn new(kind: ElementKind) -> Self {
        let parameters = kind
            .definition()
            .parameters
            .iter()
            .map(|def| Parameter {
                name: def.name,
                value: def.default,
                fixed: def.fixed,
                lower: def.lower,
                upper: def.upper,
            })
            .collect();
        Self {
            kind,
            identifier: None,
            label: None,
            parameters,
        }
    }

    /// Create an element and set the given parameter values.
    pub fn with_values(kind: ElementKind, values: &[(&str, f64)]) -> Result<Self, ElementError> {
        let mut element = Self::new(kind);
        for &(name, value) in values {
            element.set_value(name, value)?;
        }
        Ok(element)
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn definition(&self) -> &'static ElementDefinition {
        self.kind.definition()
    }

    pub fn get_symbol(&self) -> &'static str {
        self.kind.symbol()
    }

    pub fn get_description(&self) -> &'static str {
        self.definition().description
    }

    pub fn get_extended_description(&self) -> &'static str {
        self.definition().extended_description
    }

    // ============ Identifier and label ============

    /// The assigned identifier, or -1 while unassigned.
    pub fn get_identifier(&self) -> i64 {
        self.identifier.map_or(-1, i64::from)
    }

    pub fn has_identifier(&self) -> bool {
        self.identifier.is_some()
    }

    /// Assign the identifier. Succeeds only once.
    pub(crate) fn assign_identifier(&mut self, identifier: i64) -> Result<(), ElementError> {
        if let Some(current) = self.identifier {
            return Err(ElementError::IdentifierAlreadyAssigned {
                symbol: self.get_symbol().to_string(),
                current,
            });
        }
        let identifier =
            u32::try_from(identifier).map_err(|_| ElementError::InvalidIdentifier { identifier })?;
        self.identifier = Some(identifier);
        Ok(())
    }

    /// `symbol`, or `symbol_<identifier>` once an identifier is assigned.
    pub fn get_default_label(&self) -> String {
        match self.identifier {
            Some(identifier) => format!("{}_{}", self.get_symbol(), identifier),
            None => self.get_symbol().to_string(),
        }
    }

    /// `symbol_<label>` if a custom label is set, otherwise the default label.
    pub fn get_label(&self) -> String {
        match &self.label {
            Some(label) => format!("{}_{}", self.get_symbol(), label),
            None => self.get_default_label(),
        }
    }

    /// The custom label suffix, if any.
    pub fn custom_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set the label suffix. An empty label restores the default.
    pub fn set_label(&mut self, label: &str) -> Result<&mut Self, ElementError> {
        if label.contains(|c| c == '{' || c == '}') || label.trim() != label {
            return Err(ElementError::InvalidLabel {
                label: label.to_string(),
            });
        }
        self.label = (!label.is_empty()).then(|| label.to_string());
        Ok(self)
    }

    // ============ Parameters ============

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Parameter names and current values, in definition order.
    pub fn get_parameters(&self) -> Vec<(&'static str, f64)> {
        self.parameters.iter().map(|p| (p.name, p.value)).collect()
    }

    pub fn get_defaults(&self) -> Vec<(&'static str, f64)> {
        self.definition().parameters.iter().map(|p| (p.name, p.default)).collect()
    }

    pub fn get_default_fixed(&self) -> Vec<(&'static str, bool)> {
        self.definition().parameters.iter().map(|p| (p.name, p.fixed)).collect()
    }

    pub fn get_default_lower_limits(&self) -> Vec<(&'static str, f64)> {
        self.definition().parameters.iter().map(|p| (p.name, p.lower)).collect()
    }

    pub fn get_default_upper_limits(&self) -> Vec<(&'static str, f64)> {
        self.definition().parameters.iter().map(|p| (p.name, p.upper)).collect()
    }

    pub fn parameter(&self, name: &str) -> Result<&Parameter, ElementError> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| self.unknown_parameter(name))
    }

    fn parameter_mut(&mut self, name: &str) -> Result<&mut Parameter, ElementError> {
        let symbol = self.get_symbol();
        self.parameters
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| ElementError::UnknownParameter {
                symbol: symbol.to_string(),
                name: name.to_string(),
            })
    }

    fn unknown_parameter(&self, name: &str) -> ElementError {
        ElementError::UnknownParameter {
            symbol: self.get_symbol().to_string(),
            name: name.to_string(),
        }
    }

    pub fn get_value(&self, name: &str) -> Result<f64, ElementError> {
        self.parameter(name).map(|p| p.value)
    }

    pub fn is_fixed(&self, name: &str) -> Result<bool, ElementError> {
        self.parameter(name).map(|p| p.fixed)
    }

    pub fn get_lower_limit(&self, name: &str) -> Result<f64, ElementError> {
        self.parameter(name).map(|p| p.lower)
    }

    pub fn get_upper_limit(&self, name: &str) -> Result<f64, ElementError> {
        self.parameter(name).map(|p| p.upper)
    }

    /// Set a value, checked against the current limits.
    pub fn set_value(&mut self, name: &str, value: f64) -> Result<&mut Self, ElementError> {
        let parameter = self.parameter_mut(name)?;
        check_range(name, value, parameter.lower, parameter.upper)?;
        parameter.value = value;
        Ok(self)
    }

    pub fn set_fixed(&mut self, name: &str, fixed: bool) -> Result<&mut Self, ElementError> {
        self.parameter_mut(name)?.fixed = fixed;
        Ok(self)
    }

    /// Set the lower limit, checked against the current value.
    pub fn set_lower_limit(&mut self, name: &str, lower: f64) -> Result<&mut Self, ElementError> {
        let parameter = self.parameter_mut(name)?;
        check_range(name, parameter.value, lower, parameter.upper)?;
        parameter.lower = lower;
        Ok(self)
    }

    /// Set the upper limit, checked against the current value.
    pub fn set_upper_limit(&mut self, name: &str, upper: f64) -> Result<&mut Self, ElementError> {
        let parameter = self.parameter_mut(name)?;
        check_range(name, parameter.value, parameter.lower, upper)?;
        parameter.upper = upper;
        Ok(self)
    }

    /// Replace value, limits and fixed flag of one parameter at once.
    pub fn set_parameter(
        &mut self,
        name: &str,
        value: f64,
        lower: f64,
        upper: f64,
        fixed: bool,
    ) -> Result<&mut Self, ElementError> {
        let parameter = self.parameter_mut(name)?;
        check_range(name, value, lower, upper)?;
        *parameter = Parameter {
            name: parameter.name,
            value,
            fixed,
            lower,
            upper,
        };
        Ok(self)
    }

    // ============ Evaluation ============

    pub fn impedance(&self, frequency: f64) -> Complex64 {
        let values: Vec<f64> = self.parameters.iter().map(|p| p.value).collect();
        self.kind.impedance(&values, frequency)
    }

    pub fn impedances(&self, frequencies: &[f64]) -> Vec<Complex64> {
        frequencies.iter().map(|&f| self.impedance(f)).collect()
    }

    /// Symbol used for a parameter in unsubstituted expressions, e.g. `n_Q_1`.
    pub fn parameter_symbol(&self, name: &str) -> String {
        format!("{}_{}", name, self.get_label())
    }

    pub fn to_symbolic(&self, config: &SymbolicConfig) -> Expr {
        let parameters: Vec<Expr> = self
            .parameters
            .iter()
            .map(|p| {
                if config.substitute {
                    Expr::number(p.value)
                } else {
                    Expr::symbol(self.parameter_symbol(p.name))
                }
            })
            .collect();
        self.kind.expression(&parameters, config.jw())
    }
}

impl From<ElementKind> for Element {
    fn from(kind: ElementKind) -> Self {
        Self::new(kind)
    }
}

fn check_range(name: &str, value: f64, lower: f64, upper: f64) -> Result<(), ElementError> {
    if value.is_nan() || lower.is_nan() || upper.is_nan() {
        return Err(ElementError::InvalidValue {
            name: name.to_string(),
            value: f64::NAN,
        });
    }
    if lower > upper {
        return Err(ElementError::LimitOrder {
            name: name.to_string(),
            lower,
            upper,
        });
    }
    if lower > value {
        return Err(ElementError::LowerLimit {
            name: name.to_string(),
            value,
            lower,
        });
    }
    if upper < value {
        return Err(ElementError::UpperLimit {
            name: name.to_string(),
            value,
            upper,
        });
    }
    Ok(())
}

/// Without a precision only the symbol is written. With `{:.N}` the
/// parameter block is written with `N` decimals:
/// `R{R=8.3E+01/2.0E+01/9.6E+01:test}`.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get_symbol())?;
        let Some(decimals) = f.precision() else {
            return Ok(());
        };

        f.write_str("{")?;
        for (i, (parameter, def)) in self.parameters.iter().zip(self.definition().parameters).enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", parameter.name, format_value(parameter.value, decimals))?;

            let lower = format_value(parameter.lower, decimals);
            let upper = format_value(parameter.upper, decimals);
            let lower_changed = lower != format_value(def.lower, decimals);
            let upper_changed = upper != format_value(def.upper, decimals);
            if lower_changed || upper_changed {
                f.write_str("/")?;
                if lower_changed {
                    f.write_str(&lower)?;
                }
                if upper_changed {
                    write!(f, "/{}", upper)?;
                }
            }

            if parameter.fixed {
                f.write_str("F")?;
            }
        }
        if let Some(label) = &self.label {
            write!(f, ":{}", label)?;
        }
        f.write_str("}")
    }
}
