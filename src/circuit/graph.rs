//! Circuit facade over the connection tree.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;

use super::connection::Connection;
use super::types::{ConnectionKind, Node, NodeRef};
use crate::elements::{Element, ElementKind};
use crate::error::ParsingError;
use crate::symbolic::{Expr, SymbolicConfig};

/// A complete equivalent circuit.
///
/// The root is always a series connection. The tree structure is fixed once
/// the circuit exists; element parameters stay mutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    root: Connection,
}

impl Circuit {
    /// Build a circuit around a connection and assign element identifiers.
    ///
    /// A parallel root is wrapped in a one-child series. Identifiers are
    /// counted per element kind from 1 in flattened order, continuing after
    /// the highest identifier already present for that kind.
    pub fn from_connection(root: Connection) -> Self {
        let root = match root.kind() {
            ConnectionKind::Series => root,
            ConnectionKind::Parallel => Connection::wrap_in_series(root),
        };
        let mut circuit = Self { root };
        circuit.assign_identifiers();
        circuit
    }

    fn assign_identifiers(&mut self) {
        let mut counters: BTreeMap<ElementKind, u32> = BTreeMap::new();
        for element in self.root.flattened_elements() {
            if let Ok(identifier) = u32::try_from(element.get_identifier()) {
                let counter = counters.entry(element.kind()).or_insert(0);
                *counter = (*counter).max(identifier);
            }
        }

        for element in self.root.elements_mut() {
            if element.has_identifier() {
                continue;
            }
            let counter = counters.entry(element.kind()).or_insert(0);
            let Some(identifier) = next_identifier(counter) else {
                log::warn!("identifiers for '{}' exhausted, element left unnumbered", element.get_symbol());
                continue;
            };
            if let Err(e) = element.assign_identifier(i64::from(identifier)) {
                log::warn!("could not number element: {}", e);
            }
        }
    }

    /// The root series connection.
    pub fn root(&self) -> &Connection {
        &self.root
    }

    // ============ Evaluation ============

    /// Complex impedance at `frequency` (Hz).
    pub fn impedance(&self, frequency: f64) -> Complex64 {
        self.root.impedance(frequency)
    }

    pub fn impedances(&self, frequencies: &[f64]) -> Vec<Complex64> {
        self.root.impedances(frequencies)
    }

    /// Impedance expression in the frequency symbol `f`.
    ///
    /// With `substitute`, parameters are replaced by their values; otherwise
    /// each parameter is the symbol `<name>_<label>`, e.g. `R_R_1`.
    pub fn to_symbolic(&self, substitute: bool) -> Expr {
        self.to_symbolic_with(&SymbolicConfig::new().with_substitution(substitute))
    }

    pub fn to_symbolic_with(&self, config: &SymbolicConfig) -> Expr {
        symbolic_connection(&self.root, config)
    }

    /// Current parameter values keyed by their symbol names.
    ///
    /// These are the bindings that turn an unsubstituted expression back into
    /// a function of frequency alone.
    pub fn symbol_values(&self) -> BTreeMap<String, f64> {
        self.root
            .flattened_elements()
            .into_iter()
            .flat_map(|element| {
                element
                    .parameters()
                    .iter()
                    .map(move |p| (element.parameter_symbol(p.name), p.value))
            })
            .collect()
    }

    // ============ Queries ============

    /// Elements of the circuit.
    ///
    /// Flattened, every leaf element. Otherwise the root series itself.
    pub fn get_elements(&self, flattened: bool) -> Vec<NodeRef<'_>> {
        if flattened {
            self.root.get_elements(true)
        } else {
            vec![NodeRef::Connection(&self.root)]
        }
    }

    /// Every leaf element in left-to-right order.
    pub fn flattened_elements(&self) -> Vec<&Element> {
        self.root.flattened_elements()
    }

    pub fn elements_mut(&mut self) -> Vec<&mut Element> {
        self.root.elements_mut()
    }

    pub fn get_element(&self, index: usize) -> Option<&Element> {
        self.root.get_element(index)
    }

    pub fn get_element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.root.get_element_mut(index)
    }

    /// Connections of the circuit, starting with the root.
    ///
    /// Flattened, the root followed by all descendants in pre-order.
    /// Otherwise only the root.
    pub fn get_connections(&self, flattened: bool) -> Vec<&Connection> {
        let mut connections = vec![&self.root];
        if flattened {
            connections.extend(self.root.get_connections(true));
        }
        connections
    }

    /// The connection at `index`, where 0 is the root.
    pub fn get_connection(&self, index: usize) -> Option<&Connection> {
        match index {
            0 => Some(&self.root),
            _ => self.root.get_connection(index - 1),
        }
    }

    pub fn get_connection_mut(&mut self, index: usize) -> Option<&mut Connection> {
        match index {
            0 => Some(&mut self.root),
            _ => self.root.get_connection_mut(index - 1),
        }
    }

    // ============ Serialization ============

    /// Canonical CDC text, with parameter blocks when `decimals` is given.
    pub fn to_cdc(&self, decimals: Option<usize>) -> String {
        match decimals {
            Some(decimals) => format!("{:.*}", decimals, self),
            None => self.to_string(),
        }
    }
}

/// Advance a per-kind counter; `None` once it cannot go any higher.
fn next_identifier(counter: &mut u32) -> Option<u32> {
    *counter = counter.checked_add(1)?;
    Some(*counter)
}

fn symbolic_connection(connection: &Connection, config: &SymbolicConfig) -> Expr {
    let terms: Vec<Expr> = connection
        .children()
        .iter()
        .map(|child| match child {
            Node::Element(element) => element.to_symbolic(config),
            Node::Connection(nested) => symbolic_connection(nested, config),
        })
        .collect();
    match connection.kind() {
        ConnectionKind::Series => Expr::Add(terms),
        // A literal zero branch shorts the whole connection.
        ConnectionKind::Parallel if terms.iter().any(Expr::is_zero) => Expr::Number(0.0),
        ConnectionKind::Parallel => Expr::Add(terms.into_iter().map(Expr::recip).collect()).recip(),
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl FromStr for Circuit {
    type Err = ParsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::cdc::parse(s)
    }
}

impl From<Connection> for Circuit {
    fn from(root: Connection) -> Self {
        Self::from_connection(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn element(kind: ElementKind) -> Node {
        Node::Element(Element::new(kind))
    }

    #[test]
    fn test_parallel_root_is_wrapped() {
        let root = Connection::parallel(vec![element(ElementKind::Resistor), element(ElementKind::Capacitor)])
            .unwrap();
        let circuit = Circuit::from_connection(root);
        assert!(circuit.root().is_series());
        assert_eq!(circuit.to_string(), "[(RC)]");
        assert_eq!(circuit.get_connections(true).len(), 2);
    }

    #[test]
    fn test_identifiers_per_kind() {
        let circuit: Circuit = "R(RC)(RW)C".parse().unwrap();
        let labels: Vec<String> = circuit.flattened_elements().iter().map(|e| e.get_label()).collect();
        assert_eq!(labels, vec!["R_1", "R_2", "C_1", "R_3", "W_1", "C_2"]);
    }

    #[test]
    fn test_identifiers_continue_after_existing() {
        let source: Circuit = "RR".parse().unwrap();
        let second = source.get_element(1).unwrap().clone();
        let root = Connection::series(vec![
            Node::Element(second),
            element(ElementKind::Resistor),
            element(ElementKind::Capacitor),
        ])
        .unwrap();
        let circuit = Circuit::from_connection(root);
        let ids: Vec<i64> = circuit.flattened_elements().iter().map(|e| e.get_identifier()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_symbolic_matches_numeric() {
        let circuit: Circuit = "R(CR)W".parse().unwrap();
        let substituted = circuit.to_symbolic(true);
        assert_eq!(substituted.free_symbols().into_iter().collect::<Vec<_>>(), vec!["f"]);

        let symbolic = circuit.to_symbolic(false);
        assert!(symbolic.free_symbols().contains("R_R_1"));
        assert!(symbolic.free_symbols().contains("Y_W_1"));

        let bindings = circuit.symbol_values();
        assert_eq!(bindings["R_R_2"], 1.0e3);

        for f in [1e-5, 1.0, 1e5] {
            let numeric = circuit.impedance(f);
            let z = substituted.evaluate_at("f", f).unwrap();
            assert_relative_eq!(z.re, numeric.re, max_relative = 1e-9);
            assert_relative_eq!(z.im, numeric.im, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_identifier_counter_saturates() {
        let mut counter = 7;
        assert_eq!(next_identifier(&mut counter), Some(8));
        assert_eq!(counter, 8);

        let mut counter = u32::MAX;
        assert_eq!(next_identifier(&mut counter), None);
        assert_eq!(counter, u32::MAX);
    }

    #[test]
    fn test_zero_branch_shorts_parallel() {
        let circuit: Circuit = "R{R=5}(R{R=0}C)".parse().unwrap();
        let expr = circuit.to_symbolic(true);
        for f in [1e-5, 1.0, 1e5] {
            let numeric = circuit.impedance(f);
            assert_relative_eq!(numeric.re, 5.0);
            let z = expr.evaluate_at("f", f).unwrap();
            assert_relative_eq!(z.re, 5.0);
            assert!(z.im.abs() < 1e-12);
        }
    }

    #[test]
    fn test_to_cdc() {
        let mut circuit: Circuit = "RC".parse().unwrap();
        circuit.get_element_mut(0).unwrap().set_value("R", 83.0).unwrap();
        circuit.get_element_mut(1).unwrap().set_fixed("C", true).unwrap();
        assert_eq!(circuit.to_cdc(None), "[RC]");
        assert_eq!(circuit.to_cdc(Some(1)), "[R{R=8.3E+01}C{C=1.0E-06F}]");
    }
}
