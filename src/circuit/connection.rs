//! Series and parallel connections.

use std::fmt;

use num_complex::Complex64;

use super::types::{ConnectionKind, Node, NodeRef};
use super::validate::validate_connection;
use crate::elements::Element;
use crate::error::ConnectionError;

/// A series or parallel connection of elements and nested connections.
///
/// Connections are validated and flattened when they are created: a child
/// connection of the same kind is spliced into its parent, so `[R[LC]]`
/// holds three elements and `(R(LC))` three branches.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    kind: ConnectionKind,
    children: Vec<Node>,
}

impl Connection {
    /// Create a connection from raw children.
    ///
    /// The child count is checked before flattening.
    pub fn new(kind: ConnectionKind, children: Vec<Node>) -> Result<Self, ConnectionError> {
        validate_connection(kind, &children)?;

        let mut flattened = Vec::with_capacity(children.len());
        for child in children {
            match child {
                Node::Connection(nested) if nested.kind == kind => flattened.extend(nested.children),
                other => flattened.push(other),
            }
        }

        Ok(Self {
            kind,
            children: flattened,
        })
    }

    pub fn series(children: Vec<Node>) -> Result<Self, ConnectionError> {
        Self::new(ConnectionKind::Series, children)
    }

    pub fn parallel(children: Vec<Node>) -> Result<Self, ConnectionError> {
        Self::new(ConnectionKind::Parallel, children)
    }

    /// A one-child series around `inner`, skipping validation.
    pub(crate) fn wrap_in_series(inner: Connection) -> Self {
        Self {
            kind: ConnectionKind::Series,
            children: vec![Node::Connection(inner)],
        }
    }

    pub fn kind(&self) -> ConnectionKind {
        self.kind
    }

    pub fn is_series(&self) -> bool {
        self.kind == ConnectionKind::Series
    }

    pub fn is_parallel(&self) -> bool {
        self.kind == ConnectionKind::Parallel
    }

    /// Immediate children, in order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    // ============ Evaluation ============

    /// Complex impedance at `frequency` (Hz).
    pub fn impedance(&self, frequency: f64) -> Complex64 {
        let impedances = self.children.iter().map(|child| child.impedance(frequency));
        let zero = Complex64::new(0.0, 0.0);
        match self.kind {
            ConnectionKind::Series => impedances.sum(),
            ConnectionKind::Parallel => {
                let mut admittance = zero;
                for z in impedances {
                    // A zero-impedance branch shorts the connection.
                    if z == zero {
                        return zero;
                    }
                    admittance += z.inv();
                }
                admittance.inv()
            }
        }
    }

    pub fn impedances(&self, frequencies: &[f64]) -> Vec<Complex64> {
        frequencies.iter().map(|&f| self.impedance(f)).collect()
    }

    // ============ Queries ============

    /// Elements of this connection.
    ///
    /// Flattened, every leaf element in left-to-right order. Otherwise the
    /// immediate children, with nested connections as opaque nodes.
    pub fn get_elements(&self, flattened: bool) -> Vec<NodeRef<'_>> {
        if flattened {
            self.flattened_elements().into_iter().map(NodeRef::Element).collect()
        } else {
            self.children.iter().map(Node::as_node_ref).collect()
        }
    }

    /// Every leaf element in left-to-right order.
    pub fn flattened_elements(&self) -> Vec<&Element> {
        let mut elements = Vec::new();
        self.collect_elements(&mut elements);
        elements
    }

    fn collect_elements<'a>(&'a self, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            match child {
                Node::Element(element) => out.push(element),
                Node::Connection(connection) => connection.collect_elements(out),
            }
        }
    }

    /// Every leaf element in left-to-right order, mutably.
    pub fn elements_mut(&mut self) -> Vec<&mut Element> {
        let mut elements = Vec::new();
        self.collect_elements_mut(&mut elements);
        elements
    }

    fn collect_elements_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Element>) {
        for child in &mut self.children {
            match child {
                Node::Element(element) => out.push(element),
                Node::Connection(connection) => connection.collect_elements_mut(out),
            }
        }
    }

    /// The element at `index` in flattened order.
    pub fn get_element(&self, index: usize) -> Option<&Element> {
        self.flattened_elements().into_iter().nth(index)
    }

    pub fn get_element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements_mut().into_iter().nth(index)
    }

    /// Nested connections, excluding `self`.
    ///
    /// Flattened, all descendants in pre-order. Otherwise only the
    /// immediate child connections.
    pub fn get_connections(&self, flattened: bool) -> Vec<&Connection> {
        let mut connections = Vec::new();
        for child in &self.children {
            if let Node::Connection(connection) = child {
                connections.push(connection);
                if flattened {
                    connections.extend(connection.get_connections(true));
                }
            }
        }
        connections
    }

    /// The descendant connection at `index` in pre-order.
    pub fn get_connection(&self, index: usize) -> Option<&Connection> {
        self.get_connections(true).into_iter().nth(index)
    }

    pub fn get_connection_mut(&mut self, index: usize) -> Option<&mut Connection> {
        let mut remaining = index;
        self.nth_connection_mut(&mut remaining)
    }

    fn nth_connection_mut(&mut self, remaining: &mut usize) -> Option<&mut Connection> {
        for child in &mut self.children {
            if let Node::Connection(connection) = child {
                if *remaining == 0 {
                    return Some(connection);
                }
                *remaining -= 1;

                let nested = connection.connection_count();
                if *remaining < nested {
                    return connection.nth_connection_mut(remaining);
                }
                *remaining -= nested;
            }
        }
        None
    }

    fn connection_count(&self) -> usize {
        self.children
            .iter()
            .filter_map(Node::as_connection)
            .map(|c| 1 + c.connection_count())
            .sum()
    }
}

/// Writes `[...]` for series and `(...)` for parallel. Precision (`{:.N}`)
/// is passed through to elements.
impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = self.kind.brackets();
        write!(f, "{}", open)?;
        for child in &self.children {
            match f.precision() {
                Some(decimals) => write!(f, "{:.*}", decimals, child)?,
                None => write!(f, "{}", child)?,
            }
        }
        write!(f, "{}", close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ElementKind;
    use approx::assert_relative_eq;

    fn resistor(ohms: f64) -> Node {
        Node::Element(Element::with_values(ElementKind::Resistor, &[("R", ohms)]).unwrap())
    }

    fn element(kind: ElementKind) -> Node {
        Node::Element(Element::new(kind))
    }

    #[test]
    fn test_series_and_parallel_identities() {
        let series = Connection::series(vec![resistor(250.0), resistor(500.0)]).unwrap();
        assert_relative_eq!(series.impedance(1.0).re, 750.0);
        assert_relative_eq!(series.impedance(1.0).im, 0.0);

        let parallel = Connection::parallel(vec![resistor(250.0), resistor(500.0)]).unwrap();
        assert_relative_eq!(parallel.impedance(1.0).re, 1.0 / (1.0 / 250.0 + 1.0 / 500.0));
    }

    #[test]
    fn test_parallel_short_circuit() {
        let shorted = Connection::parallel(vec![resistor(0.0), element(ElementKind::Capacitor)]).unwrap();
        for f in [1e-5, 1.0, 1e5] {
            let z = shorted.impedance(f);
            assert_eq!(z, Complex64::new(0.0, 0.0));
        }

        let nested = Connection::series(vec![resistor(5.0), shorted.into()]).unwrap();
        assert_relative_eq!(nested.impedance(1.0).re, 5.0);
        assert!(nested.impedance(1.0).im.abs() < 1e-15);
    }

    #[test]
    fn test_flatten_same_kind() {
        let inner = Connection::series(vec![element(ElementKind::Inductor)]).unwrap();
        let outer = Connection::series(vec![element(ElementKind::Resistor), inner.into()]).unwrap();
        assert_eq!(outer.children().len(), 2);
        assert!(outer.children().iter().all(|c| c.as_element().is_some()));

        let inner = Connection::parallel(vec![
            element(ElementKind::Inductor),
            element(ElementKind::Capacitor),
        ])
        .unwrap();
        let outer = Connection::parallel(vec![element(ElementKind::Resistor), inner.into()]).unwrap();
        assert_eq!(outer.to_string(), "(RLC)");
    }

    #[test]
    fn test_other_kind_stays_nested() {
        let inner = Connection::series(vec![
            element(ElementKind::Inductor),
            element(ElementKind::ConstantPhaseElement),
        ])
        .unwrap();
        let outer = Connection::parallel(vec![
            element(ElementKind::Resistor),
            inner.into(),
            element(ElementKind::Capacitor),
        ])
        .unwrap();
        assert_eq!(outer.to_string(), "(R[LQ]C)");
        assert_eq!(outer.get_connections(false).len(), 1);
    }

    #[test]
    fn test_count_checked_before_flatten() {
        // A single parallel child fails even though flattening would give two.
        let inner = Connection::parallel(vec![resistor(1.0), resistor(2.0)]).unwrap();
        assert_eq!(
            Connection::parallel(vec![inner.into()]),
            Err(ConnectionError::InsufficientBranches { count: 1 })
        );
        assert_eq!(
            Connection::series(vec![]),
            Err(ConnectionError::Empty {
                kind: ConnectionKind::Series
            })
        );
    }

    #[test]
    fn test_connection_queries() {
        // R(C[W(LQ)])G
        let lq = Connection::parallel(vec![
            element(ElementKind::Inductor),
            element(ElementKind::ConstantPhaseElement),
        ])
        .unwrap();
        let wlq = Connection::series(vec![element(ElementKind::Warburg), lq.into()]).unwrap();
        let cwlq = Connection::parallel(vec![element(ElementKind::Capacitor), wlq.into()]).unwrap();
        let mut root = Connection::series(vec![
            element(ElementKind::Resistor),
            cwlq.into(),
            element(ElementKind::Gerischer),
        ])
        .unwrap();

        assert_eq!(root.get_elements(false).len(), 3);
        assert_eq!(root.get_elements(true).len(), 6);
        assert_eq!(root.get_connections(false).len(), 1);

        let all: Vec<String> = root.get_connections(true).iter().map(|c| c.to_string()).collect();
        assert_eq!(all, vec!["(C[W(LQ)])", "[W(LQ)]", "(LQ)"]);

        assert_eq!(root.get_connection(2).unwrap().to_string(), "(LQ)");
        assert!(root.get_connection(3).is_none());
        assert_eq!(root.get_connection_mut(1).unwrap().to_string(), "[W(LQ)]");
        assert_eq!(root.get_connection_mut(2).unwrap().to_string(), "(LQ)");
        assert!(root.get_connection_mut(3).is_none());

        let symbols: Vec<&str> = root.flattened_elements().iter().map(|e| e.get_symbol()).collect();
        assert_eq!(symbols, vec!["R", "C", "W", "L", "Q", "G"]);
        assert_eq!(root.get_element(3).unwrap().get_symbol(), "L");

        root.get_element_mut(0).unwrap().set_value("R", 42.0).unwrap();
        assert_eq!(root.get_element(0).unwrap().get_value("R").unwrap(), 42.0);
    }

    #[test]
    fn test_display_with_precision() {
        let connection = Connection::parallel(vec![resistor(83.0), element(ElementKind::Capacitor)]).unwrap();
        assert_eq!(format!("{}", connection), "(RC)");
        assert_eq!(format!("{:.1}", connection), "(R{R=8.3E+01}C{C=1.0E-06})");
    }
}
