//! Programmatic circuit construction.

use std::ops::AddAssign;

use super::connection::Connection;
use super::graph::Circuit;
use super::types::{ConnectionKind, Node};
use crate::elements::Element;
use crate::error::BuilderError;

/// One open scope: the kind of connection being built and its children.
#[derive(Debug, Clone)]
struct Frame {
    kind: ConnectionKind,
    children: Vec<Node>,
}

impl Frame {
    fn new(kind: ConnectionKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    fn commit(self) -> Result<Connection, BuilderError> {
        Ok(Connection::new(self.kind, self.children)?)
    }
}

/// Builds a circuit from nested series and parallel scopes.
///
/// Connections are validated when their scope closes, never when children
/// are added.
///
/// ```
/// use cdc_core::{CircuitBuilder, Element, ElementKind};
///
/// let mut builder = CircuitBuilder::new();
/// builder += Element::new(ElementKind::Resistor);
/// builder
///     .parallel(|b| {
///         b.add(ElementKind::Capacitor.create());
///         b.add(ElementKind::Resistor.create());
///         Ok(())
///     })
///     .unwrap();
/// let circuit = builder.finish().unwrap();
/// assert_eq!(circuit.to_string(), "[R(CR)]");
/// ```
#[derive(Debug, Clone)]
pub struct CircuitBuilder {
    top: Frame,
    nested: Vec<Frame>,
}

impl CircuitBuilder {
    /// Create a builder whose outermost connection is a series.
    pub fn new() -> Self {
        Self::with_kind(ConnectionKind::Series)
    }

    /// Create a builder whose outermost connection is parallel.
    pub fn new_parallel() -> Self {
        Self::with_kind(ConnectionKind::Parallel)
    }

    fn with_kind(kind: ConnectionKind) -> Self {
        Self {
            top: Frame::new(kind),
            nested: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut Frame {
        self.nested.last_mut().unwrap_or(&mut self.top)
    }

    /// Number of nested scopes still open.
    pub fn depth(&self) -> usize {
        self.nested.len()
    }

    /// Add an element or connection to the innermost open scope.
    pub fn add(&mut self, node: impl Into<Node>) -> &mut Self {
        self.current().children.push(node.into());
        self
    }

    pub fn open_series(&mut self) -> &mut Self {
        self.nested.push(Frame::new(ConnectionKind::Series));
        self
    }

    pub fn open_parallel(&mut self) -> &mut Self {
        self.nested.push(Frame::new(ConnectionKind::Parallel));
        self
    }

    /// Close the innermost scope and add its connection to the parent.
    pub fn close(&mut self) -> Result<&mut Self, BuilderError> {
        let frame = self.nested.pop().ok_or(BuilderError::NoOpenScope)?;
        let connection = frame.commit()?;
        log::trace!("closed {} scope: {}", connection.kind(), connection);
        self.current().children.push(Node::Connection(connection));
        Ok(self)
    }

    /// Build a series connection inside `body`.
    ///
    /// The scope is popped when `body` returns, even when it fails.
    pub fn series<F>(&mut self, body: F) -> Result<&mut Self, BuilderError>
    where
        F: FnOnce(&mut Self) -> Result<(), BuilderError>,
    {
        self.scoped(ConnectionKind::Series, body)
    }

    /// Build a parallel connection inside `body`.
    ///
    /// The scope is popped when `body` returns, even when it fails.
    pub fn parallel<F>(&mut self, body: F) -> Result<&mut Self, BuilderError>
    where
        F: FnOnce(&mut Self) -> Result<(), BuilderError>,
    {
        self.scoped(ConnectionKind::Parallel, body)
    }

    fn scoped<F>(&mut self, kind: ConnectionKind, body: F) -> Result<&mut Self, BuilderError>
    where
        F: FnOnce(&mut Self) -> Result<(), BuilderError>,
    {
        let depth = self.nested.len();
        self.nested.push(Frame::new(kind));
        let outcome = body(self);

        // Drop anything the body left open, then our own frame.
        self.nested.truncate(depth + 1);
        let frame = self.nested.pop();
        outcome?;
        match frame {
            Some(frame) => {
                let connection = frame.commit()?;
                log::trace!("closed {} scope: {}", connection.kind(), connection);
                self.current().children.push(Node::Connection(connection));
                Ok(self)
            }
            None => Err(BuilderError::NoOpenScope),
        }
    }

    /// Validate the outermost connection and create the circuit.
    pub fn finish(self) -> Result<Circuit, BuilderError> {
        if !self.nested.is_empty() {
            return Err(BuilderError::UnclosedScopes {
                open: self.nested.len(),
            });
        }
        let circuit = Circuit::from_connection(self.top.commit()?);
        log::debug!(
            "built circuit {} with {} element(s)",
            circuit,
            circuit.flattened_elements().len()
        );
        Ok(circuit)
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AddAssign<Element> for CircuitBuilder {
    fn add_assign(&mut self, element: Element) {
        self.add(element);
    }
}

impl AddAssign<Connection> for CircuitBuilder {
    fn add_assign(&mut self, connection: Connection) {
        self.add(connection);
    }
}

impl AddAssign<Node> for CircuitBuilder {
    fn add_assign(&mut self, node: Node) {
        self.add(node);
    }
}
