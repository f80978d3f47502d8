//! Core types for the circuit tree.

use std::fmt;

use num_complex::Complex64;

use super::Connection;
use crate::elements::Element;

/// How the children of a connection combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// Impedances add
    Series,
    /// Admittances add
    Parallel,
}

impl ConnectionKind {
    /// Bracket pair used in CDC text.
    pub fn brackets(self) -> (char, char) {
        match self {
            ConnectionKind::Series => ('[', ']'),
            ConnectionKind::Parallel => ('(', ')'),
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Series => write!(f, "series"),
            ConnectionKind::Parallel => write!(f, "parallel"),
        }
    }
}

/// A child of a connection: a leaf element or a nested connection.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Connection(Connection),
}

impl Node {
    pub fn impedance(&self, frequency: f64) -> Complex64 {
        match self {
            Node::Element(element) => element.impedance(frequency),
            Node::Connection(connection) => connection.impedance(frequency),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Connection(_) => None,
        }
    }

    pub fn as_connection(&self) -> Option<&Connection> {
        match self {
            Node::Element(_) => None,
            Node::Connection(connection) => Some(connection),
        }
    }

    /// Borrowed view of this node.
    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Element(element) => NodeRef::Element(element),
            Node::Connection(connection) => NodeRef::Connection(connection),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Connection> for Node {
    fn from(connection: Connection) -> Self {
        Node::Connection(connection)
    }
}

/// Precision (`{:.N}`) is passed through to elements.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_node_ref(), f)
    }
}

/// A borrowed element or connection, as returned by tree queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Element(&'a Element),
    Connection(&'a Connection),
}

impl<'a> NodeRef<'a> {
    pub fn impedance(&self, frequency: f64) -> Complex64 {
        match self {
            NodeRef::Element(element) => element.impedance(frequency),
            NodeRef::Connection(connection) => connection.impedance(frequency),
        }
    }

    pub fn as_element(&self) -> Option<&'a Element> {
        match *self {
            NodeRef::Element(element) => Some(element),
            NodeRef::Connection(_) => None,
        }
    }

    pub fn as_connection(&self) -> Option<&'a Connection> {
        match *self {
            NodeRef::Element(_) => None,
            NodeRef::Connection(connection) => Some(connection),
        }
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, f.precision()) {
            (NodeRef::Element(element), Some(decimals)) => write!(f, "{:.*}", decimals, element),
            (NodeRef::Element(element), None) => write!(f, "{}", element),
            (NodeRef::Connection(connection), Some(decimals)) => {
                write!(f, "{:.*}", decimals, connection)
            }
            (NodeRef::Connection(connection), None) => write!(f, "{}", connection),
        }
    }
}
