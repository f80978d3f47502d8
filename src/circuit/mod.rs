//! Circuit tree representation.
//!
//! A [`Circuit`] owns a root series [`Connection`] whose children are
//! elements and nested connections. Circuits come from the CDC parser or
//! from a [`CircuitBuilder`].

mod builder;
mod connection;
mod graph;
mod types;
mod validate;

pub use builder::CircuitBuilder;
pub use connection::Connection;
pub use graph::Circuit;
pub use types::*;
pub use validate::validate_connection;
