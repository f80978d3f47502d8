//! Connection validation.

use super::{ConnectionKind, Node};
use crate::error::ConnectionError;

/// Validate the raw children of a connection before flattening.
///
/// Checks:
/// - Any connection needs at least one child
/// - A parallel connection needs at least two branches
pub fn validate_connection(kind: ConnectionKind, children: &[Node]) -> Result<(), ConnectionError> {
    if children.is_empty() {
        return Err(ConnectionError::Empty { kind });
    }

    if kind == ConnectionKind::Parallel && children.len() < 2 {
        return Err(ConnectionError::InsufficientBranches {
            count: children.len(),
        });
    }

    Ok(())
}
