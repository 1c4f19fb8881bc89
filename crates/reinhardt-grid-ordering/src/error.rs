//! Ordering error types.

use crate::position::Relation;
use thiserror::Error;

/// Result type for ordering operations.
pub type OrderingResult<T> = Result<T, OrderingError>;

/// Structural errors raised while computing a column order.
///
/// All of them abort view production for the whole grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OrderingError {
	/// A chain of before/after declarations loops back on itself.
	#[error("circular ordering detected: {}", .cycle.join(" -> "))]
	CircularReference {
		/// Keys along the cycle, starting and ending with the same key.
		cycle: Vec<String>,
	},

	/// Two entries place themselves on opposite sides of each other.
	#[error(
		"conflicting positions: '{key}' is placed {relation} '{target}' while '{target}' is placed {} '{key}'",
		.relation.opposite()
	)]
	SymmetricConflict {
		/// Entry whose declaration exposed the conflict.
		key: String,
		/// The entry it references.
		target: String,
		/// Relation declared by `key`.
		relation: Relation,
	},

	/// The position declaration has an unsupported shape.
	#[error("invalid position for '{key}': {reason}")]
	InvalidPosition {
		/// Entry carrying the declaration.
		key: String,
		/// What was wrong with it.
		reason: String,
	},

	/// A before/after target never appeared among the entries.
	#[error("'{key}' is positioned {relation} '{target}', which does not exist")]
	UnresolvedTarget {
		/// Entry that could not be placed.
		key: String,
		/// The missing target.
		target: String,
		/// Declared relation.
		relation: Relation,
	},

	/// The same key was supplied twice.
	#[error("duplicate key '{0}' in ordering input")]
	DuplicateKey(String),
}
