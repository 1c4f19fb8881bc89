//! Error types for grid composition.
//!
//! Every error here is unrecoverable at the point of detection: it bubbles
//! up to whoever asked for the grid (usually a request handler).

use reinhardt_grid_ordering::OrderingError;
use thiserror::Error;

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Option resolution failures.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum OptionError {
	/// The raw input carried a key no type in the chain declared.
	#[error("option '{name}' does not exist. Defined options are: {}", .defined.join(", "))]
	UndefinedOption {
		/// The unknown key.
		name: String,
		/// Every declared option, sorted.
		defined: Vec<String>,
	},

	/// A required option was neither supplied nor defaulted.
	#[error("required option '{0}' is missing")]
	MissingRequired(String),

	/// The value failed an allowed-type declaration.
	#[error("option '{name}' expects a value of type {expected}, got {actual}")]
	InvalidType {
		/// Option name.
		name: String,
		/// Accepted kinds, joined with `|`.
		expected: String,
		/// Kind of the supplied value.
		actual: String,
	},

	/// The value failed an allowed-value declaration.
	#[error("option '{name}' has an invalid value {value}: {reason}")]
	InvalidValue {
		/// Option name.
		name: String,
		/// The rejected value, JSON encoded.
		value: String,
		/// Which constraint rejected it.
		reason: String,
	},

	/// A normalizer refused the value.
	#[error("option '{name}' could not be normalized: {message}")]
	Normalization {
		/// Option name.
		name: String,
		/// Domain message from the normalizer.
		message: String,
	},

	/// Raw options were not a JSON object.
	#[error("options must be an object or null, got {0}")]
	InvalidInput(String),
}

/// Type lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TypeResolutionError {
	/// Nothing is registered under the identifier.
	#[error("could not load {kind} type '{name}'")]
	NotFound {
		/// Kind that was asked for.
		kind: &'static str,
		/// Requested identifier.
		name: String,
	},

	/// The identifier exists but belongs to another kind.
	#[error("type '{name}' is a {found} type, expected a {expected} type")]
	KindMismatch {
		/// Requested identifier.
		name: String,
		/// Kind that was asked for.
		expected: &'static str,
		/// Kind it was registered as.
		found: &'static str,
	},

	/// The parent chain is deeper than [`crate::registry::MAX_TYPE_DEPTH`].
	#[error("{kind} type '{name}' has a parent chain deeper than {limit} levels")]
	ChainTooDeep {
		/// Kind of the chain.
		kind: &'static str,
		/// Leaf type identifier.
		name: String,
		/// The depth limit.
		limit: usize,
	},

	/// An extension targets a type that cannot be resolved.
	#[error("extension targets unknown {kind} type '{name}'")]
	UnknownExtensionTarget {
		/// Kind of the extension.
		kind: &'static str,
		/// Target identifier.
		name: String,
	},
}

/// Failure of a single data transformer on a single value.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TransformError {
	/// The value had a shape the transformer cannot handle.
	#[error("transformer '{transformer}' expects {expected}, got {actual}")]
	UnexpectedType {
		/// Transformer name.
		transformer: String,
		/// Expected shape.
		expected: String,
		/// Shape received.
		actual: String,
	},

	/// The value had the right shape but could not be converted.
	#[error("transformer '{transformer}' failed: {message}")]
	Failed {
		/// Transformer name.
		transformer: String,
		/// Details.
		message: String,
	},
}

/// Top-level error for building and using grids.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GridError {
	/// Option resolution failed for an entity.
	#[error("invalid options for {kind} '{entity}': {source}")]
	Option {
		/// Entity kind (`grid`, `column`, ...).
		kind: &'static str,
		/// Entity name.
		entity: String,
		/// Underlying error.
		#[source]
		source: OptionError,
	},

	/// A type or extension lookup failed.
	#[error(transparent)]
	TypeResolution(#[from] TypeResolutionError),

	/// Column ordering failed.
	#[error(transparent)]
	Ordering(#[from] OrderingError),

	/// A transformer failed while materializing a value.
	#[error("could not transform value of '{entity}': {source}")]
	Transform {
		/// Column or filter key.
		entity: String,
		/// Underlying error.
		#[source]
		source: TransformError,
	},

	/// The query-translation collaborator rejected a filter payload.
	#[error("could not translate filter for '{entity}': {message}")]
	Translation {
		/// Column key owning the filter.
		entity: String,
		/// Collaborator message.
		message: String,
	},

	/// Two siblings share a name.
	#[error("{kind} '{name}' is defined twice")]
	DuplicateName {
		/// Entity kind.
		kind: &'static str,
		/// Duplicated name.
		name: String,
	},

	/// A column lookup by key failed.
	#[error("column '{0}' does not exist")]
	UnknownColumn(String),

	/// Values were requested before the data pipeline was built.
	#[error("data pipeline of '{0}' has not been built")]
	PipelineNotBuilt(String),

	/// A view contribution failed.
	#[error("could not build view for '{entity}': {message}")]
	View {
		/// Entity key.
		entity: String,
		/// Details.
		message: String,
	},
}

impl GridError {
	/// Wraps an option error with the entity it belongs to.
	pub fn option(kind: &'static str, entity: impl Into<String>, source: OptionError) -> Self {
		GridError::Option {
			kind,
			entity: entity.into(),
			source,
		}
	}

	/// Returns the option error, if this is one.
	pub fn as_option_error(&self) -> Option<&OptionError> {
		match self {
			GridError::Option { source, .. } => Some(source),
			_ => None,
		}
	}

	/// Returns the ordering error, if this is one.
	pub fn as_ordering_error(&self) -> Option<&OrderingError> {
		match self {
			GridError::Ordering(e) => Some(e),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_undefined_option_lists_defined_names() {
		let err = OptionError::UndefinedOption {
			name: "lable".to_string(),
			defined: vec!["label".to_string(), "path".to_string()],
		};
		assert_eq!(
			err.to_string(),
			"option 'lable' does not exist. Defined options are: label, path"
		);
	}

	#[rstest]
	fn test_grid_error_exposes_option_source() {
		let err = GridError::option(
			"column",
			"price",
			OptionError::MissingRequired("choices".to_string()),
		);
		assert_eq!(
			err.as_option_error(),
			Some(&OptionError::MissingRequired("choices".to_string()))
		);
		assert_eq!(
			err.to_string(),
			"invalid options for column 'price': required option 'choices' is missing"
		);
	}
}
