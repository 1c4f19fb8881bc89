//! Position declarations

use crate::error::{OrderingError, OrderingResult};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Where an entry wants to sit relative to its siblings.
///
/// Serializes to the same shape it is parsed from: `"first"`, `"last"`,
/// `{"before": "key"}` or `{"after": "key"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
	/// Ahead of every entry that is not itself `First`.
	First,
	/// Behind every entry placed so far.
	Last,
	/// Immediately before the entry with the given key.
	Before(String),
	/// Immediately after the entry with the given key.
	After(String),
}

impl Position {
	/// Parses a position declaration from an option value.
	///
	/// `null` means "no position". When an object carries both `before` and
	/// `after`, `before` wins.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_grid_ordering::Position;
	/// use serde_json::json;
	///
	/// assert_eq!(Position::from_value("a", &json!(null)).unwrap(), None);
	/// assert_eq!(Position::from_value("a", &json!("first")).unwrap(), Some(Position::First));
	/// assert_eq!(
	///     Position::from_value("a", &json!({"after": "b"})).unwrap(),
	///     Some(Position::After("b".to_string())),
	/// );
	/// assert!(Position::from_value("a", &json!("middle")).is_err());
	/// ```
	pub fn from_value(key: &str, value: &Value) -> OrderingResult<Option<Self>> {
		let invalid = |reason: String| OrderingError::InvalidPosition {
			key: key.to_string(),
			reason,
		};

		match value {
			Value::Null => Ok(None),
			Value::String(s) => match s.as_str() {
				"first" => Ok(Some(Position::First)),
				"last" => Ok(Some(Position::Last)),
				other => Err(invalid(format!(
					"unknown position '{other}', expected 'first' or 'last'"
				))),
			},
			Value::Object(map) => {
				for relation in [Relation::Before, Relation::After] {
					if let Some(target) = map.get(relation.as_str()) {
						let target = target
							.as_str()
							.filter(|t| !t.is_empty())
							.ok_or_else(|| {
								invalid(format!("'{relation}' must reference a non-empty key"))
							})?;
						return Ok(Some(relation.to_position(target)));
					}
				}
				Err(invalid("expected a 'before' or 'after' key".to_string()))
			}
			_ => Err(invalid(
				"expected null, 'first', 'last' or an object".to_string(),
			)),
		}
	}

	/// Returns the relation and target for `Before`/`After`.
	pub fn relative(&self) -> Option<(Relation, &str)> {
		match self {
			Position::Before(target) => Some((Relation::Before, target)),
			Position::After(target) => Some((Relation::After, target)),
			Position::First | Position::Last => None,
		}
	}
}

/// Direction of a relative placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
	/// Placed before the target.
	Before,
	/// Placed after the target.
	After,
}

impl Relation {
	/// The other direction.
	pub fn opposite(self) -> Self {
		match self {
			Relation::Before => Relation::After,
			Relation::After => Relation::Before,
		}
	}

	/// Key used in position objects.
	pub fn as_str(self) -> &'static str {
		match self {
			Relation::Before => "before",
			Relation::After => "after",
		}
	}

	fn to_position(self, target: &str) -> Position {
		match self {
			Relation::Before => Position::Before(target.to_string()),
			Relation::After => Position::After(target.to_string()),
		}
	}
}

impl fmt::Display for Relation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An entry taking part in ordering: a stable key and an optional position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedEntry {
	/// Stable key, unique among the entries being ordered.
	pub key: String,
	/// Declared position, `None` for natural order.
	pub position: Option<Position>,
}

impl PositionedEntry {
	/// Creates an entry with an explicit position.
	pub fn new(key: impl Into<String>, position: Option<Position>) -> Self {
		Self {
			key: key.into(),
			position,
		}
	}

	/// Creates an entry that keeps its natural order.
	pub fn unpositioned(key: impl Into<String>) -> Self {
		Self::new(key, None)
	}

	/// Creates an entry from a raw `position` option value.
	pub fn from_value(key: impl Into<String>, value: &Value) -> OrderingResult<Self> {
		let key = key.into();
		let position = Position::from_value(&key, value)?;
		Ok(Self { key, position })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!(null), None)]
	#[case(json!("first"), Some(Position::First))]
	#[case(json!("last"), Some(Position::Last))]
	#[case(json!({"before": "b"}), Some(Position::Before("b".to_string())))]
	#[case(json!({"after": "b"}), Some(Position::After("b".to_string())))]
	#[case(json!({"before": "b", "after": "c"}), Some(Position::Before("b".to_string())))]
	fn test_from_value_accepts_supported_shapes(
		#[case] value: Value,
		#[case] expected: Option<Position>,
	) {
		// Act
		let position = Position::from_value("a", &value).unwrap();

		// Assert
		assert_eq!(position, expected);
	}

	#[rstest]
	#[case(json!("middle"))]
	#[case(json!({}))]
	#[case(json!({"before": ""}))]
	#[case(json!({"after": 3}))]
	#[case(json!(42))]
	#[case(json!(["first"]))]
	fn test_from_value_rejects_invalid_shapes(#[case] value: Value) {
		// Act
		let result = Position::from_value("a", &value);

		// Assert
		assert!(matches!(
			result,
			Err(OrderingError::InvalidPosition { ref key, .. }) if key == "a"
		));
	}

	#[rstest]
	fn test_position_serializes_to_its_declaration_shape() {
		assert_eq!(serde_json::to_value(Position::First).unwrap(), json!("first"));
		assert_eq!(
			serde_json::to_value(Position::After("id".to_string())).unwrap(),
			json!({"after": "id"})
		);
	}

	#[rstest]
	fn test_relation_opposite() {
		assert_eq!(Relation::Before.opposite(), Relation::After);
		assert_eq!(Relation::After.opposite(), Relation::Before);
	}
}
