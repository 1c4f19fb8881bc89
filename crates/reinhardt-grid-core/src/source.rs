//! Data-source and value-access collaborators

use serde_json::Value;
use std::fmt;

/// Handle on the rows a grid displays.
///
/// Opaque to the composition engine: it is only handed through to types
/// that need it, e.g. a set filter fetching its distinct values while its
/// view is built.
pub trait DataSource: Send + Sync + fmt::Debug {
	/// Every row, in source order.
	fn rows(&self) -> Vec<Value>;

	/// Distinct non-null values found at `path`, in first-seen order.
	fn distinct_values(&self, path: &str) -> Vec<Value> {
		let accessor = PathAccessor;
		let mut values: Vec<Value> = Vec::new();
		for row in self.rows() {
			let value = accessor.access(&row, path);
			if !value.is_null() && !values.contains(&value) {
				values.push(value);
			}
		}
		values
	}
}

/// Reads a raw value out of a row.
pub trait ValueAccessor: Send + Sync + fmt::Debug {
	/// Returns the value at `path`, or `null` when nothing is there.
	fn access(&self, row: &Value, path: &str) -> Value;
}

/// Resolves dotted paths through objects and array indices.
///
/// `"author.name"` reads `row["author"]["name"]`, `"tags.0"` reads the first
/// element of `row["tags"]`. Missing segments resolve to `null`.
///
/// ```
/// use reinhardt_grid_core::source::{PathAccessor, ValueAccessor};
/// use serde_json::json;
///
/// let row = json!({"author": {"name": "Ada"}, "tags": ["rust", "grid"]});
/// assert_eq!(PathAccessor.access(&row, "author.name"), json!("Ada"));
/// assert_eq!(PathAccessor.access(&row, "tags.1"), json!("grid"));
/// assert_eq!(PathAccessor.access(&row, "author.email"), json!(null));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PathAccessor;

impl ValueAccessor for PathAccessor {
	fn access(&self, row: &Value, path: &str) -> Value {
		if path.is_empty() {
			return row.clone();
		}
		let mut current = row;
		for segment in path.split('.') {
			let next = match current {
				Value::Object(map) => map.get(segment),
				Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
				_ => None,
			};
			match next {
				Some(value) => current = value,
				None => return Value::Null,
			}
		}
		current.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[derive(Debug)]
	struct Rows(Vec<Value>);

	impl DataSource for Rows {
		fn rows(&self) -> Vec<Value> {
			self.0.clone()
		}
	}

	#[rstest]
	#[case("id", json!(7))]
	#[case("user.email", json!("a@example.com"))]
	#[case("roles.1", json!("staff"))]
	#[case("roles.9", json!(null))]
	#[case("user.email.domain", json!(null))]
	#[case("", json!({"id": 7, "user": {"email": "a@example.com"}, "roles": ["admin", "staff"]}))]
	fn test_path_access(#[case] path: &str, #[case] expected: Value) {
		let row = json!({"id": 7, "user": {"email": "a@example.com"}, "roles": ["admin", "staff"]});
		assert_eq!(PathAccessor.access(&row, path), expected);
	}

	#[rstest]
	fn test_distinct_values_keep_first_seen_order_and_skip_null() {
		// Arrange
		let source = Rows(vec![
			json!({"status": "open"}),
			json!({"status": null}),
			json!({"status": "closed"}),
			json!({"status": "open"}),
		]);

		// Act
		let values = source.distinct_values("status");

		// Assert
		assert_eq!(values, vec![json!("open"), json!("closed")]);
	}
}
