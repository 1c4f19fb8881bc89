//! Resolved option maps

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Final, validated options of one entity, in declaration order.
///
/// Produced once per entity and never mutated afterwards; normalizers and
/// lazy defaults receive a read-only view of the map while it is being built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedOptions {
	values: IndexMap<String, Value>,
}

impl ResolvedOptions {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn insert(&mut self, name: &str, value: Value) {
		self.values.insert(name.to_string(), value);
	}

	/// Raw value of an option.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	/// Whether the option was resolved at all (possibly to `null`).
	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	/// Whether the option resolved to something other than `null`.
	pub fn is_set(&self, name: &str) -> bool {
		self.get(name).is_some_and(|v| !v.is_null())
	}

	/// String value of an option.
	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.get(name).and_then(Value::as_str)
	}

	/// Boolean value of an option.
	pub fn get_bool(&self, name: &str) -> Option<bool> {
		self.get(name).and_then(Value::as_bool)
	}

	/// Boolean value of an option, `false` when unset.
	pub fn flag(&self, name: &str) -> bool {
		self.get_bool(name).unwrap_or(false)
	}

	/// Integer value of an option.
	pub fn get_i64(&self, name: &str) -> Option<i64> {
		self.get(name).and_then(Value::as_i64)
	}

	/// Numeric value of an option.
	pub fn get_f64(&self, name: &str) -> Option<f64> {
		self.get(name).and_then(Value::as_f64)
	}

	/// Array value of an option.
	pub fn get_array(&self, name: &str) -> Option<&Vec<Value>> {
		self.get(name).and_then(Value::as_array)
	}

	/// Object value of an option.
	pub fn get_object(&self, name: &str) -> Option<&Map<String, Value>> {
		self.get(name).and_then(Value::as_object)
	}

	/// Option names in declaration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.values.keys().map(String::as_str)
	}

	/// `(name, value)` pairs in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Number of resolved options.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether no option was resolved.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// The whole map as a JSON object.
	pub fn to_json(&self) -> Value {
		Value::Object(
			self.values
				.iter()
				.map(|(k, v)| (k.clone(), v.clone()))
				.collect(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_typed_accessors() {
		// Arrange
		let mut options = ResolvedOptions::new();
		options.insert("label", json!("Name"));
		options.insert("sortable", json!(true));
		options.insert("width", json!(120));
		options.insert("pinned", json!(null));

		// Assert
		assert_eq!(options.get_str("label"), Some("Name"));
		assert!(options.flag("sortable"));
		assert_eq!(options.get_i64("width"), Some(120));
		assert!(options.contains("pinned"));
		assert!(!options.is_set("pinned"));
		assert!(!options.flag("missing"));
		assert_eq!(
			options.names().collect::<Vec<_>>(),
			vec!["label", "sortable", "width", "pinned"]
		);
	}

	#[rstest]
	fn test_serializes_as_plain_object() {
		let mut options = ResolvedOptions::new();
		options.insert("a", json!(1));
		assert_eq!(serde_json::to_value(&options).unwrap(), json!({"a": 1}));
		assert_eq!(options.to_json(), json!({"a": 1}));
	}
}
