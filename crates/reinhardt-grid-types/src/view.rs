//! Views handed to the rendering layer
//!
//! A view is built fresh by every `create_view` call and never shared
//! between calls. Types write into the free-form [`ViewVars`] bag; the
//! fixed fields carry what every template needs.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Free-form template variables, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ViewVars(IndexMap<String, Value>);

impl ViewVars {
	/// Creates an empty bag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a variable, replacing any earlier value.
	pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
		self.0.insert(name.to_string(), value.into());
		self
	}

	/// Sets a variable only when it is missing or `null`.
	pub fn set_default(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
		if !self.is_set(name) {
			self.set(name, value);
		}
		self
	}

	/// Value of a variable.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.get(name)
	}

	/// String value of a variable.
	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.get(name).and_then(Value::as_str)
	}

	/// Whether the variable exists and is not `null`.
	pub fn is_set(&self, name: &str) -> bool {
		self.get(name).is_some_and(|v| !v.is_null())
	}

	/// Removes a variable.
	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.0.shift_remove(name)
	}

	/// Variable names in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Number of variables.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the bag is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// View of a whole grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridView {
	/// Grid name.
	pub name: String,
	/// Template identifier.
	pub template: String,
	/// Template variables.
	pub vars: ViewVars,
	/// Top-level column views, in display order.
	pub columns: Vec<ColumnView>,
	/// Top-level component views, in declaration order.
	pub components: Vec<ComponentView>,
}

impl GridView {
	/// Creates an empty view of the grid `name`.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Keys of the leaf columns in display order.
	pub fn leaf_keys(&self) -> Vec<&str> {
		fn collect<'a>(columns: &'a [ColumnView], keys: &mut Vec<&'a str>) {
			for column in columns {
				if column.children.is_empty() {
					keys.push(&column.key);
				} else {
					collect(&column.children, keys);
				}
			}
		}

		let mut keys = Vec::new();
		collect(&self.columns, &mut keys);
		keys
	}
}

/// View of one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnView {
	/// Unique column key.
	pub key: String,
	/// Data path the column reads.
	pub path: String,
	/// Template identifier.
	pub template: String,
	/// Template variables.
	pub vars: ViewVars,
	/// View of the column's filter.
	pub filter: Option<FilterView>,
	/// Child column views of a group, in display order.
	pub children: Vec<ColumnView>,
	/// Snapshot of the parent group's view, for variable lookup.
	#[serde(skip)]
	pub parent: Option<Arc<ColumnView>>,
}

impl ColumnView {
	/// Creates an empty view of the column `key`.
	pub fn new(key: impl Into<String>, parent: Option<Arc<ColumnView>>) -> Self {
		Self {
			key: key.into(),
			parent,
			..Self::default()
		}
	}

	/// Looks a variable up on this view, then on its ancestors.
	pub fn lookup(&self, name: &str) -> Option<&Value> {
		match self.vars.get(name) {
			Some(value) => Some(value),
			None => self.parent.as_deref().and_then(|parent| parent.lookup(name)),
		}
	}
}

/// View of one filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterView {
	/// Key of the column owning the filter.
	pub column_key: String,
	/// Template identifier.
	pub template: String,
	/// Template variables.
	pub vars: ViewVars,
}

impl FilterView {
	/// Creates an empty view of the filter of `column_key`.
	pub fn new(column_key: impl Into<String>) -> Self {
		Self {
			column_key: column_key.into(),
			..Self::default()
		}
	}
}

/// View of one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentView {
	/// Component name.
	pub name: String,
	/// Template identifier.
	pub template: String,
	/// Template variables.
	pub vars: ViewVars,
	/// Child component views.
	pub children: Vec<ComponentView>,
	/// Snapshot of the parent component's view, for variable lookup.
	#[serde(skip)]
	pub parent: Option<Arc<ComponentView>>,
}

impl ComponentView {
	/// Creates an empty view of the component `name`.
	pub fn new(name: impl Into<String>, parent: Option<Arc<ComponentView>>) -> Self {
		Self {
			name: name.into(),
			parent,
			..Self::default()
		}
	}

	/// Looks a variable up on this view, then on its ancestors.
	pub fn lookup(&self, name: &str) -> Option<&Value> {
		match self.vars.get(name) {
			Some(value) => Some(value),
			None => self.parent.as_deref().and_then(|parent| parent.lookup(name)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_set_default_only_fills_missing_or_null() {
		// Arrange
		let mut vars = ViewVars::new();
		vars.set("label", "Name").set("translation_domain", Value::Null);

		// Act
		vars.set_default("label", "Other")
			.set_default("translation_domain", "grid")
			.set_default("icon", "star");

		// Assert
		assert_eq!(vars.get_str("label"), Some("Name"));
		assert_eq!(vars.get_str("translation_domain"), Some("grid"));
		assert_eq!(vars.get_str("icon"), Some("star"));
	}

	#[rstest]
	fn test_lookup_walks_parent_snapshots() {
		// Arrange
		let mut group = ColumnView::new("address", None);
		group.vars.set("header_class", "group");
		let mut child = ColumnView::new("address.city", Some(Arc::new(group)));
		child.vars.set("label", "City");

		// Assert
		assert_eq!(child.lookup("label"), Some(&json!("City")));
		assert_eq!(child.lookup("header_class"), Some(&json!("group")));
		assert_eq!(child.lookup("width"), None);
	}

	#[rstest]
	fn test_parent_is_not_serialized() {
		let child = ColumnView::new("address.city", Some(Arc::new(ColumnView::new("address", None))));
		let json = serde_json::to_value(&child).unwrap();
		assert!(json.get("parent").is_none());
		assert_eq!(json["key"], json!("address.city"));
	}

	#[rstest]
	fn test_leaf_keys_flatten_groups() {
		// Arrange
		let mut group = ColumnView::new("address", None);
		group.children = vec![
			ColumnView::new("address.city", None),
			ColumnView::new("address.zip", None),
		];
		let mut view = GridView::new("users");
		view.columns = vec![ColumnView::new("id", None), group];

		// Assert
		assert_eq!(view.leaf_keys(), vec!["id", "address.city", "address.zip"]);
	}
}
