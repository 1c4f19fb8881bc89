//! Columns

use super::filter::Filter;
use crate::kind::ColumnKind;
use crate::view::ColumnView;
use reinhardt_grid_core::{
	AmbientContext, DataPipeline, GridError, GridResult, ResolvedOptions, ResolvedType,
	ValueAccessor,
};
use reinhardt_grid_ordering::{GridOrderer, Position, PositionedEntry};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A column of a grid, possibly a group of nested columns.
pub struct Column {
	pub(crate) name: String,
	pub(crate) key: String,
	pub(crate) parent_key: Option<String>,
	pub(crate) resolved_type: ResolvedType<ColumnKind>,
	pub(crate) options: Arc<ResolvedOptions>,
	pub(crate) context: AmbientContext,
	pub(crate) filter: Option<Filter>,
	pub(crate) children: Vec<Column>,
	pub(crate) pipeline: DataPipeline,
	pub(crate) accessor: Arc<dyn ValueAccessor>,
}

impl Column {
	/// Name among its siblings; the target of `before`/`after` positions.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Key unique within the grid (`group.name` for nested columns).
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Key of the owning group.
	pub fn parent_key(&self) -> Option<&str> {
		self.parent_key.as_deref()
	}

	/// Identifier of the column's type.
	pub fn type_name(&self) -> &str {
		self.resolved_type.name()
	}

	/// The column's resolved type chain.
	pub fn resolved_type(&self) -> &ResolvedType<ColumnKind> {
		&self.resolved_type
	}

	/// Resolved options.
	pub fn options(&self) -> &ResolvedOptions {
		&self.options
	}

	/// Ambient grid context.
	pub fn context(&self) -> &AmbientContext {
		&self.context
	}

	/// Filter of the column.
	pub fn filter(&self) -> Option<&Filter> {
		self.filter.as_ref()
	}

	/// Nested columns, in declaration order.
	pub fn children(&self) -> &[Column] {
		&self.children
	}

	/// Whether the column is a header group.
	pub fn is_group(&self) -> bool {
		self.resolved_type.is_a("group")
	}

	/// Data path read from each row.
	pub fn path(&self) -> &str {
		self.options.get_str("path").unwrap_or(&self.name)
	}

	/// Header label.
	pub fn label(&self) -> Option<&str> {
		self.options.get_str("label")
	}

	/// Declared position among siblings.
	pub fn position(&self) -> GridResult<Option<Position>> {
		let value = self.options.get("position").unwrap_or(&Value::Null);
		Ok(Position::from_value(&self.name, value)?)
	}

	/// Transformer chain.
	pub fn pipeline(&self) -> &DataPipeline {
		&self.pipeline
	}

	/// Builds a fresh view of the column and its descendants.
	pub fn create_view(&self, parent: Option<Arc<ColumnView>>) -> GridResult<ColumnView> {
		let mut view = ColumnView::new(&self.key, parent);
		self.resolved_type
			.build_view(&mut view, self, &self.options)?;
		view.vars
			.set_default("translation_domain", self.context.translation_domain());

		if let Some(filter) = &self.filter {
			view.filter = Some(filter.create_view()?);
		}

		if !self.children.is_empty() {
			let snapshot = Arc::new(view.clone());
			for child in ordered(&self.children)? {
				view.children.push(child.create_view(Some(snapshot.clone()))?);
			}
		}

		Ok(view)
	}

	/// Populates the transformer chains of the column, its filter and its
	/// descendants. Runs at most once per column.
	pub fn build_data(&mut self) -> GridResult<()> {
		self.resolved_type
			.build_data(&self.key, &mut self.pipeline, &self.options)?;
		if let Some(filter) = &mut self.filter {
			filter.build_data()?;
		}
		for child in &mut self.children {
			child.build_data()?;
		}
		Ok(())
	}

	/// Materializes the column's value for `row`.
	pub fn value(&self, row: &Value) -> GridResult<Value> {
		if !self.pipeline.is_built() {
			return Err(GridError::PipelineNotBuilt(self.key.clone()));
		}
		let raw = self.accessor.access(row, self.path());
		self.pipeline
			.transform(raw, row)
			.map_err(|source| GridError::Transform {
				entity: self.key.clone(),
				source,
			})
	}

	pub(crate) fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Column>) {
		if self.children.is_empty() && !self.is_group() {
			leaves.push(self);
		}
		for child in &self.children {
			child.collect_leaves(leaves);
		}
	}

	pub(crate) fn collect_ordered_leaves<'a>(
		&'a self,
		leaves: &mut Vec<&'a Column>,
	) -> GridResult<()> {
		if self.children.is_empty() && !self.is_group() {
			leaves.push(self);
		}
		for child in ordered(&self.children)? {
			child.collect_ordered_leaves(leaves)?;
		}
		Ok(())
	}

	pub(crate) fn find(&self, key: &str) -> Option<&Column> {
		if self.key == key {
			return Some(self);
		}
		self.children.iter().find_map(|child| child.find(key))
	}
}

impl fmt::Debug for Column {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Column")
			.field("key", &self.key)
			.field("type", &self.resolved_type.name())
			.field("options", &self.options)
			.field("filter", &self.filter)
			.field("children", &self.children)
			.field("pipeline", &self.pipeline.names())
			.finish_non_exhaustive()
	}
}

/// Sibling columns in display order.
pub(crate) fn ordered(columns: &[Column]) -> GridResult<Vec<&Column>> {
	let entries = columns
		.iter()
		.map(|column| {
			column
				.position()
				.map(|position| PositionedEntry::new(column.name(), position))
		})
		.collect::<GridResult<Vec<_>>>()?;
	let order = GridOrderer::order(&entries)?;

	let mut ordered = Vec::with_capacity(columns.len());
	for key in &order {
		if let Some(column) = columns.iter().find(|column| &column.name == key) {
			ordered.push(column);
		}
	}
	tracing::trace!(order = ?order, "ordered sibling columns");
	Ok(ordered)
}
