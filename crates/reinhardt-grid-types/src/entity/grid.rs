//! Grids

use super::column::{Column, ordered};
use super::component::Component;
use crate::kind::GridKind;
use crate::view::GridView;
use indexmap::IndexMap;
use reinhardt_grid_core::{AmbientContext, GridError, GridResult, ResolvedOptions, ResolvedType};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One materialized row: leaf column key to transformed value.
pub type GridRow = IndexMap<String, Value>;

/// An assembled grid: its own options plus its column and component trees.
pub struct Grid {
	pub(crate) name: String,
	pub(crate) resolved_type: ResolvedType<GridKind>,
	pub(crate) options: Arc<ResolvedOptions>,
	pub(crate) context: AmbientContext,
	pub(crate) columns: Vec<Column>,
	pub(crate) components: Vec<Component>,
}

impl Grid {
	/// Grid name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Identifier of the grid's type.
	pub fn type_name(&self) -> &str {
		self.resolved_type.name()
	}

	/// Resolved grid options.
	pub fn options(&self) -> &ResolvedOptions {
		&self.options
	}

	/// Ambient context shared by every entity of the grid.
	pub fn context(&self) -> &AmbientContext {
		&self.context
	}

	/// Top-level columns, in declaration order.
	pub fn columns(&self) -> &[Column] {
		&self.columns
	}

	/// Top-level components, in declaration order.
	pub fn components(&self) -> &[Component] {
		&self.components
	}

	/// Looks a column up by key, at any depth.
	pub fn column(&self, key: &str) -> GridResult<&Column> {
		self.columns
			.iter()
			.find_map(|column| column.find(key))
			.ok_or_else(|| GridError::UnknownColumn(key.to_string()))
	}

	/// Every column holding data, depth first in declaration order.
	pub fn leaf_columns(&self) -> Vec<&Column> {
		let mut leaves = Vec::new();
		for column in &self.columns {
			column.collect_leaves(&mut leaves);
		}
		leaves
	}

	/// Every column holding data, depth first in display order, i.e. the
	/// order [`create_view`](Self::create_view) lays them out.
	pub fn ordered_leaf_columns(&self) -> GridResult<Vec<&Column>> {
		let mut leaves = Vec::new();
		for column in ordered(&self.columns)? {
			column.collect_ordered_leaves(&mut leaves)?;
		}
		Ok(leaves)
	}

	/// Builds a fresh view of the grid.
	///
	/// Every sibling group of columns is ordered from its position
	/// declarations first; an ordering error aborts the whole view.
	pub fn create_view(&self) -> GridResult<GridView> {
		let mut view = GridView::new(&self.name);

		for column in ordered(&self.columns)? {
			view.columns.push(column.create_view(None)?);
		}
		for component in &self.components {
			view.components.push(component.create_view(None)?);
		}

		self.resolved_type
			.build_view(&mut view, self, &self.options)?;
		view.vars
			.set_default("translation_domain", self.context.translation_domain());

		tracing::debug!(
			grid = %self.name,
			columns = view.columns.len(),
			components = view.components.len(),
			"created grid view"
		);
		Ok(view)
	}

	/// Populates the transformer chains of every column and filter.
	pub fn build_data(&mut self) -> GridResult<()> {
		for column in &mut self.columns {
			column.build_data()?;
		}
		Ok(())
	}

	/// Materializes `rows` for the leaf columns, building the data
	/// pipelines first if needed. Row keys follow display order.
	pub fn transform_rows(&mut self, rows: &[Value]) -> GridResult<Vec<GridRow>> {
		self.build_data()?;
		let leaves = self.ordered_leaf_columns()?;
		rows.iter()
			.map(|row| {
				leaves
					.iter()
					.map(|column| {
						column
							.value(row)
							.map(|value| (column.key().to_string(), value))
					})
					.collect::<GridResult<GridRow>>()
			})
			.collect()
	}

	/// Materializes every row of the grid's data source.
	pub fn rows(&mut self) -> GridResult<Vec<GridRow>> {
		let rows = self
			.context
			.data_source()
			.map(|source| source.rows())
			.unwrap_or_default();
		self.transform_rows(&rows)
	}
}

impl fmt::Debug for Grid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Grid")
			.field("name", &self.name)
			.field("type", &self.resolved_type.name())
			.field("options", &self.options)
			.field("columns", &self.columns)
			.field("components", &self.components)
			.finish()
	}
}
