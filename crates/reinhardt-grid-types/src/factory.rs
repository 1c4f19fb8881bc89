//! Grid factory

use crate::builder::GridBuilder;
use crate::kind::GridKind;
use reinhardt_grid_core::{
	AmbientContext, DataSource, GridResult, GridSettings, PathAccessor, TypeResolver, ValueAccessor,
};
use serde_json::Value;
use std::sync::Arc;

/// Entry point for building grids.
///
/// Holds the type resolver and the settings shared by every grid it
/// creates. Cheap to clone.
#[derive(Debug, Clone)]
pub struct GridFactory {
	resolver: Arc<TypeResolver>,
	settings: Arc<GridSettings>,
	accessor: Arc<dyn ValueAccessor>,
}

impl Default for GridFactory {
	fn default() -> Self {
		Self::new(Arc::new(TypeResolver::new()), GridSettings::default())
	}
}

impl GridFactory {
	/// Creates a factory.
	pub fn new(resolver: Arc<TypeResolver>, settings: GridSettings) -> Self {
		Self {
			resolver,
			settings: Arc::new(settings),
			accessor: Arc::new(PathAccessor),
		}
	}

	/// Replaces the accessor columns read row values with.
	pub fn with_accessor(mut self, accessor: impl ValueAccessor + 'static) -> Self {
		self.accessor = Arc::new(accessor);
		self
	}

	/// The type resolver.
	pub fn resolver(&self) -> &TypeResolver {
		&self.resolver
	}

	/// The shared settings.
	pub fn settings(&self) -> &GridSettings {
		&self.settings
	}

	/// Resolves the grid type and options and returns a builder for its
	/// columns and components.
	pub fn create_builder(
		&self,
		name: &str,
		grid_type: &str,
		options: Value,
		data_source: Option<Arc<dyn DataSource>>,
	) -> GridResult<GridBuilder> {
		let resolved_type = self.resolver.resolve_type::<GridKind>(grid_type)?;
		let context = AmbientContext::new(Arc::clone(&self.settings)).with_data_source(data_source);
		let grid_options = Arc::new(resolved_type.resolve_options(name, &options, &context)?);
		let context = context.with_grid_options(Arc::clone(&grid_options));

		Ok(GridBuilder::new(
			name,
			Arc::clone(&self.resolver),
			Arc::clone(&self.accessor),
			resolved_type,
			grid_options,
			context,
		))
	}
}
