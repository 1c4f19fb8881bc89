//! Grid assembly
//!
//! A [`GridBuilder`] records column and component declarations; every call
//! to [`GridBuilder::get_grid`] turns them into a fresh [`Grid`], resolving
//! each entity's type chain and options exactly once.

use crate::entity::{Column, Component, Filter, Grid};
use crate::kind::{ColumnKind, ComponentKind, FilterKind, GridKind};
use reinhardt_grid_core::{
	AmbientContext, DataPipeline, GridError, GridResult, ResolvedOptions, ResolvedType,
	TypeResolver, ValueAccessor,
};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Type used by [`ColumnSet::add_group`].
pub const GROUP_TYPE: &str = "group";

#[derive(Debug, Clone)]
struct EntityDef {
	name: String,
	type_name: String,
	options: Value,
	children: Vec<EntityDef>,
}

impl EntityDef {
	fn new(name: &str, type_name: &str, options: Value) -> Self {
		Self {
			name: name.to_string(),
			type_name: type_name.to_string(),
			options,
			children: Vec::new(),
		}
	}
}

fn check_unique(kind: &'static str, defs: &[EntityDef]) -> GridResult<()> {
	let mut seen = HashSet::new();
	for def in defs {
		if !seen.insert(def.name.as_str()) {
			return Err(GridError::DuplicateName {
				kind,
				name: def.name.clone(),
			});
		}
	}
	Ok(())
}

/// Sibling column declarations.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
	defs: Vec<EntityDef>,
}

impl ColumnSet {
	/// Declares a column.
	pub fn add(&mut self, name: &str, type_name: &str, options: Value) -> &mut Self {
		self.defs.push(EntityDef::new(name, type_name, options));
		self
	}

	/// Declares a header group; `build` declares its nested columns.
	pub fn add_group<F>(&mut self, name: &str, options: Value, build: F) -> &mut Self
	where
		F: FnOnce(&mut ColumnSet),
	{
		let mut children = ColumnSet::default();
		build(&mut children);
		let mut def = EntityDef::new(name, GROUP_TYPE, options);
		def.children = children.defs;
		self.defs.push(def);
		self
	}

	/// Number of declared columns at this level.
	pub fn len(&self) -> usize {
		self.defs.len()
	}

	/// Whether nothing is declared.
	pub fn is_empty(&self) -> bool {
		self.defs.is_empty()
	}
}

/// Sibling component declarations.
#[derive(Debug, Clone, Default)]
pub struct ComponentSet {
	defs: Vec<EntityDef>,
}

impl ComponentSet {
	/// Declares a component.
	pub fn add(&mut self, name: &str, type_name: &str, options: Value) -> &mut Self {
		self.defs.push(EntityDef::new(name, type_name, options));
		self
	}

	/// Declares a component hosting children, such as a side bar.
	pub fn add_group<F>(&mut self, name: &str, type_name: &str, options: Value, build: F) -> &mut Self
	where
		F: FnOnce(&mut ComponentSet),
	{
		let mut children = ComponentSet::default();
		build(&mut children);
		let mut def = EntityDef::new(name, type_name, options);
		def.children = children.defs;
		self.defs.push(def);
		self
	}

	/// Number of declared components at this level.
	pub fn len(&self) -> usize {
		self.defs.len()
	}

	/// Whether nothing is declared.
	pub fn is_empty(&self) -> bool {
		self.defs.is_empty()
	}
}

/// Collects declarations for one grid.
///
/// Created by [`GridFactory::create_builder`](crate::factory::GridFactory::create_builder),
/// which has already resolved the grid's own options.
///
/// # Examples
///
/// ```
/// use reinhardt_grid_types::GridFactory;
/// use serde_json::json;
///
/// let factory = GridFactory::default();
/// let mut builder = factory.create_builder("users", "grid", json!({}), None).unwrap();
/// builder
///     .add("name", "text", json!({}))
///     .add("id", "number", json!({"position": "first"}))
///     .add_group("address", json!({}), |group| {
///         group.add("city", "text", json!({}));
///     });
///
/// let grid = builder.get_grid().unwrap();
/// let view = grid.create_view().unwrap();
/// assert_eq!(view.leaf_keys(), vec!["id", "name", "address.city"]);
/// ```
#[derive(Debug)]
pub struct GridBuilder {
	name: String,
	resolver: Arc<TypeResolver>,
	accessor: Arc<dyn ValueAccessor>,
	resolved_type: ResolvedType<GridKind>,
	options: Arc<ResolvedOptions>,
	context: AmbientContext,
	columns: ColumnSet,
	components: ComponentSet,
}

impl GridBuilder {
	pub(crate) fn new(
		name: &str,
		resolver: Arc<TypeResolver>,
		accessor: Arc<dyn ValueAccessor>,
		resolved_type: ResolvedType<GridKind>,
		options: Arc<ResolvedOptions>,
		context: AmbientContext,
	) -> Self {
		Self {
			name: name.to_string(),
			resolver,
			accessor,
			resolved_type,
			options,
			context,
			columns: ColumnSet::default(),
			components: ComponentSet::default(),
		}
	}

	/// Grid name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Resolved grid options.
	pub fn options(&self) -> &ResolvedOptions {
		&self.options
	}

	/// Top-level column declarations.
	pub fn columns(&mut self) -> &mut ColumnSet {
		&mut self.columns
	}

	/// Top-level component declarations.
	pub fn components(&mut self) -> &mut ComponentSet {
		&mut self.components
	}

	/// Declares a top-level column.
	pub fn add(&mut self, name: &str, type_name: &str, options: Value) -> &mut Self {
		self.columns.add(name, type_name, options);
		self
	}

	/// Declares a top-level header group.
	pub fn add_group<F>(&mut self, name: &str, options: Value, build: F) -> &mut Self
	where
		F: FnOnce(&mut ColumnSet),
	{
		self.columns.add_group(name, options, build);
		self
	}

	/// Declares a top-level component.
	pub fn add_component(&mut self, name: &str, type_name: &str, options: Value) -> &mut Self {
		self.components.add(name, type_name, options);
		self
	}

	/// Declares a top-level component hosting children.
	pub fn add_component_group<F>(
		&mut self,
		name: &str,
		type_name: &str,
		options: Value,
		build: F,
	) -> &mut Self
	where
		F: FnOnce(&mut ComponentSet),
	{
		self.components.add_group(name, type_name, options, build);
		self
	}

	/// Assembles a fresh grid from the declarations.
	pub fn get_grid(&self) -> GridResult<Grid> {
		let columns = self.build_columns(&self.columns.defs, None)?;
		let components = self.build_components(&self.components.defs)?;
		tracing::debug!(
			grid = %self.name,
			columns = columns.len(),
			components = components.len(),
			"assembled grid"
		);
		Ok(Grid {
			name: self.name.clone(),
			resolved_type: self.resolved_type.clone(),
			options: Arc::clone(&self.options),
			context: self.context.clone(),
			columns,
			components,
		})
	}

	fn build_columns(&self, defs: &[EntityDef], parent_key: Option<&str>) -> GridResult<Vec<Column>> {
		check_unique("column", defs)?;
		defs.iter()
			.map(|def| self.build_column(def, parent_key))
			.collect()
	}

	fn build_column(&self, def: &EntityDef, parent_key: Option<&str>) -> GridResult<Column> {
		let key = match parent_key {
			Some(parent) => format!("{parent}.{}", def.name),
			None => def.name.clone(),
		};
		let resolved_type = self.resolver.resolve_type::<ColumnKind>(&def.type_name)?;
		let options = resolved_type.resolve_options(&def.name, &def.options, &self.context)?;

		let filter = match options.get_str("filter") {
			Some(filter_type) => Some(self.build_filter(&key, filter_type, &options)?),
			None => None,
		};
		let children = self.build_columns(&def.children, Some(&key))?;

		Ok(Column {
			name: def.name.clone(),
			key,
			parent_key: parent_key.map(str::to_string),
			resolved_type,
			options: Arc::new(options),
			context: self.context.clone(),
			filter,
			children,
			pipeline: DataPipeline::new(),
			accessor: Arc::clone(&self.accessor),
		})
	}

	fn build_filter(
		&self,
		column_key: &str,
		filter_type: &str,
		column_options: &ResolvedOptions,
	) -> GridResult<Filter> {
		let resolved_type = self.resolver.resolve_type::<FilterKind>(filter_type)?;
		let raw = column_options
			.get("filter_options")
			.cloned()
			.unwrap_or(Value::Null);
		let options = resolved_type.resolve_options(column_key, &raw, &self.context)?;
		let field = column_options.get_str("path").unwrap_or(column_key);

		Ok(Filter {
			column_key: column_key.to_string(),
			field: field.to_string(),
			resolved_type,
			options: Arc::new(options),
			context: self.context.clone(),
			pipeline: DataPipeline::new(),
		})
	}

	fn build_components(&self, defs: &[EntityDef]) -> GridResult<Vec<Component>> {
		check_unique("component", defs)?;
		defs.iter().map(|def| self.build_component(def)).collect()
	}

	fn build_component(&self, def: &EntityDef) -> GridResult<Component> {
		let resolved_type = self.resolver.resolve_type::<ComponentKind>(&def.type_name)?;
		let options = resolved_type.resolve_options(&def.name, &def.options, &self.context)?;
		let children = self.build_components(&def.children)?;

		Ok(Component {
			name: def.name.clone(),
			resolved_type,
			options: Arc::new(options),
			context: self.context.clone(),
			children,
		})
	}
}
