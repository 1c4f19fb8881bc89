//! Entity kinds

use crate::entity::{Column, Component, Filter, Grid};
use crate::view::{ColumnView, ComponentView, FilterView, GridView};
use reinhardt_grid_core::TypeKind;

/// Grid types.
#[derive(Debug, Clone, Copy)]
pub struct GridKind;

impl TypeKind for GridKind {
	const LABEL: &'static str = "grid";
	type Entity = Grid;
	type View = GridView;
}

/// Column types.
#[derive(Debug, Clone, Copy)]
pub struct ColumnKind;

impl TypeKind for ColumnKind {
	const LABEL: &'static str = "column";
	type Entity = Column;
	type View = ColumnView;
}

/// Filter types.
#[derive(Debug, Clone, Copy)]
pub struct FilterKind;

impl TypeKind for FilterKind {
	const LABEL: &'static str = "filter";
	type Entity = Filter;
	type View = FilterView;
}

/// Side-bar and status-bar component types.
#[derive(Debug, Clone, Copy)]
pub struct ComponentKind;

impl TypeKind for ComponentKind {
	const LABEL: &'static str = "component";
	type Entity = Component;
	type View = ComponentView;
}
