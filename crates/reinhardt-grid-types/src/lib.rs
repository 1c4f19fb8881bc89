//! Built-in grid types and grid assembly for Reinhardt
//!
//! This crate turns declarations into renderable grids:
//!
//! 1. [`GridFactory::create_builder`] resolves the grid type and options.
//! 2. [`GridBuilder`] collects columns (optionally grouped, optionally
//!    filtered) and components.
//! 3. [`GridBuilder::get_grid`] resolves every entity into a [`Grid`].
//! 4. [`Grid::create_view`] produces a fresh [`GridView`] with columns
//!    ordered by their `position` option; [`Grid::build_data`] builds the
//!    data pipelines once, after which [`Grid::transform_rows`] formats rows.
//!
//! ## Quick Start
//!
//! ```
//! use reinhardt_grid_types::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let source = MemoryDataSource::new(vec![json!({"id": 1, "active": true})]);
//! let factory = GridFactory::default();
//! let mut builder = factory
//!     .create_builder("accounts", "grid", json!({}), Some(Arc::new(source)))
//!     .unwrap();
//! builder
//!     .add("id", "number", json!({}))
//!     .add("active", "boolean", json!({"true_label": "Yes"}));
//!
//! let mut grid = builder.get_grid().unwrap();
//! grid.build_data().unwrap();
//! let rows = grid.rows().unwrap();
//! assert_eq!(rows[0]["active"], json!("Yes"));
//! ```
//!
//! The built-in types are listed in [`builtin`].

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod builder;
pub mod builtin;
pub mod entity;
pub mod factory;
pub mod kind;
pub mod source;
pub mod transformer;
pub mod view;

pub use builder::{ColumnSet, ComponentSet, GROUP_TYPE, GridBuilder};
pub use entity::{Column, Component, Filter, FilterTranslator, Grid, GridRow};
pub use factory::GridFactory;
pub use kind::{ColumnKind, ComponentKind, FilterKind, GridKind};
pub use source::MemoryDataSource;
pub use view::{ColumnView, ComponentView, FilterView, GridView, ViewVars};

/// Re-exports for building and extending grids.
pub mod prelude {
	pub use crate::builder::{ColumnSet, ComponentSet, GridBuilder};
	pub use crate::entity::{Column, Component, Filter, FilterTranslator, Grid, GridRow};
	pub use crate::factory::GridFactory;
	pub use crate::kind::{ColumnKind, ComponentKind, FilterKind, GridKind};
	pub use crate::source::MemoryDataSource;
	pub use crate::view::{ColumnView, ComponentView, FilterView, GridView, ViewVars};
	pub use reinhardt_grid_core::prelude::*;
}
