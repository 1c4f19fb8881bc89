//! # Reinhardt Grid
//!
//! Declarative data grids built from inheritable types.
//!
//! A grid is described by a tree of *entities* (the grid itself, its
//! columns, their filters and the grid's components), each of which names a
//! *type*. Types form parent chains: options, views and data transformers
//! cascade from the root type down to the leaf, and extensions hook into one
//! exact type. Columns may declare a position relative to their siblings
//! (`"first"`, `"last"`, `{"before": ..}`, `{"after": ..}`), which is turned
//! into a total order every time a view is built.
//!
//! ## Feature Flags
//!
//! - `full` (default) - Everything below
//! - `minimal` - The composition engine and ordering only
//! - `types` - Built-in types, entities, builders and views
//!
//! `minimal` enables nothing on its own; it only narrows the build when
//! default features are turned off:
//!
//! ```toml
//! reinhardt-grid = { version = "0.1.0-alpha.1", default-features = false, features = ["minimal"] }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "types")]
//! # {
//! use reinhardt_grid::prelude::*;
//! use serde_json::json;
//!
//! let factory = GridFactory::default();
//! let mut builder = factory.create_builder("books", "grid", json!({}), None).unwrap();
//! builder
//!     .add("title", "text", json!({}))
//!     .add("isbn", "text", json!({"position": "first"}));
//!
//! let view = builder.get_grid().unwrap().create_view().unwrap();
//! assert_eq!(view.leaf_keys(), vec!["isbn", "title"]);
//! # }
//! ```
//!
//! ## Configuration
//!
//! [`GridSettings`] is read from TOML and environment variables prefixed
//! with `REINHARDT_GRID_`:
//!
//! ```rust
//! use reinhardt_grid::GridSettings;
//!
//! let settings = GridSettings::from_toml_str("theme = \"ag-theme-alpine\"").unwrap();
//! assert_eq!(settings.theme, "ag-theme-alpine");
//! ```

#![warn(missing_docs)]

pub mod core;
pub mod ordering;
#[cfg(feature = "types")]
pub mod types;

pub use reinhardt_grid_core::{
	AmbientContext, GridError, GridResult, GridSettings, SettingsError, TypeResolver,
};
pub use reinhardt_grid_ordering::{GridOrderer, OrderingError, Position};

#[cfg(feature = "types")]
pub use reinhardt_grid_types::{Grid, GridBuilder, GridFactory, GridView, MemoryDataSource};

/// Everything needed to declare grids and write custom types.
pub mod prelude {
	pub use reinhardt_grid_core::prelude::*;
	pub use reinhardt_grid_core::{GridSettings, TypeResolver};
	pub use reinhardt_grid_ordering::Position;

	#[cfg(feature = "types")]
	pub use reinhardt_grid_types::prelude::*;
}
