//! Built-in types, entities, builders and views.

#[cfg(feature = "types")]
pub use reinhardt_grid_types::*;
