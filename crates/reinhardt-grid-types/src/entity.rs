//! Grid entities
//!
//! Entities are assembled by a [`GridBuilder`](crate::builder::GridBuilder)
//! and own their resolved options for their whole lifetime. They produce any
//! number of views and build their data pipelines at most once.

pub mod column;
pub mod component;
pub mod filter;
pub mod grid;

pub use column::Column;
pub use component::Component;
pub use filter::{Filter, FilterTranslator};
pub use grid::{Grid, GridRow};
