//! Type composition engine.
//!
//! Option schemas, type chains, extensions, data pipelines and settings.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_grid::core::options::{OptionKind, OptionSchema};
//! use serde_json::json;
//!
//! let mut schema = OptionSchema::new();
//! schema.define("width").default(100).allowed_types([OptionKind::Integer]);
//! assert!(schema.resolve(&json!({"width": "wide"})).is_err());
//! ```

pub use reinhardt_grid_core::*;
