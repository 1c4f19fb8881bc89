//! Relative column ordering.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_grid::ordering::{GridOrderer, Position, PositionedEntry};
//!
//! let order = GridOrderer::order(&[
//!     PositionedEntry::unpositioned("name"),
//!     PositionedEntry::new("id", Some(Position::First)),
//! ])
//! .unwrap();
//! assert_eq!(order, vec!["id", "name"]);
//! ```

pub use reinhardt_grid_ordering::*;
