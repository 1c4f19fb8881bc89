//! Relative column ordering for Reinhardt grids
//!
//! Columns may declare where they want to appear relative to their siblings:
//! `"first"`, `"last"`, `{"before": "<key>"}` or `{"after": "<key>"}`. Columns
//! without a declaration keep their natural declaration order and interleave
//! with positioned ones through a moving insertion cursor.
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[PositionedEntry list] --> B[GridOrderer]
//!     B --> C{target weighted?}
//!     C -->|yes| D[insert at weight + shift]
//!     C -->|no| E[deferred bucket]
//!     E -->|cycle / symmetric check| F[OrderingError]
//!     D --> G[drain deferred worklist]
//!     G --> D
//!     D --> H[keys sorted by weight]
//! ```
//!
//! # Example
//!
//! ```rust
//! use reinhardt_grid_ordering::{GridOrderer, Position, PositionedEntry};
//!
//! let entries = vec![
//!     PositionedEntry::unpositioned("name"),
//!     PositionedEntry::new("email", Some(Position::Before("name".to_string()))),
//!     PositionedEntry::new("id", Some(Position::First)),
//! ];
//!
//! let order = GridOrderer::order(&entries).unwrap();
//! assert_eq!(order, vec!["id", "email", "name"]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod orderer;
pub mod position;

pub use error::{OrderingError, OrderingResult};
pub use orderer::GridOrderer;
pub use position::{Position, PositionedEntry, Relation};
