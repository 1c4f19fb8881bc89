//! Option schemas and resolved options
//!
//! Every type in a chain contributes declarations to one shared
//! [`OptionSchema`]; the schema then turns raw user input into an immutable
//! [`ResolvedOptions`] map.

pub mod kind;
pub mod resolved;
pub mod schema;

pub use kind::OptionKind;
pub use resolved::ResolvedOptions;
pub use schema::{OptionDeclaration, OptionSchema};
