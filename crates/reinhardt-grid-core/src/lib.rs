//! Type composition engine for Reinhardt grids
//!
//! Grids, columns, filters and components are described by inheritable
//! *types*. Each type contributes option declarations, a view contribution
//! and, for data-bearing kinds, transformers for the data pipeline. This
//! crate provides the machinery; the concrete types live in
//! `reinhardt-grid-types`.
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[TypeResolver] -->|resolve_type| B[ResolvedType]
//!     B -->|option_schema + resolve| C[ResolvedOptions]
//!     B -->|build_view| D[View]
//!     B -->|build_data once| E[DataPipeline]
//!     F[AmbientContext] --> B
//! ```
//!
//! # Features
//!
//! - Option schemas with defaults, lazy defaults, allowed types and values,
//!   required options and chained normalizers
//! - Root-first cascades for options, views and data pipelines
//! - Exact-type extensions
//! - Managed and link-time (`inventory`) type registration
//! - TOML / environment configured [`GridSettings`]

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod composition;
pub mod context;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod registry;
pub mod settings;
pub mod source;
pub mod types;

#[doc(hidden)]
pub use inventory;

pub use composition::ResolvedType;
pub use context::AmbientContext;
pub use error::{GridError, GridResult, OptionError, TransformError, TypeResolutionError};
pub use options::{OptionDeclaration, OptionKind, OptionSchema, ResolvedOptions};
pub use pipeline::{CallbackTransformer, DataPipeline, DataTransformer, PipelineState};
pub use registry::{MAX_TYPE_DEPTH, TypeRegistration, TypeRegistry, TypeResolver};
pub use settings::{GridSettings, SettingsError, TemplateSettings};
pub use source::{DataSource, PathAccessor, ValueAccessor};
pub use types::{TypeContext, TypeExtension, TypeKind, TypeNode};

/// Re-exports for implementing types.
pub mod prelude {
	pub use crate::composition::ResolvedType;
	pub use crate::context::AmbientContext;
	pub use crate::error::{GridError, GridResult, TransformError};
	pub use crate::options::{OptionKind, OptionSchema, ResolvedOptions};
	pub use crate::pipeline::{CallbackTransformer, DataPipeline, DataTransformer};
	pub use crate::register_type;
	pub use crate::types::{TypeContext, TypeExtension, TypeKind, TypeNode};
}
