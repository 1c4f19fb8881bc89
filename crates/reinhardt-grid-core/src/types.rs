//! Type traits
//!
//! A type is a named, inheritable unit of configuration and build logic for
//! one kind of entity. Inheritance is an explicit parent identifier resolved
//! through the [`TypeResolver`](crate::registry::TypeResolver); the
//! composition engine walks the chain root first.
//!
//! ## Kinds
//!
//! Each entity kind (grid, column, filter, component) is a marker
//! implementing [`TypeKind`], which ties together the entity and view types
//! its type nodes operate on. The marker is also the key the resolver uses
//! to keep the registries of different kinds apart.

use crate::context::AmbientContext;
use crate::error::GridResult;
use crate::options::{OptionSchema, ResolvedOptions};
use crate::pipeline::DataPipeline;

/// Entity kind marker.
pub trait TypeKind: Send + Sync + 'static {
	/// Kind name used in errors and logs (`"column"`, `"filter"`, ...).
	const LABEL: &'static str;

	/// Entity the kind's types are applied to.
	type Entity;

	/// View the kind's types build.
	type View;
}

/// Context handed to option contributions.
#[derive(Debug, Clone, Copy)]
pub struct TypeContext<'a> {
	/// Name of the entity whose options are being declared.
	pub name: &'a str,
	/// Ambient grid context.
	pub ambient: &'a AmbientContext,
}

impl<'a> TypeContext<'a> {
	/// Creates a context.
	pub fn new(name: &'a str, ambient: &'a AmbientContext) -> Self {
		Self { name, ambient }
	}
}

/// A node of a type hierarchy.
///
/// Every contribution has a no-op default so a type only implements the
/// phases it takes part in.
///
/// # Examples
///
/// ```
/// use reinhardt_grid_core::options::{OptionKind, OptionSchema};
/// use reinhardt_grid_core::types::{TypeContext, TypeKind, TypeNode};
///
/// struct Badge;
/// impl TypeKind for Badge {
///     const LABEL: &'static str = "badge";
///     type Entity = ();
///     type View = Vec<String>;
/// }
///
/// struct RoundBadge;
///
/// impl TypeNode<Badge> for RoundBadge {
///     fn name(&self) -> &str {
///         "round"
///     }
///
///     fn parent(&self) -> Option<&str> {
///         Some("badge")
///     }
///
///     fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
///         schema.define("radius").default(4).allowed_types([OptionKind::Integer]);
///     }
/// }
/// ```
pub trait TypeNode<K: TypeKind>: Send + Sync {
	/// Type identifier.
	fn name(&self) -> &str;

	/// Identifier of the parent type, `None` for a root type.
	fn parent(&self) -> Option<&str> {
		None
	}

	/// Declares or re-declares options.
	fn configure_options(&self, _schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {}

	/// Contributes to a view under construction.
	fn build_view(
		&self,
		_view: &mut K::View,
		_entity: &K::Entity,
		_options: &ResolvedOptions,
	) -> GridResult<()> {
		Ok(())
	}

	/// Populates the entity's transformer chain.
	fn build_data(&self, _pipeline: &mut DataPipeline, _options: &ResolvedOptions) -> GridResult<()> {
		Ok(())
	}
}

/// Contributor bound to one exact type, outside the inheritance chain.
///
/// Extensions of `text` do not apply to types whose parent is `text`.
pub trait TypeExtension<K: TypeKind>: Send + Sync {
	/// Identifier of the type this extension targets.
	fn extended_type(&self) -> &str;

	/// Declares additional options after the whole type chain.
	fn configure_options(&self, _schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {}

	/// Mutates the view after the whole type chain.
	fn build_view(
		&self,
		_view: &mut K::View,
		_entity: &K::Entity,
		_options: &ResolvedOptions,
	) -> GridResult<()> {
		Ok(())
	}
}
