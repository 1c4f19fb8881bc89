//! Composition of resolved type chains
//!
//! [`ResolvedType`] is what an entity holds on to: its type chain root first
//! plus the extensions of its exact type. Every phase walks the chain in
//! that order.
//!
//! ```mermaid
//! graph LR
//!     A[root type] --> B[...] --> C[leaf type] --> D[extensions]
//! ```

use crate::context::AmbientContext;
use crate::error::{GridError, GridResult};
use crate::options::{OptionSchema, ResolvedOptions};
use crate::pipeline::DataPipeline;
use crate::types::{TypeContext, TypeExtension, TypeKind, TypeNode};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A leaf type with its full parent chain and exact-type extensions.
pub struct ResolvedType<K: TypeKind> {
	name: String,
	chain: Vec<Arc<dyn TypeNode<K>>>,
	extensions: Vec<Arc<dyn TypeExtension<K>>>,
}

impl<K: TypeKind> Clone for ResolvedType<K> {
	fn clone(&self) -> Self {
		Self {
			name: self.name.clone(),
			chain: self.chain.clone(),
			extensions: self.extensions.clone(),
		}
	}
}

impl<K: TypeKind> ResolvedType<K> {
	pub(crate) fn new(
		name: &str,
		chain: Vec<Arc<dyn TypeNode<K>>>,
		extensions: Vec<Arc<dyn TypeExtension<K>>>,
	) -> Self {
		Self {
			name: name.to_string(),
			chain,
			extensions,
		}
	}

	/// Identifier the type was resolved from.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Names of the chain, root first.
	pub fn type_names(&self) -> Vec<&str> {
		self.chain.iter().map(|node| node.name()).collect()
	}

	/// Whether `name` is the leaf type or one of its ancestors.
	pub fn is_a(&self, name: &str) -> bool {
		self.name == name || self.chain.iter().any(|node| node.name() == name)
	}

	/// Number of extensions bound to the leaf type.
	pub fn extension_count(&self) -> usize {
		self.extensions.len()
	}

	/// Builds the merged option schema: chain root to leaf, then extensions.
	pub fn option_schema(&self, ctx: &TypeContext<'_>) -> OptionSchema {
		let mut schema = OptionSchema::new();
		for node in &self.chain {
			node.configure_options(&mut schema, ctx);
		}
		for extension in &self.extensions {
			extension.configure_options(&mut schema, ctx);
		}
		schema
	}

	/// Resolves the raw options of the entity `entity`.
	pub fn resolve_options(
		&self,
		entity: &str,
		raw: &Value,
		ambient: &AmbientContext,
	) -> GridResult<ResolvedOptions> {
		let ctx = TypeContext::new(entity, ambient);
		let schema = self.option_schema(&ctx);
		let options = schema
			.resolve(raw)
			.map_err(|e| GridError::option(K::LABEL, entity, e))?;
		tracing::debug!(
			kind = K::LABEL,
			entity,
			type_name = %self.name,
			options = options.len(),
			"resolved options"
		);
		Ok(options)
	}

	/// Cascades view building: chain root to leaf, then extensions in
	/// registration order, all on the same view.
	pub fn build_view(
		&self,
		view: &mut K::View,
		entity: &K::Entity,
		options: &ResolvedOptions,
	) -> GridResult<()> {
		for node in &self.chain {
			node.build_view(view, entity, options)?;
		}
		for extension in &self.extensions {
			extension.build_view(view, entity, options)?;
		}
		tracing::trace!(kind = K::LABEL, type_name = %self.name, "built view");
		Ok(())
	}

	/// Cascades data building once per pipeline; later calls are no-ops.
	///
	/// The cascade runs on a staged copy, so a failing node leaves
	/// `pipeline` untouched and still unbuilt.
	pub fn build_data(
		&self,
		entity: &str,
		pipeline: &mut DataPipeline,
		options: &ResolvedOptions,
	) -> GridResult<()> {
		if pipeline.is_built() {
			tracing::trace!(kind = K::LABEL, entity, "data pipeline already built");
			return Ok(());
		}
		let mut staged = pipeline.clone();
		for node in &self.chain {
			node.build_data(&mut staged, options)?;
		}
		staged.mark_built();
		*pipeline = staged;
		tracing::debug!(
			kind = K::LABEL,
			entity,
			transformers = ?pipeline.names(),
			"built data pipeline"
		);
		Ok(())
	}
}

impl<K: TypeKind> fmt::Debug for ResolvedType<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResolvedType")
			.field("kind", &K::LABEL)
			.field("name", &self.name)
			.field("chain", &self.type_names())
			.field("extensions", &self.extensions.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{OptionError, TransformError};
	use crate::options::OptionKind;
	use crate::pipeline::CallbackTransformer;
	use crate::registry::TypeResolver;
	use crate::settings::GridSettings;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::sync::atomic::{AtomicBool, Ordering};

	struct Widget;
	impl TypeKind for Widget {
		const LABEL: &'static str = "widget";
		type Entity = ();
		type View = Vec<String>;
	}

	struct Level {
		name: &'static str,
		parent: Option<&'static str>,
		size_default: i64,
		size_types: Vec<OptionKind>,
	}

	impl TypeNode<Widget> for Level {
		fn name(&self) -> &str {
			self.name
		}

		fn parent(&self) -> Option<&str> {
			self.parent
		}

		fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
			schema
				.define("size")
				.default(self.size_default)
				.allowed_types(self.size_types.clone());
		}

		fn build_view(&self, view: &mut Vec<String>, _: &(), _: &ResolvedOptions) -> GridResult<()> {
			view.push(self.name.to_string());
			Ok(())
		}

		fn build_data(&self, pipeline: &mut DataPipeline, _: &ResolvedOptions) -> GridResult<()> {
			let name = self.name;
			pipeline.add(CallbackTransformer::new(name, |value, _| Ok(value)));
			Ok(())
		}
	}

	struct Badge;
	impl TypeExtension<Widget> for Badge {
		fn extended_type(&self) -> &str {
			"leaf"
		}

		fn configure_options(&self, schema: &mut OptionSchema, _ctx: &TypeContext<'_>) {
			schema.define("badge").default(false);
		}

		fn build_view(&self, view: &mut Vec<String>, _: &(), options: &ResolvedOptions) -> GridResult<()> {
			view.push(format!("badge={}", options.flag("badge")));
			Ok(())
		}
	}

	#[fixture]
	fn resolver() -> TypeResolver {
		let resolver = TypeResolver::new();
		resolver.register::<Widget>(Level {
			name: "root",
			parent: None,
			size_default: 1,
			size_types: vec![OptionKind::Integer],
		});
		resolver.register::<Widget>(Level {
			name: "middle",
			parent: Some("root"),
			size_default: 2,
			size_types: vec![OptionKind::Integer, OptionKind::String],
		});
		resolver.register::<Widget>(Level {
			name: "leaf",
			parent: Some("middle"),
			size_default: 3,
			size_types: vec![OptionKind::Any],
		});
		resolver.register_extension::<Widget>(Badge).unwrap();
		resolver
	}

	#[fixture]
	fn ambient() -> AmbientContext {
		AmbientContext::new(Arc::new(GridSettings::default()))
	}

	#[rstest]
	fn test_leaf_default_wins_but_ancestor_constraint_applies(
		resolver: TypeResolver,
		ambient: AmbientContext,
	) {
		// Arrange
		let leaf = resolver.resolve_type::<Widget>("leaf").unwrap();

		// Act
		let defaults = leaf.resolve_options("p", &json!({}), &ambient).unwrap();
		let rejected = leaf.resolve_options("p", &json!({"size": "large"}), &ambient);

		// Assert
		assert_eq!(defaults.get_i64("size"), Some(3));
		let err = rejected.unwrap_err();
		assert!(matches!(
			err.as_option_error(),
			Some(OptionError::InvalidType { name, .. }) if name == "size"
		));
	}

	#[rstest]
	fn test_view_cascade_runs_root_first_then_extensions(
		resolver: TypeResolver,
		ambient: AmbientContext,
	) {
		// Arrange
		let leaf = resolver.resolve_type::<Widget>("leaf").unwrap();
		let options = leaf
			.resolve_options("p", &json!({"badge": true}), &ambient)
			.unwrap();
		let mut view = Vec::new();

		// Act
		leaf.build_view(&mut view, &(), &options).unwrap();

		// Assert
		assert_eq!(view, vec!["root", "middle", "leaf", "badge=true"]);
	}

	#[rstest]
	fn test_extension_options_are_not_inherited(resolver: TypeResolver, ambient: AmbientContext) {
		let middle = resolver.resolve_type::<Widget>("middle").unwrap();
		let result = middle.resolve_options("p", &json!({"badge": true}), &ambient);
		assert!(matches!(
			result.unwrap_err().as_option_error(),
			Some(OptionError::UndefinedOption { .. })
		));
	}

	#[rstest]
	fn test_data_build_runs_once(resolver: TypeResolver) {
		// Arrange
		let leaf = resolver.resolve_type::<Widget>("leaf").unwrap();
		let options = ResolvedOptions::new();
		let mut pipeline = DataPipeline::new();

		// Act
		leaf.build_data("p", &mut pipeline, &options).unwrap();
		leaf.build_data("p", &mut pipeline, &options).unwrap();

		// Assert
		assert_eq!(pipeline.len(), 3);
		assert_eq!(pipeline.names(), vec!["leaf", "middle", "root"]);
		assert!(pipeline.is_built());
	}

	struct FailsOnce {
		failed: AtomicBool,
	}

	impl TypeNode<Widget> for FailsOnce {
		fn name(&self) -> &str {
			"flaky"
		}

		fn parent(&self) -> Option<&str> {
			Some("root")
		}

		fn build_data(&self, pipeline: &mut DataPipeline, _: &ResolvedOptions) -> GridResult<()> {
			if !self.failed.swap(true, Ordering::SeqCst) {
				return Err(GridError::Transform {
					entity: "p".to_string(),
					source: TransformError::Failed {
						transformer: "flaky".to_string(),
						message: "not ready".to_string(),
					},
				});
			}
			pipeline.add(CallbackTransformer::new("flaky", |value, _| Ok(value)));
			Ok(())
		}
	}

	#[rstest]
	fn test_failed_data_build_leaves_pipeline_untouched(resolver: TypeResolver) {
		// Arrange
		resolver.register::<Widget>(FailsOnce {
			failed: AtomicBool::new(false),
		});
		let flaky = resolver.resolve_type::<Widget>("flaky").unwrap();
		let options = ResolvedOptions::new();
		let mut pipeline = DataPipeline::new();

		// Act
		let first = flaky.build_data("p", &mut pipeline, &options);
		let untouched = pipeline.is_empty() && !pipeline.is_built();
		flaky.build_data("p", &mut pipeline, &options).unwrap();

		// Assert
		assert!(first.is_err());
		assert!(untouched);
		assert_eq!(pipeline.names(), vec!["flaky", "root"]);
		assert!(pipeline.is_built());
	}

	#[rstest]
	fn test_is_a_covers_ancestors(resolver: TypeResolver) {
		let leaf = resolver.resolve_type::<Widget>("leaf").unwrap();
		assert!(leaf.is_a("root"));
		assert!(leaf.is_a("leaf"));
		assert!(!leaf.is_a("other"));
	}
}
